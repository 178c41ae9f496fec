//! Router-level tests for the Contract Shield server
//!
//! Requests go through the full middleware stack with `oneshot`.
//!
//! Test categories:
//! - Health and rule listing
//! - Upload analysis for PDF and DOCX
//! - Error surface (unsupported, corrupt, empty, oversized, missing file)
//! - Plain-text analysis

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::Value;
use text_extract::fixtures::{docx_with_paragraphs, pdf_with_composite_font, pdf_with_pages};
use tower::ServiceExt;

use crate::{app, AppState};

const BOUNDARY: &str = "contract-shield-test-boundary";
const TEST_UPLOAD_LIMIT: usize = 2 * 1024 * 1024;

const RISKY_PARAGRAPHS: &[&str] = &[
    "CONSULTING AGREEMENT",
    "1. The Consultant accepts unlimited liability for any losses arising from the services.",
    "2. The Consultant shall indemnify and hold harmless the Company against all claims.",
    "3. Payment terms: Net 90 from receipt of a valid invoice.",
];

const LOW_RISK_PAGES: &[&str] = &[
    "FREELANCE SERVICES AGREEMENT\nThe Contractor's total liability is capped at the fees paid.",
    "Either party may end this Agreement with 30 days written notice.\nInvoices are payable Net 15.",
];

fn router() -> Router {
    app(AppState::default(), TEST_UPLOAD_LIMIT)
}

fn multipart_request(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_routes() {
    for uri in ["/", "/health"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, json) = send(router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}

#[tokio::test]
async fn test_rules_route_lists_table() {
    let request = Request::builder()
        .uri("/api/rules")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 7);
    assert_eq!(json["rules"][1]["title"], "Broad Indemnity Clause");
}

#[tokio::test]
async fn test_analyze_risky_docx() {
    let docx = docx_with_paragraphs(RISKY_PARAGRAPHS);
    let request = multipart_request(
        "file",
        "consulting.docx",
        shared_types::document::DOCX_MIME,
        &docx,
    );
    let (status, json) = send(router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["risk_score"], 60);

    let titles: Vec<&str> = json["red_flags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Unlimited Liability",
            "Broad Indemnity Clause",
            "Unfavorable Payment Terms"
        ]
    );
    assert_eq!(json["red_flags"][0]["severity"], "high");
    assert_eq!(json["red_flags"][2]["severity"], "low");
    assert_eq!(json["negotiation_tips"].as_array().unwrap().len(), 3);
    assert!(json["draft_email"]
        .as_str()
        .unwrap()
        .contains("A Few Clauses to Discuss"));

    let expected_length = RISKY_PARAGRAPHS.join("\n").chars().count();
    assert_eq!(json["text_length"], expected_length);
}

#[tokio::test]
async fn test_analyze_low_risk_pdf() {
    let pdf = pdf_with_pages(LOW_RISK_PAGES);
    let request = multipart_request("file", "freelance.pdf", "application/pdf", &pdf);
    let (status, json) = send(router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["risk_score"], 0);
    assert_eq!(json["red_flags"], Value::Array(vec![]));
    assert!(json["draft_email"]
        .as_str()
        .unwrap()
        .contains("Ready to Proceed"));
    assert!(json["summary"]
        .as_str()
        .unwrap()
        .starts_with("FREELANCE SERVICES AGREEMENT\nThe Contractor's"));
}

#[tokio::test]
async fn test_analyze_composite_font_pdf() {
    let line = "The Consultant accepts unlimited liability for any losses arising from the services.";
    let pdf = pdf_with_composite_font(line, true);
    let request = multipart_request("file", "exported.pdf", "application/pdf", &pdf);
    let (status, json) = send(router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["risk_score"], 25);
    assert_eq!(json["red_flags"][0]["title"], "Unlimited Liability");
    assert_eq!(json["summary"], line);
}

#[tokio::test]
async fn test_undecodable_pdf_is_insufficient_text() {
    let line = "The Consultant accepts unlimited liability for any losses arising from the services.";
    let pdf = pdf_with_composite_font(line, false);
    let request = multipart_request("file", "exported.pdf", "application/pdf", &pdf);
    let (status, json) = send(router(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INSUFFICIENT_TEXT");
}

#[tokio::test]
async fn test_content_type_used_when_name_has_no_extension() {
    let pdf = pdf_with_pages(LOW_RISK_PAGES);
    let request = multipart_request("file", "upload", "application/pdf", &pdf);
    let (status, _) = send(router(), request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unsupported_format() {
    let request = multipart_request("file", "contract.txt", "text/plain", b"plain text");
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["code"], "UNSUPPORTED_FORMAT");
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_corrupt_pdf() {
    let request = multipart_request(
        "file",
        "broken.pdf",
        "application/pdf",
        b"this is not a pdf at all",
    );
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CORRUPT_DOCUMENT");
}

#[tokio::test]
async fn test_empty_upload_is_insufficient_text() {
    let request = multipart_request("file", "empty.docx", "application/octet-stream", b"");
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INSUFFICIENT_TEXT");
}

#[tokio::test]
async fn test_image_only_pdf_is_insufficient_text() {
    let pdf = pdf_with_pages(&["", ""]);
    let request = multipart_request("file", "scan.pdf", "application/pdf", &pdf);
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INSUFFICIENT_TEXT");
}

#[tokio::test]
async fn test_missing_file_field() {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_upload_over_limit() {
    let small = app(AppState::default(), 1024);
    let request = multipart_request("file", "big.pdf", "application/pdf", &vec![b'x'; 8 * 1024]);
    let (status, _) = send(small, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_analyze_text_route() {
    let text = RISKY_PARAGRAPHS.join("\n");
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze/text")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "text": text }).to_string()))
        .unwrap();
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["risk_score"], 60);
}

#[tokio::test]
async fn test_analyze_text_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze/text")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let (status, json) = send(router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_REQUEST");
    assert_eq!(json["success"], false);
}

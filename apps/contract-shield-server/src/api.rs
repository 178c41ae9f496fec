//! API handlers for the Contract Shield server
//!
//! Provides REST endpoints for:
//! - Contract upload and analysis
//! - Plain-text analysis
//! - Rule listing

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

use shared_types::AnalysisResult;

/// Name of the multipart field carrying the contract
pub const FILE_FIELD: &str = "file";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET / and GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "contract-shield",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Rule list response
#[derive(Serialize)]
pub struct RuleListResponse {
    pub success: bool,
    pub rules: Vec<RuleInfo>,
    pub count: usize,
}

/// Rule metadata
#[derive(Serialize)]
pub struct RuleInfo {
    pub id: String,
    pub title: String,
    pub severity: String,
    pub points: u32,
    pub explanation: String,
    pub negotiation_tip: String,
}

/// Handler: GET /api/rules
pub async fn handle_list_rules(State(state): State<AppState>) -> Json<RuleListResponse> {
    let rules: Vec<RuleInfo> = state
        .engine
        .rules()
        .iter()
        .map(|r| RuleInfo {
            id: r.id.to_string(),
            title: r.title.to_string(),
            severity: r.severity.as_str().to_string(),
            points: r.points,
            explanation: r.explanation.to_string(),
            negotiation_tip: r.negotiation_tip.to_string(),
        })
        .collect();

    let count = rules.len();

    Json(RuleListResponse {
        success: true,
        rules,
        count,
    })
}

/// An uploaded file, read fully into memory
struct Upload {
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Handler: POST /api/analyze
///
/// Accepts `multipart/form-data`; the `file` field (or the first field with
/// a file name) is extracted, scored and composed into an [`AnalysisResult`].
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, ServerError> {
    let upload = read_upload(multipart).await?;

    info!(
        filename = upload.filename.as_deref().unwrap_or("unknown"),
        content_type = upload.content_type.as_deref().unwrap_or("unknown"),
        bytes = upload.data.len(),
        "Analyzing contract"
    );

    let AppState { extractor, engine } = state;
    let result = tokio::task::spawn_blocking(move || {
        let text = extractor.extract_declared(
            &upload.data,
            upload.filename.as_deref(),
            upload.content_type.as_deref(),
        )?;
        Ok::<_, ServerError>(engine.analyze(&text))
    })
    .await
    .map_err(|e| ServerError::Internal(format!("analysis task failed: {}", e)))??;

    info!(
        risk_score = result.risk_score,
        red_flags = result.red_flags.len(),
        "Analysis complete"
    );

    Ok(Json(result))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ServerError> {
    while let Some(field) = multipart.next_field().await? {
        let is_file =
            field.name() == Some(FILE_FIELD) || field.file_name().is_some_and(|n| !n.is_empty());
        if !is_file {
            debug!(field = field.name().unwrap_or(""), "Skipping form field");
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?.to_vec();

        return Ok(Upload {
            filename,
            content_type,
            data,
        });
    }

    Err(ServerError::InvalidRequest(format!(
        "No file uploaded. Send the contract in the '{}' field.",
        FILE_FIELD
    )))
}

/// Plain-text analysis request
#[derive(Deserialize)]
pub struct AnalyzeTextRequest {
    /// Contract text, already extracted
    pub text: String,
}

/// Handler: POST /api/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ServerError> {
    let Json(req) = payload?;
    info!(chars = req.text.chars().count(), "Analyzing pasted contract text");

    let text = state.extractor.validate_text(req.text)?;
    Ok(Json(state.engine.analyze(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = handle_health().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.service, "contract-shield");
    }

    #[tokio::test]
    async fn test_list_rules() {
        let response = handle_list_rules(State(AppState::default())).await;
        assert!(response.success);
        assert_eq!(response.count, 7);
        assert_eq!(response.rules[0].id, "unlimited-liability");
        assert_eq!(response.rules[0].severity, "high");
        assert_eq!(response.rules[6].points, 10);
    }

    #[tokio::test]
    async fn test_analyze_text_rejects_short_text() {
        let req = AnalyzeTextRequest {
            text: "Too short.".to_string(),
        };
        let err = handle_analyze_text(State(AppState::default()), Ok(Json(req)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::InsufficientText(_)));
    }
}

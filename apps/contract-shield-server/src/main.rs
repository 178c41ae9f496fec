//! Contract Shield API Server
//!
//! Accepts an uploaded contract (PDF or DOCX), extracts its text and scores
//! it against a fixed table of risky-clause rules. Provides REST API
//! endpoints for:
//!
//! - Contract analysis (multipart upload or plain text)
//! - Rule listing
//! - Health checks
//!
//! ## Architecture
//!
//! Each request runs one synchronous pipeline, Extract -> Score -> Compose,
//! on the blocking thread pool. The rule table is compiled once and shared
//! read-only between requests; nothing is persisted.

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use risk_engine::RiskEngine;
use text_extract::{TextExtractor, DEFAULT_MIN_TEXT_CHARS};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_analyze, handle_analyze_text, handle_health, handle_list_rules};

const BYTES_PER_MB: usize = 1024 * 1024;

/// Command-line arguments for the Contract Shield server
#[derive(Parser, Debug)]
#[command(name = "contract-shield-server")]
#[command(about = "Contract risk analysis API")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Largest accepted upload, in megabytes
    #[arg(long, default_value = "10")]
    max_upload_mb: usize,

    /// Documents with less extractable text than this are rejected
    #[arg(long, default_value_t = DEFAULT_MIN_TEXT_CHARS)]
    min_text_chars: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone, Copy, Default)]
pub struct AppState {
    pub extractor: TextExtractor,
    pub engine: RiskEngine,
}

/// Build the router with all routes and middleware
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    // The browser UI is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/", get(handle_health))
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/rules", get(handle_list_rules))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/analyze/text", post(handle_analyze_text))
        // Apply middleware
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Contract Shield server on {}:{}", args.host, args.port);

    let state = AppState {
        extractor: TextExtractor::with_min_text_chars(args.min_text_chars),
        engine: RiskEngine::new(),
    };
    let max_upload_bytes = args.max_upload_mb.saturating_mul(BYTES_PER_MB);

    let router = app(state, max_upload_bytes);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Loaded {} risk rules", state.engine.rules().len());
    info!("Upload limit: {} MB", args.max_upload_mb);
    info!("Minimum text: {} characters", args.min_text_chars);

    axum::serve(listener, router).await?;

    Ok(())
}

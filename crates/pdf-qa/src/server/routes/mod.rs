//! API routes for the Q&A server

pub mod documents;
pub mod question;
pub mod reset;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Router,
};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for PDFs
        .route(
            "/documents",
            post(documents::upload_documents).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/question", post(question::ask_question))
        .route("/reset_index", post(reset::reset_index))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let llm = state.llm_provider();
    axum::Json(serde_json::json!({
        "name": "pdf-qa",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Ask questions about uploaded PDF documents",
        "providers": {
            "embeddings": state.embedding_provider().name(),
            "llm": llm.name(),
            "llm_model": llm.model(),
            "vector_store": state.vector_store().name()
        },
        "endpoints": {
            "POST /documents": "Upload PDFs (multipart field 'files') and index them",
            "POST /question": "Answer a question from the indexed PDFs",
            "POST /reset_index": "Delete every indexed chunk",
            "GET /health": "Liveness check",
            "GET /ready": "Readiness check"
        }
    }))
}

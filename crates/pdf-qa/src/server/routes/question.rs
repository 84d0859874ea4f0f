//! Question answering endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{AnswerResponse, QuestionRequest};

/// POST /question - Answer a question from the indexed PDFs
pub async fn ask_question(
    State(state): State<AppState>,
    request: std::result::Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>> {
    let Json(request) = request.map_err(|e| Error::invalid_request(e.body_text()))?;
    tracing::info!("Question: {}", request.question.trim());

    let response = state.composer().answer(&request.question).await?;
    Ok(Json(response))
}

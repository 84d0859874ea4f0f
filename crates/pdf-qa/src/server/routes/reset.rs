//! Index reset endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::ResetResponse;

/// POST /reset_index - Drop every indexed chunk and the persisted index
pub async fn reset_index(State(state): State<AppState>) -> Result<Json<ResetResponse>> {
    let had_persisted_index = state.vector_store().reset().await?;
    Ok(Json(ResetResponse::new(had_persisted_index)))
}

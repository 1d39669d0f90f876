use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::api::PendingQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/moderate/pending?page=&limit= - pending jokes, one page at a time
pub async fn get(State(state): State<AppState>, Query(query): Query<PendingQuery>) -> Result<Json<Value>, ApiError> {
    let (page, limit) = query.pagination()?;
    Ok(Json(state.moderation.list_pending_jokes(page, limit).await?))
}

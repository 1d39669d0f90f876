use axum::{extract::State, Json};
use serde_json::Value;

use crate::api::ValidatedJson;
use crate::error::ApiError;
use crate::models::CreateJokeType;
use crate::state::AppState;

/// GET /api/v1/moderate/types - joke types known to the delivery service
pub async fn get(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.moderation.list_joke_types().await?))
}

/// POST /api/v1/moderate/types - create a joke type in the delivery service
pub async fn post(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateJokeType>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.moderation.create_joke_type(&input).await?))
}

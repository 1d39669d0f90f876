use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde_json::Value;

use crate::api::IdQuery;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// DELETE /api/v1/moderate/delete?id= - delete a joke from the submit service
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = query.require_id()?;
    tracing::info!(moderator = %user.email, joke_id = %id, "delete requested");

    Ok(Json(state.moderation.delete_joke(id).await?))
}

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::api::{IdQuery, ValidatedJson};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{JokePatch, UpdateOutcome};
use crate::state::AppState;

/// PUT /api/v1/moderate/update?id= - patch a joke; approving it also publishes it
///
/// Plain updates answer with the submit service's joke. A successful approval answers with
/// `{ "updatedJoke": {...}, "deliveryJoke": {...}, "message": "..." }`.
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
    ValidatedJson(patch): ValidatedJson<JokePatch>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = query.require_id()?;
    tracing::info!(
        moderator = %user.email,
        joke_id = %id,
        status = patch.status.map(|s| s.as_str()).unwrap_or("unchanged"),
        "update requested"
    );

    Ok(Json(state.moderation.update_joke(id, &patch).await?))
}

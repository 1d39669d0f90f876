// handlers/public/auth/verify.rs - POST /api/v1/auth/verify handler

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{Validate, ValidatedJson};
use crate::auth::validate_jwt;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

impl Validate for VerifyRequest {
    fn validate(&self) -> Result<(), ApiError> {
        match self.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(()),
            _ => Err(ApiError::bad_request("Token is required")),
        }
    }
}

/// POST /api/v1/auth/verify - Report whether a token is valid
///
/// An invalid token is still a 200 answer: `{ "valid": false, "message": "Invalid token" }`.
pub async fn verify_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyRequest>,
) -> Json<Value> {
    let token = payload.token.unwrap_or_default();

    match validate_jwt(&state.config.security, token.trim()) {
        Ok(claims) => Json(json!({ "valid": true, "user": claims })),
        Err(e) => {
            tracing::debug!(error = %e, "token verification failed");
            Json(json!({ "valid": false, "message": "Invalid token" }))
        }
    }
}

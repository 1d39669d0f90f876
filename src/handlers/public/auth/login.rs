// handlers/public/auth/login.rs - POST /api/v1/auth/login handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::{Validate, ValidatedJson};
use crate::auth::{credentials_match, generate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// POST /api/v1/auth/login - Authenticate the operator and receive a JWT
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Expected Output:
/// ```json
/// { "message": "Authentication successful", "token": "eyJhbGciOiJIUzI1NiI...", "expiresIn": 86400 }
/// ```
pub async fn login_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let security = &state.config.security;

    if !credentials_match(security, &payload.email, &payload.password) {
        tracing::warn!(email = %payload.email, "rejected login attempt");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let claims = Claims::new(payload.email, security.jwt_expiry_hours);
    let token = generate_jwt(security, &claims).map_err(|e| {
        tracing::error!(error = %e, "failed to sign token");
        ApiError::internal_server_error("Failed to generate token")
    })?;

    tracing::info!(email = %claims.email, "operator logged in");

    Ok(Json(LoginResponse {
        message: "Authentication successful".to_string(),
        token,
        expires_in: security.jwt_expiry_hours * 3600,
    }))
}

//! Request validation for the moderation routes.
//!
//! Bodies go through [`ValidatedJson`], which turns malformed JSON, unknown
//! fields and rule violations into `ApiError` JSON bodies instead of axum's
//! plain-text rejections. Query parameters are checked by the query structs.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{CreateJokeType, JokePatch};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MIN_CONTENT_CHARS: usize = 5;

/// Rules a request body must satisfy beyond deserializing.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

impl Validate for CreateJokeType {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::field_error("name", "Name cannot be empty"));
        }
        Ok(())
    }
}

impl Validate for JokePatch {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(content) = &self.content {
            if content.chars().count() < MIN_CONTENT_CHARS {
                return Err(ApiError::field_error(
                    "content",
                    format!("Content must be at least {} characters long", MIN_CONTENT_CHARS),
                ));
            }
        }
        if matches!(&self.joke_type, Some(t) if t.trim().is_empty()) {
            return Err(ApiError::field_error("type", "Type cannot be empty"));
        }
        if matches!(&self.author, Some(a) if a.trim().is_empty()) {
            return Err(ApiError::field_error("author", "Author cannot be empty"));
        }
        Ok(())
    }
}

/// JSON body extractor that deserializes and validates `T`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

        let parsed: T = serde_json::from_value(value)
            .map_err(|e| ApiError::validation_error(format!("Invalid request body: {}", e), None))?;

        parsed.validate()?;
        Ok(ValidatedJson(parsed))
    }
}

/// `?id=` on delete and update.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn require_id(&self) -> Result<&str, ApiError> {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ApiError::bad_request("Joke id is required")),
        }
    }
}

/// `?page=&limit=` on the pending list. Kept as strings so bad numbers get our own 400.
#[derive(Debug, Default, Deserialize)]
pub struct PendingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PendingQuery {
    /// Absent values take the defaults; anything but a positive integer is rejected.
    pub fn pagination(&self) -> Result<(u32, u32), ApiError> {
        Ok((
            positive_or(self.page.as_deref(), DEFAULT_PAGE)?,
            positive_or(self.limit.as_deref(), DEFAULT_LIMIT)?,
        ))
    }
}

fn positive_or(raw: Option<&str>, default: u32) -> Result<u32, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => match v.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ApiError::bad_request("Page and limit must be positive numbers.")),
        },
    }
}

use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use url::form_urlencoded;

use crate::models::{
    ApprovalOutcome, CreateJokeType, DeliveryJokeRequest, Joke, JokePatch, JokeType, PendingJokes, UpdateOutcome,
};
use crate::upstream::{decode_body, Upstream, UpstreamError};

const DELIVERY_TYPES_PATH: &str = "/api/v1/delivery/types";
const DELIVERY_SUBMIT_PATH: &str = "/api/v1/delivery/submit";

/// Outcome of the compensating update issued after a failed approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rollback {
    Reverted,
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        source: UpstreamError,
    },

    /// The joke was approved in the submit service but no delivery record could be created.
    #[error("Failed to update joke: Failed to create joke in delivery service: {source}")]
    DeliveryFailed { source: UpstreamError, rollback: Rollback },

    /// The submit service accepted an approval but answered with something that is not a joke.
    #[error("Failed to update joke: {source}")]
    ApprovalUnverified { source: UpstreamError, rollback: Rollback },
}

impl ModerationError {
    fn upstream(context: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| ModerationError::Upstream { context, source }
    }

    pub fn upstream_error(&self) -> &UpstreamError {
        match self {
            ModerationError::Upstream { source, .. }
            | ModerationError::DeliveryFailed { source, .. }
            | ModerationError::ApprovalUnverified { source, .. } => source,
        }
    }

    pub fn rollback(&self) -> Option<&Rollback> {
        match self {
            ModerationError::DeliveryFailed { rollback, .. }
            | ModerationError::ApprovalUnverified { rollback, .. } => Some(rollback),
            ModerationError::Upstream { .. } => None,
        }
    }
}

/// Moderation operations over the delivery and submit services.
///
/// Holds no state of its own; every operation is one or more forwarded calls.
#[derive(Clone)]
pub struct ModerationService {
    delivery: Arc<dyn Upstream>,
    submit: Arc<dyn Upstream>,
}

impl ModerationService {
    pub fn new(delivery: Arc<dyn Upstream>, submit: Arc<dyn Upstream>) -> Self {
        Self { delivery, submit }
    }

    pub async fn list_joke_types(&self) -> Result<Value, ModerationError> {
        let context = "Failed to fetch types";
        let body = self
            .delivery
            .get(DELIVERY_TYPES_PATH)
            .await
            .map_err(ModerationError::upstream(context))?;

        let operation = self.delivery.operation(Method::GET, DELIVERY_TYPES_PATH);
        let types: Vec<JokeType> = decode_body(&operation, &body).map_err(ModerationError::upstream(context))?;
        tracing::debug!(count = types.len(), "fetched joke types");

        Ok(body)
    }

    pub async fn create_joke_type(&self, input: &CreateJokeType) -> Result<Value, ModerationError> {
        let context = "Failed to create joke type";
        let body = self
            .delivery
            .post(DELIVERY_TYPES_PATH, &json!(input))
            .await
            .map_err(ModerationError::upstream(context))?;

        let operation = self.delivery.operation(Method::POST, DELIVERY_TYPES_PATH);
        let created: JokeType = decode_body(&operation, &body).map_err(ModerationError::upstream(context))?;
        tracing::info!(name = %created.name, "created joke type");

        Ok(body)
    }

    /// Not-found and malformed-id answers from the submit service come back as
    /// `UpstreamError::Status` untouched.
    pub async fn delete_joke(&self, id: &str) -> Result<Value, ModerationError> {
        let body = self
            .submit
            .delete(&delete_path(id))
            .await
            .map_err(ModerationError::upstream("Failed to delete joke"))?;

        tracing::info!(joke_id = %id, "deleted joke");
        Ok(body)
    }

    /// `page` and `limit` are forwarded as given.
    pub async fn list_pending_jokes(&self, page: u32, limit: u32) -> Result<Value, ModerationError> {
        let context = "Failed to fetch jokes";
        let path = pending_path(page, limit);
        let body = self.submit.get(&path).await.map_err(ModerationError::upstream(context))?;

        let operation = self.submit.operation(Method::GET, &path);
        let pending: PendingJokes = decode_body(&operation, &body).map_err(ModerationError::upstream(context))?;
        tracing::debug!(page, limit, count = pending.len(), "fetched pending jokes");

        Ok(body)
    }

    /// Apply `patch` in the submit service; an approval also publishes the joke.
    ///
    /// Calls run strictly in order: submit update, delivery create, compensating update.
    /// If the delivery record cannot be created the joke is put back to `pending`.
    pub async fn update_joke(&self, id: &str, patch: &JokePatch) -> Result<UpdateOutcome, ModerationError> {
        let context = "Failed to update joke";
        let path = update_path(id);

        let updated = self
            .submit
            .put(&path, &json!(patch))
            .await
            .map_err(ModerationError::upstream(context))?;

        let operation = self.submit.operation(Method::PUT, &path);
        let joke: Joke = match decode_body(&operation, &updated) {
            Ok(joke) => joke,
            Err(e) if patch.requests_approval() => {
                // Submit may now hold an approval we cannot publish.
                tracing::warn!(joke_id = %id, error = %e, "approval response unreadable, reverting approval");
                let rollback = self.revert_approval(id, &path, patch.as_pending()).await;
                return Err(ModerationError::ApprovalUnverified { source: e, rollback });
            }
            Err(e) => return Err(ModerationError::Upstream { context, source: e }),
        };

        if !patch.requests_approval() {
            tracing::info!(joke_id = %id, status = %joke.status, "updated joke");
            return Ok(UpdateOutcome::Updated(updated));
        }

        if !joke.is_approved() {
            tracing::warn!(joke_id = %id, status = %joke.status, "approval requested but submit service kept another status");
            return Ok(UpdateOutcome::Updated(updated));
        }

        let request = DeliveryJokeRequest::from(&joke);
        match self.delivery.post(DELIVERY_SUBMIT_PATH, &json!(request)).await {
            Ok(delivery_joke) => {
                tracing::info!(joke_id = %id, "approved joke and created delivery record");
                Ok(UpdateOutcome::Approved(ApprovalOutcome::new(updated, delivery_joke)))
            }
            Err(e) => {
                tracing::warn!(joke_id = %id, error = %e, "delivery record creation failed, reverting approval");
                let rollback = self.revert_approval(id, &path, patch.reverted(&joke)).await;
                Err(ModerationError::DeliveryFailed { source: e, rollback })
            }
        }
    }

    async fn revert_approval(&self, id: &str, path: &str, revert: JokePatch) -> Rollback {
        match self.submit.put(path, &json!(revert)).await {
            Ok(_) => {
                tracing::info!(joke_id = %id, rollback = "reverted", "joke returned to pending");
                Rollback::Reverted
            }
            Err(e) => {
                tracing::error!(
                    joke_id = %id,
                    rollback = "failed",
                    error = %e,
                    "compensating update failed; joke may stay approved without a delivery record"
                );
                Rollback::Failed(e.to_string())
            }
        }
    }
}

fn delete_path(id: &str) -> String {
    // A literal '+' is already escaped by the form encoder, so any left over stand for spaces.
    let segment: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("/api/v1/jokes/delete/{}", segment.replace('+', "%20"))
}

fn pending_path(page: u32, limit: u32) -> String {
    format!("/api/v1/jokes/pending?page={}&limit={}", page, limit)
}

fn update_path(id: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("id", id)
        .finish();
    format!("/api/v1/jokes/update?{}", query)
}

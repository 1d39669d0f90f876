//! Outbound calls to the delivery and submit services.
//!
//! Every call goes through the [`Upstream`] trait so the moderation workflow
//! does not care whether it talks to a real service or a test double. Failures
//! of any kind collapse into [`UpstreamError`], tagged with the [`Operation`]
//! that produced them.

pub mod error;
pub mod http;

pub use error::UpstreamError;
pub use http::HttpUpstream;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// The two collaborator services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Delivery,
    Submit,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Delivery => "delivery",
            Service::Submit => "submit",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single upstream call: which service, which verb, which path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub service: Service,
    pub method: Method,
    pub path: String,
}

impl Operation {
    pub fn new(service: Service, method: Method, path: impl Into<String>) -> Self {
        Self {
            service,
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.service, self.path)
    }
}

#[async_trait]
pub trait Upstream: Send + Sync {
    fn service(&self) -> Service;

    /// Perform one call and return the decoded JSON body.
    ///
    /// `path` already carries any query string. An empty success body yields `Value::Null`.
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, UpstreamError>;

    fn operation(&self, method: Method, path: &str) -> Operation {
        Operation::new(self.service(), method, path)
    }

    async fn get(&self, path: &str) -> Result<Value, UpstreamError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, UpstreamError> {
        self.send(Method::DELETE, path, None).await
    }
}

// Upstreams answer either with the record itself or with a `{ statusCode, message, data }`
// envelope around it.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Bare(T),
    Wrapped { data: T },
}

/// Decode an upstream body into its typed view, failing with [`UpstreamError::Decode`].
pub fn decode_body<T: DeserializeOwned>(operation: &Operation, body: &Value) -> Result<T, UpstreamError> {
    match serde_json::from_value::<Envelope<T>>(body.clone()) {
        Ok(Envelope::Bare(value)) | Ok(Envelope::Wrapped { data: value }) => Ok(value),
        Err(_) => {
            // Report the error from the bare shape; it names the missing or mistyped field.
            let message = match serde_json::from_value::<T>(body.clone()) {
                Err(e) => e.to_string(),
                Ok(_) => "shape mismatch".to_string(),
            };
            Err(UpstreamError::decode(operation.clone(), message))
        }
    }
}

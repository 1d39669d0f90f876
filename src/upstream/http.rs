use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

use super::{Service, Upstream, UpstreamError};

/// reqwest-backed client bound to one service's base URL.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    service: Service,
    base_url: String,
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(service: Service, base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            service,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn service(&self) -> Service {
        self.service
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, UpstreamError> {
        let operation = self.operation(method.clone(), path);
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%operation, "upstream request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(operation.clone(), e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%operation, status = status.as_u16(), "upstream returned error status");
            return Err(UpstreamError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_reqwest(operation.clone(), e))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%operation, error = %e, "upstream body is not JSON");
            UpstreamError::decode(operation, e.to_string())
        })
    }
}

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::services::ModerationService;
use crate::upstream::{Service, Upstream, UpstreamError};

/// One recorded upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub service: Service,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Call {
    pub fn new(service: Service, method: Method, path: &str, body: Option<Value>) -> Self {
        Self {
            service,
            method,
            path: path.to_string(),
            body,
        }
    }
}

/// Scripted upstream: answers calls from a queue and logs them into a shared journal.
pub struct FakeUpstream {
    service: Service,
    journal: Arc<Mutex<Vec<Call>>>,
    replies: Mutex<VecDeque<Result<Value, (u16, String)>>>,
}

impl FakeUpstream {
    fn new(service: Service, journal: Arc<Mutex<Vec<Call>>>) -> Self {
        Self {
            service,
            journal,
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue the next answer: a body, or an error status with its body.
    pub fn reply(&self, reply: Result<Value, (u16, String)>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_status(&self, status: u16, body: &str) {
        self.reply(Err((status, body.to_string())));
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    fn service(&self) -> Service {
        self.service
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, UpstreamError> {
        self.journal
            .lock()
            .unwrap()
            .push(Call::new(self.service, method.clone(), path, body.cloned()));

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected call: {} {} {}", method, self.service, path));

        reply.map_err(|(status, body)| UpstreamError::Status {
            operation: self.operation(method, path),
            status,
            body,
        })
    }
}

/// A delivery and a submit fake sharing one journal, so call order across services is visible.
pub struct FakeUpstreams {
    pub delivery: Arc<FakeUpstream>,
    pub submit: Arc<FakeUpstream>,
    journal: Arc<Mutex<Vec<Call>>>,
}

impl FakeUpstreams {
    pub fn new() -> Self {
        let journal = Arc::new(Mutex::new(Vec::new()));
        Self {
            delivery: Arc::new(FakeUpstream::new(Service::Delivery, journal.clone())),
            submit: Arc::new(FakeUpstream::new(Service::Submit, journal.clone())),
            journal,
        }
    }

    pub fn service(&self) -> ModerationService {
        ModerationService::new(self.delivery.clone(), self.submit.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.lock().unwrap().clone()
    }

    pub fn calls_to(&self, service: Service) -> usize {
        self.calls().iter().filter(|c| c.service == service).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replies_keep_their_bodies_in_order() {
        let fakes = FakeUpstreams::new();
        fakes.submit.reply(Err((500, "first".into())));
        fakes.submit.reply(Ok(json!({"ok": true})));
        fakes.submit.reply_status(404, "second");

        let first = fakes.submit.get("/a").await.unwrap_err();
        assert_eq!(first.to_string(), "GET submit /a returned 500: first");
        assert_eq!(fakes.submit.get("/b").await.unwrap(), json!({"ok": true}));
        let second = fakes.submit.get("/c").await.unwrap_err();
        assert_eq!(second.to_string(), "GET submit /c returned 404: second");
        assert_eq!(fakes.calls().len(), 3);
    }
}

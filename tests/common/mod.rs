#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};

use joke_moderate_api::config::{AppConfig, SecurityConfig, UpstreamConfig};
use joke_moderate_api::{app, AppState};

pub const OPERATOR_EMAIL: &str = "admin@admin.com";
pub const OPERATOR_PASSWORD: &str = "admin123";

/// A request seen by a fake upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub body: Value,
}

struct Reply {
    status: u16,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct FakeState {
    replies: HashMap<String, VecDeque<Reply>>,
    requests: Vec<Recorded>,
}

/// Stand-in for the delivery or submit service: scripted replies keyed by "METHOD /path?query".
#[derive(Clone)]
pub struct FakeService {
    pub base_url: String,
    state: Arc<Mutex<FakeState>>,
}

impl FakeService {
    pub async fn spawn() -> Result<Self> {
        let state = Arc::new(Mutex::new(FakeState::default()));
        let router = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind fake upstream")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
        })
    }

    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        self.push(method, path, Reply {
            status,
            content_type: "application/json",
            body: body.to_string(),
            delay: None,
        });
    }

    pub fn on_text(&self, method: &str, path: &str, status: u16, body: &str) {
        self.push(method, path, Reply {
            status,
            content_type: "text/plain",
            body: body.to_string(),
            delay: None,
        });
    }

    pub fn on_delayed(&self, method: &str, path: &str, delay: Duration, body: Value) {
        self.push(method, path, Reply {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
            delay: Some(delay),
        });
    }

    fn push(&self, method: &str, path: &str, reply: Reply) {
        let key = format!("{} {}", method, path);
        self.state.lock().unwrap().replies.entry(key).or_default().push_back(reply);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }
}

async fn handle(State(state): State<Arc<Mutex<FakeState>>>, method: Method, uri: Uri, body: Bytes) -> Response {
    let path = uri.path_and_query().map(|p| p.as_str().to_string()).unwrap_or_else(|| "/".into());
    let key = format!("{} {}", method, path);

    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(Recorded {
            method: method.to_string(),
            uri: path,
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });
        state.replies.get_mut(&key).and_then(VecDeque::pop_front)
    };

    match reply {
        Some(reply) => {
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "message": format!("no reply scripted for {}", key) })),
        )
            .into_response(),
    }
}

pub fn security() -> SecurityConfig {
    SecurityConfig {
        jwt_secret: "integration-secret".into(),
        jwt_expiry_hours: 24,
        moderator_email: OPERATOR_EMAIL.into(),
        moderator_password: OPERATOR_PASSWORD.into(),
        cors_origins: Vec::new(),
    }
}

/// The moderation API served on an ephemeral port, wired to two fake upstreams.
pub struct Gateway {
    pub base_url: String,
    pub delivery: FakeService,
    pub submit: FakeService,
    pub client: reqwest::Client,
}

impl Gateway {
    pub async fn spawn() -> Result<Self> {
        let delivery = FakeService::spawn().await?;
        let submit = FakeService::spawn().await?;

        let upstream = UpstreamConfig::new(&delivery.base_url, &submit.base_url, 2)?;
        let state = AppState::from_config(AppConfig::development(upstream, security()))?;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind gateway")?;
        let addr = listener.local_addr()?;
        let router = app(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            delivery,
            submit,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in as the configured operator and return the bearer token.
    pub async fn login(&self) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "email": OPERATOR_EMAIL, "password": OPERATOR_PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response had no token")
    }
}

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected
        .merge(moderate_routes(state.clone()))
        .fallback(not_found)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/v1/auth/login", post(auth::login_post))
        .route("/api/v1/auth/verify", post(auth::verify_post))
}

fn moderate_routes(state: AppState) -> Router<AppState> {
    use axum::routing::{delete, put};
    use handlers::protected::moderate;

    Router::new()
        .route("/api/v1/moderate/types", get(moderate::types_get).post(moderate::types_post))
        .route("/api/v1/moderate/delete", delete(moderate::joke_delete))
        .route("/api/v1/moderate/pending", get(moderate::pending_get))
        .route("/api/v1/moderate/update", put(moderate::joke_put))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

/// Empty origin list: any origin in development, none elsewhere.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if security.cors_origins.is_empty() {
        if config.is_development() {
            return CorsLayer::permissive();
        }
        tracing::warn!("CORS_ORIGINS not set, cross-origin requests will be refused");
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Joke Moderation API",
            "version": version,
            "description": "Moderation gateway in front of the joke submit and delivery services",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/v1/auth/login, /api/v1/auth/verify (public - token acquisition)",
                "types": "GET|POST /api/v1/moderate/types (protected)",
                "pending": "GET /api/v1/moderate/pending?page=&limit= (protected)",
                "update": "PUT /api/v1/moderate/update?id= (protected)",
                "delete": "DELETE /api/v1/moderate/delete?id= (protected)",
            }
        }
    }))
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "status": "ok",
                "timestamp": chrono::Utc::now(),
            }
        })),
    )
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

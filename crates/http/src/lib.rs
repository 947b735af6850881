//! HTTP API server for rest-api.

pub mod api_error;
mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use rest_api_core::ServerConfig;
use rest_api_storage::UserStorage;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use handlers::users;

pub use api_error::ApiError;
pub use handlers::users::{USERS_URL, USER_URL};

/// Shared application state for all HTTP handlers.
///
/// The storage handle is the only shared resource; its pool does its own
/// synchronization.
pub struct AppState {
    pub storage: Arc<dyn UserStorage>,
    /// Deadline for each storage call made while serving a request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(storage: Arc<dyn UserStorage>, config: ServerConfig) -> Self {
        Self { storage, request_timeout: config.request_timeout }
    }
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(USERS_URL, get(users::list_users).post(users::create_user))
        .route(
            USER_URL,
            get(users::get_user)
                .put(users::update_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

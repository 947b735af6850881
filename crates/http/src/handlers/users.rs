use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use rest_api_core::{AppError, User};
use rest_api_storage::StorageError;

use crate::api_error::ApiError;
use crate::AppState;

pub const USERS_URL: &str = "/users";
pub const USER_URL: &str = "/users/{id}";

/// Run a storage call under the request deadline. On expiry the storage
/// future is dropped, which aborts the in-flight driver operation.
async fn with_deadline<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    match tokio::time::timeout(state.request_timeout, op).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => {
            tracing::warn!(timeout = ?state.request_timeout, "storage call exceeded request deadline");
            Err(ApiError::DeadlineExceeded)
        },
    }
}

fn decode_body(payload: Result<Json<User>, JsonRejection>) -> Result<User, ApiError> {
    payload
        .map(|Json(user)| user)
        .map_err(|rejection| ApiError::BadRequest(AppError::bad_request(rejection.body_text())))
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = with_deadline(&state, state.storage.find_all()).await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let user = decode_body(payload)?;
    let id = with_deadline(&state, state.storage.create(&user)).await?;
    tracing::info!(%id, "user created");

    let location = format!("{USERS_URL}/{id}");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user.with_id(id))))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = with_deadline(&state, state.storage.find_one(&id)).await?;
    Ok(Json(user))
}

/// Serves both PUT and PATCH. The path id wins over any id in the body.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let user = decode_body(payload)?.with_id(id);
    with_deadline(&state, state.storage.update(&user)).await?;
    tracing::info!(id = %user.id, "user updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    with_deadline(&state, state.storage.delete(&id)).await?;
    tracing::info!(%id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Extension, Path},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

use super::backend::FsBackend;
use super::key::ObjectKey;
use super::protocol::{
    DeleteResponse, ENDPOINT_BLOB, ENDPOINT_BLOBS, ENDPOINT_HEALTH, ErrorResponse,
    HealthResponse, ListResponse, MAX_BLOB_BYTES, WriteResponse,
};
use crate::error::ContentError;

/// The RPC surface of one storage node.
pub fn router(backend: Arc<FsBackend>) -> Router {
    Router::new()
        .route(
            &format!("{}/*key", ENDPOINT_BLOB),
            get(handle_read).put(handle_write).delete(handle_delete),
        )
        .route(ENDPOINT_BLOBS, get(handle_list))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_BLOB_BYTES))
        .layer(Extension(backend))
}

fn parse_key(raw: &str) -> Result<ObjectKey, (StatusCode, Json<ErrorResponse>)> {
    ObjectKey::parse(raw.trim_start_matches('/')).map_err(|e| {
        tracing::warn!("Rejected key {:?}: {}", raw, e);
        ErrorResponse::from_error(&e)
    })
}

pub async fn handle_read(
    Extension(backend): Extension<Arc<FsBackend>>,
    Path(raw_key): Path<String>,
) -> Response {
    let key = match parse_key(&raw_key) {
        Ok(key) => key,
        Err(rejection) => return rejection.into_response(),
    };

    match backend.read(&key).await {
        Ok(Some(data)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            data,
        )
            .into_response(),
        Ok(None) => {
            ErrorResponse::from_error(&ContentError::NotFound(key.to_string())).into_response()
        }
        Err(e) => ErrorResponse::from_error(&e).into_response(),
    }
}

pub async fn handle_write(
    Extension(backend): Extension<Arc<FsBackend>>,
    Path(raw_key): Path<String>,
    data: Bytes,
) -> Response {
    let key = match parse_key(&raw_key) {
        Ok(key) => key,
        Err(rejection) => return rejection.into_response(),
    };

    match backend.write(&key, data).await {
        Ok(()) => (StatusCode::OK, Json(WriteResponse {})).into_response(),
        Err(e) => ErrorResponse::from_error(&e).into_response(),
    }
}

pub async fn handle_delete(
    Extension(backend): Extension<Arc<FsBackend>>,
    Path(raw_key): Path<String>,
) -> Response {
    let key = match parse_key(&raw_key) {
        Ok(key) => key,
        Err(rejection) => return rejection.into_response(),
    };

    match backend.delete(&key).await {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse {})).into_response(),
        Err(e) => {
            tracing::debug!("Delete of {} failed: {}", key, e);
            ErrorResponse::from_error(&e).into_response()
        }
    }
}

pub async fn handle_list(Extension(backend): Extension<Arc<FsBackend>>) -> Response {
    match backend.list().await {
        Ok(keys) => (StatusCode::OK, Json(ListResponse { keys })).into_response(),
        Err(e) => ErrorResponse::from_error(&e).into_response(),
    }
}

pub async fn handle_health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

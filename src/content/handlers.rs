//! Content Gateway
//!
//! Exposes the [`ContentService`] facade over HTTP as `/content/<object_id>/<filename>`,
//! the path the playback layer fetches manifests and segments from.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Extension, Path},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

use super::ContentService;
use crate::error::ContentError;
use crate::storage::protocol::{ErrorResponse, MAX_BLOB_BYTES, WriteResponse};

pub const ENDPOINT_CONTENT: &str = "/content";

pub fn router(service: Arc<dyn ContentService>) -> Router {
    Router::new()
        .route(
            &format!("{}/:object_id/*filename", ENDPOINT_CONTENT),
            get(handle_get_content).put(handle_put_content),
        )
        .layer(DefaultBodyLimit::max(MAX_BLOB_BYTES))
        .layer(Extension(service))
}

pub async fn handle_get_content(
    Extension(service): Extension<Arc<dyn ContentService>>,
    Path((object_id, filename)): Path<(String, String)>,
) -> Response {
    let filename = filename.trim_start_matches('/');

    match service.read(&object_id, filename).await {
        Ok(Some(data)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type(filename))],
            data,
        )
            .into_response(),
        Ok(None) => ErrorResponse::from_error(&ContentError::NotFound(format!(
            "{}/{}",
            object_id, filename
        )))
        .into_response(),
        Err(e) => {
            tracing::error!("Error while reading content {}/{}: {}", object_id, filename, e);
            ErrorResponse::from_error(&e).into_response()
        }
    }
}

pub async fn handle_put_content(
    Extension(service): Extension<Arc<dyn ContentService>>,
    Path((object_id, filename)): Path<(String, String)>,
    data: Bytes,
) -> Response {
    let filename = filename.trim_start_matches('/');

    match service.write(&object_id, filename, data).await {
        Ok(()) => (StatusCode::OK, Json(WriteResponse {})).into_response(),
        Err(e) => {
            tracing::error!("Error while writing content {}/{}: {}", object_id, filename, e);
            ErrorResponse::from_error(&e).into_response()
        }
    }
}

/// MIME type for the adaptive-streaming files the transcoder emits.
fn content_type(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("mpd") => "application/dash+xml",
        Some("m3u8") => "application/vnd.apple.mpegurl",
        Some("m4s") | Some("mp4") => "video/mp4",
        Some("ts") => "video/mp2t",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::content_type;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type("manifest.mpd"), "application/dash+xml");
        assert_eq!(content_type("hls/index.m3u8"), "application/vnd.apple.mpegurl");
        assert_eq!(content_type("init-stream0.m4s"), "video/mp4");
        assert_eq!(content_type("noext"), "application/octet-stream");
    }
}

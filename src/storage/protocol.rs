//! Storage Network Protocol
//!
//! Defines the RPC endpoints and Data Transfer Objects (DTOs) a storage node serves.
//!
//! Blob payloads travel as raw `application/octet-stream` bodies; everything else is JSON.
//! The key is carried in the URL path as `ENDPOINT_BLOB/<object_id>/<filename...>`, one
//! percent-encoded path segment per key segment.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

// --- API Endpoints ---

/// Read (GET), Write (PUT) and Delete (DELETE) of a single blob, followed by the key.
pub const ENDPOINT_BLOB: &str = "/internal/blob";
/// Enumerates every key stored on the node.
pub const ENDPOINT_BLOBS: &str = "/internal/blobs";
/// Liveness probe.
pub const ENDPOINT_HEALTH: &str = "/health";

/// Largest blob a node accepts in one Write.
pub const MAX_BLOB_BYTES: usize = 512 * 1024 * 1024;

// --- Data Transfer Objects ---

/// Response to a List call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Every stored key as `object_id/filename`.
    pub keys: Vec<String>,
}

/// Acknowledgment for a successful Write.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WriteResponse {}

/// Acknowledgment for a successful Delete.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteResponse {}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of every non-2xx response, on storage, admin and gateway surfaces alike.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn from_error(err: &ContentError) -> (StatusCode, Json<ErrorResponse>) {
        (
            err.status_code(),
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
    }
}

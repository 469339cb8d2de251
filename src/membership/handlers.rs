use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;

use super::coordinator::MembershipCoordinator;
use super::protocol::{
    ENDPOINT_ADD_NODE, ENDPOINT_LIST_NODES, ENDPOINT_REMOVE_NODE, ListNodesResponse,
    MigrationResponse, NodeRequest,
};
use crate::storage::protocol::ErrorResponse;

/// The admin surface of a content router.
pub fn router(coordinator: Arc<MembershipCoordinator>) -> Router {
    Router::new()
        .route(ENDPOINT_ADD_NODE, post(handle_add_node))
        .route(ENDPOINT_REMOVE_NODE, post(handle_remove_node))
        .route(ENDPOINT_LIST_NODES, get(handle_list_nodes))
        .layer(Extension(coordinator))
}

pub async fn handle_add_node(
    Extension(coordinator): Extension<Arc<MembershipCoordinator>>,
    Json(req): Json<NodeRequest>,
) -> Response {
    tracing::info!("Admin request: add node {}", req.address);

    match coordinator.add_node(&req.address).await {
        Ok(migrated_count) => (
            StatusCode::OK,
            Json(MigrationResponse { migrated_count }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to add node {}: {}", req.address, e);
            ErrorResponse::from_error(&e).into_response()
        }
    }
}

pub async fn handle_remove_node(
    Extension(coordinator): Extension<Arc<MembershipCoordinator>>,
    Json(req): Json<NodeRequest>,
) -> Response {
    tracing::info!("Admin request: remove node {}", req.address);

    match coordinator.remove_node(&req.address).await {
        Ok(migrated_count) => (
            StatusCode::OK,
            Json(MigrationResponse { migrated_count }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to remove node {}: {}", req.address, e);
            ErrorResponse::from_error(&e).into_response()
        }
    }
}

pub async fn handle_list_nodes(
    Extension(coordinator): Extension<Arc<MembershipCoordinator>>,
) -> (StatusCode, Json<ListNodesResponse>) {
    (
        StatusCode::OK,
        Json(ListNodesResponse {
            addresses: coordinator.list_nodes().await,
        }),
    )
}

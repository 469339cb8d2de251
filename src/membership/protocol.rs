//! Admin Network Protocol
//!
//! Endpoints and DTOs of the membership admin service. Errors use
//! [`ErrorResponse`](crate::storage::protocol::ErrorResponse).

use serde::{Deserialize, Serialize};

/// Adds a node and migrates the keys it now owns.
pub const ENDPOINT_ADD_NODE: &str = "/admin/nodes/add";
/// Removes a node and migrates all of its keys away.
pub const ENDPOINT_REMOVE_NODE: &str = "/admin/nodes/remove";
/// Current membership list.
pub const ENDPOINT_LIST_NODES: &str = "/admin/nodes";

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeRequest {
    /// `host:port` of the storage node.
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigrationResponse {
    /// Number of blobs moved between nodes.
    pub migrated_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListNodesResponse {
    /// Membership list in the order nodes were configured and added.
    pub addresses: Vec<String>,
}

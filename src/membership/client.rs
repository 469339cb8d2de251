//! Operator client for the admin service.

use std::time::Duration;

use super::protocol::{
    ENDPOINT_ADD_NODE, ENDPOINT_LIST_NODES, ENDPOINT_REMOVE_NODE, ListNodesResponse,
    MigrationResponse, NodeRequest,
};
use crate::error::{ContentError, Result};
use crate::storage::StorageClient;

/// Migrations move whole node contents, so admin calls get far more time than blob RPCs.
pub const DEFAULT_ADMIN_TIMEOUT: Duration = Duration::from_secs(600);

pub struct AdminClient {
    http_client: reqwest::Client,
    admin_addr: String,
    timeout: Duration,
}

impl AdminClient {
    pub fn new(admin_addr: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            admin_addr: admin_addr.into(),
            timeout: DEFAULT_ADMIN_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, endpoint: &str) -> String {
        format!("http://{}{}", self.admin_addr, endpoint)
    }

    async fn post_node(&self, endpoint: &str, address: &str) -> Result<usize> {
        let response = self
            .http_client
            .post(self.url(endpoint))
            .json(&NodeRequest {
                address: address.to_string(),
            })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContentError::transport(&self.admin_addr, e))?;

        if !response.status().is_success() {
            return Err(StorageClient::remote_error(&self.admin_addr, response).await);
        }

        let migration: MigrationResponse = response
            .json()
            .await
            .map_err(|e| ContentError::transport(&self.admin_addr, e))?;

        Ok(migration.migrated_count)
    }

    pub async fn add_node(&self, address: &str) -> Result<usize> {
        self.post_node(ENDPOINT_ADD_NODE, address).await
    }

    pub async fn remove_node(&self, address: &str) -> Result<usize> {
        self.post_node(ENDPOINT_REMOVE_NODE, address).await
    }

    pub async fn list_nodes(&self) -> Result<Vec<String>> {
        let response = self
            .http_client
            .get(self.url(ENDPOINT_LIST_NODES))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContentError::transport(&self.admin_addr, e))?;

        if !response.status().is_success() {
            return Err(StorageClient::remote_error(&self.admin_addr, response).await);
        }

        let list: ListNodesResponse = response
            .json()
            .await
            .map_err(|e| ContentError::transport(&self.admin_addr, e))?;

        Ok(list.addresses)
    }
}

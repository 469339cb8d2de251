//! RPC client for storage nodes.
//!
//! One shared `reqwest::Client` pools connections per destination. Each call carries its
//! own timeout and is attempted exactly once; failures surface to the caller.

use bytes::Bytes;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use super::key::ObjectKey;
use super::protocol::{ENDPOINT_BLOB, ENDPOINT_BLOBS, ENDPOINT_HEALTH, ErrorResponse, ListResponse};
use crate::error::{ContentError, Result};

pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct StorageClient {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl Default for StorageClient {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_TIMEOUT)
    }
}

impl StorageClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
        }
    }

    fn endpoint_url(node: &str, endpoint: &str) -> Result<Url> {
        Url::parse(&format!("http://{}{}", node, endpoint))
            .map_err(|e| ContentError::transport(node, e))
    }

    fn blob_url(node: &str, key: &ObjectKey) -> Result<Url> {
        let mut url = Self::endpoint_url(node, ENDPOINT_BLOB)?;
        url.path_segments_mut()
            .map_err(|_| ContentError::transport(node, "address cannot carry a path"))?
            .push(key.object_id())
            .extend(key.filename().split('/'));
        Ok(url)
    }

    /// Turns a non-2xx response into a `Remote` error carrying the node's message.
    pub(crate) async fn remote_error(node: &str, response: reqwest::Response) -> ContentError {
        let status = response.status();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body),
            Err(e) => e.to_string(),
        };

        ContentError::Remote {
            node: node.to_string(),
            status: status.as_u16(),
            message,
        }
    }

    pub async fn read(&self, node: &str, key: &ObjectKey) -> Result<Option<Bytes>> {
        let response = self
            .http_client
            .get(Self::blob_url(node, key)?)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContentError::transport(node, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::remote_error(node, response).await);
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| ContentError::transport(node, e))?;

        Ok(Some(data))
    }

    pub async fn write(&self, node: &str, key: &ObjectKey, data: Bytes) -> Result<()> {
        let response = self
            .http_client
            .put(Self::blob_url(node, key)?)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContentError::transport(node, e))?;

        if !response.status().is_success() {
            return Err(Self::remote_error(node, response).await);
        }

        Ok(())
    }

    pub async fn list(&self, node: &str) -> Result<Vec<String>> {
        let response = self
            .http_client
            .get(Self::endpoint_url(node, ENDPOINT_BLOBS)?)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContentError::transport(node, e))?;

        if !response.status().is_success() {
            return Err(Self::remote_error(node, response).await);
        }

        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| ContentError::transport(node, e))?;

        Ok(list.keys)
    }

    /// Deleting a key the node does not hold is a `NotFound` error.
    pub async fn delete(&self, node: &str, key: &ObjectKey) -> Result<()> {
        let response = self
            .http_client
            .delete(Self::blob_url(node, key)?)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContentError::transport(node, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound(key.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::remote_error(node, response).await);
        }

        Ok(())
    }

    pub async fn health(&self, node: &str) -> Result<()> {
        let response = self
            .http_client
            .get(Self::endpoint_url(node, ENDPOINT_HEALTH)?)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContentError::transport(node, e))?;

        if !response.status().is_success() {
            return Err(Self::remote_error(node, response).await);
        }

        Ok(())
    }
}

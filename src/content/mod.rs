//! Content Service Facade
//!
//! The narrow interface the web layer consumes: read and write a blob by
//! `(object_id, filename)`. Callers never see nodes, hashing or migration.
//!
//! ## Implementations
//! - **`LocalContentService`**: One storage directory on this machine.
//! - **`ContentRouter`**: Resolves the owning node on the ring for every call and
//!   forwards the operation to that node over RPC.
//!
//! Both are interchangeable behind `Arc<dyn ContentService>`; which one a process uses
//! is a deployment decision (see [`crate::config::ContentMode`]).

pub mod handlers;
pub mod local;
pub mod router;

pub use local::LocalContentService;
pub use router::ContentRouter;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

#[async_trait]
pub trait ContentService: Send + Sync {
    /// The blob, or `None` when nothing is stored under the key.
    async fn read(&self, object_id: &str, filename: &str) -> Result<Option<Bytes>>;

    /// Stores the blob, replacing any previous content under the key.
    async fn write(&self, object_id: &str, filename: &str, data: Bytes) -> Result<()>;
}

#[cfg(test)]
mod tests;

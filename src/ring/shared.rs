use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::Ring;

/// The current ring, published by the membership coordinator and read by routers.
///
/// Writers replace the whole `Arc<Ring>`; readers clone the `Arc` and route on that
/// snapshot for the rest of the call.
#[derive(Debug, Default)]
pub struct SharedRing {
    current: RwLock<Arc<Ring>>,
}

impl SharedRing {
    pub async fn snapshot(&self) -> Arc<Ring> {
        self.current.read().await.clone()
    }

    pub async fn publish(&self, ring: Ring) {
        let nodes = ring.len();
        *self.current.write().await = Arc::new(ring);
        tracing::debug!("Published ring with {} node(s)", nodes);
    }
}

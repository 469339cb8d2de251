//! In-process cluster fixtures shared by the module tests.

use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::storage::{FsBackend, router};

/// A storage node served on an ephemeral localhost port.
pub struct TestNode {
    pub address: String,
    pub backend: Arc<FsBackend>,
    _dir: TempDir,
}

impl TestNode {
    pub async fn spawn() -> Self {
        let dir = TempDir::new().unwrap();
        let backend = Arc::new(FsBackend::new(dir.path()).unwrap());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let app = router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            address,
            backend,
            _dir: dir,
        }
    }

    pub async fn keys(&self) -> Vec<String> {
        self.backend.list().await.unwrap()
    }
}

pub async fn spawn_nodes(count: usize) -> Vec<TestNode> {
    let mut nodes = Vec::with_capacity(count);
    for _ in 0..count {
        nodes.push(TestNode::spawn().await);
    }
    nodes
}

/// An address nothing listens on.
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);
    address
}

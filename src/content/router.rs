//! Ring-routed content service.
//!
//! Every call takes a fresh snapshot of the shared ring, so a membership change is
//! honoured by the very next call. The ring and the admin service are brought up lazily,
//! once, by [`ContentRouter::start`].

use async_trait::async_trait;
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::ContentService;
use crate::config::RouterSettings;
use crate::error::{ContentError, Result};
use crate::membership::{MembershipCoordinator, handlers as admin_handlers};
use crate::ring::SharedRing;
use crate::storage::{ObjectKey, StorageClient};

#[derive(Clone)]
pub struct ContentRouter {
    settings: Arc<RouterSettings>,
    ring: Arc<SharedRing>,
    client: StorageClient,
    admin: Arc<OnceCell<SocketAddr>>,
}

impl ContentRouter {
    pub fn new(settings: RouterSettings) -> Self {
        Self {
            client: StorageClient::new(settings.rpc_timeout),
            settings: Arc::new(settings),
            ring: Arc::new(SharedRing::default()),
            admin: Arc::new(OnceCell::new()),
        }
    }

    pub fn ring(&self) -> &Arc<SharedRing> {
        &self.ring
    }

    pub fn client(&self) -> &StorageClient {
        &self.client
    }

    /// Address the admin service is bound to, once started.
    pub fn admin_addr(&self) -> Option<SocketAddr> {
        self.admin.get().copied()
    }

    /// Builds the ring from the configured nodes and starts the admin service.
    ///
    /// Runs at most once; later calls return the address bound the first time.
    pub async fn start(&self) -> Result<SocketAddr> {
        let addr = self
            .admin
            .get_or_try_init(|| async {
                let coordinator = Arc::new(
                    MembershipCoordinator::new(self.settings.storage_nodes.clone(), self.clone())
                        .await?,
                );

                let listener = TcpListener::bind(&self.settings.admin_addr).await?;
                let local_addr = listener.local_addr()?;
                let app = admin_handlers::router(coordinator);

                tokio::spawn(async move {
                    if let Err(e) = axum::serve(listener, app).await {
                        tracing::error!("Admin server stopped: {}", e);
                    }
                });

                info!(
                    "Content router started: {} storage node(s), admin on {}",
                    self.settings.storage_nodes.len(),
                    local_addr
                );
                Ok::<_, ContentError>(local_addr)
            })
            .await?;

        Ok(*addr)
    }

    /// The node currently owning `key`.
    pub async fn owner_of(&self, key: &ObjectKey) -> Result<String> {
        let ring = self.ring.snapshot().await;
        ring.locate(&key.to_string()).map(str::to_string)
    }

    /// Reads `key` from its owner under the current ring, without starting the router.
    pub async fn read_key(&self, key: &ObjectKey) -> Result<Option<Bytes>> {
        let owner = self.owner_of(key).await?;
        debug!("Routing read of {} to {}", key, owner);
        self.client.read(&owner, key).await
    }

    /// Writes `key` to its owner under the current ring, without starting the router.
    pub async fn write_key(&self, key: &ObjectKey, data: Bytes) -> Result<()> {
        let owner = self.owner_of(key).await?;
        debug!("Routing write of {} ({} bytes) to {}", key, data.len(), owner);
        self.client.write(&owner, key, data).await
    }
}

#[async_trait]
impl ContentService for ContentRouter {
    async fn read(&self, object_id: &str, filename: &str) -> Result<Option<Bytes>> {
        let key = ObjectKey::new(object_id, filename)?;
        self.start().await?;
        self.read_key(&key).await
    }

    async fn write(&self, object_id: &str, filename: &str, data: Bytes) -> Result<()> {
        let key = ObjectKey::new(object_id, filename)?;
        self.start().await?;
        self.write_key(&key, data).await
    }
}

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::content::ContentRouter;
use crate::error::{ContentError, Result};
use crate::ring::Ring;
use crate::storage::ObjectKey;

pub struct MembershipCoordinator {
    /// Authoritative membership list. Held for the whole rebuild-and-migrate sequence.
    members: Mutex<Vec<String>>,
    /// Copy of `members` as of the last change, for readers that must not wait on a migration.
    published: RwLock<Arc<Vec<String>>>,
    router: ContentRouter,
}

impl MembershipCoordinator {
    /// Builds the ring from `addresses` and publishes it to `router`.
    pub async fn new(addresses: Vec<String>, router: ContentRouter) -> Result<Self> {
        let ring = Ring::build(addresses.as_slice())?;
        router.ring().publish(ring).await;

        info!("Membership initialised with {} node(s)", addresses.len());

        Ok(Self {
            published: RwLock::new(Arc::new(addresses.clone())),
            members: Mutex::new(addresses),
            router,
        })
    }

    /// Current membership list, as configured and mutated. Never waits for a migration.
    pub async fn list_nodes(&self) -> Vec<String> {
        self.published.read().await.as_ref().clone()
    }

    async fn publish(&self, members: &[String], ring: Ring) {
        self.router.ring().publish(ring).await;
        *self.published.write().await = Arc::new(members.to_vec());
    }

    /// Adds `address` and moves every key it now owns off its ring successor.
    ///
    /// Returns the number of migrated keys. On failure the node stays a member and keys
    /// already moved stay on it.
    pub async fn add_node(&self, address: &str) -> Result<usize> {
        let mut members = self.members.lock().await;

        if members.iter().any(|member| member == address) {
            return Err(ContentError::AlreadyMember(address.to_string()));
        }

        members.push(address.to_string());
        let ring = Ring::build(members.as_slice())?;
        self.publish(&members, ring.clone()).await;

        let source = ring
            .successor_of(address)
            .ok_or_else(|| {
                ContentError::RingInvariant(format!("{} missing from rebuilt ring", address))
            })?
            .address
            .clone();

        info!("Node {} joined; scanning successor {} for displaced keys", address, source);

        if source == address {
            return Ok(0);
        }

        let mut displaced = Vec::new();
        for raw in self.router.client().list(&source).await? {
            let Some(key) = parse_listed(&source, &raw) else {
                continue;
            };
            if ring.locate(&raw)? == address {
                displaced.push(key);
            }
        }

        let migrated = self.migrate(&source, &displaced).await?;
        info!("Node {} joined; migrated {} key(s) from {}", address, migrated, source);

        Ok(migrated)
    }

    /// Removes `address` and moves all of its keys to their new owners.
    ///
    /// The last remaining node cannot be removed. On failure the node stays removed.
    pub async fn remove_node(&self, address: &str) -> Result<usize> {
        let mut members = self.members.lock().await;

        let idx = members
            .iter()
            .position(|member| member == address)
            .ok_or_else(|| ContentError::UnknownNode(address.to_string()))?;

        if members.len() == 1 {
            return Err(ContentError::RoutingUnavailable);
        }

        members.remove(idx);
        let ring = Ring::build(members.as_slice())?;
        self.publish(&members, ring).await;

        info!("Node {} left; draining its keys", address);

        let displaced: Vec<ObjectKey> = self
            .router
            .client()
            .list(address)
            .await?
            .iter()
            .filter_map(|raw| parse_listed(address, raw))
            .collect();

        let migrated = self.migrate(address, &displaced).await?;
        info!("Node {} left; migrated {} key(s)", address, migrated);

        Ok(migrated)
    }

    /// Read from `source`, write through the router, delete from `source`, one key at a time.
    ///
    /// Stops at the first failing step.
    async fn migrate(&self, source: &str, keys: &[ObjectKey]) -> Result<usize> {
        let client = self.router.client();
        let mut migrated = 0;

        for key in keys {
            let data = match client.read(source, key).await {
                Ok(Some(data)) => data,
                Ok(None) => {
                    warn!("Key {} vanished from {} before it could be migrated", key, source);
                    continue;
                }
                Err(e) => {
                    warn!("Migration from {} stopped reading {}: {}", source, key, e);
                    return Err(e);
                }
            };

            if let Err(e) = self.router.write_key(key, data).await {
                warn!("Migration from {} stopped writing {}: {}", source, key, e);
                return Err(e);
            }

            if let Err(e) = client.delete(source, key).await {
                warn!("Migration from {} stopped deleting {}: {}", source, key, e);
                return Err(e);
            }

            tracing::debug!("Migrated {} off {}", key, source);
            migrated += 1;
        }

        Ok(migrated)
    }
}

fn parse_listed(node: &str, raw: &str) -> Option<ObjectKey> {
    match ObjectKey::parse(raw) {
        Ok(key) => Some(key),
        Err(e) => {
            warn!("Ignoring unroutable key {:?} listed by {}: {}", raw, node, e);
            None
        }
    }
}

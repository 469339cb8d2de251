use sha2::{Digest, Sha256};

use crate::error::{ContentError, Result};

/// Position of `s` on the ring: the first 8 bytes of its SHA-256 digest, big-endian.
pub fn hash_key(s: &str) -> u64 {
    let digest = Sha256::digest(s.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// A storage node placed on the ring.
///
/// `hash` is derived from `address`; nodes are never mutated in place, a membership
/// change builds a fresh [`Ring`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub address: String,
    pub hash: u64,
}

impl Node {
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let hash = hash_key(&address);
        Self { address, hash }
    }

    /// Places a node at an explicit position instead of hashing its address.
    pub fn with_hash(address: impl Into<String>, hash: u64) -> Self {
        Self {
            address: address.into(),
            hash,
        }
    }
}

/// Nodes sorted ascending by hash, without duplicate addresses.
///
/// An empty ring only exists as the placeholder a router holds before it is started;
/// [`Ring::build`] refuses to produce one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ring {
    nodes: Vec<Node>,
}

impl Ring {
    pub fn build<S: AsRef<str>>(addresses: &[S]) -> Result<Self> {
        Self::from_nodes(
            addresses
                .iter()
                .map(|address| Node::new(address.as_ref()))
                .collect(),
        )
    }

    pub fn from_nodes(mut nodes: Vec<Node>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(ContentError::RoutingUnavailable);
        }

        for (idx, node) in nodes.iter().enumerate() {
            if nodes[..idx].iter().any(|other| other.address == node.address) {
                return Err(ContentError::AlreadyMember(node.address.clone()));
            }
        }

        nodes.sort_by_key(|node| node.hash);

        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.nodes.iter().any(|node| node.address == address)
    }

    /// Owner of ring position `hash`: the first node with a strictly greater hash,
    /// or the first node when `hash` lies on the wrap-around arc.
    pub fn locate_hash(&self, hash: u64) -> Result<&Node> {
        let first = self.nodes.first().ok_or(ContentError::RoutingUnavailable)?;
        let idx = self.nodes.partition_point(|node| node.hash <= hash);

        Ok(self.nodes.get(idx).unwrap_or(first))
    }

    /// Address of the node owning `key`.
    pub fn locate(&self, key: &str) -> Result<&str> {
        self.locate_hash(hash_key(key))
            .map(|node| node.address.as_str())
    }

    /// The next node clockwise from `address`, wrapping to the first node.
    ///
    /// A single-node ring is its own successor.
    pub fn successor_of(&self, address: &str) -> Option<&Node> {
        let idx = self.nodes.iter().position(|node| node.address == address)?;
        self.nodes.get((idx + 1) % self.nodes.len())
    }
}

//! Error Taxonomy
//!
//! Every layer of the content path (filesystem backend, RPC client, router,
//! membership coordinator) reports failures through [`ContentError`].
//! An absent blob on `read` is *not* an error: it is `Ok(None)` everywhere.

use axum::http::StatusCode;

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The key does not exist. Only produced where absence is a failure (delete).
    #[error("key not found: {0}")]
    NotFound(String),

    /// The key cannot be mapped safely onto a storage path.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// Local filesystem failure on a storage node.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The ring has no nodes, so no key has an owner.
    #[error("no storage nodes available for routing")]
    RoutingUnavailable,

    /// The RPC could not be delivered or its response could not be read.
    #[error("transport failure talking to {node}: {message}")]
    Transport { node: String, message: String },

    /// The remote node answered with an error status.
    #[error("node {node} answered {status}: {message}")]
    Remote {
        node: String,
        status: u16,
        message: String,
    },

    #[error("node {0} is already a member")]
    AlreadyMember(String),

    #[error("node {0} is not a member")]
    UnknownNode(String),

    /// Internal ring state disagrees with the membership list.
    #[error("ring invariant violated: {0}")]
    RingInvariant(String),
}

impl ContentError {
    pub fn transport(node: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            node: node.to_string(),
            message: err.to_string(),
        }
    }

    /// Status code used when this error crosses an HTTP boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::NotFound(_) | ContentError::UnknownNode(_) => StatusCode::NOT_FOUND,
            ContentError::InvalidKey { .. } => StatusCode::BAD_REQUEST,
            ContentError::AlreadyMember(_) => StatusCode::CONFLICT,
            ContentError::RoutingUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ContentError::Transport { .. } | ContentError::Remote { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ContentError::Io(_) | ContentError::RingInvariant(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

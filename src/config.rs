//! Process Configuration
//!
//! Validated settings for the two kinds of process, plus the deployment selector that
//! decides whether content is served from one local directory or routed across nodes.

use anyhow::{Result, bail};
use std::path::PathBuf;
use std::time::Duration;

use crate::storage::client::DEFAULT_RPC_TIMEOUT;

/// A single storage node: where it listens and where it keeps blobs.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub host: String,
    pub port: u16,
    pub root: PathBuf,
}

impl StorageSettings {
    pub fn new(host: impl Into<String>, port: u16, root: impl Into<PathBuf>) -> Result<Self> {
        if port == 0 {
            bail!("port number must be positive");
        }
        Ok(Self {
            host: host.into(),
            port,
            root: root.into(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A networked content router and its admin surface.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Where the admin service listens (`host:port`, port 0 picks one).
    pub admin_addr: String,
    /// Initial membership, in configuration order.
    pub storage_nodes: Vec<String>,
    pub rpc_timeout: Duration,
}

impl RouterSettings {
    pub fn new(admin_addr: impl Into<String>, storage_nodes: Vec<String>) -> Self {
        Self {
            admin_addr: admin_addr.into(),
            storage_nodes,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }

    pub fn with_rpc_timeout(mut self, rpc_timeout: Duration) -> Self {
        self.rpc_timeout = rpc_timeout;
        self
    }
}

/// Which content service backs a gateway.
#[derive(Debug, Clone)]
pub enum ContentMode {
    /// `fs:<dir>`: one local storage directory, no ring.
    Local { root: PathBuf },
    /// `nw:<admin_addr>,<node>,<node>...`: ring-routed storage nodes.
    Network(RouterSettings),
}

impl ContentMode {
    pub fn parse(mode: &str) -> Result<Self> {
        let Some((kind, rest)) = mode.split_once(':') else {
            bail!("content mode {:?} must look like fs:<dir> or nw:<admin>,<nodes...>", mode);
        };

        match kind {
            "fs" => {
                if rest.is_empty() {
                    bail!("fs content mode needs a directory");
                }
                Ok(ContentMode::Local {
                    root: PathBuf::from(rest),
                })
            }
            "nw" => {
                let mut parts = rest
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty());

                let Some(admin_addr) = parts.next() else {
                    bail!("nw content mode needs an admin address");
                };
                let storage_nodes: Vec<String> = parts.map(str::to_string).collect();
                if storage_nodes.is_empty() {
                    bail!("nw content mode needs at least one storage node");
                }

                Ok(ContentMode::Network(RouterSettings::new(
                    admin_addr,
                    storage_nodes,
                )))
            }
            other => bail!("unknown content mode {:?} (expected fs or nw)", other),
        }
    }
}

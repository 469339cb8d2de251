//! Content Placement Cluster Library
//!
//! This library crate defines the modules that place video content (manifests and
//! segments) across a set of storage nodes with consistent hashing.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of loosely coupled subsystems:
//!
//! - **`ring`**: The placement function. Hashes keys and node addresses onto a 64-bit
//!   circle and names the owner of every key.
//! - **`storage`**: A single storage node. Keeps blobs on the local filesystem and exposes
//!   them over an internal HTTP RPC surface.
//! - **`content`**: The facade the web layer consumes. Either reads one local directory or
//!   routes every call to the owning node on the ring.
//! - **`membership`**: Adds and removes nodes at runtime and migrates exactly the blobs
//!   whose owner changed.
//! - **`config`**: Validated process settings and the deployment mode selector.
//! - **`error`**: The error taxonomy shared by every layer.

pub mod config;
pub mod content;
pub mod error;
pub mod membership;
pub mod ring;
pub mod storage;

#[cfg(test)]
mod testing;

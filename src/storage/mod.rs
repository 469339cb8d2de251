//! Per-Node Blob Storage
//!
//! Each storage node persists blobs under its own root directory and exposes them over
//! an HTTP RPC surface. A node knows nothing about the ring; routing happens in the caller.
//!
//! ## Core Concepts
//! - **Keys**: [`ObjectKey`] is `(object_id, filename)`, rendered as `object_id/filename`.
//! - **Layout**: Blobs live at `<root>/<object_id>/<filename>`.
//! - **RPC**: Read, Write, List and Delete (see [`protocol`]), served by [`handlers::router`]
//!   and called through [`client::StorageClient`].
//! - **Absence**: Reading a missing key yields `None`, never an error. Deleting one is an error.

pub mod backend;
pub mod client;
pub mod handlers;
pub mod key;
pub mod protocol;

pub use backend::FsBackend;
pub use client::StorageClient;
pub use handlers::router;
pub use key::ObjectKey;

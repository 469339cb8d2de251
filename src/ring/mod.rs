//! Consistent Hashing Ring
//!
//! Maps an object key to exactly one storage node.
//!
//! ## Core Concepts
//! - **Positions**: Node addresses and object keys are hashed into the same `u64` space
//!   with [`hash_key`] (first 8 bytes of SHA-256, big-endian).
//! - **Ownership**: A key belongs to the first node whose position is strictly greater
//!   than the key's position; keys past the last node wrap around to the first one.
//! - **Snapshots**: [`SharedRing`] hands out immutable `Arc<Ring>` snapshots, so a reader
//!   never observes a ring that is halfway through a rebuild.

pub mod shared;
pub mod types;

pub use shared::SharedRing;
pub use types::{Node, Ring, hash_key};

//! Membership & Migration Module
//!
//! Owns the authoritative list of storage nodes and keeps the ring in step with it.
//! Adding or removing a node rebuilds the ring and moves exactly the blobs whose owner
//! changed.
//!
//! ## Core Mechanisms
//! - **Serialized changes**: One lock covers rebuild-then-migrate, so two membership changes
//!   never interleave.
//! - **Bounded scans**: A joining node only takes keys from its ring successor; a leaving node
//!   hands all of its keys to their new owners. No other node is listed.
//! - **No rollback**: Migration stops at the first failed RPC and reports it. Keys already moved
//!   stay moved, the membership change stays applied, and any key not yet deleted from its old
//!   node remains there as a duplicate that routing no longer reaches.

pub mod client;
pub mod coordinator;
pub mod handlers;
pub mod protocol;

pub use client::AdminClient;
pub use coordinator::MembershipCoordinator;

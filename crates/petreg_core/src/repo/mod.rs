//! Repository layer over the storage port.
//!
//! # Responsibility
//! - Load, look up and append records of one collection at a time.
//! - Enforce unique keys before any write.
//!
//! # Invariants
//! - Every mutation rewrites the full collection; there are no partial updates.
//! - Reads never fail: absent or unreadable data is an empty collection.

pub mod collection_repo;

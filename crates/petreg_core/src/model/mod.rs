//! Registry domain model.
//!
//! # Responsibility
//! - Define the owner and pet records and their stored wire shape.
//! - Build records only from validated form input.
//!
//! # Invariants
//! - A record built through `try_from_form` passed every field rule.
//! - Records are immutable once stored; there is no edit path.

pub mod owner;
pub mod pet;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A stored entity with a collection-wide unique key.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key under which the whole collection is persisted.
    const COLLECTION_KEY: &'static str;
    /// Human label used in log events and messages.
    const ENTITY: &'static str;

    /// Value of the unique-key field.
    fn key(&self) -> &str;
}

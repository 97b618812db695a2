//! Generic collection repository.
//!
//! # Responsibility
//! - Serialize one record collection as a JSON array under its storage key.
//! - Provide `load_all`, key lookups, `append` and `persist_all`.
//!
//! # Invariants
//! - `append` never stores a record whose key already exists.
//! - Record order is insertion order and survives a write/read cycle.
//! - Load failures degrade to an empty collection with a `warn` event.
//! - One undecodable record hides the whole collection; an `append` over
//!   such a payload replaces it and logs `collection_overwrite`.
//!
//! # Concurrency
//! `append` is a read-modify-write of the whole collection. Two writers
//! sharing one store can both pass the uniqueness check and the later write
//! drops the earlier record. Callers must serialize writers per store.

use crate::model::Record;
use crate::store::{KeyValueStore, StoreError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure for collection writes.
#[derive(Debug)]
pub enum RepoError {
    /// A record with this key is already stored.
    DuplicateKey { entity: &'static str, key: String },
    /// Records could not be encoded.
    Encode(serde_json::Error),
    /// The store rejected the write.
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { entity, key } => write!(f, "duplicate {entity} key `{key}`"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateKey { .. } => None,
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

struct Snapshot<T> {
    records: Vec<T>,
    /// Stored payload existed but could not be read or decoded.
    degraded: bool,
}

impl<T> Snapshot<T> {
    fn readable(records: Vec<T>) -> Self {
        Self {
            records,
            degraded: false,
        }
    }

    fn degraded() -> Self {
        Self {
            records: Vec::new(),
            degraded: true,
        }
    }
}

/// Repository for one record type over a borrowed store.
pub struct CollectionRepository<'store, T, S: ?Sized> {
    store: &'store S,
    _record: PhantomData<fn() -> T>,
}

impl<'store, T, S> CollectionRepository<'store, T, S>
where
    T: Record,
    S: KeyValueStore + ?Sized,
{
    pub fn new(store: &'store S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Reads the whole collection in insertion order.
    pub fn load_all(&self) -> Vec<T> {
        self.load_snapshot().records
    }

    fn load_snapshot(&self) -> Snapshot<T> {
        let raw = match self.store.read(T::COLLECTION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Snapshot::readable(Vec::new()),
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=degraded collection={} reason=read_failed error={}",
                    T::COLLECTION_KEY,
                    err
                );
                return Snapshot::degraded();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => Snapshot::readable(records),
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=degraded collection={} reason=decode_failed bytes={} error={}",
                    T::COLLECTION_KEY,
                    raw.len(),
                    err
                );
                Snapshot::degraded()
            }
        }
    }

    /// Exact, case-sensitive key match.
    pub fn exists_by_key(&self, key: &str) -> bool {
        self.load_all().iter().any(|record| record.key() == key)
    }

    pub fn find_by_key(&self, key: &str) -> Option<T> {
        self.load_all().into_iter().find(|record| record.key() == key)
    }

    /// Appends `record` after checking its key is free.
    ///
    /// When the stored payload cannot be read or decoded, the write replaces
    /// it with just `record`; the discarded payload is reported at `warn`.
    ///
    /// # Errors
    /// - [`RepoError::DuplicateKey`] when the key is taken; nothing is written.
    /// - [`RepoError::Store`] when the store rejects the write.
    pub fn append(&self, record: &T) -> RepoResult<()> {
        let Snapshot {
            mut records,
            degraded,
        } = self.load_snapshot();
        if records.iter().any(|existing| existing.key() == record.key()) {
            return Err(RepoError::DuplicateKey {
                entity: T::ENTITY,
                key: record.key().to_string(),
            });
        }

        records.push(record.clone());
        self.persist_all(&records)?;
        if degraded {
            warn!(
                "event=collection_overwrite module=repo status=degraded collection={} key={} reason=unreadable_payload_replaced",
                T::COLLECTION_KEY,
                record.key()
            );
        }
        debug!(
            "event=collection_append module=repo status=ok collection={} size={}",
            T::COLLECTION_KEY,
            records.len()
        );
        Ok(())
    }

    /// Replaces the stored collection with `records`.
    pub fn persist_all(&self, records: &[T]) -> RepoResult<()> {
        let encoded = serde_json::to_string(records)?;
        self.store.write(T::COLLECTION_KEY, &encoded)?;
        Ok(())
    }
}

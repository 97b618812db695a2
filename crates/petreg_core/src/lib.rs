//! Core domain logic for the pet registry.
//! This crate is the single source of truth for registration invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConfigOverrides, RegistryConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::owner::{Owner, OwnerForm, OWNERS_KEY};
pub use model::pet::{Pet, PetForm, PETS_KEY};
pub use model::Record;
pub use repo::collection_repo::{CollectionRepository, RepoError, RepoResult};
pub use service::listing_service::{
    owner_options, pet_listing, ListingRow, ListingService, OwnerOption, NO_OWNERS_MESSAGE,
    NO_PETS_MESSAGE, OWNER_NOT_FOUND, OWNER_PLACEHOLDER,
};
pub use service::registration_service::{
    Feedback, RegistrationError, RegistrationService, Severity, SubmissionStage,
};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use validate::{Field, Rule, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

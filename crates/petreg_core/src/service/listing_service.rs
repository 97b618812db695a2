//! Read-side projections: owner select options and the pet listing.
//!
//! # Invariants
//! - Rows follow pet insertion order.
//! - A pet whose owner reference matches no owner shows [`OWNER_NOT_FOUND`].

use crate::model::owner::Owner;
use crate::model::pet::Pet;
use crate::repo::collection_repo::CollectionRepository;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Owner column value for pets with a dangling owner reference.
pub const OWNER_NOT_FOUND: &str = "owner not found";
/// Select text shown when no owner is registered.
pub const NO_OWNERS_MESSAGE: &str = "No owners registered";
/// First, empty-valued select entry.
pub const OWNER_PLACEHOLDER: &str = "-- Select an owner --";
/// Listing text shown when no pet is registered.
pub const NO_PETS_MESSAGE: &str = "No pets registered yet.";

/// One row of the joined pet listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub owner_name: String,
    pub pet_name: String,
    pub pet_type: String,
    pub birth_date: NaiveDate,
}

/// Selectable owner for pet registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerOption {
    /// Owner identification submitted as the pet's owner reference.
    pub value: String,
    /// `"{name} ({identification})"`.
    pub label: String,
}

/// Joins pets with their owners' names.
///
/// When identifications repeat (only possible in hand-edited stores), the
/// first owner wins.
pub fn pet_listing(owners: &[Owner], pets: &[Pet]) -> Vec<ListingRow> {
    let mut names: HashMap<&str, &str> = HashMap::with_capacity(owners.len());
    for owner in owners {
        names
            .entry(owner.identification.as_str())
            .or_insert(owner.name.as_str());
    }

    pets.iter()
        .map(|pet| ListingRow {
            owner_name: names
                .get(pet.owner_id.as_str())
                .copied()
                .unwrap_or(OWNER_NOT_FOUND)
                .to_string(),
            pet_name: pet.pet_name.clone(),
            pet_type: pet.pet_type.clone(),
            birth_date: pet.birth_date,
        })
        .collect()
}

/// Builds select options in owner insertion order.
pub fn owner_options(owners: &[Owner]) -> Vec<OwnerOption> {
    owners
        .iter()
        .map(|owner| OwnerOption {
            value: owner.identification.clone(),
            label: format!("{} ({})", owner.name, owner.identification),
        })
        .collect()
}

/// Listing facade reading both collections from one store.
pub struct ListingService<'store, S: ?Sized> {
    owners: CollectionRepository<'store, Owner, S>,
    pets: CollectionRepository<'store, Pet, S>,
}

impl<'store, S: KeyValueStore + ?Sized> ListingService<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self {
            owners: CollectionRepository::new(store),
            pets: CollectionRepository::new(store),
        }
    }

    pub fn listing(&self) -> Vec<ListingRow> {
        pet_listing(&self.owners.load_all(), &self.pets.load_all())
    }

    pub fn owner_options(&self) -> Vec<OwnerOption> {
        owner_options(&self.owners.load_all())
    }
}

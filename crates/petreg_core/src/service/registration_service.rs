//! Owner and pet registration use-cases.
//!
//! # Responsibility
//! - Run a submission through validation, the uniqueness check and the write.
//! - Turn every outcome into one user-facing [`Feedback`].
//!
//! # Invariants
//! - Validation is fail-fast; the repository is not touched on a rule failure.
//! - A rejected submission writes nothing.
//! - Only storage failures surface as [`RegistrationError::Storage`].

use crate::clock::Clock;
use crate::model::owner::{Owner, OwnerForm};
use crate::model::pet::{Pet, PetForm};
use crate::model::Record;
use crate::repo::collection_repo::{CollectionRepository, RepoError};
use crate::store::KeyValueStore;
use crate::validate::ValidationError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Workflow stage a submission reached before it was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Validating,
    CheckingUniqueness,
    Persisting,
}

impl SubmissionStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::CheckingUniqueness => "checking_uniqueness",
            Self::Persisting => "persisting",
        }
    }
}

/// Why a registration was rejected.
#[derive(Debug)]
pub enum RegistrationError {
    /// First field rule that failed.
    Validation(ValidationError),
    /// Unique key already taken.
    DuplicateKey { entity: &'static str, key: String },
    /// Store rejected the write; nothing was committed.
    Storage {
        entity: &'static str,
        source: RepoError,
    },
}

impl RegistrationError {
    pub fn stage(&self) -> SubmissionStage {
        match self {
            Self::Validation(_) => SubmissionStage::Validating,
            Self::DuplicateKey { .. } => SubmissionStage::CheckingUniqueness,
            Self::Storage { .. } => SubmissionStage::Persisting,
        }
    }

    fn from_repo(entity: &'static str, err: RepoError) -> Self {
        match err {
            // Lost a race between the check and the write.
            RepoError::DuplicateKey { entity, key } => Self::DuplicateKey { entity, key },
            other => Self::Storage {
                entity,
                source: other,
            },
        }
    }
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey { entity: "owner", .. } => {
                write!(f, "Error: an owner with this identification already exists.")
            }
            Self::DuplicateKey { entity: "pet", .. } => {
                write!(f, "Error: a pet with this ID already exists.")
            }
            Self::DuplicateKey { entity, key } => {
                write!(f, "Error: a {entity} with key `{key}` already exists.")
            }
            Self::Storage { entity, source } => write!(f, "Could not save the {entity}: {source}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateKey { .. } => None,
            Self::Storage { source, .. } => Some(source),
        }
    }
}

impl From<ValidationError> for RegistrationError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Severity tag shown next to a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

/// User-facing result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub severity: Severity,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn from_owner_result(result: &Result<Owner, RegistrationError>) -> Self {
        match result {
            Ok(owner) => Self::success(format!("Owner {} registered successfully.", owner.name)),
            Err(err) => Self::error(err.to_string()),
        }
    }

    pub fn from_pet_result(result: &Result<Pet, RegistrationError>) -> Self {
        match result {
            Ok(pet) => Self::success(format!("Pet {} registered successfully.", pet.pet_name)),
            Err(err) => Self::error(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }
}

/// Registration service over one shared store.
///
/// Assumes a single writer per store; see `repo::collection_repo`.
pub struct RegistrationService<'store, S: ?Sized, C> {
    owners: CollectionRepository<'store, Owner, S>,
    pets: CollectionRepository<'store, Pet, S>,
    clock: C,
}

impl<'store, S, C> RegistrationService<'store, S, C>
where
    S: KeyValueStore + ?Sized,
    C: Clock,
{
    pub fn new(store: &'store S, clock: C) -> Self {
        Self {
            owners: CollectionRepository::new(store),
            pets: CollectionRepository::new(store),
            clock,
        }
    }

    /// Validates and stores one owner.
    ///
    /// Order: identification, name, email, phone (if given), uniqueness.
    pub fn register_owner(&self, form: &OwnerForm) -> Result<Owner, RegistrationError> {
        let result = Owner::try_from_form(form)
            .map_err(RegistrationError::from)
            .and_then(|owner| self.store_unique(&self.owners, owner));
        log_outcome("owner_register", &form.identification, &result);
        result
    }

    /// Validates and stores one pet. The owner reference is not checked.
    ///
    /// Order: id, name, birth date, uniqueness.
    pub fn register_pet(&self, form: &PetForm) -> Result<Pet, RegistrationError> {
        let result = Pet::try_from_form(form, self.clock.today())
            .map_err(RegistrationError::from)
            .and_then(|pet| self.store_unique(&self.pets, pet));
        log_outcome("pet_register", &form.pet_id, &result);
        result
    }

    fn store_unique<T: Record>(
        &self,
        repo: &CollectionRepository<'store, T, S>,
        record: T,
    ) -> Result<T, RegistrationError> {
        if repo.exists_by_key(record.key()) {
            return Err(RegistrationError::DuplicateKey {
                entity: T::ENTITY,
                key: record.key().to_string(),
            });
        }

        repo.append(&record)
            .map_err(|err| RegistrationError::from_repo(T::ENTITY, err))?;
        Ok(record)
    }
}

fn log_outcome<T>(event: &str, key: &str, result: &Result<T, RegistrationError>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok key={key}"),
        Err(RegistrationError::Storage { source, .. }) => warn!(
            "event={event} module=service status=error stage=persisting key={key} error={source}"
        ),
        Err(err) => info!(
            "event={event} module=service status=rejected stage={} key={key}",
            err.stage().as_str()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{Feedback, RegistrationError, Severity, SubmissionStage};
    use crate::validate::{Field, Rule, ValidationError};

    #[test]
    fn duplicate_messages_are_entity_specific() {
        let owner = RegistrationError::DuplicateKey {
            entity: "owner",
            key: "A1".to_string(),
        };
        let pet = RegistrationError::DuplicateKey {
            entity: "pet",
            key: "P1".to_string(),
        };
        assert_eq!(
            owner.to_string(),
            "Error: an owner with this identification already exists."
        );
        assert_eq!(pet.to_string(), "Error: a pet with this ID already exists.");
        assert_eq!(owner.stage(), SubmissionStage::CheckingUniqueness);
    }

    #[test]
    fn validation_feedback_carries_rule_message() {
        let result = Err(RegistrationError::Validation(ValidationError::new(
            Field::OwnerName,
            Rule::Alphabetic,
        )));
        let feedback = Feedback::from_owner_result(&result);
        assert_eq!(feedback.severity, Severity::Error);
        assert_eq!(feedback.message, "Name must contain only letters.");
        assert_eq!(feedback.severity.as_str(), "error");
    }
}

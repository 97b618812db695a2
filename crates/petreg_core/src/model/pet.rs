//! Pet record.
//!
//! # Invariants
//! - `pet_id` is alphanumeric and unique in the pets collection.
//! - `birth_date` was not after the registration day.
//! - `owner_id` is a plain reference; the owner may not exist.

use crate::model::Record;
use crate::validate::{
    first_violation, is_alphabetic, is_alphanumeric, is_date_not_future, parse_birth_date, Field,
    FieldCheck, Rule, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage key of the pets collection.
pub const PETS_KEY: &str = "mascotasData";

/// Stored pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(rename = "idMascota")]
    pub pet_id: String,
    #[serde(rename = "nombreMascota")]
    pub pet_name: String,
    /// Chosen from a fixed option list upstream; not validated here.
    #[serde(rename = "tipoMascota")]
    pub pet_type: String,
    /// Serialized as `YYYY-MM-DD`.
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "duenoAsignado")]
    pub owner_id: String,
}

/// Raw pet submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetForm {
    pub pet_id: String,
    pub pet_name: String,
    pub pet_type: String,
    pub birth_date: String,
    pub owner_id: String,
}

impl PetForm {
    /// Copy of this form with id and name trimmed.
    ///
    /// Selection fields and the date input are taken as submitted.
    pub fn trimmed(&self) -> Self {
        Self {
            pet_id: self.pet_id.trim().to_string(),
            pet_name: self.pet_name.trim().to_string(),
            ..self.clone()
        }
    }
}

impl Pet {
    /// Validates `form` against `today` and builds the record.
    ///
    /// Rule order: id, name, birth date format, birth date not in the future.
    pub fn try_from_form(form: &PetForm, today: NaiveDate) -> Result<Self, ValidationError> {
        let birth_date = parse_birth_date(&form.birth_date);

        first_violation([
            FieldCheck::new(Field::PetId, Rule::Alphanumeric, || {
                is_alphanumeric(&form.pet_id)
            }),
            FieldCheck::new(Field::PetName, Rule::Alphabetic, || {
                is_alphabetic(&form.pet_name)
            }),
            FieldCheck::new(Field::PetBirthDate, Rule::DateFormat, || {
                birth_date.is_some()
            }),
            FieldCheck::new(Field::PetBirthDate, Rule::NotFutureDate, || {
                birth_date.is_some_and(|date| is_date_not_future(date, today))
            }),
        ])?;

        let birth_date =
            birth_date.ok_or(ValidationError::new(Field::PetBirthDate, Rule::DateFormat))?;

        Ok(Self {
            pet_id: form.pet_id.clone(),
            pet_name: form.pet_name.clone(),
            pet_type: form.pet_type.clone(),
            birth_date,
            owner_id: form.owner_id.clone(),
        })
    }
}

impl Record for Pet {
    const COLLECTION_KEY: &'static str = PETS_KEY;
    const ENTITY: &'static str = "pet";

    fn key(&self) -> &str {
        &self.pet_id
    }
}

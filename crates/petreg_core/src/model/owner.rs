//! Owner record.
//!
//! # Invariants
//! - `identification` is alphanumeric and unique in the owners collection.
//! - `phone` is either empty or 8-15 digits.

use crate::model::Record;
use crate::validate::{
    first_violation, is_alphabetic, is_alphanumeric, is_email, is_phone, Field, FieldCheck, Rule,
    ValidationError,
};
use serde::{Deserialize, Serialize};

/// Storage key of the owners collection.
pub const OWNERS_KEY: &str = "duenosData";

/// Stored owner record.
///
/// Field names on the wire match the persisted layout (`identificacion`,
/// `nombre`, ...), so existing stores load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(rename = "identificacion")]
    pub identification: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    /// Empty string when not provided.
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
}

/// Raw owner submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerForm {
    pub identification: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl OwnerForm {
    /// Copy of this form with every field whitespace-trimmed.
    pub fn trimmed(&self) -> Self {
        Self {
            identification: self.identification.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

impl Owner {
    /// Validates `form` and builds the record.
    ///
    /// Rule order: identification, name, email, phone (only when given).
    /// Address is free text.
    pub fn try_from_form(form: &OwnerForm) -> Result<Self, ValidationError> {
        first_violation([
            FieldCheck::new(Field::OwnerIdentification, Rule::Alphanumeric, || {
                is_alphanumeric(&form.identification)
            }),
            FieldCheck::new(Field::OwnerName, Rule::Alphabetic, || {
                is_alphabetic(&form.name)
            }),
            FieldCheck::new(Field::OwnerEmail, Rule::EmailFormat, || {
                is_email(&form.email)
            }),
            FieldCheck::new(Field::OwnerPhone, Rule::PhoneFormat, || {
                form.phone.is_empty() || is_phone(&form.phone)
            }),
        ])?;

        Ok(Self {
            identification: form.identification.clone(),
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
        })
    }

    /// Returns whether a phone number was recorded.
    pub fn has_phone(&self) -> bool {
        !self.phone.is_empty()
    }
}

impl Record for Owner {
    const COLLECTION_KEY: &'static str = OWNERS_KEY;
    const ENTITY: &'static str = "owner";

    fn key(&self) -> &str {
        &self.identification
    }
}

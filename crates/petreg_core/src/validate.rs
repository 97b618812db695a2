//! Field validators and the fail-fast rule runner.
//!
//! # Responsibility
//! - Provide pure, total predicates over raw form strings.
//! - Evaluate an ordered rule list and report only the first violation.
//!
//! # Invariants
//! - Predicates have no side effects and never panic.
//! - Rules after the first failing one are never evaluated.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ALPHANUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid alphanumeric regex"));
static ALPHABETIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z[:space:]]+$").expect("valid alphabetic regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^[:space:]@]+@[^[:space:]@]+\.[^[:space:]@]+$").expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8,15}$").expect("valid phone regex"));
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid iso date regex"));

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// True iff `value` is non-empty and only ASCII letters and digits.
pub fn is_alphanumeric(value: &str) -> bool {
    ALPHANUMERIC_RE.is_match(value)
}

/// True iff `value` is non-empty and only ASCII letters and whitespace.
pub fn is_alphabetic(value: &str) -> bool {
    ALPHABETIC_RE.is_match(value)
}

/// True iff `value` has the `local@domain.tld` shape.
///
/// Whitespace means ASCII whitespace. No further domain checks, no length bounds.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// True iff `value` is 8 to 15 ASCII digits.
pub fn is_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// True iff `date` is on or before `today`.
pub fn is_date_not_future(date: NaiveDate, today: NaiveDate) -> bool {
    date <= today
}

/// Parses a strict ISO calendar date (`YYYY-MM-DD`).
///
/// Zero padding is required; signs and surrounding whitespace are rejected.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).ok()
}

/// Form field a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    OwnerIdentification,
    OwnerName,
    OwnerEmail,
    OwnerPhone,
    PetId,
    PetName,
    PetBirthDate,
}

impl Field {
    /// Label used at the start of user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::OwnerIdentification => "Identification",
            Self::OwnerName => "Name",
            Self::OwnerEmail => "Email",
            Self::OwnerPhone => "Phone",
            Self::PetId => "Pet ID",
            Self::PetName => "Pet name",
            Self::PetBirthDate => "Birth date",
        }
    }
}

/// Validation rule that a field value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Alphanumeric,
    Alphabetic,
    EmailFormat,
    PhoneFormat,
    DateFormat,
    NotFutureDate,
}

impl Rule {
    fn requirement(self) -> &'static str {
        match self {
            Self::Alphanumeric => "must be alphanumeric",
            Self::Alphabetic => "must contain only letters",
            Self::EmailFormat => "must have a valid format",
            Self::PhoneFormat => "must have between 8 and 15 digits",
            Self::DateFormat => "must be a valid date (YYYY-MM-DD)",
            Self::NotFutureDate => "cannot be in the future",
        }
    }
}

/// First rule violation found for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub rule: Rule,
}

impl ValidationError {
    pub fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}.", self.field.label(), self.rule.requirement())
    }
}

impl Error for ValidationError {}

/// One entry of an ordered rule list.
pub struct FieldCheck<'a> {
    field: Field,
    rule: Rule,
    passes: Box<dyn Fn() -> bool + 'a>,
}

impl<'a> FieldCheck<'a> {
    pub fn new(field: Field, rule: Rule, passes: impl Fn() -> bool + 'a) -> Self {
        Self {
            field,
            rule,
            passes: Box::new(passes),
        }
    }
}

/// Runs `checks` in order and stops at the first failing one.
pub fn first_violation<'a>(
    checks: impl IntoIterator<Item = FieldCheck<'a>>,
) -> Result<(), ValidationError> {
    for check in checks {
        if !(check.passes)() {
            return Err(ValidationError::new(check.field, check.rule));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn alphanumeric_accepts_ascii_letters_and_digits_only() {
        assert!(is_alphanumeric("ABC123"));
        assert!(is_alphanumeric("z"));
        for bad in ["", "ABC 123", "abc-1", "ñandu", "12_3", " A1"] {
            assert!(!is_alphanumeric(bad), "`{bad}` should be rejected");
        }
    }

    #[test]
    fn alphabetic_allows_inner_spaces_but_not_digits() {
        assert!(is_alphabetic("Jane Doe"));
        assert!(!is_alphabetic("Jane2"));
        assert!(!is_alphabetic(""));
        assert!(!is_alphabetic("O'Neil"));
        assert!(is_alphabetic("Jane\tDoe"));
        assert!(!is_alphabetic("Jane\u{00A0}Doe"));
        assert!(!is_alphabetic("Jane\u{3000}Doe"));
    }

    #[test]
    fn email_requires_at_and_dotted_domain() {
        assert!(is_email("jane@x.com"));
        assert!(is_email("a.b@mail.example.org"));
        for bad in ["jane", "jane@x", "@x.com", "ja ne@x.com", "jane@@x.com", "jane@x."] {
            assert!(!is_email(bad), "`{bad}` should be rejected");
        }
    }

    #[test]
    fn phone_bounds_are_inclusive() {
        assert!(is_phone("12345678"));
        assert!(is_phone("123456789012345"));
        assert!(!is_phone("1234567"));
        assert!(!is_phone("1234567890123456"));
        assert!(!is_phone("+12345678"));
        assert!(!is_phone("1234 5678"));
        assert!(!is_phone("١٢٣٤٥٦٧٨"));
    }

    #[test]
    fn date_not_future_includes_today() {
        let today = date(2024, 5, 10);
        assert!(is_date_not_future(today, today));
        assert!(is_date_not_future(date(2024, 5, 9), today));
        assert!(!is_date_not_future(date(2024, 5, 11), today));
    }

    #[test]
    fn parse_birth_date_is_strict_iso() {
        assert_eq!(parse_birth_date("2020-02-29"), Some(date(2020, 2, 29)));
        assert_eq!(parse_birth_date("2021-02-29"), None);
        assert_eq!(parse_birth_date("10/05/2024"), None);
        assert_eq!(parse_birth_date(""), None);
        assert_eq!(parse_birth_date(" 2020-01-01"), None);
        assert_eq!(parse_birth_date("2020-01-01 "), None);
        assert_eq!(parse_birth_date("2020-1-5"), None);
        assert_eq!(parse_birth_date("+2020-01-01"), None);
        assert_eq!(parse_birth_date("2018-07-04T00:00"), None);
    }

    #[test]
    fn first_violation_short_circuits() {
        let evaluated = Cell::new(0);
        let result = first_violation([
            FieldCheck::new(Field::PetId, Rule::Alphanumeric, || {
                evaluated.set(evaluated.get() + 1);
                true
            }),
            FieldCheck::new(Field::PetName, Rule::Alphabetic, || {
                evaluated.set(evaluated.get() + 1);
                false
            }),
            FieldCheck::new(Field::PetBirthDate, Rule::NotFutureDate, || {
                evaluated.set(evaluated.get() + 1);
                false
            }),
        ]);

        assert_eq!(
            result,
            Err(ValidationError::new(Field::PetName, Rule::Alphabetic))
        );
        assert_eq!(evaluated.get(), 2);
    }

    #[test]
    fn messages_combine_field_label_and_rule() {
        let err = ValidationError::new(Field::OwnerPhone, Rule::PhoneFormat);
        assert_eq!(err.to_string(), "Phone must have between 8 and 15 digits.");
        let err = ValidationError::new(Field::PetBirthDate, Rule::NotFutureDate);
        assert_eq!(err.to_string(), "Birth date cannot be in the future.");
    }
}

//! Field rule set for enrollment records.
//!
//! Shared by the form state machine and the HTTP endpoint so both tiers
//! enforce the same rules. Every field is checked on every call; a failing
//! field never hides the result of another.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateLength;

use crate::error::ValidationError;
use crate::record::{EnrollmentRecord, Field};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Youngest accepted age, inclusive.
pub const MIN_AGE: i32 = 18;
/// Oldest accepted age, inclusive.
pub const MAX_AGE: i32 = 65;
/// Required number of digits in a mobile number.
pub const MOBILE_LEN: u64 = 10;

pub const NAME_MESSAGE: &str = "Please enter a valid name";
pub const DOB_MESSAGE: &str = "You should be between 18 and 65 years";
pub const MOBILE_MESSAGE: &str = "Please enter a valid 10-digit mobile number";
pub const BATCH_MESSAGE: &str = "Please select a batch";
pub const GENDER_MESSAGE: &str = "Please select gender";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern compiles"));

// ---------------------------------------------------------------------------
// ErrorMap
// ---------------------------------------------------------------------------

/// Field-level validation failures. A field is invalid iff it has an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for `field`, or `None` when the field is valid.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// `true` when no field failed.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Rule set
// ---------------------------------------------------------------------------

/// Validate every field of `record` as of `today`.
pub fn validate(record: &EnrollmentRecord, today: NaiveDate) -> ErrorMap {
    let mut errors = ErrorMap::default();

    if !is_valid_name(&record.name) {
        errors.insert(Field::Name, NAME_MESSAGE);
    }
    if !is_valid_date_of_birth(&record.date_of_birth, today) {
        errors.insert(Field::DateOfBirth, DOB_MESSAGE);
    }
    if !is_valid_mobile(&record.mobile) {
        errors.insert(Field::Mobile, MOBILE_MESSAGE);
    }
    if record.batch.is_empty() {
        errors.insert(Field::Batch, BATCH_MESSAGE);
    }
    if record.gender.is_empty() {
        errors.insert(Field::Gender, GENDER_MESSAGE);
    }

    errors
}

/// [`validate`] against today's UTC date.
pub fn validate_now(record: &EnrollmentRecord) -> ErrorMap {
    validate(record, Utc::now().date_naive())
}

/// Like [`validate`], but folds any failure into a [`ValidationError`].
pub fn ensure_valid(record: &EnrollmentRecord, today: NaiveDate) -> Result<(), ValidationError> {
    let errors = validate(record, today);
    if errors.is_valid() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Age as a plain year difference. Month and day are ignored, so someone
/// whose birthday is still ahead this year counts one year older.
pub fn naive_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth.year()
}

/// Parse a submitted date of birth: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

fn is_valid_date_of_birth(raw: &str, today: NaiveDate) -> bool {
    parse_date_of_birth(raw)
        .map(|birth| (MIN_AGE..=MAX_AGE).contains(&naive_age(birth, today)))
        .unwrap_or(false)
}

fn is_valid_mobile(mobile: &str) -> bool {
    mobile.validate_length(None, None, Some(MOBILE_LEN))
        && mobile.chars().all(|c| c.is_ascii_digit())
}

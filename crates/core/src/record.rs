//! The enrollment record and its fixed option sets.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One person's class sign-up as submitted by the form.
///
/// Field values are kept as raw strings so the record can be echoed back
/// verbatim. Absent, `null`, and non-string JSON values deserialize to an
/// empty string, which the rule set then reports as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "dob", default, deserialize_with = "lenient_string")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mobile: String,
    #[serde(rename = "selectedBatch", default, deserialize_with = "lenient_string")]
    pub batch: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: String,
}

impl EnrollmentRecord {
    /// Current value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Mobile => &self.mobile,
            Field::Batch => &self.batch,
            Field::Gender => &self.gender,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::DateOfBirth => self.date_of_birth = value,
            Field::Mobile => self.mobile = value,
            Field::Batch => self.batch = value,
            Field::Gender => self.gender = value,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A form field. Serializes to the same key the field uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "dob")]
    DateOfBirth,
    #[serde(rename = "mobile")]
    Mobile,
    #[serde(rename = "selectedBatch")]
    Batch,
    #[serde(rename = "gender")]
    Gender,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::DateOfBirth,
        Field::Mobile,
        Field::Batch,
        Field::Gender,
    ];

    /// Wire key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::DateOfBirth => "dob",
            Field::Mobile => "mobile",
            Field::Batch => "selectedBatch",
            Field::Gender => "gender",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Option sets
// ---------------------------------------------------------------------------

/// Weekly class time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Batch {
    #[serde(rename = "6-7AM")]
    SixToSevenAm,
    #[serde(rename = "7-8AM")]
    SevenToEightAm,
    #[serde(rename = "8-9AM")]
    EightToNineAm,
    #[serde(rename = "5-6PM")]
    FiveToSixPm,
}

impl Batch {
    pub const ALL: [Batch; 4] = [
        Batch::SixToSevenAm,
        Batch::SevenToEightAm,
        Batch::EightToNineAm,
        Batch::FiveToSixPm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Batch::SixToSevenAm => "6-7AM",
            Batch::SevenToEightAm => "7-8AM",
            Batch::EightToNineAm => "8-9AM",
            Batch::FiveToSixPm => "5-6PM",
        }
    }

    /// Look up a slot by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

//! In-memory record representation shared with the persistence layer.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single field value as held in memory between the persistence layer and
/// the application.
///
/// Stored envelopes are always `Text`; `Date` exists only in memory and is
/// canonicalized to text before encryption.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Text(String),
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// Canonical textual form: dates render as RFC 3339 with millisecond
    /// precision and a `Z` suffix (`2026-01-01T00:00:00.000Z`), matching the
    /// form stored inside existing envelopes. `Null` has no text form.
    pub fn canonical_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Date(d) => Some(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Parse a canonical date string back into a UTC timestamp.
pub fn parse_canonical_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Does this field name conventionally hold a date or timestamp?
///
/// Used on the read path to restore decrypted text back into a
/// [`FieldValue::Date`]. Name-convention based, so a mismatch degrades to
/// leaving the value as text.
pub fn has_date_semantics(field_name: &str) -> bool {
    let name = field_name.to_ascii_lowercase();
    name == "dob" || name.ends_with("_at") || name.contains("date")
}

/// A live record being written to or read from storage.
///
/// The encryption hooks mutate `fields` in place; everything else about the
/// record (identity, persistence, validation) belongs to the host system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record type identifier, as known to the sensitive-field registry.
    pub record_type: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment, mostly for tests and fixtures.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }
}

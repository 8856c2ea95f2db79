//! Field interceptor: maps a record's sensitive-field set to per-field
//! encrypt/decrypt calls.

use std::sync::Arc;

use tracing::warn;

use casevault_crypto::{decrypt_field, encrypt_field, looks_encrypted, search_digest, DerivedKey};
use casevault_model::{
    has_date_semantics, parse_canonical_date, FieldValue, Record, SensitiveFieldSource,
};

/// Drives field encryption from persistence lifecycle events.
///
/// Constructed once at startup with the process key and the metadata
/// registry, then shared by the persistence layer. One field's crypto
/// failure never aborts the surrounding operation — the field is left
/// as-is and a warning is emitted.
pub struct FieldInterceptor {
    key: DerivedKey,
    registry: Arc<dyn SensitiveFieldSource>,
}

impl FieldInterceptor {
    pub fn new(key: DerivedKey, registry: Arc<dyn SensitiveFieldSource>) -> Self {
        Self { key, registry }
    }

    /// Pre-write hook: encrypt every sensitive field in place.
    ///
    /// Null and empty values are not secrets and pass through. Text already
    /// classified as one of our envelopes is left untouched, so repeated
    /// saves of an unchanged record are idempotent. Dates are canonicalized
    /// to text before encryption.
    pub fn before_save(&self, record: &mut Record) {
        for name in self.registry.sensitive_fields(&record.record_type) {
            let Some(value) = record.fields.get_mut(name) else {
                continue;
            };
            let plaintext = match value {
                FieldValue::Null => continue,
                FieldValue::Text(s) if s.is_empty() => continue,
                FieldValue::Text(s) if looks_encrypted(s) => continue,
                FieldValue::Text(s) => s.clone(),
                FieldValue::Date(_) => match value.canonical_text() {
                    Some(text) => text,
                    None => continue,
                },
            };
            match encrypt_field(&self.key, &plaintext) {
                Ok(envelope) => *value = FieldValue::Text(envelope),
                Err(err) => {
                    warn!(field = %name, error = %err, "field encryption failed; value left untouched");
                }
            }
        }
    }

    /// Post-read hook: decrypt every sensitive field in place.
    ///
    /// Only values the classifier recognizes as envelopes are decrypted;
    /// legacy plaintext rows come back exactly as stored. Decrypted text in
    /// a date-named field is parsed back into a [`FieldValue::Date`], falling
    /// back to the raw text when parsing fails.
    pub fn after_load(&self, record: &mut Record) {
        for name in self.registry.sensitive_fields(&record.record_type) {
            let Some(value) = record.fields.get_mut(name) else {
                continue;
            };
            let FieldValue::Text(stored) = value else {
                continue;
            };
            if stored.is_empty() || !looks_encrypted(stored) {
                continue;
            }
            let recovered = decrypt_field(&self.key, stored);
            if has_date_semantics(name) {
                if let Some(date) = parse_canonical_date(&recovered) {
                    *value = FieldValue::Date(date);
                    continue;
                }
            }
            *value = FieldValue::Text(recovered);
        }
    }

    /// Deterministic search digest for a value, for callers that hold the
    /// interceptor rather than the key.
    pub fn search_digest(&self, value: &str) -> String {
        search_digest(&self.key, value)
    }
}

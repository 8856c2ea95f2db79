//! Sensitive-field metadata registry.

use std::collections::HashMap;

/// Read-only source of "which fields of this record type are sensitive".
///
/// Consumers depend on `Arc<dyn SensitiveFieldSource>` and query per record
/// type at interception time; they never cache the answer beyond a single
/// hook invocation.
pub trait SensitiveFieldSource: Send + Sync {
    /// Field names of `record_type` that must be routed through encryption.
    /// Unknown record types have no sensitive fields.
    fn sensitive_fields(&self, record_type: &str) -> &[String];
}

/// Statically declared registry: record type → ordered field names.
///
/// Built once at startup from explicit declarations.
#[derive(Debug, Default)]
pub struct StaticFieldRegistry {
    fields: HashMap<String, Vec<String>>,
}

impl StaticFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the sensitive fields of a record type. Re-registering a type
    /// replaces its previous declaration.
    pub fn register<I, S>(&mut self, record_type: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(record_type.into(), fields.into_iter().map(Into::into).collect());
    }
}

impl SensitiveFieldSource for StaticFieldRegistry {
    fn sensitive_fields(&self, record_type: &str) -> &[String] {
        self.fields
            .get(record_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_fields_come_back_in_order() {
        let mut registry = StaticFieldRegistry::new();
        registry.register("clients", ["ssn", "dob", "account_number"]);
        assert_eq!(
            registry.sensitive_fields("clients"),
            ["ssn", "dob", "account_number"]
        );
    }

    #[test]
    fn unknown_record_type_has_no_sensitive_fields() {
        let registry = StaticFieldRegistry::new();
        assert!(registry.sensitive_fields("tasks").is_empty());
    }

    #[test]
    fn re_registering_replaces() {
        let mut registry = StaticFieldRegistry::new();
        registry.register("clients", ["ssn"]);
        registry.register("clients", ["ssn", "dob"]);
        assert_eq!(registry.sensitive_fields("clients"), ["ssn", "dob"]);
    }
}

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use casevault_crypto::{looks_encrypted, search_digest, DerivedKey, KEY_SIZE};
use casevault_hooks::FieldInterceptor;
use casevault_model::{FieldValue, Record, StaticFieldRegistry};

fn interceptor() -> FieldInterceptor {
    let mut registry = StaticFieldRegistry::new();
    registry.register("clients", ["ssn", "dob", "account_number"]);
    FieldInterceptor::new(
        DerivedKey::from_bytes([0xC4; KEY_SIZE]),
        Arc::new(registry),
    )
}

fn client_record() -> Record {
    Record::new("clients")
        .with_field("name", FieldValue::Text("Jane Doe".into()))
        .with_field("ssn", FieldValue::Text("123-45-6789".into()))
        .with_field("account_number", FieldValue::Text("1234567890".into()))
}

#[test]
fn before_save_encrypts_only_sensitive_fields() {
    let hooks = interceptor();
    let mut record = client_record();
    hooks.before_save(&mut record);

    let ssn = record.get("ssn").unwrap().as_text().unwrap();
    assert_ne!(ssn, "123-45-6789");
    assert!(looks_encrypted(ssn));

    // Non-sensitive fields are untouched.
    assert_eq!(
        record.get("name"),
        Some(&FieldValue::Text("Jane Doe".into()))
    );
}

#[test]
fn save_then_load_round_trips() {
    let hooks = interceptor();
    let mut record = client_record();
    hooks.before_save(&mut record);
    hooks.after_load(&mut record);
    assert_eq!(record, client_record());
}

#[test]
fn repeated_saves_do_not_re_encrypt() {
    let hooks = interceptor();
    let mut record = client_record();
    hooks.before_save(&mut record);
    let first = record.get("ssn").cloned();

    // An unchanged record saved again keeps the exact same envelope — the
    // classifier gates encryption, rather than a second layer being added.
    hooks.before_save(&mut record);
    assert_eq!(record.get("ssn").cloned(), first);

    hooks.after_load(&mut record);
    assert_eq!(
        record.get("ssn"),
        Some(&FieldValue::Text("123-45-6789".into()))
    );
}

#[test]
fn date_fields_are_restored_as_dates() {
    let hooks = interceptor();
    let dob = Utc.with_ymd_and_hms(1985, 3, 14, 0, 0, 0).unwrap();
    let mut record = Record::new("clients").with_field("dob", FieldValue::Date(dob));

    hooks.before_save(&mut record);
    let stored = record.get("dob").unwrap().as_text().unwrap().to_owned();
    assert!(looks_encrypted(&stored));

    hooks.after_load(&mut record);
    assert_eq!(record.get("dob"), Some(&FieldValue::Date(dob)));
}

#[test]
fn non_date_text_in_date_field_falls_back_to_text() {
    let hooks = interceptor();
    let mut record =
        Record::new("clients").with_field("dob", FieldValue::Text("circa 1985".into()));

    hooks.before_save(&mut record);
    hooks.after_load(&mut record);
    assert_eq!(
        record.get("dob"),
        Some(&FieldValue::Text("circa 1985".into()))
    );
}

#[test]
fn null_and_empty_fields_pass_through() {
    let hooks = interceptor();
    let mut record = Record::new("clients")
        .with_field("ssn", FieldValue::Null)
        .with_field("account_number", FieldValue::Text(String::new()));

    hooks.before_save(&mut record);
    assert_eq!(record.get("ssn"), Some(&FieldValue::Null));
    assert_eq!(
        record.get("account_number"),
        Some(&FieldValue::Text(String::new()))
    );

    hooks.after_load(&mut record);
    assert_eq!(record.get("ssn"), Some(&FieldValue::Null));
}

#[test]
fn legacy_plaintext_rows_load_unchanged() {
    // A row written before encryption existed: plain SSN in storage.
    let hooks = interceptor();
    let mut record =
        Record::new("clients").with_field("ssn", FieldValue::Text("123-45-6789".into()));

    hooks.after_load(&mut record);
    assert_eq!(
        record.get("ssn"),
        Some(&FieldValue::Text("123-45-6789".into()))
    );
}

#[test]
fn one_corrupt_field_does_not_affect_the_others() {
    let hooks = interceptor();
    let mut record = client_record();
    hooks.before_save(&mut record);

    // Corrupt the account number envelope in "storage".
    let envelope = record
        .get("account_number")
        .unwrap()
        .as_text()
        .unwrap()
        .to_owned();
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    let mut raw = STANDARD.decode(&envelope).unwrap();
    raw[20] ^= 0xFF; // inside the auth tag
    let corrupted = STANDARD.encode(&raw);
    record.set("account_number", FieldValue::Text(corrupted.clone()));

    hooks.after_load(&mut record);

    // The corrupt field degrades to its stored form; its neighbor decrypts.
    assert_eq!(
        record.get("account_number"),
        Some(&FieldValue::Text(corrupted))
    );
    assert_eq!(
        record.get("ssn"),
        Some(&FieldValue::Text("123-45-6789".into()))
    );
}

#[test]
fn records_of_unregistered_types_are_untouched() {
    let hooks = interceptor();
    let mut record =
        Record::new("tasks").with_field("ssn", FieldValue::Text("123-45-6789".into()));

    hooks.before_save(&mut record);
    assert_eq!(
        record.get("ssn"),
        Some(&FieldValue::Text("123-45-6789".into()))
    );
}

#[test]
fn interceptor_digest_matches_crypto_digest() {
    let key = DerivedKey::from_bytes([0xC4; KEY_SIZE]);
    let hooks = interceptor();
    assert_eq!(
        hooks.search_digest("Test@Example.com"),
        search_digest(&key, "test@example.com")
    );
}

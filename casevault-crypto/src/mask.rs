//! Display masking for sensitive values.
//!
//! Both functions accept either plaintext or one of our envelopes: ciphertext
//! is decrypted first, then redacted. They are safe to call on anything a
//! record might hold and always produce a display string, never an error.

use crate::cipher::{decrypt_field, looks_encrypted};
use crate::key::DerivedKey;

/// Fully redacted SSN placeholder, used when the value does not contain
/// exactly nine digits.
const SSN_REDACTED: &str = "XXX-XX-XXXX";

/// Prefix shown in place of the hidden part of an account number.
const ACCOUNT_MASK: &str = "****";

/// Mask a Social Security number for display, revealing only the last four
/// digits: `XXX-XX-6789`. Formatting in the input is ignored; anything that
/// does not reduce to nine digits comes back fully redacted.
pub fn mask_ssn(key: &DerivedKey, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let plain = reveal(key, value);
    let digits: String = plain.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return SSN_REDACTED.to_owned();
    }
    format!("XXX-XX-{}", &digits[5..])
}

/// Mask an account number for display, revealing only the last four
/// characters: `****7890`. Values of four characters or fewer are returned
/// unchanged — there is nothing meaningful left to hide.
pub fn mask_account_number(key: &DerivedKey, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let plain = reveal(key, value);
    let chars: Vec<char> = plain.chars().collect();
    if chars.len() <= 4 {
        return plain;
    }
    let last4: String = chars[chars.len() - 4..].iter().collect();
    format!("{ACCOUNT_MASK}{last4}")
}

fn reveal(key: &DerivedKey, value: &str) -> String {
    if looks_encrypted(value) {
        decrypt_field(key, value)
    } else {
        value.to_owned()
    }
}

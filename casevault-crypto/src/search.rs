//! Deterministic search digests for exact-match lookup on encrypted fields.
//!
//! Because envelopes are non-deterministic, equality search cannot compare
//! ciphertexts. Consumers store this keyed digest in a separate column and
//! query against it instead. The digest is one-way and case-insensitive;
//! it supports exact match only, not partial or range search.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::key::DerivedKey;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex HMAC-SHA256 digest of a value under the derived key.
///
/// Input is lowercase-folded first so case variants of the same logical value
/// (e.g. an email address) produce the same digest. Empty input is returned
/// unchanged — an empty digest must never be used as an index key.
pub fn search_digest(key: &DerivedKey, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("hmac accepts any key length");
    mac.update(value.to_lowercase().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

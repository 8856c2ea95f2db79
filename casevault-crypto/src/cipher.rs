//! AES-256-GCM encryption and decryption of individual field values.
//!
//! The stored form is `base64(IV || auth tag || ciphertext)` with a fresh
//! 16-byte random IV per call, so encrypting the same plaintext twice yields
//! two different envelopes. There is no version tag: the dataset assumes one
//! algorithm and one key for its lifetime.
//!
//! Decryption never fails. Values that predate encryption are stored as plain
//! text, and the read path must keep returning them verbatim — any base64,
//! length, or authentication failure results in the input being handed back
//! unchanged. A corrupted envelope is therefore indistinguishable from stray
//! plaintext at this layer; auditing that distinction belongs to callers, via
//! [`looks_encrypted`].

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;

/// AES-256-GCM with the envelope's 16-byte IV.
type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Byte length of the envelope IV.
pub const IV_SIZE: usize = 16;

/// Byte length of the GCM authentication tag.
pub const TAG_SIZE: usize = 16;

/// Smallest decoded envelope: IV + tag + at least one ciphertext byte.
const MIN_ENVELOPE_LEN: usize = IV_SIZE + TAG_SIZE + 1;

/// Base64 length of the smallest envelope.
const MIN_ENVELOPE_B64_LEN: usize = MIN_ENVELOPE_LEN.div_ceil(3) * 4;

/// Encrypt a single field value, returning the base64 envelope.
///
/// Empty input is not a secret and passes through unchanged.
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] on an internal AEAD error (unreachable
/// with a valid 32-byte key).
pub fn encrypt_field(key: &DerivedKey, plaintext: &str) -> CryptoResult<String> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let cipher = EnvelopeCipher::new(key.as_bytes().into());

    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);

    let sealed = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|_| CryptoError::Encryption("aead operation failed".to_string()))?;

    // The aead crate appends the tag to the ciphertext; the envelope layout
    // carries it between the IV and the ciphertext body.
    let (body, tag) = sealed.split_at(sealed.len() - TAG_SIZE);

    let mut envelope = Vec::with_capacity(IV_SIZE + sealed.len());
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(tag);
    envelope.extend_from_slice(body);

    Ok(STANDARD.encode(envelope))
}

/// Decrypt a stored field value.
///
/// Returns the recovered plaintext when `stored` is an authentic envelope for
/// this key; returns `stored` unchanged in every other case (legacy plaintext,
/// truncated data, tampered ciphertext, wrong key).
pub fn decrypt_field(key: &DerivedKey, stored: &str) -> String {
    if stored.is_empty() {
        return String::new();
    }
    match try_decrypt(key, stored) {
        Ok(plaintext) => plaintext,
        Err(err) => {
            debug!(error = %err, "stored value is not a readable envelope; returning it as-is");
            stored.to_owned()
        }
    }
}

fn try_decrypt(key: &DerivedKey, stored: &str) -> CryptoResult<String> {
    let raw = STANDARD
        .decode(stored)
        .map_err(|e| CryptoError::Decryption(format!("not base64: {e}")))?;

    if raw.len() < MIN_ENVELOPE_LEN {
        return Err(CryptoError::Decryption(format!(
            "too short for an envelope: {} bytes",
            raw.len()
        )));
    }

    let (iv, rest) = raw.split_at(IV_SIZE);
    let (tag, body) = rest.split_at(TAG_SIZE);

    // Reassemble ciphertext || tag, the order the aead crate verifies in.
    let mut sealed = Vec::with_capacity(body.len() + TAG_SIZE);
    sealed.extend_from_slice(body);
    sealed.extend_from_slice(tag);

    let cipher = EnvelopeCipher::new(key.as_bytes().into());
    let plaintext = cipher
        .decrypt(Nonce::from_slice(iv), sealed.as_ref())
        .map_err(|_| CryptoError::Decryption("authentication failed".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Decryption("plaintext is not UTF-8".to_string()))
}

/// Heuristic check for whether a stored value is one of our envelopes.
///
/// A value qualifies when it is long enough to decode to IV + tag + one byte
/// and uses only the base64 alphabet. Approximate by construction: a long
/// plaintext that happens to be base64-shaped will be misclassified as
/// ciphertext, and its failed decrypt then falls back to pass-through. The
/// write path uses this to avoid double-encrypting on repeated saves.
pub fn looks_encrypted(value: &str) -> bool {
    value.len() >= MIN_ENVELOPE_B64_LEN && value.bytes().all(is_base64_byte)
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

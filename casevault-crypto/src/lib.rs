//! Field-level PII encryption layer for Casevault.
//!
//! Protects sensitive client-record fields at rest using:
//! - scrypt for key derivation from the configured master secret
//! - AES-256-GCM for authenticated, non-deterministic encryption
//! - HMAC-SHA256 for deterministic search digests
//!
//! # Architecture
//!
//! A single 256-bit key is derived once at startup ([`CryptoConfig::load_key`])
//! and passed explicitly to every operation — there is no module-level key
//! state. Encrypted values are stored as a base64 envelope:
//!
//! ```text
//! base64( IV (16 bytes) || auth tag (16 bytes) || ciphertext )
//! ```
//!
//! The read path is deliberately tolerant: rows written before encryption was
//! introduced are plain text, so [`decrypt_field`] returns its input unchanged
//! whenever the stored value is not a well-formed, authentic envelope. Callers
//! that need to know whether a value is ciphertext use [`looks_encrypted`].

mod cipher;
mod config;
mod error;
mod key;
mod mask;
mod search;

pub use cipher::{decrypt_field, encrypt_field, looks_encrypted, IV_SIZE, TAG_SIZE};
pub use config::{CryptoConfig, Environment, ENV_ENVIRONMENT, ENV_SECRET};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, KdfParams, KEY_SIZE};
pub use mask::{mask_account_number, mask_ssn};
pub use search::search_digest;

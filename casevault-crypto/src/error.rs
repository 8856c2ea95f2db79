//! Error types for the field encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in the field encryption layer.
///
/// `MissingSecret` is the only fatal variant: it is returned at startup when
/// production runs without a configured master secret, and the host process
/// must refuse to serve traffic. Decryption failures never escape the read
/// path (see [`crate::decrypt_field`]); the `Decryption` variant exists for
/// internal reporting only.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("no encryption secret configured (required in production)")]
    MissingSecret,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),
}

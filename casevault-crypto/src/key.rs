//! Key derivation using scrypt.
//!
//! The master secret comes from deployment configuration and is stretched
//! into a 256-bit key exactly once per process. The salt is a fixed
//! application constant, not random: the same configured secret must
//! re-derive the same key across restarts, or previously stored envelopes
//! become unreadable. The secret itself carries the entropy.

use zeroize::ZeroizeOnDrop;

use crate::error::{CryptoError, CryptoResult};

/// Length of the derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// Fixed application salt for scrypt. Changing this invalidates every
/// envelope ever written.
const KDF_SALT: &[u8] = b"casevault-field-pii-v1";

/// scrypt cost parameters.
///
/// `Default` matches the interactive-login recommendation (N = 2^14, r = 8,
/// p = 1), deliberately slow. Derivation happens once at startup, never per
/// request.
#[derive(Clone, Copy, Debug)]
pub struct KdfParams {
    /// log2 of the scrypt work factor N.
    pub log_n: u8,
    /// Block size parameter.
    pub r: u32,
    /// Parallelization parameter.
    pub p: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self { log_n: 14, r: 8, p: 1 }
    }
}

impl KdfParams {
    /// Weak parameters (N = 16) for test suites that derive many keys.
    /// Never use outside tests.
    pub fn insecure_fast() -> Self {
        Self { log_n: 4, r: 8, p: 1 }
    }
}

/// The process-lifetime symmetric key.
///
/// Zeroized from memory on drop. Never serialized, never logged — the
/// `Debug` impl is redacted.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Wrap raw key bytes. The caller is responsible for sourcing them
    /// securely; prefer [`derive_key`] outside of tests.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { key: bytes }
    }

    /// Raw key bytes, for immediate use in a cipher or MAC only.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the process key from the configured master secret.
///
/// Deterministic: the same secret and parameters always produce the same key.
pub fn derive_key(secret: &str, params: &KdfParams) -> CryptoResult<DerivedKey> {
    let scrypt_params = scrypt::Params::new(params.log_n, params.r, params.p, KEY_SIZE)
        .map_err(|e| CryptoError::KeyDerivation(format!("invalid scrypt parameters: {e}")))?;

    let mut out = [0u8; KEY_SIZE];
    scrypt::scrypt(secret.as_bytes(), KDF_SALT, &scrypt_params, &mut out)
        .map_err(|e| CryptoError::KeyDerivation(format!("scrypt failed: {e}")))?;

    Ok(DerivedKey::from_bytes(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_secret_derives_same_key() {
        let params = KdfParams::insecure_fast();
        let k1 = derive_key("hunter2", &params).unwrap();
        let k2 = derive_key("hunter2", &params).unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_secrets_derive_different_keys() {
        let params = KdfParams::insecure_fast();
        let k1 = derive_key("secret-a", &params).unwrap();
        let k2 = derive_key("secret-b", &params).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = DerivedKey::from_bytes([0x42; KEY_SIZE]);
        let rendered = format!("{key:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("42"));
    }
}

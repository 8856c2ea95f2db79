//! Encryption configuration sourced from the process environment.

use tracing::warn;

use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, DerivedKey, KdfParams};

/// Environment variable holding the master secret.
pub const ENV_SECRET: &str = "CASEVAULT_ENCRYPTION_KEY";

/// Environment variable holding the deployment environment name.
pub const ENV_ENVIRONMENT: &str = "CASEVAULT_ENV";

/// Fixed placeholder secret for local development without a configured key.
/// Stable across restarts so local databases stay readable, but worthless
/// as protection — production refuses to start without a real secret.
const DEV_PLACEHOLDER_SECRET: &str = "casevault-development-placeholder";

/// Deployment environment, as declared by `CASEVAULT_ENV`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Environment {
    /// Parse an environment name. Unrecognized names map to `Development`;
    /// production must be declared explicitly.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Configuration for the field encryption layer.
#[derive(Clone, Debug)]
pub struct CryptoConfig {
    /// Master secret the process key is derived from. `None` is fatal in
    /// production and degraded-but-running everywhere else.
    pub secret: Option<String>,
    /// Deployment environment.
    pub environment: Environment,
}

impl CryptoConfig {
    pub fn new(secret: Option<String>, environment: Environment) -> Self {
        Self { secret, environment }
    }

    /// Read configuration from `CASEVAULT_ENCRYPTION_KEY` / `CASEVAULT_ENV`.
    pub fn from_env() -> Self {
        let secret = std::env::var(ENV_SECRET).ok().filter(|s| !s.is_empty());
        let environment = std::env::var(ENV_ENVIRONMENT)
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);
        Self { secret, environment }
    }

    /// Derive the process key according to the startup policy.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MissingSecret`] when running in production
    /// without a configured secret. The host must treat that as fatal and
    /// refuse to serve traffic.
    pub fn load_key(&self, params: &KdfParams) -> CryptoResult<DerivedKey> {
        match (&self.secret, self.environment) {
            (Some(secret), _) => derive_key(secret, params),
            (None, Environment::Production) => Err(CryptoError::MissingSecret),
            (None, _) => {
                warn!(
                    "no encryption secret configured; deriving key from a fixed \
                     development placeholder. Data encrypted with this key is not \
                     protected and must never be promoted to production."
                );
                derive_key(DEV_PLACEHOLDER_SECRET, params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_without_secret_is_fatal() {
        let cfg = CryptoConfig::new(None, Environment::Production);
        let result = cfg.load_key(&KdfParams::insecure_fast());
        assert!(matches!(result, Err(CryptoError::MissingSecret)));
    }

    #[test]
    fn development_without_secret_uses_placeholder() {
        let cfg = CryptoConfig::new(None, Environment::Development);
        let k1 = cfg.load_key(&KdfParams::insecure_fast()).unwrap();
        let k2 = cfg.load_key(&KdfParams::insecure_fast()).unwrap();
        // Placeholder is fixed, so the key is stable across derivations.
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn configured_secret_wins_in_any_environment() {
        let params = KdfParams::insecure_fast();
        let prod = CryptoConfig::new(Some("real-secret".into()), Environment::Production);
        let dev = CryptoConfig::new(Some("real-secret".into()), Environment::Development);
        assert_eq!(
            prod.load_key(&params).unwrap().as_bytes(),
            dev.load_key(&params).unwrap().as_bytes()
        );
    }

    #[test]
    fn environment_parsing() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse("test"), Environment::Test);
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::parse(""), Environment::Development);
    }
}

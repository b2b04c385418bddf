//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `COMMERCE_GRAPHQL_ENDPOINT` - GraphQL endpoint of the commerce API
//! - `COMMERCE_API_KEY` - Commerce API access token (high entropy)
//! - `COMMERCE_SERVER_BASE_URL` - Commerce server base URL (widget payment pages)
//! - `PAYMENT_RETURN_BASE_URL` - Base URL payment providers redirect back to
//!
//! ## Optional
//! - `STOREFRONT_DEFAULT_COUNTRY` - Initial shipping country (default: US)
//! - `STOREFRONT_DEFAULT_CURRENCY` - Initial currency (default: USD)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront SDK configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Commerce API configuration
    pub commerce: CommerceConfig,
    /// Payment redirect configuration
    pub payment: PaymentConfig,
    /// Initial shipping country code (ISO 3166-1 alpha-2)
    pub default_country: String,
    /// Initial currency code (ISO 4217)
    pub default_currency: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Commerce GraphQL API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CommerceConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// API access token (sent as the authorization header)
    pub api_key: SecretString,
}

impl std::fmt::Debug for CommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Payment redirect URL configuration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Base URL payment providers redirect back to after completion
    pub return_base_url: String,
    /// Commerce server base URL serving widget payment pages
    pub server_base_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            commerce: CommerceConfig::from_env()?,
            payment: PaymentConfig::from_env()?,
            default_country: get_env_or_default("STOREFRONT_DEFAULT_COUNTRY", "US"),
            default_currency: get_env_or_default("STOREFRONT_DEFAULT_CURRENCY", "USD"),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }
}

impl CommerceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: get_url_env("COMMERCE_GRAPHQL_ENDPOINT")?,
            api_key: get_validated_secret("COMMERCE_API_KEY")?,
        })
    }
}

impl PaymentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            return_base_url: get_url_env("PAYMENT_RETURN_BASE_URL")?,
            server_base_url: get_url_env("COMMERCE_SERVER_BASE_URL")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required environment variable that must parse as a URL.
///
/// Trailing slashes are trimmed so redirect URLs can be built by joining.
fn get_url_env(key: &str) -> Result<String, ConfigError> {
    let value = get_required_env(key)?;
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // Random-looking string should have high entropy
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_commerce_config_debug_redacts_api_key() {
        let config = CommerceConfig {
            endpoint: "https://graphql.example.test".to_string(),
            api_key: SecretString::from("super_secret_api_key"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("graphql.example.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }
}

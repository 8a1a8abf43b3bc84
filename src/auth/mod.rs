//! Authentication module for the DeepL client.
//!
//! DeepL authenticates with a `DeepL-Auth-Key <key>` authorization header.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::errors::DeepLError;

/// Authorization scheme used by the DeepL API.
pub const AUTH_SCHEME: &str = "DeepL-Auth-Key";

/// Suffix that marks a free-tier key.
pub const FREE_KEY_SUFFIX: &str = ":fx";

/// Authentication provider trait.
///
/// Implementations of this trait provide authentication credentials
/// for API requests.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HeaderMap) -> Result<(), DeepLError>;

    /// Get the authentication scheme name.
    fn scheme(&self) -> &str;

    /// Validate the credentials.
    fn validate(&self) -> Result<(), DeepLError>;
}

/// API key authentication provider.
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Creates a new API key authentication provider.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates from a string API key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Returns true if the key belongs to the free tier.
    pub fn is_free_tier(&self) -> bool {
        self.api_key.expose_secret().ends_with(FREE_KEY_SUFFIX)
    }

    /// Gets a hint of the API key for debugging (last 4 characters).
    pub fn key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }
}

/// Returns the last four characters of a key, or a mask for short keys.
pub(crate) fn key_hint(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{}", tail)
    } else {
        "****".to_string()
    }
}

impl AuthProvider for ApiKeyAuth {
    fn apply_auth(&self, headers: &mut HeaderMap) -> Result<(), DeepLError> {
        let mut value =
            HeaderValue::from_str(&format!("{} {}", AUTH_SCHEME, self.api_key.expose_secret()))
                .map_err(|_| DeepLError::Configuration {
                    message: "API key contains characters not allowed in a header".to_string(),
                })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    fn scheme(&self) -> &str {
        AUTH_SCHEME
    }

    fn validate(&self) -> Result<(), DeepLError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(DeepLError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}

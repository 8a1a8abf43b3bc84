//! Configuration module for the DeepL client.
//!
//! Provides configuration management including the API key, base URL
//! selection by key type, user agent, proxy, tracing and retry settings.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::auth::{key_hint, FREE_KEY_SUFFIX};
use crate::errors::{DeepLError, DeepLResult};
use crate::resilience::RetryPolicy;

/// Base URL for paid API keys.
pub const DEFAULT_BASE_URL: &str = "https://api.deepl.com";

/// Base URL for free-tier API keys (those ending in `:fx`).
pub const FREE_BASE_URL: &str = "https://api-free.deepl.com";

/// Default request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("deepl-rust/", env!("CARGO_PKG_VERSION"));

/// Returns the base URL matching the key's tier.
pub fn base_url_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(FREE_KEY_SUFFIX) {
        FREE_BASE_URL
    } else {
        DEFAULT_BASE_URL
    }
}

/// Configuration for the DeepL client.
///
/// Built once and never mutated afterwards; the client shares it between
/// concurrent calls.
#[derive(Clone)]
pub struct DeepLConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests, always ending in `/`.
    pub base_url: Url,
    /// `User-Agent` header value; `None` sends no header.
    pub user_agent: Option<String>,
    /// Per-request transport timeout.
    pub timeout: Duration,
    /// Proxy all traffic goes through.
    pub proxy: Option<Url>,
    /// Whether every request and response is dumped to the log.
    pub trace: bool,
    /// Retry policy for transient failures.
    pub retry_policy: RetryPolicy,
}

impl DeepLConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> DeepLConfigBuilder {
        DeepLConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DEEPL_AUTH_KEY` (required): API key for authentication
    /// - `DEEPL_BASE_URL` (optional): Custom base URL
    /// - `DEEPL_TIMEOUT` (optional): Request timeout in seconds
    /// - `DEEPL_MAX_RETRIES` (optional): Maximum retry attempts
    /// - `DEEPL_USER_AGENT` (optional): Custom user agent
    /// - `DEEPL_PROXY` (optional): Proxy URL
    /// - `DEEPL_TRACE` (optional): `1` or `true` enables request tracing
    pub fn from_env() -> DeepLResult<Self> {
        let api_key = std::env::var("DEEPL_AUTH_KEY").map_err(|_| DeepLError::Configuration {
            message: "DEEPL_AUTH_KEY environment variable not set".to_string(),
        })?;

        let mut builder = DeepLConfigBuilder::new().api_key(api_key);

        if let Ok(base_url) = std::env::var("DEEPL_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("DEEPL_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        if let Ok(retries_str) = std::env::var("DEEPL_MAX_RETRIES") {
            if let Ok(retries) = retries_str.parse::<u32>() {
                builder = builder.retry_policy(RetryPolicy::new(
                    retries,
                    RetryPolicy::default().max_delay(),
                    RetryPolicy::default().backoff_base(),
                )?);
            }
        }

        if let Ok(user_agent) = std::env::var("DEEPL_USER_AGENT") {
            builder = builder.user_agent(user_agent);
        }

        if let Ok(proxy) = std::env::var("DEEPL_PROXY") {
            builder = builder.proxy(proxy);
        }

        if let Ok(trace) = std::env::var("DEEPL_TRACE") {
            builder = builder.trace(matches!(trace.as_str(), "1" | "true" | "TRUE" | "yes"));
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }

    /// Returns true if the key is a free-tier key.
    pub fn is_free_tier(&self) -> bool {
        self.api_key.expose_secret().ends_with(FREE_KEY_SUFFIX)
    }

    /// Returns the full URL for an endpoint path such as `v2/translate`.
    pub fn endpoint_url(&self, path: &str) -> DeepLResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

impl std::fmt::Debug for DeepLConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .field("trace", &self.trace)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

/// Builder for `DeepLConfig`.
///
/// Setters may be called in any order and repeatedly; the last call wins.
pub struct DeepLConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    proxy: Option<String>,
    trace: bool,
    retry_policy: Option<RetryPolicy>,
}

impl Default for DeepLConfigBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            timeout: None,
            proxy: None,
            trace: false,
            retry_policy: None,
        }
    }
}

impl DeepLConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> DeepLResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| DeepLError::Configuration {
            message: format!("Environment variable {} not set", var_name),
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Overrides the base URL chosen from the key type.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the `User-Agent` header. An empty string disables the header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        self.user_agent = (!user_agent.is_empty()).then_some(user_agent);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Routes all traffic through the given proxy URL.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enables or disables request/response tracing.
    pub fn trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Overrides the retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> DeepLResult<DeepLConfig> {
        let api_key = self.api_key.ok_or_else(|| DeepLError::Configuration {
            message: "API key is required".to_string(),
        })?;

        if api_key.trim().is_empty() {
            return Err(DeepLError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }

        let raw_base_url = self
            .base_url
            .unwrap_or_else(|| base_url_for_key(&api_key).to_string());
        let base_url = parse_base_url(&raw_base_url)?;

        let proxy = self
            .proxy
            .map(|p| {
                Url::parse(&p).map_err(|e| DeepLError::Configuration {
                    message: format!("Invalid proxy URL {}: {}", p, e),
                })
            })
            .transpose()?;

        if let Some(user_agent) = &self.user_agent {
            if reqwest::header::HeaderValue::from_str(user_agent).is_err() {
                return Err(DeepLError::Configuration {
                    message: "User agent contains characters not allowed in a header".to_string(),
                });
            }
        }

        Ok(DeepLConfig {
            api_key: SecretString::new(api_key),
            base_url,
            user_agent: self.user_agent,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            proxy,
            trace: self.trace,
            retry_policy: self.retry_policy.unwrap_or_default(),
        })
    }
}

fn parse_base_url(raw: &str) -> DeepLResult<Url> {
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    let url = Url::parse(&normalized).map_err(|e| DeepLError::Configuration {
        message: format!("Invalid base URL {}: {}", raw, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DeepLError::Configuration {
            message: format!("Base URL must use http or https: {}", raw),
        });
    }

    Ok(url)
}

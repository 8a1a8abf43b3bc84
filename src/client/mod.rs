//! DeepL API client.
//!
//! Provides the main client interface for interacting with the DeepL API.

mod context;
mod executor;

pub use context::CallContext;
pub use executor::RequestExecutor;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::config::{DeepLConfig, DeepLConfigBuilder};
use crate::errors::{DeepLError, DeepLResult};
use crate::resilience::RetryPolicy;
use crate::services::{LanguagesService, RephraseService, TranslateService, UsageService};
use crate::transport::{HttpTransport, ReqwestTransport, TracingTransport};

/// The main DeepL client.
///
/// Cheap to clone; clones share the connection pool and configuration and
/// may be used from many tasks at once.
///
/// # Example
///
/// ```rust,no_run
/// use deepl_client::DeepLClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = DeepLClient::new("your-auth-key:fx")?;
///
///     let translation = client.translate().text("Hello, world!", "DE").await?;
///     println!("{}", translation.text);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct DeepLClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: Arc<DeepLConfig>,
    translate_service: TranslateService,
    rephrase_service: RephraseService,
    languages_service: LanguagesService,
    usage_service: UsageService,
}

impl DeepLClient {
    /// Creates a client for the given API key with default settings.
    ///
    /// Keys ending in `:fx` are routed to the free-tier endpoint.
    pub fn new(api_key: impl Into<String>) -> DeepLResult<Self> {
        DeepLClientBuilder::new().api_key(api_key).build()
    }

    /// Creates a new client builder.
    pub fn builder() -> DeepLClientBuilder {
        DeepLClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`DeepLConfig::from_env`] for the variables read.
    pub fn from_env() -> DeepLResult<Self> {
        let config = DeepLConfig::from_env()?;
        DeepLClientBuilder::new().build_with_config(config)
    }

    /// Returns the translate service.
    pub fn translate(&self) -> &TranslateService {
        &self.inner.translate_service
    }

    /// Returns the rephrase service.
    pub fn rephrase(&self) -> &RephraseService {
        &self.inner.rephrase_service
    }

    /// Returns the languages service.
    pub fn languages(&self) -> &LanguagesService {
        &self.inner.languages_service
    }

    /// Returns the usage service.
    pub fn usage(&self) -> &UsageService {
        &self.inner.usage_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DeepLConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for DeepLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Builder for the DeepL client.
#[derive(Default)]
pub struct DeepLClientBuilder {
    config_builder: DeepLConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl DeepLClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> DeepLResult<Self> {
        self.config_builder = self.config_builder.api_key_from_env(var_name)?;
        Ok(self)
    }

    /// Overrides the base URL chosen from the key type.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the `User-Agent` header. An empty string disables the header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(user_agent);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Routes all traffic through the given proxy URL.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.proxy(proxy);
        self
    }

    /// Dumps every request and response at `DEBUG` level.
    pub fn trace(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.trace(enabled);
        self
    }

    /// Overrides the retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config_builder = self.config_builder.retry_policy(policy);
        self
    }

    /// Sets a custom transport.
    ///
    /// The timeout and proxy settings configure only the built-in reqwest
    /// transport. A custom transport is used as given and must apply its own.
    /// Trace mode still wraps it.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the client.
    pub fn build(mut self) -> DeepLResult<DeepLClient> {
        let config_builder = std::mem::take(&mut self.config_builder);
        let config = config_builder.build()?;
        self.build_with_config(config)
    }

    fn build_with_config(self, config: DeepLConfig) -> DeepLResult<DeepLClient> {
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                ReqwestTransport::new(config.timeout, config.proxy.as_ref()).map_err(|e| {
                    DeepLError::Configuration {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let transport: Arc<dyn HttpTransport> = if config.trace {
            Arc::new(TracingTransport::new(transport))
        } else {
            transport
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let config = Arc::new(config);
        let executor = Arc::new(RequestExecutor::new(
            Arc::clone(&config),
            transport,
            auth,
        ));

        tracing::debug!(
            base_url = %config.base_url,
            free_tier = config.is_free_tier(),
            key = %config.api_key_hint(),
            "DeepL client created"
        );

        Ok(DeepLClient {
            inner: Arc::new(ClientInner {
                config,
                translate_service: TranslateService::new(Arc::clone(&executor)),
                rephrase_service: RephraseService::new(Arc::clone(&executor)),
                languages_service: LanguagesService::new(Arc::clone(&executor)),
                usage_service: UsageService::new(executor),
            }),
        })
    }
}

//! Request executor with auth, retries, cancellation and error decoding.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

use super::CallContext;
use crate::auth::AuthProvider;
use crate::config::DeepLConfig;
use crate::errors::{ApiError, DeepLError, DeepLResult};
use crate::resilience::RetryDecision;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Executes one logical API call.
///
/// This is the core component that:
/// - Adds authentication, content-type and user-agent headers
/// - Clones the request for each attempt so the body can be resent
/// - Retries transport failures, 429 and 5xx with jittered backoff
/// - Aborts as soon as the call's [`CallContext`] fires
/// - Maps non-2xx responses to [`ApiError`] and decodes 2xx bodies
pub struct RequestExecutor {
    config: Arc<DeepLConfig>,
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
}

impl RequestExecutor {
    /// Creates a new request executor.
    pub fn new(
        config: Arc<DeepLConfig>,
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            config,
            transport,
            auth,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DeepLConfig {
        &self.config
    }

    /// Executes a request and deserializes the JSON response into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        ctx: &CallContext,
    ) -> DeepLResult<T> {
        let response = self.execute_raw(request, ctx).await?;
        Ok(response.json()?)
    }

    /// Executes a request and returns the final successful response.
    ///
    /// # Errors
    ///
    /// - [`DeepLError::Cancelled`] if `ctx` fires before or during any attempt or backoff
    /// - [`DeepLError::Request`] if the request body cannot be cloned
    /// - [`DeepLError::Transport`] if the last attempt failed at the transport level
    /// - [`DeepLError::Api`] for a non-2xx final response
    #[instrument(skip(self, request, ctx), fields(method = %request.method, url = %request.url))]
    pub async fn execute_raw(
        &self,
        mut request: HttpRequest,
        ctx: &CallContext,
    ) -> DeepLResult<HttpResponse> {
        self.prepare_headers(&mut request.headers)?;

        let policy = self.config.retry_policy;
        let mut attempt: u32 = 0;

        let outcome = loop {
            ctx.check()?;

            let attempt_request = request.try_clone().await?;
            tracing::debug!(attempt, "Sending request");

            let outcome = tokio::select! {
                biased;
                reason = ctx.done() => return Err(DeepLError::Cancelled { reason }),
                outcome = self.transport.send(attempt_request) => outcome,
            };

            match policy.decide(&outcome, attempt) {
                RetryDecision::Retry(delay) if attempt < policy.max_retries() => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = policy.max_retries(),
                        status = outcome.as_ref().ok().map(|r| r.status),
                        error = outcome.as_ref().err().map(tracing::field::display),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Retrying after transient failure"
                    );

                    tokio::select! {
                        biased;
                        reason = ctx.done() => return Err(DeepLError::Cancelled { reason }),
                        () = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                _ => break outcome,
            }
        };

        let response = outcome?;
        if !response.is_success() {
            let error = ApiError::from_response(response.status, &response.body);
            tracing::debug!(status = error.status, message = ?error.message, "API returned an error");
            return Err(error.into());
        }

        Ok(response)
    }

    fn prepare_headers(&self, headers: &mut HeaderMap) -> DeepLResult<()> {
        self.auth.apply_auth(headers)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(user_agent) = &self.config.user_agent {
            let value = HeaderValue::from_str(user_agent).map_err(|e| DeepLError::Configuration {
                message: format!("Invalid user agent: {}", e),
            })?;
            headers.insert(USER_AGENT, value);
        }

        Ok(())
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

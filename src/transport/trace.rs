//! Transport decorator that dumps every exchange.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::observability::{log_request, log_response, log_transport_error};

/// Wraps another transport and logs each request and response verbatim.
///
/// The `Authorization` value is redacted; everything else, bodies included,
/// is written at `DEBUG` level.
pub struct TracingTransport {
    inner: Arc<dyn HttpTransport>,
}

impl TracingTransport {
    /// Wraps `inner`.
    pub fn new(inner: Arc<dyn HttpTransport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl HttpTransport for TracingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        log_request(&request);
        let started = Instant::now();

        match self.inner.send(request).await {
            Ok(response) => {
                log_response(&response, started.elapsed());
                Ok(response)
            }
            Err(err) => {
                log_transport_error(&err);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for TracingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingTransport").finish_non_exhaustive()
    }
}

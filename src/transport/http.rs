//! HTTP transport implementation.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;
use tracing::instrument;
use url::Url;

use super::{HttpRequest, HttpResponse, RequestBody, TransportError};

/// HTTP transport trait.
///
/// Implementations perform exactly one network exchange per call and return
/// the fully read response. Retries live above this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
pub struct ReqwestTransport {
    client: Client,
    proxy: Option<Url>,
}

impl ReqwestTransport {
    /// Creates a new transport with the given timeout and optional proxy.
    pub fn new(timeout: Duration, proxy: Option<&Url>) -> Result<Self, TransportError> {
        let mut builder = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(60));

        if let Some(proxy_url) = proxy {
            let proxy = Proxy::all(proxy_url.as_str()).map_err(|e| {
                TransportError::InvalidRequest {
                    message: format!("invalid proxy {}: {}", proxy_url, e),
                }
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| TransportError::Connection {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            proxy: proxy.cloned(),
        })
    }

    /// Creates a transport around an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            proxy: None,
        }
    }

    /// Returns the configured proxy, if any.
    pub fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers);

        req_builder = match request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Bytes(bytes) => req_builder.body(bytes),
            RequestBody::Stream(stream) => req_builder.body(reqwest::Body::wrap_stream(stream)),
            RequestBody::Consumed => {
                return Err(TransportError::InvalidRequest {
                    message: "request body was already consumed".to_string(),
                })
            }
        };

        let response = req_builder.send().await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        // Reading to the end releases the connection back to the pool.
        let body = response.bytes().await.map_err(|e| TransportError::InvalidResponse {
            message: e.to_string(),
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .finish()
    }
}

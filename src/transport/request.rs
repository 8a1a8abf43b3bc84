//! Outbound request representation and body cloning.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::fmt;
use std::pin::Pin;
use url::Url;

/// Streaming request body source.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync>>;

/// Errors raised while preparing a request for sending.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RequestError {
    /// The body stream failed or had already been consumed.
    #[error("failed to read request body: {message}")]
    BodyRead {
        /// Error message.
        message: String,
    },

    /// The JSON payload could not be serialized.
    #[error("failed to serialize request body: {message}")]
    Serialize {
        /// Error message.
        message: String,
    },

    /// A header name or value was invalid.
    #[error("invalid header {name}: {message}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Error message.
        message: String,
    },
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// Request body variants.
#[derive(Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Materialized bytes; cloning shares the buffer.
    Bytes(Bytes),
    /// Single-use stream, materialized on first clone.
    Stream(BodyStream),
    /// A stream that was drained and failed; the request can no longer be sent.
    Consumed,
}

impl RequestBody {
    /// Returns the body bytes if the body is materialized.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            RequestBody::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns true if there is no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "Empty"),
            RequestBody::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            RequestBody::Stream(_) => write!(f, "Stream"),
            RequestBody::Consumed => write!(f, "Consumed"),
        }
    }
}

/// HTTP request representation.
#[derive(Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Creates a new GET request.
    pub fn get(url: Url) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a new POST request.
    pub fn post(url: Url) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Sets a materialized body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = RequestBody::Bytes(body.into());
        self
    }

    /// Sets a streaming body.
    pub fn with_stream(mut self, stream: BodyStream) -> Self {
        self.body = RequestBody::Stream(stream);
        self
    }

    /// Serializes `payload` as the JSON body.
    pub fn with_json<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self, RequestError> {
        let body = serde_json::to_vec(payload).map_err(|e| RequestError::Serialize {
            message: e.to_string(),
        })?;
        Ok(self.with_body(body))
    }

    /// Sets a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, RequestError> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| RequestError::InvalidHeader {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| RequestError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Produces an independent copy of this request for one send attempt.
    ///
    /// A streaming body is drained once and replaced on `self` by the
    /// collected bytes, so every later clone is a cheap buffer share. If the
    /// stream fails the body is marked [`RequestBody::Consumed`] and this and
    /// every later call return [`RequestError::BodyRead`].
    pub async fn try_clone(&mut self) -> Result<HttpRequest, RequestError> {
        self.body = match std::mem::replace(&mut self.body, RequestBody::Consumed) {
            RequestBody::Stream(stream) => RequestBody::Bytes(drain(stream).await?),
            other => other,
        };

        let body = match &self.body {
            RequestBody::Empty => RequestBody::Empty,
            RequestBody::Bytes(bytes) => RequestBody::Bytes(bytes.clone()),
            RequestBody::Stream(_) | RequestBody::Consumed => {
                return Err(RequestError::BodyRead {
                    message: "body stream was already consumed".to_string(),
                })
            }
        };

        Ok(HttpRequest {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body,
        })
    }
}

async fn drain(mut stream: BodyStream) -> Result<Bytes, RequestError> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| RequestError::BodyRead {
            message: e.to_string(),
        })?;
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer.freeze())
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Fully read response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn url() -> Url {
        Url::parse("https://api.deepl.com/v2/translate").unwrap()
    }

    fn chunked(chunks: Vec<&'static str>) -> BodyStream {
        Box::pin(stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok::<_, std::io::Error>(Bytes::from_static(c.as_bytes()))),
        ))
    }

    #[tokio::test]
    async fn test_clone_without_body() {
        let mut request = HttpRequest::get(url())
            .with_header("X-Test", "1")
            .unwrap();

        let clone = request.try_clone().await.unwrap();

        assert_eq!(clone.method, HttpMethod::Get);
        assert_eq!(clone.url, request.url);
        assert!(clone.body.is_empty());
        assert_eq!(clone.headers.get("x-test").unwrap(), "1");
    }

    #[tokio::test]
    async fn test_repeated_clones_keep_stream_body() {
        let mut request = HttpRequest::post(url()).with_stream(chunked(vec![
            r#"{"text":"#,
            r#"["Hallo"],"#,
            r#""target_lang":"EN"}"#,
        ]));
        let expected = Bytes::from_static(br#"{"text":["Hallo"],"target_lang":"EN"}"#);

        for _ in 0..5 {
            let clone = request.try_clone().await.unwrap();
            assert_eq!(clone.body.as_bytes(), Some(&expected));
        }
        assert_eq!(request.body.as_bytes(), Some(&expected));
    }

    #[tokio::test]
    async fn test_clone_headers_are_independent() {
        let mut request = HttpRequest::post(url()).with_body("{}");
        let mut clone = request.try_clone().await.unwrap();

        clone
            .headers
            .insert("x-attempt", HeaderValue::from_static("2"));

        assert!(request.headers.get("x-attempt").is_none());
    }

    #[tokio::test]
    async fn test_failing_stream_poisons_request() {
        let failing: BodyStream = Box::pin(stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "reader closed")),
        ]));
        let mut request = HttpRequest::post(url()).with_stream(failing);

        let first = request.try_clone().await.unwrap_err();
        assert!(matches!(first, RequestError::BodyRead { .. }));
        assert!(first.to_string().contains("reader closed"));

        let second = request.try_clone().await.unwrap_err();
        assert!(matches!(second, RequestError::BodyRead { .. }));
    }

    #[test]
    fn test_with_json_serializes_payload() {
        let request = HttpRequest::post(url())
            .with_json(&serde_json::json!({"text": ["hi"]}))
            .unwrap();

        assert_eq!(
            request.body.as_bytes().unwrap().as_ref(),
            br#"{"text":["hi"]}"#
        );
    }

    #[test]
    fn test_with_header_rejects_invalid_value() {
        let result = HttpRequest::get(url()).with_header("X-Bad", "line\nbreak");
        assert!(matches!(result, Err(RequestError::InvalidHeader { .. })));
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 204,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };
        let redirect = HttpResponse { status: 302, ..ok.clone() };

        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}

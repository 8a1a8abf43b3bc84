//! Logging configuration and request/response dumps.
//!
//! The client itself only emits `tracing` events; installing a subscriber is
//! left to the application. [`LoggingConfig::init`] is a convenience for
//! binaries and examples that want a ready-made one.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::transport::{HttpRequest, HttpResponse, RequestBody, TransportError};

/// Target used for verbatim request/response dumps.
pub const TRACE_TARGET: &str = "deepl_client::trace";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The minimum log level to capture.
    pub level: LogLevel,
    /// The output format for log messages.
    pub format: LogFormat,
    /// Whether to include the module target in log output.
    pub include_target: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace-level logging (most verbose).
    Trace,
    /// Debug-level logging; required to see trace dumps.
    Debug,
    /// Info-level logging.
    Info,
    /// Warning-level logging; retries are reported here.
    Warn,
    /// Error-level logging.
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl From<LogLevel> for tracing::level_filters::LevelFilter {
    fn from(level: LogLevel) -> Self {
        Self::from_level(level.into())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format.
    Pretty,
    /// JSON format.
    Json,
    /// Compact single-line format.
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether to include the module target.
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Installs a global subscriber built from this configuration.
    ///
    /// `RUST_LOG` directives are honoured on top of the configured level.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = EnvFilter::from_default_env().add_directive(
            tracing::level_filters::LevelFilter::from(self.level).into(),
        );

        match self.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(self.include_target))
                .try_init()?,
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .try_init()?,
            LogFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(self.include_target))
                .try_init()?,
        }

        Ok(())
    }
}

/// Renders headers one per line, hiding the credential.
pub fn dump_headers(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers {
        let value = if name == AUTHORIZATION {
            redact_authorization(value.to_str().unwrap_or_default())
        } else {
            String::from_utf8_lossy(value.as_bytes()).into_owned()
        };
        let _ = writeln!(out, "{}: {}", name, value);
    }
    out
}

fn redact_authorization(value: &str) -> String {
    match value.split_once(' ') {
        Some((scheme, _)) => format!("{} [REDACTED]", scheme),
        None => "[REDACTED]".to_string(),
    }
}

fn dump_body(body: &RequestBody) -> String {
    match body {
        RequestBody::Empty => String::new(),
        RequestBody::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        RequestBody::Stream(_) => "<streaming body>".to_string(),
        RequestBody::Consumed => "<consumed body>".to_string(),
    }
}

/// Logs an outgoing request verbatim.
pub fn log_request(request: &HttpRequest) {
    tracing::debug!(
        target: TRACE_TARGET,
        "HTTP Request:\n{} {}\n{}\n{}",
        request.method,
        request.url,
        dump_headers(&request.headers),
        dump_body(&request.body)
    );
}

/// Logs an incoming response verbatim.
pub fn log_response(response: &HttpResponse, elapsed: Duration) {
    tracing::debug!(
        target: TRACE_TARGET,
        status = response.status,
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "HTTP Response:\n{}\n{}",
        dump_headers(&response.headers),
        String::from_utf8_lossy(&response.body)
    );
}

/// Logs a failed round trip.
pub fn log_transport_error(error: &TransportError) {
    tracing::debug!(target: TRACE_TARGET, error = %error, "error during round trip");
}

//! Observability module for the DeepL client.
//!
//! All diagnostics go through `tracing`. Retries are reported at `WARN`,
//! per-attempt progress at `DEBUG`, and the optional trace transport dumps
//! full exchanges at `DEBUG` under [`TRACE_TARGET`].

mod logging;

pub use logging::{
    dump_headers, log_request, log_response, log_transport_error, LogFormat, LogLevel,
    LoggingConfig, TRACE_TARGET,
};

//! Resilience layer for the DeepL client.
//!
//! Holds the retry policy consulted by the request executor after every
//! attempt.

mod retry;

pub use retry::{
    RetryDecision, RetryPolicy, DEFAULT_BACKOFF_BASE, DEFAULT_MAX_DELAY, DEFAULT_MAX_RETRIES,
};

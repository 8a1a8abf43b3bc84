//! DeepL Client Library
//!
//! A production-ready Rust client for the DeepL machine translation API.
//! Every call goes through one request executor that authenticates the
//! request, retries transient failures with jittered exponential backoff,
//! honours per-call cancellation and deadlines, and turns error responses
//! into structured errors.
//!
//! # Features
//!
//! - **Translation**: Single texts or batches, with formality, glossaries and markup handling
//! - **Text Improvement**: DeepL Write rephrasing with writing styles and tones
//! - **Account**: Supported languages and usage statistics
//! - **Resilience**: Retries on transport failures, 429 and 5xx with capped backoff
//! - **Cancellation**: Per-call cancellation tokens and deadlines
//! - **Observability**: `tracing` spans and events, optional full request tracing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use deepl_client::DeepLClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DeepLClient::new("your-auth-key:fx")?;
//!
//!     let translation = client.translate().text("Hello, world!", "DE").await?;
//!     println!("{} (from {})", translation.text, translation.detected_source_language);
//!     Ok(())
//! }
//! ```
//!
//! # Options and Cancellation
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use deepl_client::{CallContext, DeepLClient, Formality, TranslateTextOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DeepLClient::builder()
//!         .api_key("your-auth-key")
//!         .user_agent("my-app/1.0")
//!         .build()?;
//!
//!     let ctx = CallContext::new().with_timeout(Duration::from_secs(10));
//!     let options = TranslateTextOptions::new(["How are you?", "See you soon."], "DE")
//!         .formality(Formality::More);
//!
//!     for translation in client.translate().with_options(options, &ctx).await? {
//!         println!("{}", translation.text);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{CallContext, DeepLClient, DeepLClientBuilder, RequestExecutor};
pub use config::DeepLConfig;
pub use errors::{ApiError, CancelReason, DeepLError, DeepLResult};
pub use resilience::RetryPolicy;

// Type re-exports
pub use types::languages::{Language, LanguageType};
pub use types::rephrase::{Improvement, RephraseOptions, WritingStyle, WritingTone};
pub use types::translate::{
    Formality, ModelType, SplitSentences, TagHandling, TranslateTextOptions, Translation,
};
pub use types::usage::{ProductUsage, Usage};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

//! Service implementations for DeepL API endpoints.
//!
//! Each service builds its request and hands it to the shared
//! [`RequestExecutor`](crate::client::RequestExecutor).

mod languages;
mod rephrase;
mod translate;
mod usage;

pub use languages::LanguagesService;
pub use rephrase::RephraseService;
pub use translate::TranslateService;
pub use usage::UsageService;

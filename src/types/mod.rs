//! Type definitions for the DeepL API.
//!
//! Request options and response payloads for text translation, text
//! improvement, supported languages and account usage.

pub mod languages;
pub mod rephrase;
pub mod translate;
pub mod usage;

pub use languages::{Language, LanguageType};
pub use rephrase::{Improvement, RephraseOptions, RephraseResponse, WritingStyle, WritingTone};
pub use translate::{
    Formality, ModelType, SplitSentences, TagHandling, TranslateTextOptions, Translation,
    TranslationsResponse,
};
pub use usage::{ProductUsage, Usage};

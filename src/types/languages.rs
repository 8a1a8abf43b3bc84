//! Supported language types.

use serde::Deserialize;
use std::fmt;

/// Which side of a translation a language list describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageType {
    /// Languages usable as `source_lang`.
    Source,
    /// Languages usable as `target_lang`.
    Target,
}

impl LanguageType {
    /// Returns the value of the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageType::Source => "source",
            LanguageType::Target => "target",
        }
    }
}

impl fmt::Display for LanguageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language supported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    /// Language code, e.g. `EN` or `DE`.
    pub language: String,
    /// Display name, e.g. `English`.
    pub name: String,
    /// Whether the language accepts a formality setting.
    #[serde(default)]
    pub supports_formality: bool,
}

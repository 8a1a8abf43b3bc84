//! Text improvement (DeepL Write) types.

use serde::{Deserialize, Serialize};

use crate::errors::DeepLError;

/// Writing style for rephrased text.
///
/// `Prefer*` variants fall back to the default style when the language does
/// not support the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingStyle {
    /// Academic style.
    Academic,
    /// Business style.
    Business,
    /// Casual style.
    Casual,
    /// Default style.
    Default,
    /// Simple style.
    Simple,
    /// Academic if supported.
    PreferAcademic,
    /// Business if supported.
    PreferBusiness,
    /// Casual if supported.
    PreferCasual,
    /// Simple if supported.
    PreferSimple,
}

/// Tone for rephrased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingTone {
    /// Confident tone.
    Confident,
    /// Default tone.
    Default,
    /// Diplomatic tone.
    Diplomatic,
    /// Enthusiastic tone.
    Enthusiastic,
    /// Friendly tone.
    Friendly,
    /// Confident if supported.
    PreferConfident,
    /// Diplomatic if supported.
    PreferDiplomatic,
    /// Enthusiastic if supported.
    PreferEnthusiastic,
    /// Friendly if supported.
    PreferFriendly,
}

/// Request payload for `POST /v2/write/rephrase`.
///
/// At most one of `writing_style` and `tone` may be set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RephraseOptions {
    /// Texts to improve.
    pub text: Vec<String>,
    /// Target language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
    /// Writing style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writing_style: Option<WritingStyle>,
    /// Tone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<WritingTone>,
}

impl RephraseOptions {
    /// Creates options improving `texts`.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: texts.into_iter().map(Into::into).collect(),
            target_lang: None,
            writing_style: None,
            tone: None,
        }
    }

    /// Sets the target language.
    pub fn target_lang(mut self, lang: impl Into<String>) -> Self {
        self.target_lang = Some(lang.into());
        self
    }

    /// Sets the writing style.
    pub fn writing_style(mut self, style: WritingStyle) -> Self {
        self.writing_style = Some(style);
        self
    }

    /// Sets the tone.
    pub fn tone(mut self, tone: WritingTone) -> Self {
        self.tone = Some(tone);
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<(), DeepLError> {
        if self.text.is_empty() {
            return Err(DeepLError::validation("At least one text is required"));
        }
        if self.writing_style.is_some() && self.tone.is_some() {
            return Err(DeepLError::validation(
                "Only one of writing style or tone can be set",
            ));
        }
        Ok(())
    }
}

/// A single improved text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Improvement {
    /// Detected source language code.
    #[serde(default)]
    pub detected_source_language: String,
    /// Improved text.
    pub text: String,
    /// Language of the improved text.
    #[serde(default)]
    pub target_language: Option<String>,
}

/// Response body of `POST /v2/write/rephrase`.
#[derive(Debug, Clone, Deserialize)]
pub struct RephraseResponse {
    /// Improvements in request order.
    #[serde(default)]
    pub improvements: Vec<Improvement>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(WritingStyle::Academic, "academic")]
    #[test_case(WritingStyle::Default, "default")]
    #[test_case(WritingStyle::PreferBusiness, "prefer_business")]
    fn test_style_serialization(style: WritingStyle, expected: &str) {
        assert_eq!(serde_json::to_value(style).unwrap(), expected);
    }

    #[test_case(WritingTone::Enthusiastic, "enthusiastic")]
    #[test_case(WritingTone::PreferDiplomatic, "prefer_diplomatic")]
    fn test_tone_serialization(tone: WritingTone, expected: &str) {
        assert_eq!(serde_json::to_value(tone).unwrap(), expected);
    }

    #[test]
    fn test_options_serialization() {
        let options = RephraseOptions::new(["this are wrong"])
            .target_lang("en-US")
            .tone(WritingTone::Friendly);

        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "text": ["this are wrong"],
                "target_lang": "en-US",
                "tone": "friendly"
            })
        );
    }

    #[test]
    fn test_style_and_tone_rejected() {
        let options = RephraseOptions::new(["text"])
            .writing_style(WritingStyle::Business)
            .tone(WritingTone::Confident);

        assert!(matches!(
            options.validate(),
            Err(DeepLError::Validation { .. })
        ));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(RephraseOptions::new(Vec::<String>::new()).validate().is_err());
    }
}

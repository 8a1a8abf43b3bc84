//! Text translation types.

use serde::{Deserialize, Serialize};

use crate::errors::DeepLError;

/// How the input text is split into sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitSentences {
    /// No splitting; each text is treated as one sentence.
    #[serde(rename = "0")]
    None,
    /// Split on punctuation and newlines.
    #[serde(rename = "1")]
    All,
    /// Split on punctuation only.
    #[serde(rename = "nonewlines")]
    NoNewlines,
}

/// Formality of the translated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    /// Language default.
    Default,
    /// More formal language.
    More,
    /// More informal language.
    Less,
    /// More formal if the target language supports it.
    PreferMore,
    /// More informal if the target language supports it.
    PreferLess,
}

/// Translation model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Highest quality model.
    QualityOptimized,
    /// Quality model where available, otherwise the classic model.
    PreferQualityOptimized,
    /// Lowest latency model.
    LatencyOptimized,
}

/// Markup handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagHandling {
    /// XML markup.
    Xml,
    /// HTML markup.
    Html,
}

/// Request payload for `POST /v2/translate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslateTextOptions {
    /// Texts to translate.
    pub text: Vec<String>,
    /// Source language code; detected when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    /// Target language code.
    pub target_lang: String,
    /// Extra context that influences the translation but is not translated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Include billed character counts in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_billed_characters: Option<bool>,
    /// Sentence splitting mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_sentences: Option<SplitSentences>,
    /// Keep the original formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_formatting: Option<bool>,
    /// Formality preference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formality: Option<Formality>,
    /// Model selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<ModelType>,
    /// Glossary to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glossary_id: Option<String>,
    /// Markup handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_handling: Option<TagHandling>,
    /// Automatic XML outline detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_detection: Option<bool>,
    /// XML tags that never split sentences.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub non_splitting_tags: Vec<String>,
    /// XML tags that always split sentences.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub splitting_tags: Vec<String>,
    /// XML tags whose content is left untranslated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_tags: Vec<String>,
}

impl TranslateTextOptions {
    /// Creates options translating `texts` into `target_lang`.
    pub fn new<I, S>(texts: I, target_lang: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: texts.into_iter().map(Into::into).collect(),
            source_lang: None,
            target_lang: target_lang.into(),
            context: None,
            show_billed_characters: None,
            split_sentences: None,
            preserve_formatting: None,
            formality: None,
            model_type: None,
            glossary_id: None,
            tag_handling: None,
            outline_detection: None,
            non_splitting_tags: Vec::new(),
            splitting_tags: Vec::new(),
            ignore_tags: Vec::new(),
        }
    }

    /// Sets the source language.
    pub fn source_lang(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = Some(lang.into());
        self
    }

    /// Sets additional context.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Requests billed character counts.
    pub fn show_billed_characters(mut self, show: bool) -> Self {
        self.show_billed_characters = Some(show);
        self
    }

    /// Sets the sentence splitting mode.
    pub fn split_sentences(mut self, mode: SplitSentences) -> Self {
        self.split_sentences = Some(mode);
        self
    }

    /// Keeps the original formatting.
    pub fn preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = Some(preserve);
        self
    }

    /// Sets the formality.
    pub fn formality(mut self, formality: Formality) -> Self {
        self.formality = Some(formality);
        self
    }

    /// Selects the model.
    pub fn model_type(mut self, model_type: ModelType) -> Self {
        self.model_type = Some(model_type);
        self
    }

    /// Applies a glossary.
    pub fn glossary_id(mut self, id: impl Into<String>) -> Self {
        self.glossary_id = Some(id.into());
        self
    }

    /// Sets the markup handling.
    pub fn tag_handling(mut self, handling: TagHandling) -> Self {
        self.tag_handling = Some(handling);
        self
    }

    /// Enables or disables XML outline detection.
    pub fn outline_detection(mut self, enabled: bool) -> Self {
        self.outline_detection = Some(enabled);
        self
    }

    /// Sets the non-splitting tags.
    pub fn non_splitting_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_splitting_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the splitting tags.
    pub fn splitting_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.splitting_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the ignored tags.
    pub fn ignore_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<(), DeepLError> {
        if self.text.is_empty() {
            return Err(DeepLError::validation("At least one text is required"));
        }
        if self.target_lang.trim().is_empty() {
            return Err(DeepLError::validation("Target language is required"));
        }
        Ok(())
    }
}

/// A single translation, in the same position as its input text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    /// Detected source language code.
    #[serde(default)]
    pub detected_source_language: String,
    /// Translated text.
    pub text: String,
    /// Characters billed, when requested.
    #[serde(default)]
    pub billed_characters: Option<u64>,
    /// Model that produced the translation.
    #[serde(default)]
    pub model_type_used: Option<String>,
}

/// Response body of `POST /v2/translate`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationsResponse {
    /// Translations in request order.
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_options_serialization() {
        let options = TranslateTextOptions::new(["Hello"], "DE");

        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json, serde_json::json!({"text": ["Hello"], "target_lang": "DE"}));
    }

    #[test]
    fn test_full_options_serialization() {
        let options = TranslateTextOptions::new(["<p>Hi</p>"], "FR")
            .source_lang("EN")
            .context("greeting")
            .show_billed_characters(true)
            .split_sentences(SplitSentences::NoNewlines)
            .preserve_formatting(false)
            .formality(Formality::PreferLess)
            .model_type(ModelType::QualityOptimized)
            .glossary_id("g-1")
            .tag_handling(TagHandling::Html)
            .outline_detection(false)
            .non_splitting_tags(["b"])
            .splitting_tags(["p"])
            .ignore_tags(["code"]);

        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "text": ["<p>Hi</p>"],
                "source_lang": "EN",
                "target_lang": "FR",
                "context": "greeting",
                "show_billed_characters": true,
                "split_sentences": "nonewlines",
                "preserve_formatting": false,
                "formality": "prefer_less",
                "model_type": "quality_optimized",
                "glossary_id": "g-1",
                "tag_handling": "html",
                "outline_detection": false,
                "non_splitting_tags": ["b"],
                "splitting_tags": ["p"],
                "ignore_tags": ["code"]
            })
        );
    }

    #[test]
    fn test_split_sentences_values() {
        assert_eq!(serde_json::to_string(&SplitSentences::None).unwrap(), r#""0""#);
        assert_eq!(serde_json::to_string(&SplitSentences::All).unwrap(), r#""1""#);
    }

    #[test]
    fn test_validate() {
        assert!(TranslateTextOptions::new(["a"], "DE").validate().is_ok());
        assert!(TranslateTextOptions::new(Vec::<String>::new(), "DE")
            .validate()
            .is_err());
        assert!(TranslateTextOptions::new(["a"], " ").validate().is_err());
    }

    #[test]
    fn test_translation_response_parsing() {
        let json = r#"{
            "translations": [
                {"detected_source_language": "EN", "text": "Hallo", "billed_characters": 5, "model_type_used": "quality_optimized"},
                {"detected_source_language": "EN", "text": "Welt"}
            ]
        }"#;

        let response: TranslationsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.translations.len(), 2);
        assert_eq!(response.translations[0].billed_characters, Some(5));
        assert_eq!(
            response.translations[0].model_type_used.as_deref(),
            Some("quality_optimized")
        );
        assert_eq!(response.translations[1].billed_characters, None);
    }
}

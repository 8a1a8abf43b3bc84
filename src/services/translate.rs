//! Text translation service.

use std::sync::Arc;
use tracing::instrument;

use crate::client::{CallContext, RequestExecutor};
use crate::errors::{DeepLError, DeepLResult};
use crate::transport::HttpRequest;
use crate::types::translate::{TranslateTextOptions, Translation, TranslationsResponse};

/// Translate service for `POST /v2/translate`.
pub struct TranslateService {
    executor: Arc<RequestExecutor>,
}

impl TranslateService {
    /// Creates a new translate service.
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Translates a single text with default options.
    pub async fn text(&self, text: &str, target_lang: &str) -> DeepLResult<Translation> {
        self.text_with_context(text, target_lang, &CallContext::default())
            .await
    }

    /// Translates a single text, honouring the given context.
    ///
    /// # Errors
    ///
    /// Returns [`DeepLError::EmptyResponse`] if the API answered with no
    /// translations.
    pub async fn text_with_context(
        &self,
        text: &str,
        target_lang: &str,
        ctx: &CallContext,
    ) -> DeepLResult<Translation> {
        let options = TranslateTextOptions::new([text], target_lang);
        self.with_options(options, ctx)
            .await?
            .into_iter()
            .next()
            .ok_or(DeepLError::EmptyResponse {
                operation: "translate",
            })
    }

    /// Translates one or more texts with full control over the options.
    ///
    /// Translations are returned in the order of `options.text`.
    #[instrument(skip(self, options, ctx), fields(texts = options.text.len(), target_lang = %options.target_lang))]
    pub async fn with_options(
        &self,
        options: TranslateTextOptions,
        ctx: &CallContext,
    ) -> DeepLResult<Vec<Translation>> {
        options.validate()?;

        let url = self.executor.config().endpoint_url("v2/translate")?;
        let request = HttpRequest::post(url).with_json(&options)?;

        let response: TranslationsResponse = self.executor.execute(request, ctx).await?;
        Ok(response.translations)
    }
}

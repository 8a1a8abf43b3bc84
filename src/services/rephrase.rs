//! Text improvement service.

use std::sync::Arc;
use tracing::instrument;

use crate::client::{CallContext, RequestExecutor};
use crate::errors::{DeepLError, DeepLResult};
use crate::transport::HttpRequest;
use crate::types::rephrase::{Improvement, RephraseOptions, RephraseResponse};

/// Rephrase service for `POST /v2/write/rephrase`.
pub struct RephraseService {
    executor: Arc<RequestExecutor>,
}

impl RephraseService {
    /// Creates a new rephrase service.
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Improves a single text with default options.
    pub async fn text(&self, text: &str) -> DeepLResult<Improvement> {
        self.text_with_context(text, &CallContext::default()).await
    }

    /// Improves a single text, honouring the given context.
    pub async fn text_with_context(&self, text: &str, ctx: &CallContext) -> DeepLResult<Improvement> {
        self.with_options(RephraseOptions::new([text]), ctx)
            .await?
            .into_iter()
            .next()
            .ok_or(DeepLError::EmptyResponse {
                operation: "rephrase",
            })
    }

    /// Improves one or more texts.
    ///
    /// # Errors
    ///
    /// Returns [`DeepLError::Validation`] without sending anything when both
    /// a writing style and a tone are set.
    #[instrument(skip(self, options, ctx), fields(texts = options.text.len()))]
    pub async fn with_options(
        &self,
        options: RephraseOptions,
        ctx: &CallContext,
    ) -> DeepLResult<Vec<Improvement>> {
        options.validate()?;

        let url = self.executor.config().endpoint_url("v2/write/rephrase")?;
        let request = HttpRequest::post(url).with_json(&options)?;

        let response: RephraseResponse = self.executor.execute(request, ctx).await?;
        Ok(response.improvements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuth;
    use crate::config::DeepLConfig;
    use crate::mocks::MockTransport;
    use crate::types::rephrase::{WritingStyle, WritingTone};

    fn service(mock: Arc<MockTransport>) -> RephraseService {
        let config = DeepLConfig::builder().api_key("test-key").build().unwrap();
        let executor = RequestExecutor::new(
            Arc::new(config),
            mock,
            Arc::new(ApiKeyAuth::from_string("test-key")),
        );
        RephraseService::new(Arc::new(executor))
    }

    #[tokio::test]
    async fn test_rephrase_single_text() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_json(&serde_json::json!({
            "improvements": [{
                "detected_source_language": "en",
                "text": "This is correct.",
                "target_language": "en-US"
            }]
        }));
        let service = service(mock.clone());

        let improvement = service.text("this are correct").await.unwrap();

        assert_eq!(improvement.text, "This is correct.");
        assert_eq!(improvement.target_language.as_deref(), Some("en-US"));
        assert_eq!(
            mock.last_request().unwrap().url.as_str(),
            "https://api.deepl.com/v2/write/rephrase"
        );
    }

    #[tokio::test]
    async fn test_rephrase_empty_result() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_json(&serde_json::json!({"improvements": []}));

        let err = service(mock).text("text").await.unwrap_err();

        assert!(matches!(
            err,
            DeepLError::EmptyResponse {
                operation: "rephrase"
            }
        ));
    }

    #[tokio::test]
    async fn test_style_and_tone_rejected_before_sending() {
        let mock = Arc::new(MockTransport::new());
        let options = RephraseOptions::new(["text"])
            .writing_style(WritingStyle::Casual)
            .tone(WritingTone::Friendly);

        let err = service(mock.clone())
            .with_options(options, &CallContext::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DeepLError::Validation { .. }));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_style_sent_as_snake_case() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_json(&serde_json::json!({"improvements": []}));
        let options = RephraseOptions::new(["text"]).writing_style(WritingStyle::PreferAcademic);

        service(mock.clone())
            .with_options(options, &CallContext::new())
            .await
            .unwrap();

        let body = mock.last_request().unwrap().json().unwrap();
        assert_eq!(body["writing_style"], "prefer_academic");
        assert!(body.get("tone").is_none());
    }
}

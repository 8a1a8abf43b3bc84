//! Supported languages service.

use std::sync::Arc;
use tracing::instrument;

use crate::client::{CallContext, RequestExecutor};
use crate::errors::DeepLResult;
use crate::transport::HttpRequest;
use crate::types::languages::{Language, LanguageType};

/// Languages service for `POST /v2/languages`.
pub struct LanguagesService {
    executor: Arc<RequestExecutor>,
}

impl LanguagesService {
    /// Creates a new languages service.
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Lists source languages.
    pub async fn source(&self) -> DeepLResult<Vec<Language>> {
        self.list(LanguageType::Source, &CallContext::default()).await
    }

    /// Lists target languages.
    pub async fn target(&self) -> DeepLResult<Vec<Language>> {
        self.list(LanguageType::Target, &CallContext::default()).await
    }

    /// Lists source languages, honouring the given context.
    pub async fn source_with_context(&self, ctx: &CallContext) -> DeepLResult<Vec<Language>> {
        self.list(LanguageType::Source, ctx).await
    }

    /// Lists target languages, honouring the given context.
    pub async fn target_with_context(&self, ctx: &CallContext) -> DeepLResult<Vec<Language>> {
        self.list(LanguageType::Target, ctx).await
    }

    /// Lists languages of the given type.
    #[instrument(skip(self, ctx), fields(kind = %kind))]
    pub async fn list(&self, kind: LanguageType, ctx: &CallContext) -> DeepLResult<Vec<Language>> {
        let mut url = self.executor.config().endpoint_url("v2/languages")?;
        url.query_pairs_mut().append_pair("type", kind.as_str());

        self.executor.execute(HttpRequest::post(url), ctx).await
    }
}

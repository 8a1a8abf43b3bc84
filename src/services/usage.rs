//! Account usage service.

use std::sync::Arc;
use tracing::instrument;

use crate::client::{CallContext, RequestExecutor};
use crate::errors::DeepLResult;
use crate::transport::HttpRequest;
use crate::types::usage::Usage;

/// Usage service for `POST /v2/usage`.
pub struct UsageService {
    executor: Arc<RequestExecutor>,
}

impl UsageService {
    /// Creates a new usage service.
    pub fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Retrieves usage for the current billing period.
    pub async fn get(&self) -> DeepLResult<Usage> {
        self.get_with_context(&CallContext::default()).await
    }

    /// Retrieves usage, honouring the given context.
    #[instrument(skip(self, ctx))]
    pub async fn get_with_context(&self, ctx: &CallContext) -> DeepLResult<Usage> {
        let url = self.executor.config().endpoint_url("v2/usage")?;
        self.executor.execute(HttpRequest::post(url), ctx).await
    }
}

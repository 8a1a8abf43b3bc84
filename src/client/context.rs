//! Per-call cancellation and deadline context.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::{CancelReason, DeepLError, DeepLResult};

/// Cancellation and deadline shared by every attempt of one logical call.
///
/// A context fires when its token is cancelled or its deadline passes,
/// whichever comes first. The default context never fires.
///
/// ```rust
/// use std::time::Duration;
/// use deepl_client::CallContext;
///
/// let ctx = CallContext::new().with_timeout(Duration::from_secs(5));
/// let handle = ctx.token().clone();
/// // Another task can call `handle.cancel()` to abort the call.
/// # drop(handle);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Creates a context with a fresh token and no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context driven by an existing token.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Sets the deadline to `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns the cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels the context.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns why the context has fired, or `None` if it is still live.
    pub fn fired(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            Some(CancelReason::Cancelled)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(CancelReason::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Fails with [`DeepLError::Cancelled`] if the context has fired.
    pub fn check(&self) -> DeepLResult<()> {
        match self.fired() {
            Some(reason) => Err(DeepLError::Cancelled { reason }),
            None => Ok(()),
        }
    }

    /// Completes when the context fires.
    pub async fn done(&self) -> CancelReason {
        match self.deadline {
            Some(deadline) => tokio::select! {
                () = self.token.cancelled() => CancelReason::Cancelled,
                () = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                CancelReason::Cancelled
            }
        }
    }
}

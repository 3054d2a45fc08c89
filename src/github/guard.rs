//! Per-call deadline and cancellation for API calls.

use crate::error::{ChangelogError, GitHubError, Result};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Bounds every API call by a fixed deadline and an external cancellation signal.
///
/// There is no retry at this layer: a call that times out is fatal for the run.
#[derive(Debug, Clone)]
pub struct ApiGuard {
    call_timeout: Duration,
    cancel: CancellationToken,
}

impl ApiGuard {
    /// Create a guard
    pub fn new(call_timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            call_timeout,
            cancel,
        }
    }

    /// Run one API call under the deadline
    pub async fn call<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, GitHubError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(ChangelogError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ChangelogError::Cancelled),
            outcome = tokio::time::timeout(self.call_timeout, fut) => match outcome {
                Ok(result) => result.map_err(ChangelogError::from),
                Err(_) => Err(GitHubError::Timeout {
                    operation: operation.to_string(),
                    seconds: self.call_timeout.as_secs(),
                }
                .into()),
            },
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;

/// What GitHub answered, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Fetches the newest `limit` public repositories of `username`.
    /// Transport and decode failures are errors; upstream statuses are not.
    async fn fetch_repos(&self, username: &str, limit: u8) -> Result<UpstreamReply, AppError>;
}

#[async_trait]
impl<T: GithubClient + ?Sized> GithubClient for Arc<T> {
    async fn fetch_repos(&self, username: &str, limit: u8) -> Result<UpstreamReply, AppError> {
        (**self).fetch_repos(username, limit).await
    }
}

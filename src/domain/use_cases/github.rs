use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::GITHUB_REPO_LIMIT;
use crate::errors::AppError;
use crate::repositories::github::GithubClient;

const NO_GITHUB_PROFILE: &str = "No Github profile found";

static GITHUB_LOGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,37}[A-Za-z0-9])?$").expect("valid github login pattern")
});

pub struct GithubHandler<C: GithubClient> {
    pub client: C,
}

impl<C: GithubClient> GithubHandler<C> {
    pub fn new(client: C) -> Self {
        GithubHandler { client }
    }

    /// Newest public repositories of `username`, relayed as GitHub returned them.
    pub async fn get_repos(&self, username: &str) -> Result<serde_json::Value, AppError> {
        let username = username.trim();
        if !GITHUB_LOGIN.is_match(username) {
            return Err(AppError::Upstream(NO_GITHUB_PROFILE.into()));
        }

        let reply = self.client.fetch_repos(username, GITHUB_REPO_LIMIT).await?;
        if !reply.is_success() {
            tracing::info!(username, status = reply.status, "GitHub lookup failed");
            return Err(AppError::Upstream(NO_GITHUB_PROFILE.into()));
        }

        Ok(reply.body)
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use url::Url;

use crate::{
    errors::AppError,
    repositories::github::{GithubClient, UpstreamReply},
    settings::AppConfig,
};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub REST client used by the repos proxy.
#[derive(Clone)]
pub struct ReqwestGithubClient {
    client: Client,
    api_base: Url,
    token: Option<String>,
}

impl ReqwestGithubClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let api_base = Url::parse(&config.github_api_url)
            .map_err(|e| AppError::InternalError(format!("Invalid GitHub API url: {}", e)))?;

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.github_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base,
            token: config.github_token.clone(),
        })
    }

    fn repos_url(&self, username: &str, limit: u8) -> Result<Url, AppError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InternalError("GitHub API url cannot be a base".into()))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);

        url.query_pairs_mut()
            .append_pair("per_page", &limit.to_string())
            .append_pair("sort", "created")
            .append_pair("direction", "desc");

        Ok(url)
    }
}

#[async_trait]
impl GithubClient for ReqwestGithubClient {
    async fn fetch_repos(&self, username: &str, limit: u8) -> Result<UpstreamReply, AppError> {
        let url = self.repos_url(username, limit)?;

        let mut request = self.client.get(url).header(header::ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            tracing::debug!(username, status, "GitHub answered with an error status");
            return Ok(UpstreamReply { status, body: serde_json::Value::Null });
        }

        let body = response.json::<serde_json::Value>().await?;

        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;

    fn client(base: &str) -> ReqwestGithubClient {
        let config = AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "a_secret_that_is_long_enough_for_hs512_tests".into(),
            jwt_expiration_minutes: 60,
            github_api_url: base.into(),
            github_token: None,
            github_timeout_secs: 1,
        };
        ReqwestGithubClient::new(&config).unwrap()
    }

    #[test]
    fn builds_repos_url_with_newest_first_query() {
        let url = client("https://api.github.com").repos_url("octocat", 5).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/users/octocat/repos?per_page=5&sort=created&direction=desc"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let url = client("http://localhost:9000/github/").repos_url("ada", 3).unwrap();
        assert_eq!(url.path(), "/github/users/ada/repos");
    }
}

//! GitHub API client for the app and repository endpoints used during a clone.
//!
//! The same client type is used with two different bearer credentials: the app JWT
//! for `/app/...` endpoints and the installation access token for `/repos/...`.

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;

use super::token_manager::InstallationToken;
use crate::config::GitHubConfig;
use crate::error::{Error, Result};

/// GitHub API client bound to a single bearer credential.
pub struct GitHubClient {
    api_url: String,
    access_token: String,
    client: reqwest::Client,
}

impl GitHubClient {
    /// Create a new GitHub client for `access_token` (app JWT or installation token).
    pub fn new(config: &GitHubConfig, access_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            access_token,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Send a request and decode the JSON body, turning non-2xx answers into `Error::Api`.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// List installations for the authenticated app.
    /// Note: This requires app JWT authentication, not installation token.
    pub async fn list_installations(&self) -> Result<Vec<Installation>> {
        self.send(self.request(reqwest::Method::GET, "/app/installations"))
            .await
    }

    /// Exchange the app JWT for an installation access token.
    pub async fn create_installation_token(
        &self,
        installation_id: u64,
    ) -> Result<InstallationToken> {
        let path = format!("/app/installations/{}/access_tokens", installation_id);
        self.send(self.request(reqwest::Method::POST, &path)).await
    }

    /// Fetch repository metadata. A 404 is reported as `Error::RepoNotFound`.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let path = format!("/repos/{}/{}", owner, repo);
        match self.send(self.request(reqwest::Method::GET, &path)).await {
            Err(Error::Api { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(Error::RepoNotFound {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            other => other,
        }
    }
}

/// The repository fields printed before cloning.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub clone_url: String,
}

/// A GitHub App installation.
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    pub id: u64,
    pub account: Option<InstallationAccount>,
}

impl Installation {
    /// Login of the account the app is installed on, if GitHub reported one.
    pub fn account_login(&self) -> &str {
        self.account
            .as_ref()
            .map(|account| account.login.as_str())
            .unwrap_or("<unknown>")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallationAccount {
    pub login: String,
}

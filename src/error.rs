//! Error type shared by every step of the clone pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure is fatal; the variants only exist so callers can log them differently.
#[derive(Error, Debug)]
pub enum Error {
    #[error("All flags --app_id, --pem_path, --repo_url, and --clone_dir are required (missing: {})", .0.join(", "))]
    MissingFlags(Vec<&'static str>),

    #[error("Error reading private key {}: {source}", path.display())]
    ReadKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing private key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("Error generating JWT: {0}")]
    Jwt(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to make GitHub API request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("no installations found")]
    NoInstallations,

    #[error("installation {0} not found for this app")]
    InstallationNotFound(u64),

    #[error("repository {owner}/{repo} not found")]
    RepoNotFound { owner: String, repo: String },

    #[error("invalid repository URL format: {0}")]
    InvalidRepoUrl(String),

    #[error("Error cloning repository: {0}")]
    Clone(#[from] git2::Error),

    #[error("Clone task failed: {0}")]
    CloneTask(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Owner/name extraction from a `https://github.com/...` repository URL.

use crate::error::{Error, Result};

const GITHUB_PREFIX: &str = "https://github.com/";

/// Repository coordinates as used by the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Split the URL after the GitHub prefix into exactly two segments and drop a trailing `.git`.
    pub fn parse(url: &str) -> Result<Self> {
        Self::parse_with_base(url, GITHUB_PREFIX)
    }

    /// Same as [`RepoRef::parse`] for repositories living under `base` instead of github.com.
    pub fn parse_with_base(url: &str, base: &str) -> Result<Self> {
        let path = url.strip_prefix(base).unwrap_or(url);
        let parts: Vec<&str> = path.split('/').collect();
        let [owner, name] = parts.as_slice() else {
            return Err(Error::InvalidRepoUrl(url.to_string()));
        };

        Ok(Self {
            owner: owner.to_string(),
            name: name.strip_suffix(".git").unwrap_or(name).to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

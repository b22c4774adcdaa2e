//! GitHub integration for GitHub App authentication.
//!
//! This module provides:
//! - JWT generation for GitHub App authentication
//! - Installation listing, selection and access token exchange
//! - Repository lookup and URL parsing

pub mod api_client;
pub mod repo_url;
pub mod token_manager;

#[cfg(test)]
pub(crate) mod test_support;

pub use api_client::{GitHubClient, Installation, Repository};
pub use repo_url::RepoRef;
pub use token_manager::{generate_app_jwt, read_private_key, AppClaims, InstallationToken};

use tracing::warn;

use crate::error::{Error, Result};

/// Pick the installation to mint a token for.
///
/// Without an explicit id the first installation wins; a warning is logged when
/// the app is installed on more than one account.
pub fn select_installation(
    installations: &[Installation],
    requested: Option<u64>,
) -> Result<&Installation> {
    if let Some(id) = requested {
        return installations
            .iter()
            .find(|installation| installation.id == id)
            .ok_or(Error::InstallationNotFound(id));
    }

    let first = installations.first().ok_or(Error::NoInstallations)?;
    if installations.len() > 1 {
        let accounts: Vec<&str> = installations.iter().map(|i| i.account_login()).collect();
        warn!(
            installations = installations.len(),
            accounts = %accounts.join(", "),
            chosen = first.id,
            "App has multiple installations, using the first one (pass --installation_id to choose)"
        );
    }
    Ok(first)
}

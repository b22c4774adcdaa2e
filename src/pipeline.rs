//! The clone run: authenticate as the app, mint an installation token,
//! check the repository and clone it.

use tracing::{debug, error, info};

use crate::cli::{print_repo_details, Inputs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::clone_repository;
use crate::github::{
    generate_app_jwt, read_private_key, select_installation, GitHubClient, InstallationToken,
    RepoRef, Repository,
};

/// Run every step in order, stopping at the first failure.
pub async fn run(inputs: &Inputs, config: &Config) -> Result<Repository> {
    let private_key = read_private_key(&inputs.pem_path)?;
    let jwt = generate_app_jwt(&inputs.app_id, &private_key)?;
    info!(app_id = %inputs.app_id, "Generated app JWT");

    let token = installation_token(config, jwt, inputs.installation_id).await?;

    let repo = check_repo_access(config, &token.token, &inputs.repo_url).await?;
    print_repo_details(&repo);

    let url = inputs.repo_url.clone();
    let dest = inputs.clone_dir.clone();
    let username = config.git.username.clone();
    tokio::task::spawn_blocking(move || clone_repository(&url, &dest, &username, &token.token))
        .await??;

    Ok(repo)
}

/// List the app's installations, pick one and exchange the JWT for its access token.
async fn installation_token(
    config: &Config,
    jwt: String,
    requested: Option<u64>,
) -> Result<InstallationToken> {
    let app_client = GitHubClient::new(&config.github, jwt)?;

    let installations = app_client.list_installations().await?;
    let installation = select_installation(&installations, requested)?;
    info!(
        installation_id = installation.id,
        account = installation.account_login(),
        "Using installation"
    );

    let token = app_client.create_installation_token(installation.id).await?;
    debug!(expires_at = %token.expires_at, "Minted installation token");
    Ok(token)
}

/// Fetch repository metadata with the installation token.
async fn check_repo_access(config: &Config, token: &str, repo_url: &str) -> Result<Repository> {
    let repo_ref = RepoRef::parse_with_base(repo_url, &config.github.web_url)?;
    let client = GitHubClient::new(&config.github, token.to_string())?;

    client
        .get_repo(&repo_ref.owner, &repo_ref.name)
        .await
        .map_err(|e| {
            match &e {
                Error::RepoNotFound { .. } => error!("Repository {} not found", repo_ref),
                other => error!("Error accessing repository: {}", other),
            }
            e
        })
}

//! Cloning over HTTPS with an installation token as the password.

use std::path::Path;

use git2::build::RepoBuilder;
use git2::{Cred, FetchOptions, RemoteCallbacks, Repository};
use tracing::{debug, info};

use crate::error::Result;

/// Clone `url` into `dest`, answering credential prompts with `username`/`token`.
///
/// Blocking; call it from `spawn_blocking` inside async code.
pub fn clone_repository(url: &str, dest: &Path, username: &str, token: &str) -> Result<Repository> {
    let mut attempts = 0;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, _username_from_url, _allowed_types| {
        // libgit2 keeps asking as long as we keep answering; bail after the first rejection
        attempts += 1;
        if attempts > 1 {
            return Err(git2::Error::from_str(
                "authentication rejected for installation token",
            ));
        }
        Cred::userpass_plaintext(username, token)
    });
    callbacks.transfer_progress(|stats| {
        if stats.received_objects() == stats.total_objects() {
            debug!(
                indexed_deltas = stats.indexed_deltas(),
                total_deltas = stats.total_deltas(),
                "Resolving deltas"
            );
        } else {
            debug!(
                received_objects = stats.received_objects(),
                total_objects = stats.total_objects(),
                received_kb = stats.received_bytes() / 1024,
                "Receiving objects"
            );
        }
        true
    });

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    info!(dest = %dest.display(), "Cloning repository");
    let repo = RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(url, dest)?;

    Ok(repo)
}

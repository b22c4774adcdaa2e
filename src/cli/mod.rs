//! Command-line flags and input validation.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::github::Repository;

/// CLI arguments structure
#[derive(Parser, Debug, Default)]
#[command(name = "tokenclone")]
#[command(author, version, about = "A small utility to clone a GitHub repository using GitHub App credentials.", long_about = None)]
pub struct Cli {
    /// GitHub App ID
    #[arg(long = "app_id")]
    pub app_id: Option<String>,

    /// Path to the GitHub App private key PEM file
    #[arg(long = "pem_path")]
    pub pem_path: Option<String>,

    /// URL of the repository to clone
    #[arg(long = "repo_url")]
    pub repo_url: Option<String>,

    /// Directory to clone the repository into
    #[arg(long = "clone_dir")]
    pub clone_dir: Option<String>,

    /// Installation to use when the app is installed on several accounts (default: first)
    #[arg(long = "installation_id")]
    pub installation_id: Option<u64>,

    /// Path to an optional configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level
    #[arg(short, long = "log_level")]
    pub log_level: Option<String>,
}

/// The validated inputs of a clone run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub app_id: String,
    pub pem_path: PathBuf,
    pub repo_url: String,
    pub clone_dir: PathBuf,
    pub installation_id: Option<u64>,
}

impl Cli {
    /// Check that all four required flags are present and non-empty.
    pub fn inputs(&self) -> Result<Inputs> {
        let required = [
            ("--app_id", &self.app_id),
            ("--pem_path", &self.pem_path),
            ("--repo_url", &self.repo_url),
            ("--clone_dir", &self.clone_dir),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(flag, _)| *flag)
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingFlags(missing));
        }

        Ok(Inputs {
            app_id: self.app_id.clone().unwrap_or_default(),
            pem_path: PathBuf::from(self.pem_path.clone().unwrap_or_default()),
            repo_url: self.repo_url.clone().unwrap_or_default(),
            clone_dir: PathBuf::from(self.clone_dir.clone().unwrap_or_default()),
            installation_id: self.installation_id,
        })
    }
}

/// Print the repository summary shown before cloning.
pub fn print_repo_details(repo: &Repository) {
    println!("Repository Details:");
    println!("Name: {}", repo.name);
    println!("Full Name: {}", repo.full_name);
    println!("Clone URL: {}", repo.clone_url);
}

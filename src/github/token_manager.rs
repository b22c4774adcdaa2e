//! Token management for GitHub App authentication.
//!
//! GitHub Apps use two types of authentication:
//! 1. App JWT - Short-lived JWT signed with the app's private key (for app-level operations)
//! 2. Installation Access Token - Token for a specific installation (for repo operations)

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Lifetime of an app JWT (GitHub's maximum).
const JWT_LIFETIME_MINUTES: i64 = 10;

/// JWT claims for GitHub App authentication.
/// GitHub requires: iat (issued at), exp (expiration), iss (issuer = app_id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppClaims {
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer - the GitHub App ID
    pub iss: String,
}

impl AppClaims {
    pub fn new(app_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            iat: now.timestamp(),
            exp: (now + Duration::minutes(JWT_LIFETIME_MINUTES)).timestamp(),
            iss: app_id.to_string(),
        }
    }
}

/// Read the app's private key from disk.
pub fn read_private_key(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::ReadKey {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate a JWT for GitHub App authentication.
///
/// The JWT is signed with RS256 (RSA-SHA256) using the app's private key
/// and is valid for 10 minutes.
///
/// # Example
/// ```ignore
/// let jwt = generate_app_jwt("12345", &private_key)?;
/// // Use: Authorization: Bearer {jwt}
/// ```
pub fn generate_app_jwt(app_id: &str, private_key_pem: &str) -> Result<String> {
    let encoding_key =
        EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(Error::InvalidKey)?;

    let claims = AppClaims::new(app_id, Utc::now());
    let header = Header::new(Algorithm::RS256);

    encode(&header, &claims, &encoding_key).map_err(Error::Jwt)
}

/// Response from GitHub's installation access token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallationToken {
    pub token: String,
    pub expires_at: String,
}

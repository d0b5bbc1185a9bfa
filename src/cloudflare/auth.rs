//! Cloudflare Authentication
//!
//! Handles the three authentication schemes the v4 API accepts: scoped API
//! tokens, global API key with account email, and origin CA user service keys.

use super::error::{Error, Result};
use reqwest::RequestBuilder;
use std::fmt;

pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_API_KEY: &str = "CLOUDFLARE_API_KEY";
pub const ENV_API_EMAIL: &str = "CLOUDFLARE_API_EMAIL";
pub const ENV_USER_SERVICE_KEY: &str = "CLOUDFLARE_API_USER_SERVICE_KEY";

/// Credentials attached to every API request
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token, sent as a bearer token
    Token(String),
    /// Global API key, sent with the account email
    Key { key: String, email: String },
    /// Origin CA key
    UserServiceKey(String),
}

impl Credentials {
    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token(token.into())
    }

    pub fn key(key: impl Into<String>, email: impl Into<String>) -> Self {
        Credentials::Key {
            key: key.into(),
            email: email.into(),
        }
    }

    /// Load credentials from the environment
    ///
    /// An API token wins over a key/email pair, which wins over a user
    /// service key. Blank values are ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(token) = get(ENV_API_TOKEN) {
            return Ok(Credentials::Token(token));
        }

        match (get(ENV_API_KEY), get(ENV_API_EMAIL)) {
            (Some(key), Some(email)) => return Ok(Credentials::Key { key, email }),
            (Some(_), None) => {
                tracing::warn!("{} is set but {} is not, ignoring key", ENV_API_KEY, ENV_API_EMAIL);
            }
            _ => {}
        }

        if let Some(key) = get(ENV_USER_SERVICE_KEY) {
            return Ok(Credentials::UserServiceKey(key));
        }

        Err(Error::MissingCredentials)
    }

    /// Attach the authentication headers to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Token(token) => request.bearer_auth(token),
            Credentials::Key { key, email } => request
                .header("X-Auth-Key", key)
                .header("X-Auth-Email", email),
            Credentials::UserServiceKey(key) => request.header("X-Auth-User-Service-Key", key),
        }
    }
}

// Security: never print secrets, even in debug logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Credentials::Token(***)"),
            Credentials::Key { email, .. } => {
                write!(f, "Credentials::Key {{ key: ***, email: {:?} }}", email)
            }
            Credentials::UserServiceKey(_) => f.write_str("Credentials::UserServiceKey(***)"),
        }
    }
}

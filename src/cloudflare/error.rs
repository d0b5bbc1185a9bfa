//! Cloudflare API errors

use super::response::ResponseInfo;
use reqwest::StatusCode;
use thiserror::Error;

/// Prefix attached to every JSON decode failure
pub const UNMARSHAL_ERROR: &str = "error unmarshalling the JSON response";

/// Result alias for Cloudflare API calls
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the Cloudflare API client
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connection, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("API request failed: {status}{}", format_response_errors(.errors))]
    Api {
        status: StatusCode,
        errors: Vec<ResponseInfo>,
    },

    /// The response body did not match the expected JSON shape
    #[error("{}: {}", UNMARSHAL_ERROR, .0)]
    Unmarshal(#[source] serde_json::Error),

    #[error("required missing zone ID")]
    MissingZoneId,

    #[error("required missing certificate ID")]
    MissingCertificateId,

    #[error(
        "no Cloudflare credentials found; set CLOUDFLARE_API_TOKEN, \
         CLOUDFLARE_API_KEY and CLOUDFLARE_API_EMAIL, or CLOUDFLARE_API_USER_SERVICE_KEY"
    )]
    MissingCredentials,

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying reqwest client could not be built
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_response_errors(errors: &[ResponseInfo]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let joined = errors
        .iter()
        .map(|e| format!("{} ({})", e.message, e.code))
        .collect::<Vec<_>>()
        .join(", ");
    format!(" - {}", joined)
}

/// Format an API error for display
/// Security: Maps errors to generic messages to avoid leaking API response details
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::Api { status, .. } => match status.as_u16() {
            400 => "Invalid request. Check your parameters.".to_string(),
            401 => "Authentication failed. Check CLOUDFLARE_API_TOKEN.".to_string(),
            403 => "Permission denied. Check your API token permissions.".to_string(),
            404 => "Resource not found.".to_string(),
            409 => "Resource conflict. The certificate may already exist.".to_string(),
            429 => "Rate limit exceeded. Please try again later.".to_string(),
            500..=599 => "Cloudflare service temporarily unavailable. Please try again.".to_string(),
            _ => "Request failed. Check your network connection and try again.".to_string(),
        },
        Error::Transport(_) => {
            "Request failed. Check your network connection and try again.".to_string()
        }
        Error::Unmarshal(_) => "Unexpected response from the Cloudflare API.".to_string(),
        other => other.to_string(),
    }
}

//! HTTP utilities for Cloudflare REST API calls

use super::auth::Credentials;
use super::error::{Error, Result};
use super::response::parse_errors;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Cloudflare API calls
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cfcerts/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }

    /// Send a request and return the raw response body
    ///
    /// Non-2xx statuses become [`Error::Api`]; the body is left undecoded so
    /// callers can map it onto their own result type.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        credentials: &Credentials,
        body: Option<&Value>,
    ) -> Result<String> {
        tracing::debug!("{} {}", method, url);

        let mut request = credentials.apply(self.client.request(method, url));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::Transport)?;

        let status = response.status();
        let response_body = response.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(Error::Api {
                status,
                errors: parse_errors(&response_body),
            });
        }

        Ok(response_body)
    }
}

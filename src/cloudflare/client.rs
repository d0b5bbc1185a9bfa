//! Cloudflare Client
//!
//! Main client for interacting with the Cloudflare v4 API, combining
//! authentication and HTTP functionality.

use super::auth::Credentials;
use super::error::Result;
use super::http::HttpClient;
use reqwest::Method;
use serde_json::Value;
use url::{form_urlencoded, Url};

/// Default Cloudflare API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Main Cloudflare client
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub credentials: Credentials,
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the public API endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    /// Create a client against a custom endpoint
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self> {
        // Reject garbage early instead of on the first request
        Url::parse(base_url)?;

        Ok(Self {
            credentials,
            http: HttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request against an API path and return the raw body
    ///
    /// `uri` is relative to the base URL and may already carry a query string.
    pub async fn make_request(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, uri);
        self.http.request(method, &url, &self.credentials, body).await
    }

    /// Make a GET request to a Cloudflare API path
    pub async fn get(&self, uri: &str) -> Result<String> {
        self.make_request(Method::GET, uri, None).await
    }

    /// Make a POST request to a Cloudflare API path
    pub async fn post(&self, uri: &str, body: Option<&Value>) -> Result<String> {
        self.make_request(Method::POST, uri, body).await
    }
}

/// Build a request URI from a path and query parameters
///
/// Pairs with an empty value are skipped, and no `?` is appended when
/// nothing remains.
pub fn build_uri(path: &str, query: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut has_pairs = false;
    for (key, value) in query.iter().filter(|(_, v)| !v.is_empty()) {
        serializer.append_pair(key, value);
        has_pairs = true;
    }

    if has_pairs {
        format!("{}?{}", path, serializer.finish())
    } else {
        path.to_string()
    }
}

/// Encode a single path segment
pub fn path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::with_base_url("https://api.example.com/client/v4/", Credentials::token("t"))
            .unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        assert_eq!(client().base_url(), "https://api.example.com/client/v4");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ApiClient::with_base_url("not a url", Credentials::token("t"));
        assert!(matches!(result, Err(super::super::error::Error::InvalidUrl(_))));
    }

    #[test]
    fn test_build_uri_without_query() {
        assert_eq!(
            build_uri("/zones/abc/client_certificates", &[]),
            "/zones/abc/client_certificates"
        );
    }

    #[test]
    fn test_build_uri_skips_empty_values() {
        let uri = build_uri(
            "/zones/abc/client_certificates",
            &[("status", String::new()), ("limit", "10".to_string())],
        );
        assert_eq!(uri, "/zones/abc/client_certificates?limit=10");
    }

    #[test]
    fn test_build_uri_encodes_values() {
        let uri = build_uri("/zones/abc/client_certificates", &[("status", "a b&c".to_string())]);
        assert_eq!(uri, "/zones/abc/client_certificates?status=a+b%26c");
    }

    #[test]
    fn test_path_segment_encodes_reserved_chars() {
        assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(path_segment("023e105f4ecef8ad9ca31a8372d0c353"), "023e105f4ecef8ad9ca31a8372d0c353");
    }
}

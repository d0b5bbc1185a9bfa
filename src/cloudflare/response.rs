//! Cloudflare response envelope
//!
//! Every v4 API response carries the same wrapper around its `result`:
//!
//! ```json
//! { "success": true, "errors": [], "messages": [], "result": ... }
//! ```

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// A single error or message entry from the envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Pagination details returned by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_count: u32,
}

/// Status fields shared by every response
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub success: bool,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub errors: Vec<ResponseInfo>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub messages: Vec<ResponseInfo>,
}

/// Envelope carrying a typed `result`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(flatten)]
    pub response: Response,
    pub result: T,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// Best-effort extraction of the `errors` list from an error response body
pub fn parse_errors(body: &str) -> Vec<ResponseInfo> {
    serde_json::from_str::<Response>(body)
        .map(|r| r.errors)
        .unwrap_or_default()
}

//! Client library for Cloudflare per-zone API Shield mTLS client certificates.

pub mod cloudflare;
pub mod config;
pub mod output;

pub use cloudflare::client::ApiClient;
pub use cloudflare::error::{Error, Result};

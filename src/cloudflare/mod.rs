//! Cloudflare API interaction module
//!
//! This module provides the core functionality for interacting with the
//! Cloudflare v4 API: authentication, the HTTP client, the shared response
//! envelope, and the per-zone mTLS client certificate endpoints.
//!
//! # Module Structure
//!
//! - [`auth`] - API token / API key authentication
//! - [`client`] - Main API client and request URI helpers
//! - [`client_certificates`] - Per-zone API Shield client certificates
//! - [`error`] - Error type shared by every call
//! - [`http`] - HTTP utilities for REST API calls
//! - [`response`] - Response envelope types
//!
//! # Example
//!
//! ```no_run
//! use cfcerts::cloudflare::auth::Credentials;
//! use cfcerts::cloudflare::client::ApiClient;
//! use cfcerts::cloudflare::client_certificates::ListClientCertificatesParams;
//!
//! async fn example() -> cfcerts::cloudflare::error::Result<()> {
//!     let client = ApiClient::new(Credentials::from_env()?)?;
//!     let params = ListClientCertificatesParams {
//!         status: Some("active".to_string()),
//!         ..Default::default()
//!     };
//!     let (certs, _result_info) = client
//!         .list_per_zone_client_certificates("023e105f4ecef8ad9ca31a8372d0c353", &params)
//!         .await?;
//!     println!("{} active certificates", certs.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod client_certificates;
pub mod error;
pub mod http;
pub mod response;

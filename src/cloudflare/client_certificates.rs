//! Per-zone API Shield mTLS client certificates
//!
//! API reference: <https://developers.cloudflare.com/api/operations/client-certificate-for-a-zone-list-client-certificates>

use super::client::{build_uri, path_segment, ApiClient};
use super::error::{Error, Result};
use super::response::{Envelope, ResultInfo};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use serde_with::{serde_as, DefaultOnNull};

/// Certificate authority that issued a client certificate
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientCertificateAuthorityDetails {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
}

/// Metadata for a per-zone API Shield mTLS client certificate
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientCertificateDetails {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub certificate: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub certificate_authority: ClientCertificateAuthorityDetails,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub common_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub country: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub csr: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub expires_on: DateTime<Utc>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub fingerprint_sha256: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub issued_on: DateTime<Utc>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub location: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub organization: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub organizational_unit: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub serial_number: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub signature: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub ski: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub state: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub validity_days: u32,
}

/// Filters for listing client certificates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListClientCertificatesParams {
    /// Only return certificates in this state, e.g. `active`
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListClientCertificatesParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("status", self.status.clone().unwrap_or_default()),
            ("limit", self.limit.map(|v| v.to_string()).unwrap_or_default()),
            ("offset", self.offset.map(|v| v.to_string()).unwrap_or_default()),
        ]
    }
}

/// Request body for issuing a client certificate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateClientCertificateParams {
    /// PEM-encoded certificate signing request
    pub csr: String,
    /// Requested lifetime, capped by the API
    pub validity_days: u32,
}

impl CreateClientCertificateParams {
    fn body(&self) -> Value {
        json!({
            "csr": self.csr,
            "validity_days": self.validity_days,
        })
    }
}

fn client_certificates_path(zone_id: &str) -> Result<String> {
    if zone_id.is_empty() {
        return Err(Error::MissingZoneId);
    }
    Ok(format!("/zones/{}/client_certificates", path_segment(zone_id)))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>> {
    serde_json::from_str(body).map_err(Error::Unmarshal)
}

impl ApiClient {
    /// List the mTLS client certificates of a zone, in server order
    ///
    /// The pagination details are returned when the API sends them, so
    /// callers paging with `limit`/`offset` can tell when to stop.
    pub async fn list_per_zone_client_certificates(
        &self,
        zone_id: &str,
        params: &ListClientCertificatesParams,
    ) -> Result<(Vec<ClientCertificateDetails>, Option<ResultInfo>)> {
        let uri = build_uri(&client_certificates_path(zone_id)?, &params.query());

        let body = self.get(&uri).await?;
        let envelope: Envelope<Option<Vec<ClientCertificateDetails>>> = decode(&body)?;

        let certificates = envelope.result.unwrap_or_default();
        tracing::debug!("Loaded {} client certificates for zone {}", certificates.len(), zone_id);
        Ok((certificates, envelope.result_info))
    }

    /// Issue a new mTLS client certificate for a zone from a CSR
    pub async fn create_per_zone_client_certificate(
        &self,
        zone_id: &str,
        params: &CreateClientCertificateParams,
    ) -> Result<ClientCertificateDetails> {
        let uri = client_certificates_path(zone_id)?;
        let body = self.post(&uri, Some(&params.body())).await?;
        let envelope: Envelope<ClientCertificateDetails> = decode(&body)?;

        tracing::info!("Created client certificate {} for zone {}", envelope.result.id, zone_id);
        Ok(envelope.result)
    }

    /// Fetch a single mTLS client certificate
    pub async fn get_per_zone_client_certificate(
        &self,
        zone_id: &str,
        certificate_id: &str,
    ) -> Result<ClientCertificateDetails> {
        if certificate_id.is_empty() {
            return Err(Error::MissingCertificateId);
        }
        let uri = format!(
            "{}/{}",
            client_certificates_path(zone_id)?,
            path_segment(certificate_id)
        );

        let body = self.get(&uri).await?;
        let envelope: Envelope<ClientCertificateDetails> = decode(&body)?;
        Ok(envelope.result)
    }
}

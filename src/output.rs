//! Output rendering for CLI results

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render a value in the requested format
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudflare::client_certificates::ClientCertificateDetails;

    fn sample() -> ClientCertificateDetails {
        ClientCertificateDetails {
            id: "023e105f4ecef8ad9ca31a8372d0c353".to_string(),
            status: "active".to_string(),
            validity_days: 3650,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_json() {
        let rendered = render(&[sample()], OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["id"], "023e105f4ecef8ad9ca31a8372d0c353");
        assert_eq!(parsed[0]["validity_days"], 3650);
    }

    #[test]
    fn test_render_yaml() {
        let rendered = render(&sample(), OutputFormat::Yaml).unwrap();
        assert!(rendered.contains("023e105f4ecef8ad9ca31a8372d0c353"));
        assert!(rendered.contains("status: active"));
    }
}

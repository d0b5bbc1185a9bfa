//! Configuration Management
//!
//! Handles persistent configuration storage for cfcerts.

use crate::cloudflare::client::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_ZONE_ID: &str = "CLOUDFLARE_ZONE_ID";
pub const ENV_BASE_URL: &str = "CLOUDFLARE_API_BASE_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Default zone for certificate commands
    #[serde(default)]
    pub zone_id: Option<String>,
    /// API endpoint override
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cfcerts").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective zone (CLI > config > environment)
    ///
    /// Blank values at any level fall through to the next one.
    pub fn effective_zone(&self, cli: Option<&str>) -> Option<String> {
        non_blank(cli.map(str::to_string))
            .or_else(|| non_blank(self.zone_id.clone()))
            .or_else(|| non_blank(std::env::var(ENV_ZONE_ID).ok()))
    }

    /// Get effective API endpoint (CLI > config > environment > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        non_blank(cli.map(str::to_string))
            .or_else(|| non_blank(self.base_url.clone()))
            .or_else(|| non_blank(std::env::var(ENV_BASE_URL).ok()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Set zone and save
    pub fn set_zone(&mut self, zone_id: &str) -> Result<()> {
        self.zone_id = Some(zone_id.to_string());
        self.save()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cfcerts-test-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_gives_default() {
        let config = Config::load_from(&temp_path("missing"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let config = Config {
            zone_id: Some("023e105f4ecef8ad9ca31a8372d0c353".to_string()),
            base_url: None,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_gives_default() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            zone_id: Some("from-config".to_string()),
            base_url: Some("https://config.example.com".to_string()),
        };
        assert_eq!(config.effective_zone(Some("from-cli")).as_deref(), Some("from-cli"));
        assert_eq!(config.effective_zone(None).as_deref(), Some("from-config"));
        assert_eq!(
            config.effective_base_url(Some("https://cli.example.com")),
            "https://cli.example.com"
        );
        assert_eq!(config.effective_base_url(None), "https://config.example.com");
    }

    #[test]
    fn test_blank_cli_falls_back_to_config() {
        let config = Config {
            zone_id: Some("from-config".to_string()),
            base_url: Some("https://config.example.com".to_string()),
        };
        assert_eq!(config.effective_zone(Some("  ")).as_deref(), Some("from-config"));
        assert_eq!(config.effective_base_url(Some("")), "https://config.example.com");
    }

    #[test]
    fn test_blank_base_url_uses_default() {
        let config = Config {
            zone_id: None,
            base_url: Some(" ".to_string()),
        };
        // Only checkable when the environment does not set an endpoint
        if std::env::var(ENV_BASE_URL).map_or(true, |v| v.trim().is_empty()) {
            assert_eq!(config.effective_base_url(Some("")), DEFAULT_BASE_URL);
        }
    }
}

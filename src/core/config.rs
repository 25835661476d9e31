use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OpenErApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RelayConfig {
    pub base_url: String,
    /// Upstream API the relay is asked to fetch.
    pub target_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FrankfurterConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    pub open_er_api: Option<OpenErApiConfig>,
    pub relay: Option<RelayConfig>,
    pub frankfurter: Option<FrankfurterConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the default config file. The board works with zero setup, so a
    /// missing file yields built-in defaults rather than an error.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxboard")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("in", "codito", "fxboard")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  open_er_api:
    base_url: "http://example.com/er"
  relay:
    base_url: "http://example.com/relay"
    target_url: "http://example.com/upstream"
  frankfurter:
    base_url: "http://example.com/fx"
data_path: "/tmp/fxboard"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.open_er_api.unwrap().base_url,
            "http://example.com/er"
        );
        let relay = config.providers.relay.unwrap();
        assert_eq!(relay.base_url, "http://example.com/relay");
        assert_eq!(relay.target_url, "http://example.com/upstream");
        assert_eq!(
            config.providers.frankfurter.unwrap().base_url,
            "http://example.com/fx"
        );
        assert_eq!(config.data_path.as_deref(), Some("/tmp/fxboard"));
    }

    #[test]
    fn test_missing_sections_default() {
        let config: AppConfig = serde_yaml::from_str("data_path: \"/tmp/x\"").unwrap();
        assert!(config.providers.open_er_api.is_none());
        assert!(config.providers.relay.is_none());
        assert!(config.providers.frankfurter.is_none());
    }
}

//! XDG config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::ForgeConfig;
use crate::domain::error::ConfigError;

/// XDG-compliant config store
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Create a new XDG config store with default path
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("pyforge");

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse TOML content into ForgeConfig
    fn parse_toml(content: &str) -> Result<ForgeConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize ForgeConfig to TOML
    fn to_toml(config: &ForgeConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<ForgeConfig, ConfigError> {
        if !self.exists() {
            // Return empty config if file doesn't exist
            return Ok(ForgeConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &ForgeConfig) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        let defaults = ForgeConfig::defaults();
        self.save(&defaults).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_xdg() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("pyforge"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn custom_path() {
        let store = XdgConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(store.path(), PathBuf::from("/custom/path/config.toml"));
    }

    #[test]
    fn parse_toml_flat_format() {
        let content = r#"
python = "/opt/python/bin/python3"
profile = "debug"
jobs = 8
package = "pasteboard"
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.python, Some("/opt/python/bin/python3".to_string()));
        assert_eq!(config.profile, Some("debug".to_string()));
        assert_eq!(config.jobs, Some(8));
        assert_eq!(config.package, Some("pasteboard".to_string()));
    }

    #[test]
    fn parse_toml_macos_section() {
        let content = r#"
[macos]
archs = "arm64"
deployment_target = "12.0"
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        let macos = config.macos.unwrap();
        assert_eq!(macos.archs, Some("arm64".to_string()));
        assert_eq!(macos.deployment_target, Some("12.0".to_string()));
    }

    #[test]
    fn parse_toml_rejects_invalid() {
        assert!(XdgConfigStore::parse_toml("jobs = \"lots\"").is_err());
    }

    #[test]
    fn to_toml_round_trip() {
        let config = ForgeConfig {
            python: Some("python3.11".to_string()),
            profile: Some("release".to_string()),
            jobs: Some(2),
            package: Some("pasteboard".to_string()),
            ..Default::default()
        };

        let toml = XdgConfigStore::to_toml(&config).unwrap();
        let parsed = XdgConfigStore::parse_toml(&toml).unwrap();

        assert_eq!(config.python, parsed.python);
        assert_eq!(config.profile, parsed.profile);
        assert_eq!(config.jobs, parsed.jobs);
        assert_eq!(config.package, parsed.package);
    }
}

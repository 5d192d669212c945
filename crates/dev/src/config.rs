use directories::ProjectDirs;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storefront_project::{DEFAULT_PORT, PackageManager};
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub serve: ServeConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub port: u16,
    #[serde(default)]
    pub package_manager: Option<String>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            package_manager: None,
        }
    }
}

impl Config {
    pub fn get_config_path() -> PathBuf {
        get_default_config_dir().join("config.json")
    }

    pub async fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(config_path).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(config_path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub async fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    /// Configured package manager override, if any.
    pub fn package_manager(&self) -> Result<Option<PackageManager>> {
        self.serve
            .package_manager
            .as_deref()
            .map(|name| name.parse::<PackageManager>().map_err(eyre::Report::from))
            .transpose()
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["serve", "port"] => {
                self.serve.port = value
                    .parse::<u16>()
                    .map_err(|_| eyre!("Invalid port: {}", value))?;
            }
            ["serve", "package_manager"] => {
                self.serve.package_manager = if value.is_empty() {
                    None
                } else {
                    value.parse::<PackageManager>()?;
                    Some(value.to_lowercase())
                };
            }
            _ => {
                return Err(eyre!("Unknown configuration key: {}", key));
            }
        }

        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        let value = match parts.as_slice() {
            ["serve", "port"] => self.serve.port.to_string(),
            ["serve", "package_manager"] => {
                self.serve.package_manager.clone().unwrap_or_default()
            }
            _ => {
                return Err(eyre!("Unknown configuration key: {}", key));
            }
        };

        Ok(value)
    }

    pub fn show_all(&self) -> String {
        format!(
            "Configuration:\n\
             Serve:\n\
             ├─ port: {}\n\
             └─ package_manager: {}",
            self.serve.port,
            self.serve
                .package_manager
                .as_deref()
                .unwrap_or("(detected)"),
        )
    }

    pub async fn reset(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path).await?;
        Ok(config)
    }
}

/// Get the default configuration directory
fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "storefront", "storefront") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        // Fallback to current directory if we can't determine project dirs
        PathBuf::from(".storefront").join("config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).await.unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_set_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::load_from(&path).await.unwrap();
        config.set_value("serve.port", "4000").unwrap();
        config.set_value("serve.package_manager", "Yarn").unwrap();
        config.save_to(&path).await.unwrap();

        let reloaded = Config::load_from(&path).await.unwrap();
        assert_eq!(reloaded.get_value("serve.port").unwrap(), "4000");
        assert_eq!(
            reloaded.package_manager().unwrap(),
            Some(PackageManager::Yarn)
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set_value("serve.port", "not-a-port").is_err());
        assert!(config.set_value("serve.package_manager", "pnpm").is_err());
        assert!(config.set_value("serve.unknown", "1").is_err());
        assert!(config.get_value("storage.path").is_err());

        config.set_value("serve.package_manager", "").unwrap();
        assert_eq!(config.package_manager().unwrap(), None);
    }
}

//! CLI configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use treestore_core::limits::{validate_traversal_depth, DEFAULT_TRAVERSAL_DEPTH};

use crate::output::OutputFormat;

/// Get default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("treestore")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Records file used when --file is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<PathBuf>,

    /// Output format used when --format is not given
    pub format: String,

    /// Depth for `descendants` when --depth is not given
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file: None,
            format: "table".to_string(),
            max_depth: DEFAULT_TRAVERSAL_DEPTH,
        }
    }
}

impl Config {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["default_file", "format", "max_depth"]
    }

    /// Get a value by key; `Ok(None)` means the key is unset
    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match key {
            "default_file" => Ok(self
                .default_file
                .as_ref()
                .map(|p| p.display().to_string())),
            "format" => Ok(Some(self.format.clone())),
            "max_depth" => Ok(Some(self.max_depth.to_string())),
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
    }

    /// Set a value by key; an empty `default_file` clears it
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_file" => {
                self.default_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "format" => {
                if OutputFormat::parse(value).is_none() {
                    anyhow::bail!("Unknown format: {} (expected table or json)", value);
                }
                self.format = value.to_lowercase();
            }
            "max_depth" => {
                let depth: u32 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("max_depth must be a number, got {}", value))?;
                validate_traversal_depth(depth)?;
                self.max_depth = depth;
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("default_file", "/tmp/records.json").unwrap();
        config.set("format", "JSON").unwrap();
        config.set("max_depth", "3").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.format, "json");
        assert_eq!(loaded.get("max_depth").unwrap(), Some("3".to_string()));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "format = \"json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.format, "json");
        assert_eq!(config.max_depth, DEFAULT_TRAVERSAL_DEPTH);
        assert!(config.default_file.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("format", "csv").is_err());
        assert!(config.set("max_depth", "deep").is_err());
        assert!(config.set("max_depth", "1000").is_err());
        assert!(config.set("color", "red").is_err());
        assert!(config.get("color").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_clear_default_file() {
        let mut config = Config::default();
        config.set("default_file", "records.json").unwrap();
        config.set("default_file", "").unwrap();
        assert_eq!(config.get("default_file").unwrap(), None);
    }
}

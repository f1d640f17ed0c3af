use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable that overrides the configured generation API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Settings for the external statistics service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub base_url: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { base_url: "http://127.0.0.1:5000".to_string() }
    }
}

/// Settings for the text-generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self { model: "gemini-2.5-flash".to_string(), api_key: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "127.0.0.1:3000".to_string() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [stats]
/// base_url = "http://127.0.0.1:5000"
///
/// [insight]
/// model = "gemini-2.5-flash"
/// api_key = "..."
///
/// [server]
/// bind = "127.0.0.1:3000"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stats: StatsConfig,
    pub insight: InsightConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, defaults point at local services.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "riskcast", "riskcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Generation API key: the environment variable wins over the file.
    pub fn gemini_api_key(&self) -> Option<String> {
        env::var(GEMINI_API_KEY_ENV).ok().or_else(|| self.insight.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_services() {
        let cfg = Config::default();
        assert_eq!(cfg.stats.base_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.insight.model, "gemini-2.5-flash");
        assert_eq!(cfg.server.bind, "127.0.0.1:3000");
        assert!(cfg.insight.api_key.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(
            "[stats]\nbase_url = \"http://stats.internal:8080\"\n",
        )
        .expect("partial config must parse");

        assert_eq!(cfg.stats.base_url, "http://stats.internal:8080");
        assert_eq!(cfg.insight.model, "gemini-2.5-flash");
        assert_eq!(cfg.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.insight.api_key = Some("KEY".to_string());
        cfg.server.bind = "0.0.0.0:8080".to_string();

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse back");

        assert_eq!(back.insight.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn configured_api_key_is_available() {
        let mut cfg = Config::default();
        cfg.insight.api_key = Some("FILE_KEY".to_string());
        assert!(cfg.gemini_api_key().is_some());
    }
}

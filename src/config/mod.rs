use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::demo::Language;

/// Optional colour overrides, as `#RRGGBB` or `#RGB`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language for feedback lines
    #[serde(default)]
    pub language: Language,

    /// How long a freshly written slot stays highlighted
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,

    /// Seconds before a status message clears from the info line
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,

    /// Show `hash("key") = n → index i` while typing
    #[serde(default = "default_true")]
    pub show_hash_preview: bool,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_highlight_ms() -> u64 {
    1000
}

fn default_status_timeout() -> u64 {
    3
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            highlight_ms: default_highlight_ms(),
            status_timeout_secs: default_status_timeout(),
            show_hash_preview: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("hash-academy");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from an explicit path or the default location.
    /// An explicit file must exist and parse. At the default location a missing
    /// file is created and an unreadable or invalid one falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Config file not readable: {}", path.display()))?;
            return Self::parse(&content)
                .with_context(|| format!("Invalid config {}", path.display()));
        }

        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
            }
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

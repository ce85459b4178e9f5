//! Glowgen configuration.
//!
//! Config file: ~/.config/glowgen/config.toml or /etc/glowgen/config.toml.
//! Everything has a default so the tool runs with no config file at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_endpoint() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_enabled() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Generative backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Ollama endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds. On expiry the attempt counts as
    /// unavailable and the deterministic question bank is used.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether to attempt the generative call at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            enabled: default_enabled(),
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the three JSON documents are written into
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Main glowgen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlowgenConfig {
    /// Generative backend settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl GlowgenConfig {
    /// Get default user config path: ~/.config/glowgen/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
            .context("Cannot determine home directory")?;

        let config_dir = if home.contains("/.config") {
            PathBuf::from(home)
        } else {
            Path::new(&home).join(".config")
        };

        Ok(config_dir.join("glowgen").join("config.toml"))
    }

    /// Get system config path: /etc/glowgen/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/glowgen/config.toml")
    }

    /// Load configuration.
    ///
    /// Priority:
    /// 1. Explicit path (must exist and parse)
    /// 2. User config (~/.config/glowgen/config.toml)
    /// 3. System config (/etc/glowgen/config.toml)
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read_file(path);
        }

        if let Ok(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::read_file(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::read_file(&system_path);
        }

        Ok(Self::default())
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: GlowgenConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }
}

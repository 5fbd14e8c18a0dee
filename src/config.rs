//! Service settings, stored as a JSON file in the platform data directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default listen port for the cloaking API.
pub const DEFAULT_PORT: u16 = 18920;

const SETTINGS_FILE: &str = "hostcloak_settings.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("platform data directory is not available")]
    NoDataDir,
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// API-key policy for the HTTP surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// No authentication.
    #[default]
    Off,
    /// Everything requires the key except the health probe.
    AllExceptHealth,
    /// Everything requires the key, health probe included.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bind address; loopback unless the service is deliberately exposed.
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub auth_mode: AuthMode,
    #[serde(default)]
    pub api_key: String,
    /// Per-request access logging.
    #[serde(default = "default_access_log")]
    pub access_log: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_access_log() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: "127.0.0.1".to_string(),
            auth_mode: AuthMode::Off,
            api_key: String::new(),
            access_log: true,
        }
    }
}

/// Directory holding the settings file and log output.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    Ok(base.join("hostcloak"))
}

/// Load settings, falling back to defaults when no file exists yet.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = data_dir()?.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Persist settings, creating the data directory on first use.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    let dir = data_dir()?;
    std::fs::create_dir_all(&dir)?;

    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(dir.join(SETTINGS_FILE), content)?;
    Ok(())
}

//! Demo configuration
//!
//! Read from an optional RON file next to the executable's working
//! directory. Every field has a default, so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_PATH: &str = "softsrv.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window title
    pub title: String,
    /// Framebuffer and window size in pixels
    pub width: u32,
    pub height: u32,
    /// Fixed updates per second
    pub update_rate: u32,
    /// PPM/BMP/TGA image drawn on top of the demo scene
    pub overlay_image: Option<PathBuf>,
    pub overlay_position: (i32, i32),
    /// env_logger filter, e.g. "debug" or "softsrv=trace"; falls back to RUST_LOG
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "softsrv".to_string(),
            width: 800,
            height: 600,
            update_rate: 300,
            overlay_image: None,
            overlay_position: (600, 20),
            log_filter: None,
        }
    }
}

impl Config {
    /// Parse and validate a RON config
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file is `Ok(None)`.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.update_rate == 0 {
            return Err(ConfigError::Invalid("update_rate must be non-zero".to_string()));
        }
        Ok(())
    }
}

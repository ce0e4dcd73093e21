// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves gallery layout settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Spacing between items in a row, and between rows
pub const DEFAULT_GAP: f64 = 8.0;

/// Target row height for containers narrower than `max_width`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub max_width: f64,
    pub row_height: f64,
}

impl Breakpoint {
    pub const fn new(max_width: f64, row_height: f64) -> Self {
        Self {
            max_width,
            row_height,
        }
    }
}

/// Row packing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Pixels between adjacent items and between rows
    pub gap: f64,

    /// Target row height when no breakpoint matches
    pub default_row_height: f64,

    /// Checked in order; ascending `max_width`
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            default_row_height: 260.0,
            breakpoints: vec![Breakpoint::new(640.0, 180.0), Breakpoint::new(1024.0, 220.0)],
        }
    }
}

impl LayoutSettings {
    /// Pick the target row height for a container width
    pub fn row_height_for(&self, container_width: f64) -> f64 {
        self.breakpoints
            .iter()
            .find(|bp| container_width < bp.max_width)
            .map(|bp| bp.row_height)
            .unwrap_or(self.default_row_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gap must be a non-negative number, got {}",
                self.gap
            )));
        }
        if !is_positive(self.default_row_height) {
            return Err(ConfigError::Invalid(format!(
                "default_row_height must be positive, got {}",
                self.default_row_height
            )));
        }
        for bp in &self.breakpoints {
            if !is_positive(bp.max_width) || !is_positive(bp.row_height) {
                return Err(ConfigError::Invalid(format!(
                    "breakpoint {}px -> {}px must use positive values",
                    bp.max_width, bp.row_height
                )));
            }
        }
        if self
            .breakpoints
            .windows(2)
            .any(|pair| pair[0].max_width >= pair[1].max_width)
        {
            return Err(ConfigError::Invalid(
                "breakpoints must be sorted by ascending max_width".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Row packing settings
    pub layout: LayoutSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Get the default config file path (~/.config/justified-gallery/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("justified-gallery").join("config.toml"))
    }

    /// Load and validate config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(ConfigError::ReadError(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)?;
        Ok(path)
    }
}

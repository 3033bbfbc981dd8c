use crate::error::{Result, TilesError};
use crate::location::DEFAULT_TILE_SIZE;
use crate::sight::{SampleMode, SightConfig, DEFAULT_MAX_SAMPLES, DEFAULT_SAMPLES};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub sight: SightSection,
    #[serde(default)]
    pub follow: FollowConfig,
    #[serde(default)]
    pub compat: CompatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// World pixels per tile side
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SightSection {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default)]
    pub sampling: SampleMode,
    /// Cap on the per-tile sample count
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowConfig {
    #[serde(default = "default_follow_speed")]
    pub speed: f32,
    #[serde(default = "default_status_message")]
    pub status_message: String,
}

/// Switches for legacy quirks of the tile helpers.
///
/// Each flag set to its default reproduces what existing games were built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CompatConfig {
    /// Start every neighbor arm at offset 0, repeating the origin once per arm
    #[serde(default)]
    pub neighbor_arms_from_origin: bool,
    /// Leave the last column and last row out of the wall scan
    #[serde(default = "default_true")]
    pub wall_scan_skips_last_line: bool,
    /// Wrap the animation cursor one frame early, so the last frame never shows
    #[serde(default = "default_true")]
    pub animation_skips_last_frame: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_true")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Layout file for the demo scene; empty uses the built-in layout
    #[serde(default)]
    pub layout_path: String,
}

// Default values
fn default_tile_size() -> f32 { DEFAULT_TILE_SIZE }
fn default_samples() -> usize { DEFAULT_SAMPLES }
fn default_max_samples() -> usize { DEFAULT_MAX_SAMPLES }
fn default_follow_speed() -> f32 { crate::follow::DEFAULT_FOLLOW_SPEED }
fn default_status_message() -> String { crate::follow::DEFAULT_STATUS_MESSAGE.to_string() }
fn default_true() -> bool { true }
fn default_filter() -> String { "info".to_string() }
fn default_action_log_path() -> String { "action_log.json".to_string() }
fn default_ticks() -> u32 { 240 }
fn default_tick_ms() -> u64 { 16 }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
        }
    }
}

impl Default for SightSection {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            sampling: SampleMode::default(),
            max_samples: default_max_samples(),
        }
    }
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            speed: default_follow_speed(),
            status_message: default_status_message(),
        }
    }
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            neighbor_arms_from_origin: false,
            wall_scan_skips_last_line: true,
            animation_skips_last_frame: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            enable_action_log: true,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            tick_ms: default_tick_ms(),
            layout_path: String::new(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    /// No config file; built-in defaults
    Defaults,
    File,
    /// The file existed but could not be used; built-in defaults
    Fallback(TilesError),
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is missing or invalid.
    ///
    /// Nothing is logged here since this usually runs before the subscriber is
    /// installed; see [`ConfigSource::log`].
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> (Self, ConfigSource) {
        if !path.exists() {
            return (Config::default(), ConfigSource::Defaults);
        }
        match Self::from_path(path) {
            Ok(config) => (config, ConfigSource::File),
            Err(e) => (Config::default(), ConfigSource::Fallback(e)),
        }
    }

    /// Read and validate a configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| TilesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| TilesError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).map_err(|source| TilesError::ConfigParse {
            path: "<inline>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.grid.tile_size > 0.0) {
            return Err(TilesError::InvalidConfig {
                field: "grid.tile_size",
                reason: format!("must be positive, got {}", self.grid.tile_size),
            });
        }
        if self.sight.samples == 0 {
            return Err(TilesError::InvalidConfig {
                field: "sight.samples",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.sight.max_samples == 0 {
            return Err(TilesError::InvalidConfig {
                field: "sight.max_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Line-of-sight settings for this configuration
    pub fn sight(&self) -> SightConfig {
        SightConfig {
            samples: self.sight.samples,
            sampling: self.sight.sampling,
            max_samples: self.sight.max_samples,
            tile_size: self.grid.tile_size,
        }
    }
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => info!("No {} found, using default configuration", CONFIG_PATH),
            ConfigSource::File => info!("Loaded configuration from {}", CONFIG_PATH),
            ConfigSource::Fallback(e) => warn!("{}; using default configuration", e),
        }
    }
}

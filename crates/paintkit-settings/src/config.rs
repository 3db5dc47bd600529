//! Configuration for PaintKit
//!
//! Configuration is organized into logical sections:
//! - Canvas defaults for new tabs
//! - Tool defaults (colours, widths, counts, font)
//! - Autosave timer and target
//! - The PNG snapshot server
//! - Activity log location
//! - Undo history limits
//!
//! Files may be JSON or TOML; the extension decides. Missing fields take
//! their defaults.

use paintkit_core::Rgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// New canvas defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Rgba::WHITE,
        }
    }
}

/// Drawing tool defaults applied to every new tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub fill_color: Rgba,
    pub border_color: Rgba,
    pub border_width: f32,
    /// Dashed outlines (dash length twice the border width)
    pub dashed: bool,
    pub line_color: Rgba,
    pub line_width: f32,
    pub eraser_width: f32,
    pub polygon_sides: u32,
    pub star_points: u32,
    pub font_size: f32,
    /// "Sans", "Serif", "Monospace" or an installed family name
    pub font_family: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            fill_color: Rgba::WHITE,
            border_color: Rgba::BLACK,
            border_width: 5.0,
            dashed: false,
            line_color: Rgba::BLACK,
            line_width: 5.0,
            eraser_width: 10.0,
            polygon_sides: 5,
            star_points: 5,
            font_size: 50.0,
            font_family: "Sans".to_string(),
        }
    }
}

/// Periodic save of the active canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    pub enabled: bool,
    pub interval_secs: u64,
    /// Written as PNG regardless of extension
    pub path: PathBuf,
    /// Publish a notification after each save
    pub notifications: bool,
    /// Publish the "Autosave in: N seconds" countdown
    pub show_countdown: bool,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
            path: PathBuf::from("autosave.png"),
            notifications: true,
            show_countdown: true,
        }
    }
}

/// PNG snapshot endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub enabled: bool,
    pub bind_address: String,
    /// 0 picks a free port
    pub port: u16,
    pub route: String,
    /// How long a request waits for the UI thread
    pub snapshot_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            route: "/canvas".to_string(),
            snapshot_timeout_ms: 5000,
        }
    }
}

/// User-action log written next to the working directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub activity_log: bool,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            activity_log: true,
            directory: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Undo entries kept per tab; 0 keeps all
    pub max_depth: usize,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub tools: ToolSettings,
    pub autosave: AutosaveSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub history: HistorySettings,
}

#[derive(Clone, Copy)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            let config = Self::load_from_file(path)?;
            tracing::info!("Loaded configuration from {}", path.display());
            Ok(config)
        } else {
            tracing::info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match FileFormat::of(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        // Canvas
        if self.canvas.width == 0 {
            return Err(ConfigError::out_of_range("canvas.width", self.canvas.width));
        }
        if self.canvas.height == 0 {
            return Err(ConfigError::out_of_range("canvas.height", self.canvas.height));
        }

        // Tools
        let tools = &self.tools;
        if tools.border_width.is_nan() || tools.border_width < 0.0 {
            return Err(ConfigError::out_of_range("tools.border_width", tools.border_width));
        }
        if !is_positive(tools.line_width) {
            return Err(ConfigError::out_of_range("tools.line_width", tools.line_width));
        }
        if !is_positive(tools.eraser_width) {
            return Err(ConfigError::out_of_range("tools.eraser_width", tools.eraser_width));
        }
        if tools.polygon_sides < 3 {
            return Err(ConfigError::out_of_range("tools.polygon_sides", tools.polygon_sides));
        }
        if tools.star_points < 5 {
            return Err(ConfigError::out_of_range("tools.star_points", tools.star_points));
        }
        if !is_positive(tools.font_size) {
            return Err(ConfigError::out_of_range("tools.font_size", tools.font_size));
        }

        // Autosave
        if self.autosave.interval_secs == 0 {
            return Err(ConfigError::out_of_range("autosave.interval_secs", 0));
        }
        if self.autosave.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("autosave.path", "must not be empty"));
        }

        // Server
        if self.server.route.is_empty() {
            return Err(ConfigError::invalid("server.route", "must not be empty"));
        }
        if !self.server.route.starts_with('/') {
            return Err(ConfigError::invalid("server.route", "must start with '/'"));
        }
        if self.server.snapshot_timeout_ms == 0 {
            return Err(ConfigError::out_of_range("server.snapshot_timeout_ms", 0));
        }

        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// `<config dir>/paintkit/config.toml`
pub fn default_config_path() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("paintkit").join("config.toml"))
        .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))
}

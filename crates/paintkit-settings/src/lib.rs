//! PaintKit Settings Crate
//!
//! Application configuration: canvas defaults, tool defaults, autosave,
//! the snapshot server, the activity log and history limits.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, AutosaveSettings, CanvasSettings, Config, HistorySettings,
    LoggingSettings, ServerSettings, ToolSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

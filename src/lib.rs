//! # PaintKit
//!
//! A raster paint application with:
//! - Shape, text, pencil, eraser and selection tools driven by press/drag/release
//! - Per-tab undo/redo history of whole-canvas snapshots
//! - Rotate, mirror, resize and clear transforms
//! - PNG, JPEG and BMP open/save with a warning before transparency is lost
//! - Timed autosave and a read-only HTTP endpoint serving the active canvas
//!
//! ## Architecture
//!
//! PaintKit is organized as a workspace with multiple crates:
//!
//! 1. **paintkit-core** - Colours, points, errors, event bus
//! 2. **paintkit-canvas** - Surfaces, history, tools, transforms, file I/O
//! 3. **paintkit-settings** - Configuration file model and validation
//! 4. **paintkit-shell** - Tabs, UI-thread dispatcher, autosave, HTTP, console
//! 5. **paintkit** - Main binary that wires them together

pub use paintkit_canvas::{
    CanvasTransform, EditorSession, HistoryManager, ShapeStyle, Snapshot, Surface, ToolKind,
    ToolParams,
};
pub use paintkit_core::{event_bus, AppEvent, CanvasError, Error, Point, Result, Rgba, UiError};
pub use paintkit_settings::{default_config_path, Config, SettingsError};
pub use paintkit_shell::{TabDefaults, Workbench};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty output on stderr, leaving stdout to the console
/// - RUST_LOG environment variable support
/// - Thread names, so UI-thread and autosave work can be told apart
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // Windows release builds log to a file next to the executable
    #[cfg(all(target_os = "windows", not(debug_assertions)))]
    {
        use std::fs::OpenOptions;

        let log_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::path::PathBuf::from("."));

        let log_file = log_dir.join("paintkit.log");

        match OpenOptions::new().create(true).append(true).open(&log_file) {
            Ok(file) => {
                let fmt_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_line_number(true);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .try_init()?;
            }
            Err(_) => {
                tracing_subscriber::registry().with(env_filter).try_init()?;
            }
        }
    }

    #[cfg(not(all(target_os = "windows", not(debug_assertions))))]
    {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

//! Error handling for PaintKit
//!
//! Provides error types for the layers of the application:
//! - Canvas errors (dimensions, regions, colours)
//! - UI-thread errors (marshaling timeouts, shutdown)
//!
//! File codec errors live next to the codec in `paintkit-canvas`.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Canvas error type
///
/// Represents invalid requests against a raster surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    /// A surface cannot have a zero or oversized dimension
    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions {
        /// The requested width in pixels.
        width: u32,
        /// The requested height in pixels.
        height: u32,
    },

    /// A region does not intersect the surface
    #[error("Region {width}x{height} at ({x}, {y}) is outside the canvas")]
    RegionOutOfBounds {
        /// Left edge of the region.
        x: i32,
        /// Top edge of the region.
        y: i32,
        /// Region width.
        width: u32,
        /// Region height.
        height: u32,
    },

    /// A colour string could not be parsed
    #[error("Invalid colour '{value}': expected #rrggbb or #rrggbbaa")]
    InvalidColor {
        /// The rejected input.
        value: String,
    },

    /// Generic canvas error
    #[error("Canvas error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// UI-thread error type
///
/// Represents failures handing work to the thread that owns the canvases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The UI thread did not answer in time
    #[error("UI thread did not respond within {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// The UI thread has shut down
    #[error("UI thread is no longer running")]
    Disconnected,

    /// The request needs an open tab and there is none
    #[error("No canvas tab is open")]
    NoActiveTab,
}

/// Main error type for PaintKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Canvas error
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// UI-thread error
    #[error(transparent)]
    Ui(#[from] UiError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Ui(UiError::Timeout { .. }))
    }

    /// Check if this is a canvas error
    pub fn is_canvas_error(&self) -> bool {
        matches!(self, Error::Canvas(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

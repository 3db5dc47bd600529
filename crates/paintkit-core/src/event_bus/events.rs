//! Event type definitions for the event bus.
//!
//! Events are organized by category. Every event that concerns a document
//! carries the title of its tab so observers such as the activity log can
//! attribute it without reaching back into the workbench.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Drawing, history and transform events
    Canvas(CanvasEvent),
    /// Image open/save operations
    File(FileEvent),
    /// Autosave timer events
    Autosave(AutosaveEvent),
    /// Tab lifecycle
    Tab(TabEvent),
    /// Error and diagnostic events
    Error(ErrorEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Canvas(_) => EventCategory::Canvas,
            AppEvent::File(_) => EventCategory::File,
            AppEvent::Autosave(_) => EventCategory::Autosave,
            AppEvent::Tab(_) => EventCategory::Tab,
            AppEvent::Error(_) => EventCategory::Error,
        }
    }

    /// Title of the tab this event concerns, if any
    pub fn tab(&self) -> Option<&str> {
        match self {
            AppEvent::Canvas(e) => Some(e.tab()),
            AppEvent::File(FileEvent::Opened { tab, .. })
            | AppEvent::File(FileEvent::Saved { tab, .. })
            | AppEvent::File(FileEvent::SaveFailed { tab, .. }) => Some(tab),
            AppEvent::Autosave(AutosaveEvent::Saved { tab, .. })
            | AppEvent::Autosave(AutosaveEvent::Failed { tab, .. }) => Some(tab),
            AppEvent::Autosave(AutosaveEvent::Skipped { .. }) => None,
            AppEvent::Tab(TabEvent::Opened { title })
            | AppEvent::Tab(TabEvent::Closed { title })
            | AppEvent::Tab(TabEvent::Selected { title }) => Some(title),
            AppEvent::Error(_) => None,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Canvas(e) => e.description(),
            AppEvent::File(e) => e.description(),
            AppEvent::Autosave(e) => e.description(),
            AppEvent::Tab(e) => e.description(),
            AppEvent::Error(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Drawing, history and transform events.
    Canvas,
    /// Image open/save events.
    File,
    /// Autosave timer events.
    Autosave,
    /// Tab lifecycle events.
    Tab,
    /// Error and diagnostic events.
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Canvas => write!(f, "Canvas"),
            EventCategory::File => write!(f, "File"),
            EventCategory::Autosave => write!(f, "Autosave"),
            EventCategory::Tab => write!(f, "Tab"),
            EventCategory::Error => write!(f, "Error"),
        }
    }
}

/// Canvas mutation events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    /// A tool finished an edit and it was recorded in history.
    ShapeCommitted {
        /// Tab title.
        tab: String,
        /// Display name of the tool.
        tool: String,
    },
    /// One history step was undone.
    Undone {
        /// Tab title.
        tab: String,
    },
    /// One history step was redone.
    Redone {
        /// Tab title.
        tab: String,
    },
    /// A whole-canvas transform was applied (rotate, mirror, clear, resize).
    Transformed {
        /// Tab title.
        tab: String,
        /// Human readable action, e.g. "Rotate Left".
        action: String,
    },
    /// A tool was selected.
    ToolSelected {
        /// Tab title.
        tab: String,
        /// Display name of the tool.
        tool: String,
    },
}

impl CanvasEvent {
    fn tab(&self) -> &str {
        match self {
            CanvasEvent::ShapeCommitted { tab, .. }
            | CanvasEvent::Undone { tab }
            | CanvasEvent::Redone { tab }
            | CanvasEvent::Transformed { tab, .. }
            | CanvasEvent::ToolSelected { tab, .. } => tab,
        }
    }

    fn description(&self) -> String {
        match self {
            CanvasEvent::ShapeCommitted { tool, .. } => format!("{} drawn", tool),
            CanvasEvent::Undone { .. } => "Undo".to_string(),
            CanvasEvent::Redone { .. } => "Redo".to_string(),
            CanvasEvent::Transformed { action, .. } => action.clone(),
            CanvasEvent::ToolSelected { tool, .. } => format!("{} tool selected", tool),
        }
    }
}

/// File operation events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileEvent {
    /// An image was loaded into a tab.
    Opened {
        /// Tab title.
        tab: String,
        /// Source path.
        path: PathBuf,
    },
    /// A tab was written to disk.
    Saved {
        /// Tab title.
        tab: String,
        /// Destination path.
        path: PathBuf,
    },
    /// Writing a tab failed.
    SaveFailed {
        /// Tab title.
        tab: String,
        /// Destination path.
        path: PathBuf,
        /// Error message.
        error: String,
    },
}

impl FileEvent {
    fn description(&self) -> String {
        match self {
            FileEvent::Opened { path, .. } => format!("Opened image {}", path.display()),
            FileEvent::Saved { path, .. } => format!("Saved image {}", path.display()),
            FileEvent::SaveFailed { path, error, .. } => {
                format!("Failed to save {}: {}", path.display(), error)
            }
        }
    }
}

/// Autosave timer events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AutosaveEvent {
    /// The active canvas was written to the autosave path.
    Saved {
        /// Tab title.
        tab: String,
        /// Autosave file.
        path: PathBuf,
    },
    /// The cycle was skipped (no open tab, UI thread busy).
    Skipped {
        /// Why the cycle was skipped.
        reason: String,
    },
    /// Encoding or writing the autosave file failed.
    Failed {
        /// Tab title.
        tab: String,
        /// Error message.
        error: String,
    },
}

impl AutosaveEvent {
    fn description(&self) -> String {
        match self {
            AutosaveEvent::Saved { path, .. } => format!("Autosaved to {}", path.display()),
            AutosaveEvent::Skipped { reason } => format!("Autosave skipped: {}", reason),
            AutosaveEvent::Failed { error, .. } => format!("Autosave failed: {}", error),
        }
    }
}

/// Tab lifecycle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TabEvent {
    /// A new tab was opened.
    Opened {
        /// Tab title.
        title: String,
    },
    /// A tab was closed.
    Closed {
        /// Tab title.
        title: String,
    },
    /// A tab became the active tab.
    Selected {
        /// Tab title.
        title: String,
    },
}

impl TabEvent {
    fn description(&self) -> String {
        match self {
            TabEvent::Opened { .. } => "Tab opened".to_string(),
            TabEvent::Closed { .. } => "Tab closed".to_string(),
            TabEvent::Selected { .. } => "Tab selected".to_string(),
        }
    }
}

/// Error events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Where the error happened, e.g. "http" or "console".
    pub context: String,
    /// Error message.
    pub message: String,
}

impl ErrorEvent {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }

    fn description(&self) -> String {
        format!("Error ({}): {}", self.context, self.message)
    }
}

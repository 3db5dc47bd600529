//! Error types for the shell crate.

use std::path::PathBuf;

use paintkit_canvas::FileIoError;
use paintkit_core::{CanvasError, UiError};
use thiserror::Error;

/// Errors surfaced to the user by workbench and console operations.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Handing work to the UI thread failed, or there is no tab to work on.
    #[error(transparent)]
    Ui(#[from] UiError),

    #[error(transparent)]
    File(#[from] FileIoError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error("No tab at index {0}")]
    UnknownTab(usize),

    /// A console line that could not be parsed.
    #[error("{0}")]
    Command(String),
}

pub type ShellResult<T> = Result<T, ShellError>;

/// Reasons the snapshot endpoint answers 500.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error(transparent)]
    Ui(#[from] UiError),

    #[error(transparent)]
    Encode(#[from] FileIoError),

    #[error("Encoder task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Reasons an autosave cycle fails after the snapshot was captured.
#[derive(Error, Debug)]
pub enum AutosaveError {
    #[error(transparent)]
    Encode(#[from] FileIoError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Autosave writer failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

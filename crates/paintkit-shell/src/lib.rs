//! # PaintKit Shell
//!
//! Everything around the canvases: the tab workbench, the UI-thread
//! dispatcher, the autosave task, the PNG snapshot endpoint, keyboard
//! shortcuts, the activity log and the command console.
//!
//! ## Threads
//!
//! ```text
//!  console thread ──┐
//!  autosave task ───┼── UiDispatcher ──► UiLoop (main thread) ── Workbench
//!  HTTP handlers ───┘
//!                                              │ publishes
//!                                              ▼
//!                                          EventBus ──► ActivityLog, Notifier
//! ```
//!
//! Only the UI thread touches a [`Workbench`]. Everything else sends it a
//! closure and, when it needs an answer, waits with a timeout.

pub mod activity_log;
pub mod autosave;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod notifier;
pub mod server;
pub mod shortcuts;
pub mod workbench;

pub use activity_log::{format_entry, log_file_name, ActivityLog};
pub use autosave::{countdown_text, save_once, spawn_autosave, AutosaveConfig, AutosaveHandle};
pub use console::{execute, parse_command, run_console, Command};
pub use dispatcher::{channel, UiDispatcher, UiLoop};
pub use error::{AutosaveError, ShellError, ShellResult, SnapshotError};
pub use notifier::{notification_for, Notification, Notifier};
pub use shortcuts::{Action, KeyChord, ShortcutMap, HELP_TEXT};
pub use workbench::{TabDefaults, TabId, Workbench};

//! Type aliases for shared state crossing thread boundaries.
//!
//! The canvases themselves never cross threads; these aliases cover the
//! small pieces of state that bus handlers share with their owners
//! (activity log sink, recent notifications).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paintkit_core::types::*;
//!
//! let recent: ThreadSafe<Vec<String>> = thread_safe(Vec::new());
//! recent.lock().push("Autosaved".to_string());
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

//! # Event Bus Module
//!
//! Publish/subscribe plumbing between the UI thread and its observers:
//! - The workbench emits typed events without knowing who listens
//! - The activity log and the autosave notifier subscribe by category
//! - Async tasks can poll a broadcast receiver instead of registering a handler
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paintkit_core::event_bus::{event_bus, AppEvent, CanvasEvent, EventFilter, EventCategory};
//!
//! let subscription = event_bus().subscribe(
//!     EventFilter::Categories(vec![EventCategory::Canvas]),
//!     |event| tracing::info!("{}", event.description()),
//! );
//!
//! event_bus().publish(AppEvent::Canvas(CanvasEvent::Undone {
//!     tab: "Canvas 1".to_string(),
//! })).ok();
//!
//! event_bus().unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;

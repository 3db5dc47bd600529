//! # PaintKit Core
//!
//! Core types, errors, and utilities shared by every PaintKit crate.
//! Provides the colour and point primitives, the error hierarchy, and the
//! application-wide event bus used to decouple the shell from its observers.

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{CanvasError, Error, Result, UiError};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, AutosaveEvent, CanvasEvent, ErrorEvent, EventBus, EventBusConfig,
    EventCategory, EventFilter, FileEvent, SubscriptionId, TabEvent,
};

pub use types::{thread_safe, Point, Rgba, ThreadSafe};

//! Type system utilities and shared primitives.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Arc<Mutex<T>>` and `Arc<RwLock<T>>`
//! - [`color`]: RGBA colour with hex parsing
//! - [`point`]: Pointer positions in canvas space

pub mod aliases;
pub mod color;
pub mod point;

pub use aliases::*;
pub use color::Rgba;
pub use point::Point;

//! # PaintKit Canvas
//!
//! The raster editing model: a pixel surface, whole-canvas snapshots,
//! undo/redo history, and the pointer-driven drawing tools.
//!
//! ## Architecture
//!
//! ```text
//! EditorSession (one per tab)
//!   ├── Surface (canvas pixels) + Surface (transparent overlay)
//!   ├── HistoryManager (undo/redo snapshot stacks)
//!   ├── ShapeStyle / ToolParams (current drawing settings)
//!   └── ToolController
//!         └── Box<dyn ShapeTool> (rectangle, star, text, move selection, ...)
//! ```
//!
//! A gesture runs press → drag* → release. The controller snapshots the
//! canvas on press; drag tools redraw from that snapshot on every move, and
//! on commit the snapshot becomes the undo entry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paintkit_canvas::{EditorSession, ToolKind};
//! use paintkit_core::Point;
//!
//! let mut session = EditorSession::new(800, 600)?;
//! session.select_tool(ToolKind::Rectangle);
//! session.press(Point::new(10.0, 10.0));
//! session.drag(Point::new(60.0, 40.0));
//! session.release(Point::new(60.0, 40.0));
//! session.undo();
//! ```

pub mod file_io;
pub mod geometry;
pub mod history;
pub mod session;
pub mod style;
pub mod surface;
pub mod text;
pub mod tools;
pub mod transform;

pub use file_io::{
    encode_png, is_lossy_conversion, load_surface, save_decision, save_snapshot, save_surface,
    FileIoError, FileIoResult, ImageFileFormat, SaveDecision,
};
pub use geometry::{Bounds, Shape};
pub use history::HistoryManager;
pub use session::{EditorSession, SaveOutcome};
pub use style::{ShapeStyle, StrokeStyle};
pub use surface::{Snapshot, Surface};
pub use tools::{
    Layers, Progress, ShapeTool, ToolContext, ToolController, ToolKind, ToolOutcome, ToolParams,
    ToolState,
};
pub use transform::CanvasTransform;

//! Drawing tools.
//!
//! A tool turns one pointer gesture (press, any number of drags, release)
//! into canvas mutations. Tools implement [`ShapeTool`]; the shared
//! bookkeeping every tool relies on lives in [`ToolController`]:
//!
//! - activation gating: nothing reaches the tool while it is inactive
//! - baseline capture: the canvas is snapshotted at the start of a gesture
//! - commit: the baseline is handed back so the caller can record it in history
//! - abort: deactivating mid-gesture restores the baseline and clears the overlay
//!
//! Drag tools redraw from the baseline on every move, so a preview never
//! accumulates on the canvas.

mod controller;
mod freehand;
mod params;
mod selection;
mod shapes;
mod text_tool;

use std::fmt;
use std::str::FromStr;

use paintkit_core::Point;

pub use controller::{Layers, ToolController, ToolOutcome, ToolState};
pub use freehand::FreehandTool;
pub use params::{parse_count, ToolParams, DEFAULT_COUNT, MIN_POLYGON_SIDES, MIN_STAR_POINTS};
pub use selection::{CopyPasteTool, MoveSelectionTool};
pub use shapes::{DragShapeTool, LineTool, ShapeKind};
pub use text_tool::TextTool;

use crate::style::ShapeStyle;
use crate::surface::{Snapshot, Surface};

/// Everything a tool may read or draw on during one callback.
pub struct ToolContext<'a> {
    pub canvas: &'a mut Surface,
    /// Transparent layer above the canvas for transient feedback.
    pub overlay: &'a mut Surface,
    /// The canvas as it was when the gesture began.
    pub baseline: &'a Snapshot,
    pub style: &'a ShapeStyle,
    pub params: &'a ToolParams,
}

/// What a tool reports after handling a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The gesture (or a multi-phase operation) is still in flight.
    Continue,
    /// The edit is finished and should be recorded.
    Commit,
}

/// A pointer-driven drawing strategy.
pub trait ShapeTool: Send {
    fn kind(&self) -> ToolKind;

    fn on_press(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress;

    fn on_drag(&mut self, ctx: &mut ToolContext<'_>, at: Point);

    fn on_release(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress;

    /// True while a two-phase operation waits for its second gesture.
    fn has_pending(&self) -> bool {
        false
    }

    /// Drop any transient state. The controller restores the canvas.
    fn cancel(&mut self) {}
}

/// Every tool the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Rectangle,
    Square,
    Circle,
    Ellipse,
    Triangle,
    Polygon,
    Star,
    VariableStar,
    Text,
    MoveSelection,
    CopyPaste,
    Pencil,
    Eraser,
    Line,
}

impl ToolKind {
    pub const ALL: [ToolKind; 14] = [
        ToolKind::Rectangle,
        ToolKind::Square,
        ToolKind::Circle,
        ToolKind::Ellipse,
        ToolKind::Triangle,
        ToolKind::Polygon,
        ToolKind::Star,
        ToolKind::VariableStar,
        ToolKind::Text,
        ToolKind::MoveSelection,
        ToolKind::CopyPaste,
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Line,
    ];

    /// Name used in the activity log ("Rectangle drawn").
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Square => "Square",
            ToolKind::Circle => "Circle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Triangle => "Triangle",
            ToolKind::Polygon => "Polygon",
            ToolKind::Star => "Star",
            ToolKind::VariableStar => "Variable Star",
            ToolKind::Text => "Text",
            ToolKind::MoveSelection => "Move Selection",
            ToolKind::CopyPaste => "Copy Paste",
            ToolKind::Pencil => "Freehand Line",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Straight Line",
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub fn id(&self) -> &'static str {
        match self {
            ToolKind::Rectangle => "rectangle",
            ToolKind::Square => "square",
            ToolKind::Circle => "circle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Triangle => "triangle",
            ToolKind::Polygon => "polygon",
            ToolKind::Star => "star",
            ToolKind::VariableStar => "varstar",
            ToolKind::Text => "text",
            ToolKind::MoveSelection => "move",
            ToolKind::CopyPaste => "copy",
            ToolKind::Pencil => "pencil",
            ToolKind::Eraser => "eraser",
            ToolKind::Line => "line",
        }
    }

    pub fn create(self) -> Box<dyn ShapeTool> {
        match self {
            ToolKind::Rectangle => Box::new(DragShapeTool::new(ShapeKind::Rectangle)),
            ToolKind::Square => Box::new(DragShapeTool::new(ShapeKind::Square)),
            ToolKind::Circle => Box::new(DragShapeTool::new(ShapeKind::Circle)),
            ToolKind::Ellipse => Box::new(DragShapeTool::new(ShapeKind::Ellipse)),
            ToolKind::Triangle => Box::new(DragShapeTool::new(ShapeKind::Triangle)),
            ToolKind::Polygon => Box::new(DragShapeTool::new(ShapeKind::Polygon)),
            ToolKind::Star => Box::new(DragShapeTool::new(ShapeKind::Star)),
            ToolKind::VariableStar => Box::new(DragShapeTool::new(ShapeKind::VariableStar)),
            ToolKind::Text => Box::new(TextTool::default()),
            ToolKind::MoveSelection => Box::new(MoveSelectionTool::default()),
            ToolKind::CopyPaste => Box::new(CopyPasteTool::default()),
            ToolKind::Pencil => Box::new(FreehandTool::pencil()),
            ToolKind::Eraser => Box::new(FreehandTool::eraser()),
            ToolKind::Line => Box::new(LineTool::default()),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "rect" => "rectangle",
            "var-star" | "variable-star" => "varstar",
            "select" | "move-selection" => "move",
            "paste" | "copy-paste" => "copy",
            "draw" | "freehand" => "pencil",
            "straight-line" => "line",
            other => other,
        };
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.id() == alias)
            .ok_or_else(|| format!("Unknown tool '{}'", s.trim()))
    }
}

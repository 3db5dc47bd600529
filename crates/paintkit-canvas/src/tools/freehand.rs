//! Freehand pencil and eraser.
//!
//! These draw incrementally: each drag strokes the segment from the last
//! pointer position, so there is no baseline redraw.

use paintkit_core::Point;

use super::{Progress, ShapeTool, ToolContext, ToolKind};

#[derive(Debug, Clone)]
pub struct FreehandTool {
    erase: bool,
    last: Point,
}

impl FreehandTool {
    /// Strokes in the pen colour and width.
    pub fn pencil() -> Self {
        Self {
            erase: false,
            last: Point::default(),
        }
    }

    /// Strokes white at the eraser width.
    pub fn eraser() -> Self {
        Self {
            erase: true,
            last: Point::default(),
        }
    }

    fn stroke_to(&mut self, ctx: &mut ToolContext<'_>, at: Point) {
        let stroke = if self.erase {
            ctx.style.eraser_stroke()
        } else {
            ctx.style.pen_stroke()
        };
        ctx.canvas.stroke_line(self.last, at, &stroke);
        self.last = at;
    }
}

impl ShapeTool for FreehandTool {
    fn kind(&self) -> ToolKind {
        if self.erase {
            ToolKind::Eraser
        } else {
            ToolKind::Pencil
        }
    }

    fn on_press(&mut self, _ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        self.last = at;
        Progress::Continue
    }

    fn on_drag(&mut self, ctx: &mut ToolContext<'_>, at: Point) {
        self.stroke_to(ctx, at);
    }

    fn on_release(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        if at != self.last {
            self.stroke_to(ctx, at);
        }
        Progress::Commit
    }
}

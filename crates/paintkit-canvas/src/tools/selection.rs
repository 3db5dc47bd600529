//! Two-phase region tools: the first gesture selects, the second places.
//!
//! Both keep the first gesture's baseline until the second gesture
//! commits, so the whole operation is a single history step.

use paintkit_core::{Point, Rgba};

use super::{Progress, ShapeTool, ToolContext, ToolKind};
use crate::geometry::{Bounds, Shape};
use crate::style::{StrokeStyle, SELECTION_DASH};
use crate::surface::{Snapshot, Surface};

fn marquee(color: Rgba) -> StrokeStyle {
    StrokeStyle::dashed(color, 1.0, SELECTION_DASH)
}

fn pixel_origin(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Capture the selected region of the baseline, if it has any area.
fn capture(ctx: &mut ToolContext<'_>, start: Point, end: Point) -> Option<(Snapshot, Bounds)> {
    ctx.canvas.restore(ctx.baseline);
    let bounds = Bounds::from_corners(start, end).clip(ctx.canvas.width(), ctx.canvas.height())?;
    match ctx.canvas.capture_region(bounds) {
        Ok(image) => Some((image, bounds)),
        Err(e) => {
            tracing::debug!("Selection ignored: {}", e);
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
enum MovePhase {
    #[default]
    Idle,
    Selecting {
        start: Point,
    },
    /// Region lifted and its source area cleared; waiting for the move.
    Holding {
        image: Snapshot,
        bounds: Bounds,
    },
    Moving {
        image: Snapshot,
        bounds: Bounds,
        grab: (f32, f32),
    },
}

/// Lift a rectangular region and drop it elsewhere.
///
/// The marquee and the floating region are drawn on the overlay; the
/// canvas only changes when the region is lifted (its area turns white)
/// and when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MoveSelectionTool {
    phase: MovePhase,
}

impl MoveSelectionTool {
    fn floating_origin(at: Point, grab: (f32, f32)) -> Point {
        Point::new(at.x - grab.0, at.y - grab.1)
    }
}

impl ShapeTool for MoveSelectionTool {
    fn kind(&self) -> ToolKind {
        ToolKind::MoveSelection
    }

    fn on_press(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        self.phase = match std::mem::take(&mut self.phase) {
            MovePhase::Holding { image, bounds } => {
                ctx.canvas.fill_rect(bounds, Rgba::WHITE);
                MovePhase::Moving {
                    image,
                    bounds,
                    grab: (at.x - bounds.x, at.y - bounds.y),
                }
            }
            _ => MovePhase::Selecting { start: at },
        };
        Progress::Continue
    }

    fn on_drag(&mut self, ctx: &mut ToolContext<'_>, at: Point) {
        ctx.overlay.clear(Rgba::TRANSPARENT);
        match &self.phase {
            MovePhase::Selecting { start } => {
                let outline = Shape::Rect(Bounds::from_corners(*start, at));
                ctx.overlay.stroke_shape(&outline, &marquee(Rgba::BLACK));
            }
            MovePhase::Moving {
                image,
                bounds,
                grab,
            } => {
                let origin = Self::floating_origin(at, *grab);
                let (x, y) = pixel_origin(origin);
                ctx.overlay.draw_snapshot(image, x, y);
                let outline = Shape::Rect(Bounds::new(
                    origin.x,
                    origin.y,
                    bounds.width,
                    bounds.height,
                ));
                ctx.overlay
                    .stroke_shape(&outline, &marquee(Rgba::rgb(128, 128, 128)));
            }
            MovePhase::Idle | MovePhase::Holding { .. } => {}
        }
    }

    fn on_release(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        ctx.overlay.clear(Rgba::TRANSPARENT);
        match std::mem::take(&mut self.phase) {
            MovePhase::Selecting { start } => {
                if let Some((image, bounds)) = capture(ctx, start, at) {
                    ctx.canvas.fill_rect(bounds, Rgba::WHITE);
                    self.phase = MovePhase::Holding { image, bounds };
                }
                Progress::Continue
            }
            MovePhase::Moving { image, grab, .. } => {
                let (x, y) = pixel_origin(Self::floating_origin(at, grab));
                ctx.canvas.draw_snapshot(&image, x, y);
                Progress::Commit
            }
            phase => {
                self.phase = phase;
                Progress::Continue
            }
        }
    }

    fn has_pending(&self) -> bool {
        matches!(
            self.phase,
            MovePhase::Holding { .. } | MovePhase::Moving { .. }
        )
    }

    fn cancel(&mut self) {
        self.phase = MovePhase::Idle;
    }
}

#[derive(Debug, Clone, Default)]
enum CopyPhase {
    #[default]
    Idle,
    Selecting {
        start: Point,
    },
    /// Region copied; the next press pastes it.
    Holding {
        image: Snapshot,
    },
    Pasting {
        image: Snapshot,
    },
}

/// Copy a rectangular region and paste it with its top-left at the pointer.
///
/// Unlike [`MoveSelectionTool`] the marquee is drawn straight onto the
/// canvas over the restored baseline, and the source is left untouched.
#[derive(Debug, Clone, Default)]
pub struct CopyPasteTool {
    phase: CopyPhase,
}

impl CopyPasteTool {
    fn paste(canvas: &mut Surface, baseline: &Snapshot, image: &Snapshot, at: Point) {
        canvas.restore(baseline);
        let (x, y) = pixel_origin(at);
        canvas.draw_snapshot(image, x, y);
    }
}

impl ShapeTool for CopyPasteTool {
    fn kind(&self) -> ToolKind {
        ToolKind::CopyPaste
    }

    fn on_press(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        self.phase = match std::mem::take(&mut self.phase) {
            CopyPhase::Holding { image } => {
                Self::paste(ctx.canvas, ctx.baseline, &image, at);
                CopyPhase::Pasting { image }
            }
            _ => CopyPhase::Selecting { start: at },
        };
        Progress::Continue
    }

    fn on_drag(&mut self, ctx: &mut ToolContext<'_>, at: Point) {
        match &self.phase {
            CopyPhase::Selecting { start } => {
                ctx.canvas.restore(ctx.baseline);
                let outline = Shape::Rect(Bounds::from_corners(*start, at));
                ctx.canvas.stroke_shape(&outline, &marquee(Rgba::BLACK));
            }
            CopyPhase::Pasting { image } => {
                Self::paste(ctx.canvas, ctx.baseline, image, at);
            }
            CopyPhase::Idle | CopyPhase::Holding { .. } => {}
        }
    }

    fn on_release(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        match std::mem::take(&mut self.phase) {
            CopyPhase::Selecting { start } => {
                if let Some((image, _)) = capture(ctx, start, at) {
                    self.phase = CopyPhase::Holding { image };
                }
                Progress::Continue
            }
            CopyPhase::Pasting { image } => {
                Self::paste(ctx.canvas, ctx.baseline, &image, at);
                Progress::Commit
            }
            phase => {
                self.phase = phase;
                Progress::Continue
            }
        }
    }

    fn has_pending(&self) -> bool {
        matches!(
            self.phase,
            CopyPhase::Holding { .. } | CopyPhase::Pasting { .. }
        )
    }

    fn cancel(&mut self) {
        self.phase = CopyPhase::Idle;
    }
}

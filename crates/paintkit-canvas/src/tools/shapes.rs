//! Press-drag-release shape tools.

use paintkit_core::Point;

use super::{Progress, ShapeTool, ToolContext, ToolKind, ToolParams};
use crate::geometry::{self, Shape};

/// Outline produced by a [`DragShapeTool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Square,
    Circle,
    Ellipse,
    Triangle,
    Polygon,
    Star,
    VariableStar,
}

impl ShapeKind {
    pub fn shape(self, start: Point, end: Point, params: &ToolParams) -> Shape {
        match self {
            ShapeKind::Rectangle => geometry::rectangle(start, end),
            ShapeKind::Square => geometry::square(start, end),
            ShapeKind::Circle => geometry::circle(start, end),
            ShapeKind::Ellipse => geometry::ellipse(start, end),
            ShapeKind::Triangle => geometry::triangle(start, end),
            ShapeKind::Polygon => geometry::polygon(start, end, params.polygon_sides.max(3)),
            ShapeKind::Star => geometry::star(start, end),
            ShapeKind::VariableStar => {
                geometry::variable_star(start, end, params.star_points.max(5))
            }
        }
    }

    fn tool_kind(self) -> ToolKind {
        match self {
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Square => ToolKind::Square,
            ShapeKind::Circle => ToolKind::Circle,
            ShapeKind::Ellipse => ToolKind::Ellipse,
            ShapeKind::Triangle => ToolKind::Triangle,
            ShapeKind::Polygon => ToolKind::Polygon,
            ShapeKind::Star => ToolKind::Star,
            ShapeKind::VariableStar => ToolKind::VariableStar,
        }
    }
}

/// Filled and outlined shape spanning the drag.
#[derive(Debug, Clone)]
pub struct DragShapeTool {
    shape: ShapeKind,
    start: Point,
}

impl DragShapeTool {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            start: Point::default(),
        }
    }

    fn redraw(&self, ctx: &mut ToolContext<'_>, at: Point) {
        ctx.canvas.restore(ctx.baseline);
        let shape = self.shape.shape(self.start, at, ctx.params);
        ctx.canvas
            .paint_shape(&shape, ctx.style.fill, &ctx.style.border_stroke());
    }
}

impl ShapeTool for DragShapeTool {
    fn kind(&self) -> ToolKind {
        self.shape.tool_kind()
    }

    fn on_press(&mut self, _ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        self.start = at;
        Progress::Continue
    }

    fn on_drag(&mut self, ctx: &mut ToolContext<'_>, at: Point) {
        self.redraw(ctx, at);
    }

    fn on_release(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        self.redraw(ctx, at);
        Progress::Commit
    }
}

/// Straight line in the pen colour.
#[derive(Debug, Clone, Default)]
pub struct LineTool {
    start: Point,
}

impl LineTool {
    fn redraw(&self, ctx: &mut ToolContext<'_>, at: Point) {
        ctx.canvas.restore(ctx.baseline);
        ctx.canvas
            .stroke_line(self.start, at, &ctx.style.pen_stroke());
    }
}

impl ShapeTool for LineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn on_press(&mut self, _ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        self.start = at;
        Progress::Continue
    }

    fn on_drag(&mut self, ctx: &mut ToolContext<'_>, at: Point) {
        self.redraw(ctx, at);
    }

    fn on_release(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        self.redraw(ctx, at);
        Progress::Commit
    }
}

//! Per-session drawing style.

use paintkit_core::Rgba;

/// Dash length used for selection marquees.
pub const SELECTION_DASH: f32 = 5.0;

/// How a path is outlined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    /// Dash and gap length; `None` draws a solid line.
    pub dash: Option<f32>,
    pub round_caps: bool,
}

impl StrokeStyle {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
            round_caps: false,
        }
    }

    pub fn dashed(color: Rgba, width: f32, dash: f32) -> Self {
        Self {
            dash: Some(dash),
            ..Self::solid(color, width)
        }
    }

    /// Round-capped pen for freehand strokes.
    pub fn pen(color: Rgba, width: f32) -> Self {
        Self {
            round_caps: true,
            ..Self::solid(color, width)
        }
    }
}

/// Colours and widths applied by the drawing tools of one tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: Rgba,
    pub border: Rgba,
    pub border_width: f32,
    /// Outline shapes with dashes of twice the border width.
    pub dashed: bool,
    pub line_color: Rgba,
    pub line_width: f32,
    pub eraser_width: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::WHITE,
            border: Rgba::BLACK,
            border_width: 5.0,
            dashed: false,
            line_color: Rgba::BLACK,
            line_width: 5.0,
            eraser_width: 10.0,
        }
    }
}

impl ShapeStyle {
    pub fn border_stroke(&self) -> StrokeStyle {
        if self.dashed {
            StrokeStyle::dashed(self.border, self.border_width, self.border_width * 2.0)
        } else {
            StrokeStyle::solid(self.border, self.border_width)
        }
    }

    pub fn pen_stroke(&self) -> StrokeStyle {
        StrokeStyle::pen(self.line_color, self.line_width)
    }

    pub fn eraser_stroke(&self) -> StrokeStyle {
        StrokeStyle::pen(Rgba::WHITE, self.eraser_width)
    }
}

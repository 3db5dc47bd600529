//! Shape geometry for the drag tools.
//!
//! Every function maps a drag (start point, current point) to the shape the
//! tool renders. Nothing here touches pixels, so the formulas are tested
//! directly.

use std::f32::consts::PI;

use paintkit_core::Point;

/// Axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box spanned by two corner points.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Snap to whole pixels and intersect with a `width` x `height` canvas.
    pub fn clip(&self, width: u32, height: u32) -> Option<Bounds> {
        let left = self.x.round().max(0.0);
        let top = self.y.round().max(0.0);
        let right = (self.x + self.width).round().min(width as f32);
        let bottom = (self.y + self.height).round().min(height as f32);
        let clipped = Bounds::new(left, top, right - left, bottom - top);
        (!clipped.is_empty()).then_some(clipped)
    }
}

/// A closed outline ready to be filled and stroked.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(Bounds),
    Ellipse(Bounds),
    Polygon(Vec<Point>),
}

pub fn rectangle(start: Point, end: Point) -> Shape {
    Shape::Rect(Bounds::from_corners(start, end))
}

/// Side is the shorter drag axis, anchored at the min corner.
pub fn square(start: Point, end: Point) -> Shape {
    let (dx, dy) = start.delta_to(end);
    let side = dx.abs().min(dy.abs());
    Shape::Rect(Bounds::new(
        start.x.min(end.x),
        start.y.min(end.y),
        side,
        side,
    ))
}

/// Radius is the horizontal drag distance only; vertical movement is ignored.
/// The circle's centre sits on the min corner of the drag.
pub fn circle(start: Point, end: Point) -> Shape {
    let radius = (end.x - start.x).abs();
    let x = start.x.min(end.x) - radius;
    let y = start.y.min(end.y) - radius;
    Shape::Ellipse(Bounds::new(x, y, radius * 2.0, radius * 2.0))
}

pub fn ellipse(start: Point, end: Point) -> Shape {
    Shape::Ellipse(Bounds::from_corners(start, end))
}

/// Right triangle with the right angle at (start.x, end.y).
pub fn triangle(start: Point, end: Point) -> Shape {
    Shape::Polygon(vec![
        start,
        Point::new(start.x, end.y),
        Point::new(end.x, end.y),
    ])
}

/// Regular polygon inscribed in the drag's bounding square.
pub fn polygon(start: Point, end: Point, sides: u32) -> Shape {
    let (center, radius) = inscribed_circle(start, end);
    Shape::Polygon(polygon_vertices(center, radius, sides))
}

/// Fixed five-point star, inner radius half the outer.
pub fn star(start: Point, end: Point) -> Shape {
    variable_star(start, end, 5)
}

pub fn variable_star(start: Point, end: Point, points: u32) -> Shape {
    let (center, outer) = inscribed_circle(start, end);
    Shape::Polygon(star_vertices(center, outer, outer / 2.0, points))
}

/// Centre is the drag midpoint; radius is half the shorter drag axis.
fn inscribed_circle(start: Point, end: Point) -> (Point, f32) {
    let (dx, dy) = start.delta_to(end);
    (start.midpoint(end), dx.abs().min(dy.abs()) / 2.0)
}

/// `sides` vertices starting at the top (-90°) and stepping 2π/N clockwise
/// in screen space.
pub fn polygon_vertices(center: Point, radius: f32, sides: u32) -> Vec<Point> {
    let step = 2.0 * PI / sides as f32;
    (0..sides)
        .map(|i| {
            let angle = i as f32 * step - PI / 2.0;
            Point::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            )
        })
        .collect()
}

/// `2 * points` vertices stepping π/N, alternating outer and inner radius.
pub fn star_vertices(center: Point, outer: f32, inner: f32, points: u32) -> Vec<Point> {
    let step = PI / points as f32;
    (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = i as f32 * step - PI / 2.0;
            Point::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            )
        })
        .collect()
}

//! Raster surface backed by a `tiny_skia::Pixmap`.
//!
//! Every drawing primitive the tools need goes through [`Surface`]. Pixel
//! storage is premultiplied RGBA; conversion to straight alpha happens at
//! the edges ([`Surface::pixel`], [`Surface::to_rgba_image`]).

use std::sync::Arc;

use image::RgbaImage;
use paintkit_core::{CanvasError, Point, Rgba};
use tiny_skia::{
    ColorU8, FillRule, IntRect, LineCap, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Rect, Stroke, StrokeDash, Transform,
};

use crate::geometry::{Bounds, Shape};
use crate::style::StrokeStyle;

/// An immutable copy of a surface's pixels.
///
/// Cloning is cheap; the pixel buffer is shared.
#[derive(Clone, PartialEq)]
pub struct Snapshot(Arc<Pixmap>);

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Straight-alpha colour at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.0.pixel(x, y).map(demultiply)
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_image(&self.0)
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.0
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// A mutable RGBA raster.
#[derive(Clone, PartialEq)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// A surface filled with opaque white.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Self::filled(width, height, Rgba::WHITE)
    }

    /// A fully transparent surface, used for overlays.
    pub fn transparent(width: u32, height: u32) -> Result<Self, CanvasError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self, CanvasError> {
        let mut surface = Self::transparent(width, height)?;
        surface.clear(color);
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Replace every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.pixmap.fill(to_skia_color(color));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::new(self.pixmap.clone()))
    }

    /// Repaint from a snapshot. The surface takes the snapshot's dimensions.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.pixmap = snapshot.pixmap().clone();
    }

    /// Whether the surface shows exactly the pixels in `snapshot`.
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        &self.pixmap == snapshot.pixmap()
    }

    /// Straight-alpha colour at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(demultiply)
    }

    pub fn fill_rect(&mut self, bounds: Bounds, color: Rgba) {
        if let Some(rect) = to_rect(bounds) {
            self.pixmap
                .fill_rect(rect, &paint_for(color), Transform::identity(), None);
        }
    }

    pub fn fill_shape(&mut self, shape: &Shape, color: Rgba) {
        if let Some(path) = shape_path(shape) {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    pub fn stroke_shape(&mut self, shape: &Shape, stroke: &StrokeStyle) {
        if let Some(path) = shape_path(shape) {
            self.stroke_path(&path, stroke);
        }
    }

    /// Fill with `fill`, then outline with `border`.
    pub fn paint_shape(&mut self, shape: &Shape, fill: Rgba, border: &StrokeStyle) {
        self.fill_shape(shape, fill);
        self.stroke_shape(shape, border);
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, stroke);
        }
    }

    pub(crate) fn fill_path(&mut self, path: &Path, color: Rgba) {
        self.pixmap.fill_path(
            path,
            &paint_for(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub(crate) fn stroke_path(&mut self, path: &Path, stroke: &StrokeStyle) {
        if stroke.width <= 0.0 {
            return;
        }
        let mut skia_stroke = Stroke {
            width: stroke.width,
            ..Default::default()
        };
        if stroke.round_caps {
            skia_stroke.line_cap = LineCap::Round;
        }
        if let Some(dash) = stroke.dash.filter(|d| *d > 0.0) {
            skia_stroke.dash = StrokeDash::new(vec![dash, dash], 0.0);
        }
        self.pixmap.stroke_path(
            path,
            &paint_for(stroke.color),
            &skia_stroke,
            Transform::identity(),
            None,
        );
    }

    /// Composite `snapshot` over this surface with its top-left at (x, y).
    pub fn draw_snapshot(&mut self, snapshot: &Snapshot, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            snapshot.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Copy a rectangular region, clipped to the surface.
    ///
    /// Fails when the clipped region is empty.
    pub fn capture_region(&self, bounds: Bounds) -> Result<Snapshot, CanvasError> {
        let out_of_bounds = CanvasError::RegionOutOfBounds {
            x: bounds.x as i32,
            y: bounds.y as i32,
            width: bounds.width as u32,
            height: bounds.height as u32,
        };
        let canvas = IntRect::from_xywh(0, 0, self.width(), self.height())
            .ok_or_else(|| out_of_bounds.clone())?;
        let requested = IntRect::from_xywh(
            bounds.x.floor() as i32,
            bounds.y.floor() as i32,
            bounds.width.round() as u32,
            bounds.height.round() as u32,
        )
        .ok_or_else(|| out_of_bounds.clone())?;
        let clipped = canvas
            .intersect(&requested)
            .ok_or_else(|| out_of_bounds.clone())?;

        self.pixmap
            .clone_rect(clipped)
            .map(|pixmap| Snapshot(Arc::new(pixmap)))
            .ok_or(out_of_bounds)
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_image(&self.pixmap)
    }

    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self, CanvasError> {
        let mut surface = Self::transparent(image.width(), image.height())?;
        for (dst, src) in surface.pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(surface)
    }

    pub(crate) fn pixels(&self) -> &[PremultipliedColorU8] {
        self.pixmap.pixels()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [PremultipliedColorU8] {
        self.pixmap.pixels_mut()
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn to_skia_color(color: Rgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn paint_for(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

fn demultiply(pixel: PremultipliedColorU8) -> Rgba {
    let c = pixel.demultiply();
    Rgba::new(c.red(), c.green(), c.blue(), c.alpha())
}

fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let c = pixels[(y * width + x) as usize].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}

fn to_rect(bounds: Bounds) -> Option<Rect> {
    Rect::from_xywh(bounds.x, bounds.y, bounds.width, bounds.height)
}

fn shape_path(shape: &Shape) -> Option<Path> {
    match shape {
        Shape::Rect(bounds) => to_rect(*bounds).map(PathBuilder::from_rect),
        Shape::Ellipse(bounds) => to_rect(*bounds).and_then(PathBuilder::from_oval),
        Shape::Polygon(points) => {
            let (first, rest) = points.split_first()?;
            let mut pb = PathBuilder::new();
            pb.move_to(first.x, first.y);
            for p in rest {
                pb.line_to(p.x, p.y);
            }
            pb.close();
            pb.finish()
        }
    }
}

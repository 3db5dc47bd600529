//! Whole-canvas transforms: rotation, mirroring, resize and clear.

use paintkit_core::{CanvasError, Rgba};

use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasTransform {
    /// 90° counter-clockwise; width and height swap.
    RotateLeft,
    /// 90° clockwise; width and height swap.
    RotateRight,
    /// Flip left to right.
    MirrorHorizontal,
    /// Flip top to bottom.
    MirrorVertical,
    /// Change the canvas size. Existing pixels stay anchored at the
    /// top-left; new area is white.
    Resize { width: u32, height: u32 },
    /// Paint the whole canvas white.
    Clear,
}

impl CanvasTransform {
    /// Activity log text.
    pub fn description(&self) -> String {
        match self {
            CanvasTransform::RotateLeft => "Rotate Left".to_string(),
            CanvasTransform::RotateRight => "Rotate Right".to_string(),
            CanvasTransform::MirrorHorizontal => "Mirror Horizontally".to_string(),
            CanvasTransform::MirrorVertical => "Mirror Vertically".to_string(),
            CanvasTransform::Resize { width, height } => {
                format!("Canvas resized to {}x{}", width, height)
            }
            CanvasTransform::Clear => "Canvas cleared".to_string(),
        }
    }

    pub fn apply(&self, surface: &mut Surface) -> Result<(), CanvasError> {
        let (w, h) = (surface.width(), surface.height());
        let next = match *self {
            CanvasTransform::RotateLeft => remap(surface, h, w, |x, y| (y, w - 1 - x))?,
            CanvasTransform::RotateRight => remap(surface, h, w, |x, y| (h - 1 - y, x))?,
            CanvasTransform::MirrorHorizontal => remap(surface, w, h, |x, y| (w - 1 - x, y))?,
            CanvasTransform::MirrorVertical => remap(surface, w, h, |x, y| (x, h - 1 - y))?,
            CanvasTransform::Resize { width, height } => {
                let mut resized = Surface::new(width, height)?;
                resized.draw_snapshot(&surface.snapshot(), 0, 0);
                resized
            }
            CanvasTransform::Clear => {
                surface.clear(Rgba::WHITE);
                return Ok(());
            }
        };
        *surface = next;
        Ok(())
    }
}

/// Build a `width` x `height` surface where source pixel (x, y) lands at
/// `to(x, y)`.
fn remap(
    source: &Surface,
    width: u32,
    height: u32,
    to: impl Fn(u32, u32) -> (u32, u32),
) -> Result<Surface, CanvasError> {
    let mut target = Surface::transparent(width, height)?;
    let src_width = source.width();
    let src = source.pixels();
    let dst = target.pixels_mut();

    for (i, pixel) in src.iter().enumerate() {
        let (x, y) = (i as u32 % src_width, i as u32 / src_width);
        let (tx, ty) = to(x, y);
        dst[(ty * width + tx) as usize] = *pixel;
    }
    Ok(target)
}

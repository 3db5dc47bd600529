//! Text rendering with system fonts.
//!
//! Fonts are looked up through a process-wide `fontdb` database and cached
//! per family. Glyph outlines are converted to `tiny_skia` paths so text can
//! be filled and outlined like any other shape.

use std::collections::HashMap;
use std::fs;
use std::sync::{Mutex, OnceLock};

use fontdb::{Database, FaceInfo, Family, Query, Stretch, Style, Weight, ID};
use paintkit_core::{Point, Rgba};
use rusttype::{point as rt_point, Font, OutlineBuilder, Scale};
use tiny_skia::PathBuilder;

use crate::style::StrokeStyle;
use crate::surface::Surface;

/// Installed faces tried for the generic families, in order.
const SANS_FACES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "FreeSans",
];
const SERIF_FACES: &[&str] = &[
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
    "Times New Roman",
    "FreeSerif",
];
const MONOSPACE_FACES: &[&str] = &[
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "Courier New",
    "FreeMono",
];

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        if let Some(name) = first_installed(&db, SANS_FACES) {
            db.set_sans_serif_family(name);
        }
        if let Some(name) = first_installed(&db, SERIF_FACES) {
            db.set_serif_family(name);
        }
        if let Some(name) = first_installed(&db, MONOSPACE_FACES) {
            db.set_monospace_family(name);
        }
        db
    })
}

fn has_family(db: &Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

fn first_installed<'a>(db: &Database, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|name| has_family(db, name))
}

/// Every installed family name, sorted.
pub fn font_families() -> Vec<String> {
    let mut names: Vec<String> = db()
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Font for `family` ("Sans", "Serif", "Monospace" or a family name).
///
/// An unknown family falls back to a sans face, then to any installed
/// face. Returns `None` only when no usable font is installed at all.
pub fn font_for(family: &str) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let mut cache = cache.lock().unwrap_or_else(|p| p.into_inner());
    if let Some(font) = cache.get(family) {
        return *font;
    }

    let loaded = load_font_from_system(family).map(|font| &*Box::leak(Box::new(font)));
    if loaded.is_none() {
        tracing::warn!("No system font found for family '{}'", family);
    }
    cache.insert(family.to_string(), loaded);
    loaded
}

fn load_font_from_system(family: &str) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    if let Some(font) = db().query(&query).and_then(load_face) {
        return Some(font);
    }
    tracing::debug!("No face for '{}', trying any installed font", family);
    fallback_faces().find_map(load_face)
}

/// Sans faces first, then everything else.
fn fallback_faces() -> impl Iterator<Item = ID> {
    let is_sans = |face: &&FaceInfo| {
        face.families.iter().any(|(name, _)| {
            name.contains("Sans") && !name.contains("Mono") && !name.contains("Serif")
        })
    };
    let sans = db().faces().filter(is_sans).map(|face| face.id);
    let rest = db().faces().filter(move |face| !is_sans(face)).map(|face| face.id);
    sans.chain(rest)
}

fn load_face(id: ID) -> Option<Font<'static>> {
    let face = db().face(id)?;
    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}

/// Collects glyph outlines into one path.
///
/// `rusttype` emits each outline relative to its glyph's pixel bounding
/// box, so `dx`/`dy` is set to the box origin before each glyph.
struct GlyphPath {
    builder: PathBuilder,
    dx: f32,
    dy: f32,
}

impl OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x + self.dx, y + self.dy);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x + self.dx, y + self.dy);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder
            .quad_to(x1 + self.dx, y1 + self.dy, x + self.dx, y + self.dy);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            x1 + self.dx,
            y1 + self.dy,
            x2 + self.dx,
            y2 + self.dy,
            x + self.dx,
            y + self.dy,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// A run of text to stamp onto a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStamp<'a> {
    pub text: &'a str,
    /// Left end of the baseline.
    pub origin: Point,
    pub size: f32,
    pub fill: Rgba,
    pub outline: Rgba,
}

/// Fill `stamp.text` and outline it with a one pixel stroke.
///
/// Returns false when nothing was drawn (empty text or no glyph outlines).
pub fn draw_text(surface: &mut Surface, font: &Font<'_>, stamp: &TextStamp<'_>) -> bool {
    if stamp.text.is_empty() || stamp.size <= 0.0 {
        return false;
    }

    let mut glyphs = GlyphPath {
        builder: PathBuilder::new(),
        dx: 0.0,
        dy: 0.0,
    };
    let start = rt_point(stamp.origin.x, stamp.origin.y);
    for glyph in font.layout(stamp.text, Scale::uniform(stamp.size), start) {
        // spaces have no box and no outline
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyphs.dx = bounds.min.x as f32;
        glyphs.dy = bounds.min.y as f32;
        glyph.build_outline(&mut glyphs);
    }

    let Some(path) = glyphs.builder.finish() else {
        return false;
    };
    surface.fill_path(&path, stamp.fill);
    surface.stroke_path(&path, &StrokeStyle::solid(stamp.outline, 1.0));
    true
}

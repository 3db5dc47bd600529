//! Tool parameters entered as free text.

/// Used when a count cannot be parsed.
pub const DEFAULT_COUNT: u32 = 5;
pub const MIN_POLYGON_SIDES: u32 = 3;
pub const MIN_STAR_POINTS: u32 = 5;

/// Settings read by the tools that need more than a colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolParams {
    pub polygon_sides: u32,
    pub star_points: u32,
    /// Text stamped by the text tool; nothing is drawn while unset.
    pub text: Option<String>,
    pub font_size: f32,
    pub font_family: String,
}

impl Default for ToolParams {
    fn default() -> Self {
        Self {
            polygon_sides: DEFAULT_COUNT,
            star_points: DEFAULT_COUNT,
            text: None,
            font_size: 50.0,
            font_family: "Sans".to_string(),
        }
    }
}

impl ToolParams {
    pub fn set_polygon_sides(&mut self, input: &str) -> u32 {
        self.polygon_sides = parse_count(input, MIN_POLYGON_SIDES);
        self.polygon_sides
    }

    pub fn set_star_points(&mut self, input: &str) -> u32 {
        self.star_points = parse_count(input, MIN_STAR_POINTS);
        self.star_points
    }

    /// Empty text clears it.
    pub fn set_text(&mut self, input: &str) {
        self.text = (!input.is_empty()).then(|| input.to_string());
    }
}

/// Parse a side/point count, raising it to `minimum`.
///
/// Non-numeric input falls back to [`DEFAULT_COUNT`] with a warning.
pub fn parse_count(input: &str, minimum: u32) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) => u32::try_from(n).unwrap_or(0).max(minimum),
        Err(_) => {
            tracing::warn!(
                "Invalid count '{}', falling back to {}",
                input.trim(),
                DEFAULT_COUNT
            );
            DEFAULT_COUNT
        }
    }
}

//! Brush palette offered by the drawing toolbar.

/// Selectable stroke colors; the first entry is the default.
pub const PALETTE: [&str; 16] = [
    "#1a1a24", "#e53935", "#d81b60", "#8e24aa", "#5e35b1", "#3949ab", "#1e88e5", "#00acc1",
    "#00897b", "#43a047", "#7cb342", "#c0ca33", "#fdd835", "#ffb300", "#fb8c00", "#f4511e",
];

/// Selectable stroke widths.
pub const STROKE_WIDTHS: [f64; 3] = [2.0, 4.0, 8.0];

pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Canvas height used by the note detail screen.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 220.0;

/// Color and width applied to newly captured strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub color: String,
    pub width: f64,
}

impl Brush {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(PALETTE[0], DEFAULT_STROKE_WIDTH)
    }
}

//! Gesture-to-stroke capture.
//!
//! # Responsibility
//! - Accumulate pointer samples between press and release.
//! - Commit the gesture against a note's stroke list on release.
//!
//! # Invariants
//! - Draw mode appends at most one stroke, and only for >= 2 points.
//! - Erase mode removes exactly the most recently added stroke, wherever
//!   the erase gesture happened.
//! - The tool mode is latched at `begin_stroke`; toggling the eraser
//!   mid-gesture does not change how that gesture ends.

use crate::drawing::palette::Brush;
use crate::model::stroke::{build_path, Point, Stroke};

/// Tool selected when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Draw,
    Erase,
}

/// Result of ending one gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeOutcome {
    /// A new stroke was appended at the end of the list.
    Appended,
    /// The last stroke was removed.
    Erased(Stroke),
    /// The stroke list is unchanged.
    Nothing,
}

impl StrokeOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Nothing)
    }
}

/// Live in-progress path drawn on top of committed strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewStroke {
    pub path: String,
    pub brush: Brush,
}

#[derive(Debug, Clone)]
struct Gesture {
    mode: ToolMode,
    points: Vec<Point>,
}

/// Tracks a single active gesture for one canvas.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    brush: Brush,
    gesture: Option<Gesture>,
}

impl StrokeCapture {
    pub fn new(brush: Brush) -> Self {
        Self {
            brush,
            gesture: None,
        }
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Changes color/width for subsequent strokes and the live preview.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Mode of the active gesture, if any.
    pub fn mode(&self) -> Option<ToolMode> {
        self.gesture.as_ref().map(|gesture| gesture.mode)
    }

    /// Starts a gesture at `point`, discarding any unfinished one.
    pub fn begin_stroke(&mut self, point: Point, mode: ToolMode) {
        self.gesture = Some(Gesture {
            mode,
            points: vec![point],
        });
    }

    /// Appends a sample to the active gesture; ignored when idle.
    pub fn extend_stroke(&mut self, point: Point) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.points.push(point);
        }
    }

    /// Ends the active gesture and applies it to `strokes`.
    pub fn end_stroke(&mut self, strokes: &mut Vec<Stroke>) -> StrokeOutcome {
        let Some(gesture) = self.gesture.take() else {
            return StrokeOutcome::Nothing;
        };

        match gesture.mode {
            ToolMode::Draw => {
                match Stroke::from_points(&gesture.points, self.brush.color.clone(), self.brush.width)
                {
                    Some(stroke) => {
                        strokes.push(stroke);
                        StrokeOutcome::Appended
                    }
                    None => StrokeOutcome::Nothing,
                }
            }
            ToolMode::Erase => strokes.pop().map_or(StrokeOutcome::Nothing, StrokeOutcome::Erased),
        }
    }

    /// Drops the active gesture without touching any stroke list.
    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    /// Current live preview; absent while erasing or before a second point.
    pub fn preview(&self) -> Option<PreviewStroke> {
        let gesture = self.gesture.as_ref()?;
        if gesture.mode == ToolMode::Erase {
            return None;
        }
        let path = build_path(&gesture.points)?;
        Some(PreviewStroke {
            path,
            brush: self.brush.clone(),
        })
    }
}

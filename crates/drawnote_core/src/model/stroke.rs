//! Stroke domain model.
//!
//! # Responsibility
//! - Define the immutable record produced by one completed pencil gesture.
//! - Convert between ordered point lists and the persisted path string.
//!
//! # Invariants
//! - `Stroke::from_points` only builds strokes of two or more points.
//!   Deserialized strokes keep their stored `path` exactly as read, so
//!   `points()` may yield fewer points or a parse error for them.
//! - Fields are private; a stroke is never edited after creation, only
//!   appended to or removed from a note wholesale.
//! - `path` uses `M x y` followed by `L x y` segments, so a parsed path
//!   yields the exact point sequence it was built from.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One 2D sample of a pointer gesture, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One completed freehand gesture stored as path + color + width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    path: String,
    color: String,
    width: f64,
}

impl Stroke {
    /// Builds a stroke from an ordered point list.
    ///
    /// Returns `None` for fewer than two points; a tap draws nothing.
    pub fn from_points(points: &[Point], color: impl Into<String>, width: f64) -> Option<Self> {
        let path = build_path(points)?;
        Some(Self {
            path,
            color: color.into(),
            width,
        })
    }

    /// Serialized path commands (`M x y L x y ...`).
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub fn color(&self) -> &str {
        self.color.as_str()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Parses the stored path back into its ordered points.
    pub fn points(&self) -> Result<Vec<Point>, PathParseError> {
        parse_path(self.path.as_str())
    }
}

/// Error raised when a persisted path string is not `M`/`L` polyline data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// The path does not start with a move-to command.
    MissingMoveTo,
    /// A command other than `M` or `L` was found.
    UnknownCommand(String),
    /// A coordinate token is missing or not a number.
    InvalidCoordinate(String),
}

impl Display for PathParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMoveTo => write!(f, "path must start with `M`"),
            Self::UnknownCommand(cmd) => write!(f, "unsupported path command `{cmd}`"),
            Self::InvalidCoordinate(value) => write!(f, "invalid path coordinate `{value}`"),
        }
    }
}

impl Error for PathParseError {}

/// Builds the polyline path string for an ordered point list.
///
/// Returns `None` for fewer than two points.
pub fn build_path(points: &[Point]) -> Option<String> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut path = format!("M {} {}", first.x, first.y);
    for point in rest {
        path.push_str(&format!(" L {} {}", point.x, point.y));
    }
    Some(path)
}

/// Parses a `M x y L x y ...` polyline path.
pub fn parse_path(path: &str) -> Result<Vec<Point>, PathParseError> {
    let mut tokens = path.split_whitespace();
    let mut points = Vec::new();

    while let Some(command) = tokens.next() {
        match (command, points.is_empty()) {
            ("M", true) | ("L", false) => {}
            (_, true) => return Err(PathParseError::MissingMoveTo),
            (other, false) => return Err(PathParseError::UnknownCommand(other.to_string())),
        }
        let x = parse_coordinate(tokens.next())?;
        let y = parse_coordinate(tokens.next())?;
        points.push(Point::new(x, y));
    }

    if points.is_empty() {
        return Err(PathParseError::MissingMoveTo);
    }
    Ok(points)
}

fn parse_coordinate(token: Option<&str>) -> Result<f64, PathParseError> {
    let token = token.ok_or_else(|| PathParseError::InvalidCoordinate(String::new()))?;
    token
        .parse::<f64>()
        .map_err(|_| PathParseError::InvalidCoordinate(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{build_path, parse_path, PathParseError, Point, Stroke};

    #[test]
    fn build_path_writes_integers_without_fraction() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.5, 10.0)];
        assert_eq!(
            build_path(&points).as_deref(),
            Some("M 0 0 L 10 0 L 10.5 10")
        );
    }

    #[test]
    fn single_point_builds_no_stroke() {
        assert!(build_path(&[Point::new(5.0, 5.0)]).is_none());
        assert!(Stroke::from_points(&[Point::new(5.0, 5.0)], "#000", 4.0).is_none());
        assert!(Stroke::from_points(&[], "#000", 4.0).is_none());
    }

    #[test]
    fn points_follow_the_built_path_in_order() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(-3.25, 7.0),
            Point::new(400.0, 900.0),
        ];
        let stroke = Stroke::from_points(&points, "#e53935", 8.0).expect("three points");
        assert_eq!(stroke.points().expect("valid path"), points);
        assert_eq!(stroke.color(), "#e53935");
        assert_eq!(stroke.width(), 8.0);
    }

    #[test]
    fn parse_path_rejects_malformed_input() {
        assert_eq!(parse_path(""), Err(PathParseError::MissingMoveTo));
        assert_eq!(parse_path("L 1 2"), Err(PathParseError::MissingMoveTo));
        assert_eq!(
            parse_path("M 1 2 C 3 4"),
            Err(PathParseError::UnknownCommand("C".to_string()))
        );
        assert_eq!(
            parse_path("M 1 x"),
            Err(PathParseError::InvalidCoordinate("x".to_string()))
        );
    }

    #[test]
    fn stroke_serializes_with_plain_field_names() {
        let stroke = Stroke::from_points(&[Point::new(1.0, 2.0), Point::new(3.0, 4.0)], "#fff", 2.0)
            .expect("two points");
        let json = serde_json::to_value(&stroke).expect("serialize stroke");
        assert_eq!(json["path"], "M 1 2 L 3 4");
        assert_eq!(json["color"], "#fff");
        assert_eq!(json["width"], 2.0);
    }

    #[test]
    fn stored_strokes_are_kept_as_read() {
        let stroke: Stroke =
            serde_json::from_str(r##"{"path":"M 5 5","color":"#000","width":2}"##).unwrap();
        assert_eq!(stroke.path(), "M 5 5");
        assert_eq!(stroke.points().unwrap(), vec![Point::new(5.0, 5.0)]);

        let odd: Stroke =
            serde_json::from_str(r##"{"path":"C 1 2","color":"#000","width":2}"##).unwrap();
        assert_eq!(odd.points(), Err(PathParseError::MissingMoveTo));
    }
}

//! Vector rendering of a note's drawing layer.
//!
//! # Responsibility
//! - Map strokes to render-ready path descriptions.
//! - Produce a standalone SVG document for export and previews.
//!
//! # Invariants
//! - Strokes render in list order; the live preview always renders last.
//! - Segments are straight lines with round caps/joins and no fill.

use crate::drawing::capture::PreviewStroke;
use crate::drawing::palette::DEFAULT_CANVAS_HEIGHT;
use crate::model::stroke::Stroke;

/// Fixed-size drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas spanning `width` at the note screen's default height.
    pub fn with_default_height(width: f64) -> Self {
        Self::new(width, DEFAULT_CANVAS_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Round,
}

/// One drawable path with its style.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    pub d: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl RenderedPath {
    fn new(d: &str, stroke: &str, stroke_width: f64) -> Self {
        Self {
            d: d.to_string(),
            stroke: stroke.to_string(),
            stroke_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        }
    }
}

/// Lists paths in paint order: committed strokes, then the preview.
pub fn render_paths(strokes: &[Stroke], preview: Option<&PreviewStroke>) -> Vec<RenderedPath> {
    let mut paths = strokes
        .iter()
        .map(|stroke| RenderedPath::new(stroke.path(), stroke.color(), stroke.width()))
        .collect::<Vec<_>>();
    if let Some(preview) = preview {
        paths.push(RenderedPath::new(
            preview.path.as_str(),
            preview.brush.color.as_str(),
            preview.brush.width,
        ));
    }
    paths
}

/// Renders strokes and the optional preview as an SVG document.
pub fn render_svg(canvas: Canvas, strokes: &[Stroke], preview: Option<&PreviewStroke>) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    for path in render_paths(strokes, preview) {
        svg.push_str(&format!(
            r#"<path d="{}" stroke="{}" stroke-width="{}" fill="none" stroke-linecap="{}" stroke-linejoin="{}"/>"#,
            escape_attr(&path.d),
            escape_attr(&path.stroke),
            path.stroke_width,
            line_cap_attr(path.line_cap),
            line_join_attr(path.line_join),
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn line_cap_attr(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Round => "round",
    }
}

fn line_join_attr(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Round => "round",
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{render_paths, render_svg, Canvas, LineCap, LineJoin};
    use crate::drawing::capture::PreviewStroke;
    use crate::drawing::palette::Brush;
    use crate::model::stroke::{Point, Stroke};

    fn stroke(color: &str, width: f64) -> Stroke {
        Stroke::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)], color, width)
            .expect("two points")
    }

    #[test]
    fn preview_is_painted_after_committed_strokes() {
        let strokes = vec![stroke("#111111", 2.0), stroke("#222222", 4.0)];
        let preview = PreviewStroke {
            path: "M 1 1 L 2 2".to_string(),
            brush: Brush::new("#333333", 8.0),
        };

        let paths = render_paths(&strokes, Some(&preview));
        let colors = paths.iter().map(|p| p.stroke.as_str()).collect::<Vec<_>>();
        assert_eq!(colors, vec!["#111111", "#222222", "#333333"]);
        assert_eq!(paths[2].stroke_width, 8.0);
        assert!(paths
            .iter()
            .all(|p| p.line_cap == LineCap::Round && p.line_join == LineJoin::Round));
    }

    #[test]
    fn svg_contains_round_unfilled_paths() {
        let svg = render_svg(
            Canvas::with_default_height(320.0),
            &[stroke("#1a1a24", 4.0)],
            None,
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="320" height="220""#));
        assert!(svg.contains(r#"d="M 0 0 L 10 10""#));
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"stroke-linejoin="round""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn svg_escapes_opaque_color_values() {
        let svg = render_svg(Canvas::new(10.0, 10.0), &[stroke("\"><script>", 1.0)], None);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&quot;&gt;&lt;script&gt;"));
    }
}

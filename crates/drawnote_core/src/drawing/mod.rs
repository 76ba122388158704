//! Freehand drawing capture and vector rendering.
//!
//! # Responsibility
//! - Turn one pointer gesture into zero or one `Stroke`.
//! - Render ordered strokes plus the live preview as vector paths.
//!
//! # Invariants
//! - Only one gesture is tracked per canvas at a time.
//! - Capture never fails and never clamps coordinates.

pub mod capture;
pub mod palette;
pub mod render;

//! Flutter bridge for DrawNote core.

pub mod api;

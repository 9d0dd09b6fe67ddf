//! Document export: the canvas drawing port and its exporter.
//!
//! The exporter replays the layout renderer's output against the `Canvas` port,
//! so the downloadable document can never include or omit a section the preview
//! would not.

pub mod exporter;
pub mod handlers;
pub mod svg;

use std::path::Path;

use thiserror::Error;

use crate::layout::FontFamily;

pub use exporter::{draw_resume, export_to_file};
pub use svg::SvgCanvas;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing document: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// The drawing port consumed by the exporter. Coordinates are in points with
/// the origin at the top-left; `y` is the text baseline.
pub trait Canvas {
    fn set_font(&mut self, family: FontFamily, style: FontStyle, size_pt: f32);
    fn set_color(&mut self, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: Align);
    fn draw_rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    /// Writes the finished document. Must be atomic: a failed save leaves no
    /// partial file behind.
    fn save(&mut self, path: &Path) -> Result<(), ExportError>;
}

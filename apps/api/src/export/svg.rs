//! SVG canvas backend.
//!
//! Records draw commands and serializes them as an SVG document: text, rect,
//! and line elements map one-to-one onto the canvas port. `save` writes through
//! a temp file persisted into place, so an interrupted export leaves nothing.

use std::io::Write;
use std::path::Path;

use crate::export::{Align, Canvas, ExportError, FontStyle};
use crate::layout::FontFamily;

#[derive(Debug, Clone)]
enum Element {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: String,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        align: Align,
        family: FontFamily,
        style: FontStyle,
        size_pt: f32,
        color: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: String,
    },
}

pub struct SvgCanvas {
    width: f32,
    min_height: f32,
    max_y: f32,
    font_family: FontFamily,
    font_style: FontStyle,
    font_size: f32,
    color: String,
    elements: Vec<Element>,
}

impl SvgCanvas {
    pub fn new(width: f32, min_height: f32) -> Self {
        SvgCanvas {
            width,
            min_height,
            max_y: 0.0,
            font_family: FontFamily::Helvetica,
            font_style: FontStyle::Regular,
            font_size: 10.0,
            color: "#000000".to_string(),
            elements: Vec::new(),
        }
    }

    fn to_svg(&self) -> String {
        let height = self.min_height.max(self.max_y + 40.0);
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}\" height=\"{:.2}\" \
             viewBox=\"0 0 {:.2} {:.2}\">\n",
            self.width, height, self.width, height
        ));
        out.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{:.2}\" height=\"{:.2}\" fill=\"#FFFFFF\"/>\n",
            self.width, height
        ));
        for element in &self.elements {
            match element {
                Element::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    out.push_str(&format!(
                        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" \
                         height=\"{height:.2}\" fill=\"{fill}\"/>\n"
                    ));
                }
                Element::Text {
                    text,
                    x,
                    y,
                    align,
                    family,
                    style,
                    size_pt,
                    color,
                } => {
                    let anchor = match align {
                        Align::Left => "start",
                        Align::Center => "middle",
                        Align::Right => "end",
                    };
                    let font = match family {
                        FontFamily::Helvetica => "Helvetica, Arial, sans-serif",
                        FontFamily::Times => "Times New Roman, Times, serif",
                    };
                    let weight = if *style == FontStyle::Bold { " font-weight=\"bold\"" } else { "" };
                    let italic = if *style == FontStyle::Italic { " font-style=\"italic\"" } else { "" };
                    out.push_str(&format!(
                        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" \
                         font-family=\"{font}\" font-size=\"{size_pt:.1}\"{weight}{italic} \
                         fill=\"{color}\">{}</text>\n",
                        escape_xml(text)
                    ));
                }
                Element::Line { x1, y1, x2, y2, color } => {
                    out.push_str(&format!(
                        "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" \
                         stroke=\"{color}\" stroke-width=\"1\"/>\n"
                    ));
                }
            }
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Canvas for SvgCanvas {
    fn set_font(&mut self, family: FontFamily, style: FontStyle, size_pt: f32) {
        self.font_family = family;
        self.font_style = style;
        self.font_size = size_pt;
    }

    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.max_y = self.max_y.max(y + height);
        self.elements.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill: self.color.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        self.max_y = self.max_y.max(y);
        self.elements.push(Element::Text {
            text: text.to_string(),
            x,
            y,
            align,
            family: self.font_family,
            style: self.font_style,
            size_pt: self.font_size,
            color: self.color.clone(),
        });
    }

    fn draw_rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.max_y = self.max_y.max(y1.max(y2));
        self.elements.push(Element::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.color.clone(),
        });
    }

    fn save(&mut self, path: &Path) -> Result<(), ExportError> {
        let document = self.to_svg();
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_document_shape() {
        let mut canvas = SvgCanvas::new(595.28, 841.89);
        canvas.set_color("#2563EB");
        canvas.fill_rect(0.0, 0.0, 595.28, 90.0);
        canvas.set_font(FontFamily::Helvetica, FontStyle::Bold, 28.0);
        canvas.set_color("#FFFFFF");
        canvas.draw_text("Jane Doe", 297.64, 50.0, Align::Center);
        canvas.draw_rule(40.0, 120.0, 555.0, 120.0);

        let svg = canvas.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Jane Doe"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("fill=\"#2563EB\""));
        assert!(svg.contains("<line"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_xml_escaped() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.draw_text("R&D <lead>", 0.0, 10.0, Align::Left);
        let svg = canvas.to_svg();
        assert!(svg.contains("R&amp;D &lt;lead&gt;"));
        assert!(!svg.contains("<lead>"));
    }

    #[test]
    fn test_canvas_grows_below_min_height() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.draw_text("deep", 0.0, 500.0, Align::Left);
        let svg = canvas.to_svg();
        assert!(svg.contains("height=\"540.00\""), "content past the page extends the document");
    }

    #[test]
    fn test_save_writes_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume-modern-test.svg");
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.draw_text("hello", 0.0, 10.0, Align::Left);
        canvas.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("hello"));
    }

    #[test]
    fn test_failed_save_leaves_no_file() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.draw_text("hello", 0.0, 10.0, Align::Left);
        let path = Path::new("/nonexistent-dir/resume.svg");
        assert!(canvas.save(path).is_err());
        assert!(!path.exists());
    }
}

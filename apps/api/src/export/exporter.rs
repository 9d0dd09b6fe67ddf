//! Replays renderer output against the canvas port with a vertical cursor.
//!
//! All cursor advances are strictly positive, so sections can neither overlap
//! nor be skipped by stale cursor math. The flow is a single continuous vertical
//! column; content past the first page height simply extends the document.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::export::{Align, Canvas, ExportError, FontStyle, SvgCanvas};
use crate::layout::renderer::{
    BULLET_INDENT_PT, LEFT_MARGIN_PT, LINE_HEIGHT_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT, RIGHT_EDGE_PT,
};
use crate::layout::{render, LineGroup, RenderedResume};
use crate::models::{AccentColor, ResumeRecord, Template};

/// Banner height for the modern header, matching the preview's proportions.
const BANNER_HEIGHT_PT: f32 = 90.0;

/// Renders the record and writes the document into `export_dir`. Returns the
/// path of the written file; the filename encodes the chosen template and the
/// session, so concurrent sessions exporting in the same second cannot clobber
/// each other in the shared directory.
pub fn export_to_file(
    session: Uuid,
    record: &ResumeRecord,
    template: Template,
    accent: AccentColor,
    export_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let rendered = render(record, template, accent);
    let mut canvas = SvgCanvas::new(PAGE_WIDTH_PT, PAGE_HEIGHT_PT);
    draw_resume(&rendered, &mut canvas);

    std::fs::create_dir_all(export_dir)?;
    let filename = format!(
        "resume-{template}-{session}-{}.svg",
        Utc::now().format("%Y%m%dT%H%M%S")
    );
    let path = export_dir.join(filename);
    canvas.save(&path)?;
    Ok(path)
}

/// Draws the full rendered resume onto any canvas backend.
pub fn draw_resume(rendered: &RenderedResume, canvas: &mut dyn Canvas) {
    let style = &rendered.style;
    let center_x = PAGE_WIDTH_PT / 2.0;
    let mut y;

    if style.banner {
        canvas.set_color(&style.heading_color);
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH_PT, BANNER_HEIGHT_PT);

        canvas.set_font(style.font, FontStyle::Bold, style.name_size_pt);
        canvas.set_color("#FFFFFF");
        y = 50.0;
        canvas.draw_text(&rendered.header.name, center_x, y, Align::Center);

        y += 20.0;
        canvas.set_font(style.font, FontStyle::Regular, style.contact_size_pt);
        if let Some(contact) = &rendered.header.contact_line {
            canvas.draw_text(contact, center_x, y, Align::Center);
        }
        y = BANNER_HEIGHT_PT + 20.0;
    } else {
        y = 40.0;
        canvas.set_font(style.font, FontStyle::Bold, style.name_size_pt);
        canvas.set_color("#000000");
        canvas.draw_text(&rendered.header.name, center_x, y, Align::Center);

        y += 20.0;
        canvas.set_font(style.font, FontStyle::Regular, style.contact_size_pt);
        if let Some(contact) = &rendered.header.contact_line {
            canvas.draw_text(contact, center_x, y, Align::Center);
        }
        y += 20.0;
        canvas.draw_rule(LEFT_MARGIN_PT, y, RIGHT_EDGE_PT, y);
        y += 25.0;
    }

    for section in &rendered.sections {
        canvas.set_font(style.font, FontStyle::Bold, style.heading_size_pt);
        canvas.set_color(&style.heading_color);
        canvas.draw_text(&section.title.to_uppercase(), LEFT_MARGIN_PT, y, Align::Left);
        y += 5.0;
        canvas.draw_rule(LEFT_MARGIN_PT, y, RIGHT_EDGE_PT, y);
        y += if style.banner { 20.0 } else { 15.0 };

        canvas.set_color(style.body_color);
        for group in &section.body {
            y = draw_group(group, style, canvas, y);
        }
        y += 10.0;
    }
}

/// Draws one line group starting at baseline `y`; returns the advanced cursor.
fn draw_group(
    group: &LineGroup,
    style: &crate::layout::TemplateStyle,
    canvas: &mut dyn Canvas,
    mut y: f32,
) -> f32 {
    match group {
        LineGroup::Heading { left, right } => {
            canvas.set_font(style.font, FontStyle::Bold, style.entry_title_size_pt);
            canvas.draw_text(left, LEFT_MARGIN_PT, y, Align::Left);
            if let Some(right) = right {
                canvas.set_font(style.font, FontStyle::Regular, style.entry_title_size_pt);
                canvas.draw_text(right, RIGHT_EDGE_PT, y, Align::Right);
            }
            y + 14.0
        }
        LineGroup::Subtitle { text } => {
            canvas.set_font(style.font, FontStyle::Italic, style.body_size_pt);
            canvas.draw_text(text, LEFT_MARGIN_PT, y, Align::Left);
            y + 16.0
        }
        LineGroup::Paragraph { lines } => {
            canvas.set_font(style.font, FontStyle::Regular, style.body_size_pt);
            for line in lines {
                canvas.draw_text(line, LEFT_MARGIN_PT, y, Align::Left);
                y += LINE_HEIGHT_PT;
            }
            y + 4.0
        }
        LineGroup::Bullets { items } => {
            canvas.set_font(style.font, FontStyle::Regular, style.body_size_pt);
            let x = LEFT_MARGIN_PT + BULLET_INDENT_PT;
            for item in items {
                for (i, line) in item.iter().enumerate() {
                    if i == 0 {
                        canvas.draw_text(&format!("{}{line}", style.bullet_marker), x, y, Align::Left);
                    } else {
                        canvas.draw_text(line, x, y, Align::Left);
                    }
                    y += LINE_HEIGHT_PT;
                }
            }
            y + 10.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FontFamily;
    use crate::models::{ExperienceEntry, PersonalInfo};

    /// Captures draw commands for assertions.
    #[derive(Default)]
    struct RecordingCanvas {
        texts: Vec<(String, f32, f32)>,
        rects: usize,
        rules: usize,
    }

    impl Canvas for RecordingCanvas {
        fn set_font(&mut self, _family: FontFamily, _style: FontStyle, _size_pt: f32) {}
        fn set_color(&mut self, _color: &str) {}
        fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
            self.rects += 1;
        }
        fn draw_text(&mut self, text: &str, x: f32, y: f32, _align: Align) {
            self.texts.push((text.to_string(), x, y));
        }
        fn draw_rule(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) {
            self.rules += 1;
        }
        fn save(&mut self, _path: &Path) -> Result<(), ExportError> {
            Ok(())
        }
    }

    fn sample_record() -> ResumeRecord {
        ResumeRecord {
            personal: PersonalInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@x.com".to_string()),
                ..Default::default()
            },
            summary: "Backend engineer.".to_string(),
            experience: vec![ExperienceEntry {
                job_title: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: "NYC".to_string(),
                dates: "2020-2022".to_string(),
                duties: vec!["Built X".to_string()],
            }],
            skills: vec!["Rust".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_export_sections_match_renderer_output() {
        let record = sample_record();
        let rendered = render(&record, Template::Modern, AccentColor::Blue);
        let mut canvas = RecordingCanvas::default();
        draw_resume(&rendered, &mut canvas);

        let drawn: Vec<&str> = canvas.texts.iter().map(|(t, _, _)| t.as_str()).collect();
        for section in &rendered.sections {
            assert!(
                drawn.contains(&section.title.to_uppercase().as_str()),
                "{} heading missing from export",
                section.title
            );
        }
        // No extra section headings appear.
        assert!(!drawn.contains(&"EDUCATION"));
        assert!(!drawn.contains(&"LANGUAGES"));
    }

    #[test]
    fn test_modern_draws_banner_and_classic_does_not() {
        let record = sample_record();
        let mut modern = RecordingCanvas::default();
        draw_resume(&render(&record, Template::Modern, AccentColor::Blue), &mut modern);
        assert_eq!(modern.rects, 1, "modern draws the accent banner");

        let mut classic = RecordingCanvas::default();
        draw_resume(&render(&record, Template::Classic, AccentColor::Blue), &mut classic);
        assert_eq!(classic.rects, 0, "classic has a plain header");
    }

    #[test]
    fn test_vertical_cursor_never_goes_backwards_in_body() {
        let record = sample_record();
        let mut canvas = RecordingCanvas::default();
        draw_resume(&render(&record, Template::Classic, AccentColor::Blue), &mut canvas);

        // Left-column baselines are non-decreasing; the only same-baseline pair
        // is a heading and its right-aligned date.
        let mut last_y = f32::MIN;
        for (_, x, y) in &canvas.texts {
            if *x <= LEFT_MARGIN_PT + BULLET_INDENT_PT {
                assert!(*y >= last_y, "cursor moved backwards at y={y}");
                last_y = *y;
            }
        }
    }

    #[test]
    fn test_empty_record_exports_header_only() {
        let rendered = render(&ResumeRecord::default(), Template::Classic, AccentColor::Blue);
        let mut canvas = RecordingCanvas::default();
        draw_resume(&rendered, &mut canvas);
        assert_eq!(canvas.texts.len(), 1, "only the name placeholder is drawn");
        assert_eq!(canvas.texts[0].0, "Your Name");
    }

    #[test]
    fn test_bullet_marker_follows_template() {
        let record = sample_record();
        let mut modern = RecordingCanvas::default();
        draw_resume(&render(&record, Template::Modern, AccentColor::Blue), &mut modern);
        assert!(modern.texts.iter().any(|(t, _, _)| t == "\u{2022} Built X"));

        let mut classic = RecordingCanvas::default();
        draw_resume(&render(&record, Template::Classic, AccentColor::Blue), &mut classic);
        assert!(classic.texts.iter().any(|(t, _, _)| t == "- Built X"));
    }

    #[test]
    fn test_export_to_file_encodes_template_and_session_in_filename() {
        let dir = tempfile::tempdir().unwrap();
        let session = Uuid::new_v4();
        let path = export_to_file(
            session,
            &sample_record(),
            Template::Classic,
            AccentColor::Blue,
            dir.path(),
        )
        .unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("resume-classic-"), "got {name}");
        assert!(name.contains(&session.to_string()), "got {name}");
        assert!(name.ends_with(".svg"));
        assert!(path.exists());
    }

    #[test]
    fn test_concurrent_sessions_export_to_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample_record();
        // Same template in the same second; only the session id separates them.
        let first = export_to_file(Uuid::new_v4(), &record, Template::Modern, AccentColor::Blue, dir.path()).unwrap();
        let second = export_to_file(Uuid::new_v4(), &record, Template::Modern, AccentColor::Blue, dir.path()).unwrap();
        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
    }

    #[test]
    fn test_export_failure_leaves_no_file() {
        let result = export_to_file(
            Uuid::new_v4(),
            &sample_record(),
            Template::Modern,
            AccentColor::Blue,
            Path::new("/proc/no-such-dir"),
        );
        assert!(result.is_err());
    }
}

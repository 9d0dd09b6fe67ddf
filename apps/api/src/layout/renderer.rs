//! Layout renderer: maps {record, template, accent} to drawable section blocks.
//!
//! Pure and deterministic: both the on-screen preview (serialized as JSON) and the
//! document exporter consume the same output, so section inclusion, ordering, and
//! wrapped line counts can never diverge between the two. Template choice varies
//! only style parameters (font, delimiters, colors); the walking logic is shared.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable};
use crate::models::{AccentColor, ResumeRecord, Template};

// ────────────────────────────────────────────────────────────────────────────
// Page geometry (A4 in points)
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;
pub const LEFT_MARGIN_PT: f32 = 40.0;
pub const RIGHT_EDGE_PT: f32 = 555.0;
pub const CONTENT_WIDTH_PT: f32 = RIGHT_EDGE_PT - LEFT_MARGIN_PT;
/// Bulleted duty lines are indented 10pt inside the content column.
pub const BULLET_INDENT_PT: f32 = 10.0;
/// Vertical advance per wrapped body line.
pub const LINE_HEIGHT_PT: f32 = 12.0;

// ────────────────────────────────────────────────────────────────────────────
// Template style parameters
// ────────────────────────────────────────────────────────────────────────────

/// The per-template style block. Everything that differs between the two
/// templates lives here; nothing else may vary.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateStyle {
    pub template: Template,
    pub font: FontFamily,
    /// Section headings and rules (accent for modern, black for classic).
    pub heading_color: String,
    /// Body text color.
    pub body_color: &'static str,
    /// Joins the present header contact fields.
    pub contact_delimiter: &'static str,
    /// Joins company/school with location on subtitle lines.
    pub subtitle_delimiter: &'static str,
    /// Joins skills/certifications/languages into their compact line.
    pub compact_delimiter: &'static str,
    /// Marker prefixed to each bulleted duty in the exported document.
    pub bullet_marker: &'static str,
    /// Modern renders a filled banner behind the header.
    pub banner: bool,
    pub name_size_pt: f32,
    pub contact_size_pt: f32,
    pub heading_size_pt: f32,
    pub entry_title_size_pt: f32,
    pub body_size_pt: f32,
}

impl TemplateStyle {
    pub fn new(template: Template, accent: AccentColor) -> Self {
        match template {
            Template::Modern => TemplateStyle {
                template,
                font: FontFamily::Helvetica,
                heading_color: accent.hex().to_string(),
                body_color: "#4B5563",
                contact_delimiter: "  |  ",
                subtitle_delimiter: " | ",
                compact_delimiter: "  \u{2022}  ",
                bullet_marker: "\u{2022} ",
                banner: true,
                name_size_pt: 28.0,
                contact_size_pt: 10.0,
                heading_size_pt: 14.0,
                entry_title_size_pt: 11.0,
                body_size_pt: 10.0,
            },
            Template::Classic => TemplateStyle {
                template,
                font: FontFamily::Times,
                heading_color: "#000000".to_string(),
                body_color: "#444444",
                contact_delimiter: " | ",
                subtitle_delimiter: ", ",
                compact_delimiter: ", ",
                bullet_marker: "- ",
                banner: false,
                name_size_pt: 24.0,
                contact_size_pt: 11.0,
                heading_size_pt: 12.0,
                entry_title_size_pt: 11.0,
                body_size_pt: 10.0,
            },
        }
    }

    /// Body content width in em units at the body font size.
    fn body_width_em(&self) -> f32 {
        CONTENT_WIDTH_PT / self.body_size_pt
    }

    /// Bullet content width in em units (indented inside the content column).
    fn bullet_width_em(&self) -> f32 {
        (CONTENT_WIDTH_PT - BULLET_INDENT_PT) / self.body_size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Icon tag attached to each section block (the preview maps these to glyphs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionIcon {
    User,
    Briefcase,
    Wrench,
    GraduationCap,
    BrainCircuit,
    Award,
    Languages,
}

/// One drawable group of lines inside a section body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineGroup {
    /// Entry title line with an optional right-aligned secondary text (dates).
    Heading { left: String, right: Option<String> },
    /// Secondary line beneath a heading (company/school + location).
    Subtitle { text: String },
    /// Pre-wrapped body text.
    Paragraph { lines: Vec<String> },
    /// Bulleted list; each item is pre-wrapped into its own lines.
    Bullets { items: Vec<Vec<String>> },
}

/// A section block: heading + body, emitted only when its data is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub title: &'static str,
    pub icon: SectionIcon,
    pub body: Vec<LineGroup>,
}

/// The resume header: always present, even for an empty record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub name: String,
    /// The present subset of email/phone/linkedin joined by the template's
    /// contact delimiter; `None` when no contact field is set.
    pub contact_line: Option<String>,
}

/// Complete renderer output for one record + template + accent triple.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedResume {
    pub style: TemplateStyle,
    pub header: HeaderBlock,
    pub sections: Vec<SectionBlock>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the record into section blocks. Empty sections are skipped
/// independently; an empty record yields the header and nothing else.
pub fn render(record: &ResumeRecord, template: Template, accent: AccentColor) -> RenderedResume {
    let style = TemplateStyle::new(template, accent);
    let metrics = get_metrics(style.font);

    let header = render_header(record, &style);
    let mut sections = Vec::new();

    if !record.summary.is_empty() {
        sections.push(SectionBlock {
            title: "Summary",
            icon: SectionIcon::User,
            body: vec![LineGroup::Paragraph {
                lines: metrics.wrap_text(&record.summary, style.body_width_em()),
            }],
        });
    }

    if !record.experience.is_empty() {
        let mut body = Vec::new();
        for job in &record.experience {
            body.push(LineGroup::Heading {
                left: job.job_title.clone(),
                right: non_empty(&job.dates),
            });
            if let Some(text) = join_present(&[&job.company, &job.location], style.subtitle_delimiter)
            {
                body.push(LineGroup::Subtitle { text });
            }
            if !job.duties.is_empty() {
                body.push(LineGroup::Bullets {
                    items: job
                        .duties
                        .iter()
                        .map(|duty| metrics.wrap_text(duty, style.bullet_width_em()))
                        .collect(),
                });
            }
        }
        sections.push(SectionBlock {
            title: "Experience",
            icon: SectionIcon::Briefcase,
            body,
        });
    }

    if !record.projects.is_empty() {
        let mut body = Vec::new();
        for project in &record.projects {
            body.push(LineGroup::Heading {
                left: project.name.clone(),
                right: None,
            });
            if !project.description.is_empty() {
                body.push(LineGroup::Paragraph {
                    lines: metrics.wrap_text(&project.description, style.body_width_em()),
                });
            }
            if !project.tech.is_empty() {
                body.push(LineGroup::Subtitle {
                    text: format!("Technologies: {}", project.tech),
                });
            }
        }
        sections.push(SectionBlock {
            title: "Projects",
            icon: SectionIcon::Wrench,
            body,
        });
    }

    if !record.education.is_empty() {
        let mut body = Vec::new();
        for entry in &record.education {
            body.push(LineGroup::Heading {
                left: entry.degree.clone(),
                right: non_empty(&entry.date),
            });
            if let Some(text) =
                join_present(&[&entry.school, &entry.location], style.subtitle_delimiter)
            {
                body.push(LineGroup::Subtitle { text });
            }
        }
        sections.push(SectionBlock {
            title: "Education",
            icon: SectionIcon::GraduationCap,
            body,
        });
    }

    push_compact_section(
        &mut sections,
        "Skills",
        SectionIcon::BrainCircuit,
        &record.skills,
        &style,
        metrics,
    );
    push_compact_section(
        &mut sections,
        "Certifications",
        SectionIcon::Award,
        &record.certifications,
        &style,
        metrics,
    );
    push_compact_section(
        &mut sections,
        "Languages",
        SectionIcon::Languages,
        &record.languages,
        &style,
        metrics,
    );

    RenderedResume {
        style,
        header,
        sections,
    }
}

fn render_header(record: &ResumeRecord, style: &TemplateStyle) -> HeaderBlock {
    let name = record
        .personal
        .name
        .clone()
        .unwrap_or_else(|| "Your Name".to_string());
    let contacts: Vec<&str> = [
        record.personal.email.as_deref(),
        record.personal.phone.as_deref(),
        record.personal.linkedin.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    HeaderBlock {
        name,
        contact_line: if contacts.is_empty() {
            None
        } else {
            Some(contacts.join(style.contact_delimiter))
        },
    }
}

/// Skills/certifications/languages render as one delimiter-joined wrapped line.
fn push_compact_section(
    sections: &mut Vec<SectionBlock>,
    title: &'static str,
    icon: SectionIcon,
    items: &[String],
    style: &TemplateStyle,
    metrics: &FontMetricTable,
) {
    if items.is_empty() {
        return;
    }
    let joined = items.join(style.compact_delimiter);
    sections.push(SectionBlock {
        title,
        icon,
        body: vec![LineGroup::Paragraph {
            lines: metrics.wrap_text(&joined, style.body_width_em()),
        }],
    });
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Joins the non-empty parts with the delimiter; `None` if all parts are empty.
fn join_present(parts: &[&str], delimiter: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().copied().filter(|s| !s.is_empty()).collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(delimiter))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry};

    fn full_record() -> ResumeRecord {
        ResumeRecord {
            personal: PersonalInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@x.com".to_string()),
                phone: Some("555-1111".to_string()),
                linkedin: None,
            },
            summary: "Backend engineer focused on reliable systems.".to_string(),
            experience: vec![ExperienceEntry {
                job_title: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: "NYC".to_string(),
                dates: "2020-2022".to_string(),
                duties: vec!["Built X".to_string(), "Maintained Y".to_string()],
            }],
            projects: vec![ProjectEntry {
                name: "Side Project".to_string(),
                description: "A small tool.".to_string(),
                tech: "Rust".to_string(),
            }],
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                school: "State U".to_string(),
                location: "Springfield".to_string(),
                date: "2019".to_string(),
            }],
            certifications: vec!["CKA".to_string()],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            languages: vec!["English".to_string()],
        }
    }

    #[test]
    fn test_empty_record_renders_header_only() {
        let rendered = render(&ResumeRecord::default(), Template::Modern, AccentColor::Blue);
        assert_eq!(rendered.header.name, "Your Name");
        assert_eq!(rendered.header.contact_line, None);
        assert!(rendered.sections.is_empty());
    }

    #[test]
    fn test_single_populated_section_renders_exactly_one_block() {
        let record = ResumeRecord {
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let rendered = render(&record, Template::Modern, AccentColor::Blue);
        assert_eq!(rendered.sections.len(), 1);
        assert_eq!(rendered.sections[0].title, "Skills");
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let rendered = render(&full_record(), Template::Modern, AccentColor::Blue);
        let titles: Vec<&str> = rendered.sections.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Summary",
                "Experience",
                "Projects",
                "Education",
                "Skills",
                "Certifications",
                "Languages"
            ]
        );
    }

    #[test]
    fn test_header_joins_present_contacts_without_stray_delimiters() {
        let record = ResumeRecord {
            personal: PersonalInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@x.com".to_string()),
                phone: None,
                linkedin: Some("linkedin.com/in/jane".to_string()),
            },
            ..Default::default()
        };
        let rendered = render(&record, Template::Classic, AccentColor::Blue);
        assert_eq!(
            rendered.header.contact_line.as_deref(),
            Some("jane@x.com | linkedin.com/in/jane")
        );
    }

    #[test]
    fn test_experience_entry_structure() {
        let rendered = render(&full_record(), Template::Modern, AccentColor::Blue);
        let experience = &rendered.sections[1];
        assert_eq!(
            experience.body[0],
            LineGroup::Heading {
                left: "Engineer".to_string(),
                right: Some("2020-2022".to_string()),
            }
        );
        assert_eq!(
            experience.body[1],
            LineGroup::Subtitle {
                text: "Acme | NYC".to_string()
            }
        );
        match &experience.body[2] {
            LineGroup::Bullets { items } => assert_eq!(items.len(), 2),
            other => panic!("expected bullets, got {other:?}"),
        }
    }

    #[test]
    fn test_classic_subtitle_uses_comma_delimiter() {
        let rendered = render(&full_record(), Template::Classic, AccentColor::Blue);
        let experience = &rendered.sections[1];
        assert_eq!(
            experience.body[1],
            LineGroup::Subtitle {
                text: "Acme, NYC".to_string()
            }
        );
    }

    #[test]
    fn test_template_switch_changes_style_not_content() {
        let record = full_record();
        let modern = render(&record, Template::Modern, AccentColor::Emerald);
        let classic = render(&record, Template::Classic, AccentColor::Emerald);

        // Same sections in the same order.
        let modern_titles: Vec<&str> = modern.sections.iter().map(|s| s.title).collect();
        let classic_titles: Vec<&str> = classic.sections.iter().map(|s| s.title).collect();
        assert_eq!(modern_titles, classic_titles);

        // Same heading text in every section (delimiters/wrapping may differ).
        for (m, c) in modern.sections.iter().zip(classic.sections.iter()) {
            let headings = |s: &SectionBlock| {
                s.body
                    .iter()
                    .filter_map(|g| match g {
                        LineGroup::Heading { left, right } => Some((left.clone(), right.clone())),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            };
            assert_eq!(headings(m), headings(c), "headings differ in {}", m.title);
        }

        // Style parameters do differ.
        assert_ne!(modern.style.heading_color, classic.style.heading_color);
        assert_ne!(modern.style.font, classic.style.font);
    }

    #[test]
    fn test_accent_color_reaches_modern_heading_style_only() {
        let record = full_record();
        let modern = render(&record, Template::Modern, AccentColor::Pink);
        assert_eq!(modern.style.heading_color, AccentColor::Pink.hex());
        let classic = render(&record, Template::Classic, AccentColor::Pink);
        assert_eq!(classic.style.heading_color, "#000000");
    }

    #[test]
    fn test_render_is_idempotent() {
        let record = full_record();
        let first = render(&record, Template::Modern, AccentColor::Blue);
        let second = render(&record, Template::Modern, AccentColor::Blue);
        assert_eq!(first.header, second.header);
        assert_eq!(first.sections, second.sections);
    }

    #[test]
    fn test_compact_sections_join_with_template_delimiter() {
        let record = full_record();
        let modern = render(&record, Template::Modern, AccentColor::Blue);
        let skills_text = |r: &RenderedResume| match &r.sections[4].body[0] {
            LineGroup::Paragraph { lines } => lines.join(" "),
            other => panic!("expected paragraph, got {other:?}"),
        };
        assert!(skills_text(&modern).contains("Rust  \u{2022}  SQL"));
        let classic = render(&record, Template::Classic, AccentColor::Blue);
        assert!(skills_text(&classic).contains("Rust, SQL"));
    }

    #[test]
    fn test_missing_dates_produce_no_right_column() {
        let mut record = full_record();
        record.experience[0].dates = String::new();
        let rendered = render(&record, Template::Modern, AccentColor::Blue);
        match &rendered.sections[1].body[0] {
            LineGroup::Heading { right, .. } => assert_eq!(*right, None),
            other => panic!("expected heading, got {other:?}"),
        }
    }
}

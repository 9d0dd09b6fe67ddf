//! Template and accent-color choices for the preview and the exported document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two fixed visual templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Colored banner header, sans-serif metaphor, accent-colored section rules.
    Modern,
    /// Plain header, serif metaphor, black headings and rules, comma-joined lists.
    Classic,
}

impl Template {
    pub const DEFAULT: Template = Template::Modern;
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Modern => write!(f, "modern"),
            Template::Classic => write!(f, "classic"),
        }
    }
}

/// The fixed accent palette for the modern template. Classic ignores the accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Blue,
    Pink,
    Emerald,
    Purple,
    Amber,
}

impl AccentColor {
    pub const DEFAULT: AccentColor = AccentColor::Blue;

    /// CSS hex value used by both the preview payload and the exporter.
    pub fn hex(&self) -> &'static str {
        match self {
            AccentColor::Blue => "#2563EB",
            AccentColor::Pink => "#DB2777",
            AccentColor::Emerald => "#059669",
            AccentColor::Purple => "#581C87",
            AccentColor::Amber => "#D97706",
        }
    }
}

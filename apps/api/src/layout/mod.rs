pub mod font_metrics;
pub mod handlers;
pub mod renderer;

pub use font_metrics::{get_metrics, FontFamily, FontMetricTable};
pub use renderer::{render, LineGroup, RenderedResume, SectionBlock, TemplateStyle};

pub mod resume;
pub mod template;

pub use resume::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord};
pub use template::{AccentColor, Template};

//! The fixed dialogue sequence.
//!
//! Every position in the scripted interview is a `Step` variant, and every step
//! owns exactly one bot prompt. The compiler's exhaustiveness check replaces the
//! runtime "unhandled step" default case of a string-keyed prompt table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named position in the dialogue, one of the 25 interview steps.
///
/// The happy path walks the variants in declaration order; the `*Another` steps
/// branch back to their group's first sub-step on a "yes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome,
    PersonalEmail,
    PersonalPhone,
    PersonalLinkedin,
    SummaryStart,
    ExperienceStart,
    ExperienceCompany,
    ExperienceLocation,
    ExperienceDates,
    ExperienceDuties,
    ExperienceAnother,
    ProjectsStart,
    ProjectsDesc,
    ProjectsTech,
    ProjectsAnother,
    EducationStart,
    EducationSchool,
    EducationLocation,
    EducationDate,
    EducationAnother,
    CertificationsStart,
    CertificationsAnother,
    SkillsStart,
    LanguagesStart,
    Final,
}

impl Step {
    /// The fixed bot prompt emitted when the dialogue arrives at this step.
    pub fn prompt(&self) -> &'static str {
        match self {
            Step::Welcome => {
                "Hello! I'm Resume Bot. Let's create a professional resume. What's your full name?"
            }
            Step::PersonalEmail => "What's your email address?",
            Step::PersonalPhone => "Great. What's your phone number?",
            Step::PersonalLinkedin => "Your LinkedIn profile URL? (optional, press enter to skip)",
            Step::SummaryStart => {
                "Let's add a professional summary. Briefly describe your background and career goals."
            }
            Step::ExperienceStart => {
                "Now for work experience. What was your most recent job title?"
            }
            Step::ExperienceCompany => "Which company was this at?",
            Step::ExperienceLocation => "Where was it located? (e.g., City, State)",
            Step::ExperienceDates => "When did you work there? (e.g., Jan 2020 - Present)",
            Step::ExperienceDuties => {
                "Describe key responsibilities. (Enter one per message, type 'done' when finished)"
            }
            Step::ExperienceAnother => "Add another work experience? (yes/no)",
            Step::ProjectsStart => {
                "Let's highlight some projects. What's the name of a project you've worked on?"
            }
            Step::ProjectsDesc => "Briefly describe the project.",
            Step::ProjectsTech => "What technologies did you use? (e.g., React, Python)",
            Step::ProjectsAnother => "Add another project? (yes/no)",
            Step::EducationStart => "Next, education. What was your degree?",
            Step::EducationSchool => "What was the name of the school or university?",
            Step::EducationLocation => "Where was it located?",
            Step::EducationDate => "When did you graduate? (e.g., May 2019)",
            Step::EducationAnother => "Add another educational qualification? (yes/no)",
            Step::CertificationsStart => {
                "Any certifications? Enter one at a time, or type 'done' to skip."
            }
            Step::CertificationsAnother => "Add another certification? (or type 'done')",
            Step::SkillsStart => {
                "Let's list your skills. Enter one skill at a time. (Type 'done' when finished)"
            }
            Step::LanguagesStart => {
                "Finally, what languages do you speak? Enter one at a time, or type 'done' to finish."
            }
            Step::Final => {
                "Your resume is complete! Choose a style and download it from the preview panel."
            }
        }
    }

    /// The two steps where an empty submission is a meaningful answer: skipping
    /// the optional linkedin field, and skipping certifications entirely.
    pub fn allows_empty_input(&self) -> bool {
        matches!(self, Step::PersonalLinkedin | Step::CertificationsStart)
    }

    /// Once `Final` is reached, further submissions are no-ops.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Final)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Welcome => "welcome",
            Step::PersonalEmail => "personal_email",
            Step::PersonalPhone => "personal_phone",
            Step::PersonalLinkedin => "personal_linkedin",
            Step::SummaryStart => "summary_start",
            Step::ExperienceStart => "experience_start",
            Step::ExperienceCompany => "experience_company",
            Step::ExperienceLocation => "experience_location",
            Step::ExperienceDates => "experience_dates",
            Step::ExperienceDuties => "experience_duties",
            Step::ExperienceAnother => "experience_another",
            Step::ProjectsStart => "projects_start",
            Step::ProjectsDesc => "projects_desc",
            Step::ProjectsTech => "projects_tech",
            Step::ProjectsAnother => "projects_another",
            Step::EducationStart => "education_start",
            Step::EducationSchool => "education_school",
            Step::EducationLocation => "education_location",
            Step::EducationDate => "education_date",
            Step::EducationAnother => "education_another",
            Step::CertificationsStart => "certifications_start",
            Step::CertificationsAnother => "certifications_another",
            Step::SkillsStart => "skills_start",
            Step::LanguagesStart => "languages_start",
            Step::Final => "final",
        };
        write!(f, "{name}")
    }
}

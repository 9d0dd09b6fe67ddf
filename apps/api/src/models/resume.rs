//! The resume record: the single data model shared by the dialogue engine,
//! the layout renderer, and the document exporter.

use serde::{Deserialize, Serialize};

/// Contact fields collected during the welcome group.
///
/// Every field is `Option<String>` so "not answered yet" is distinguishable from
/// "answered with an empty value"; the optional linkedin step stores `None` when
/// skipped, never `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.linkedin.is_none()
    }
}

/// One work-experience entry. Appended to the record atomically, only after the
/// duties sentinel; a half-collected entry lives in the engine's scratch state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub duties: Vec<String>,
}

/// One project entry, appended atomically after the `tech` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub tech: String,
}

/// One education entry, appended atomically after the `date` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub date: String,
}

/// The full resume record for one session.
///
/// All list fields default to empty vectors and are never absent when the record
/// is persisted, so renderers can iterate without presence checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl ResumeRecord {
    /// True if any field holds data. The export endpoint refuses to produce
    /// a document for an untouched record.
    pub fn has_any_data(&self) -> bool {
        !self.personal.is_empty()
            || !self.summary.is_empty()
            || !self.experience.is_empty()
            || !self.projects.is_empty()
            || !self.education.is_empty()
            || !self.certifications.is_empty()
            || !self.skills.is_empty()
            || !self.languages.is_empty()
    }

    /// Field-merge write semantics for the persistence port: non-empty incoming
    /// fields overwrite, empty ones leave stored data untouched.
    pub fn merge_from(&mut self, incoming: &ResumeRecord) {
        if !incoming.personal.is_empty() {
            self.personal = incoming.personal.clone();
        }
        if !incoming.summary.is_empty() {
            self.summary = incoming.summary.clone();
        }
        if !incoming.experience.is_empty() {
            self.experience = incoming.experience.clone();
        }
        if !incoming.projects.is_empty() {
            self.projects = incoming.projects.clone();
        }
        if !incoming.education.is_empty() {
            self.education = incoming.education.clone();
        }
        if !incoming.certifications.is_empty() {
            self.certifications = incoming.certifications.clone();
        }
        if !incoming.skills.is_empty() {
            self.skills = incoming.skills.clone();
        }
        if !incoming.languages.is_empty() {
            self.languages = incoming.languages.clone();
        }
    }
}

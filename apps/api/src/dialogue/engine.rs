//! The dialogue engine: collects one answer, advances one step.
//!
//! `submit` is synchronous and does no I/O: it mutates the owned record and
//! transcript and tells the caller whether an atomic mutation happened, so the
//! HTTP handler can hold the session lock across submit + persist and keep
//! per-session writes ordered.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dialogue::step::Step;
use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord};

/// The literal token that terminates a repeatable collection loop.
const SENTINEL: &str = "done";

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

/// The structured entry currently under construction. Never written to the
/// record until its final field (or sentinel) arrives.
#[derive(Debug, Clone, Default)]
struct Scratch {
    experience: Option<ExperienceEntry>,
    project: Option<ProjectEntry>,
    education: Option<EducationEntry>,
}

/// Result of one `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input on a step that requires content: nothing changed.
    Rejected,
    /// The dialogue already reached its terminal step: nothing changed.
    Closed,
    /// The input was accepted. `persisted` is true iff an atomic mutation
    /// occurred and the record must be written to the store.
    Accepted { persisted: bool },
}

/// Holds the current step, the transcript, the scratch state, and the record.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    current_step: Step,
    transcript: Vec<Message>,
    scratch: Scratch,
    record: ResumeRecord,
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueEngine {
    /// A fresh engine at the welcome step, greeting already in the transcript.
    pub fn new() -> Self {
        let mut engine = DialogueEngine {
            current_step: Step::Welcome,
            transcript: Vec::new(),
            scratch: Scratch::default(),
            record: ResumeRecord::default(),
        };
        engine.push_bot(Step::Welcome.prompt());
        engine
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    /// Processes one user submission.
    ///
    /// Leading/trailing whitespace is trimmed first. Empty input is rejected
    /// unless the current step explicitly permits it (the optional linkedin
    /// step and the zero-certifications skip).
    pub fn submit(&mut self, raw_input: &str) -> SubmitOutcome {
        if self.current_step.is_terminal() {
            return SubmitOutcome::Closed;
        }

        let input = raw_input.trim().to_string();
        if input.is_empty() && !self.current_step.allows_empty_input() {
            return SubmitOutcome::Rejected;
        }

        self.push_user(&input);
        let persisted = self.apply(&input);
        SubmitOutcome::Accepted { persisted }
    }

    /// The transition table. Returns true iff the record was atomically mutated
    /// and must be persisted.
    fn apply(&mut self, input: &str) -> bool {
        match self.current_step {
            Step::Welcome => {
                self.record.personal.name = Some(input.to_string());
                self.advance(Step::PersonalEmail);
                false
            }
            Step::PersonalEmail => {
                self.record.personal.email = Some(input.to_string());
                self.advance(Step::PersonalPhone);
                false
            }
            Step::PersonalPhone => {
                self.record.personal.phone = Some(input.to_string());
                self.advance(Step::PersonalLinkedin);
                false
            }
            Step::PersonalLinkedin => {
                // Empty means skipped: the field stays explicitly unset.
                self.record.personal.linkedin = if input.is_empty() {
                    None
                } else {
                    Some(input.to_string())
                };
                self.advance(Step::SummaryStart);
                true
            }
            Step::SummaryStart => {
                self.record.summary = input.to_string();
                self.advance(Step::ExperienceStart);
                true
            }

            Step::ExperienceStart => {
                self.scratch.experience = Some(ExperienceEntry {
                    job_title: input.to_string(),
                    ..Default::default()
                });
                self.advance(Step::ExperienceCompany);
                false
            }
            Step::ExperienceCompany => {
                self.scratch_experience().company = input.to_string();
                self.advance(Step::ExperienceLocation);
                false
            }
            Step::ExperienceLocation => {
                self.scratch_experience().location = input.to_string();
                self.advance(Step::ExperienceDates);
                false
            }
            Step::ExperienceDates => {
                self.scratch_experience().dates = input.to_string();
                self.advance(Step::ExperienceDuties);
                false
            }
            Step::ExperienceDuties => {
                if input.eq_ignore_ascii_case(SENTINEL) {
                    match self.scratch.experience.take() {
                        Some(entry) => self.record.experience.push(entry),
                        None => warn!(step = %self.current_step, "duties sentinel with no scratch entry"),
                    }
                    self.advance(Step::ExperienceAnother);
                    true
                } else {
                    self.scratch_experience().duties.push(input.to_string());
                    self.push_bot("Added. Enter another duty, or type 'done'.");
                    false
                }
            }
            Step::ExperienceAnother => {
                if input.eq_ignore_ascii_case("yes") {
                    self.advance(Step::ExperienceStart);
                } else {
                    self.advance(Step::ProjectsStart);
                }
                false
            }

            Step::ProjectsStart => {
                self.scratch.project = Some(ProjectEntry {
                    name: input.to_string(),
                    ..Default::default()
                });
                self.advance(Step::ProjectsDesc);
                false
            }
            Step::ProjectsDesc => {
                self.scratch_project().description = input.to_string();
                self.advance(Step::ProjectsTech);
                false
            }
            Step::ProjectsTech => {
                self.scratch_project().tech = input.to_string();
                match self.scratch.project.take() {
                    Some(entry) => self.record.projects.push(entry),
                    None => warn!(step = %self.current_step, "project completion with no scratch entry"),
                }
                self.advance(Step::ProjectsAnother);
                true
            }
            Step::ProjectsAnother => {
                if input.eq_ignore_ascii_case("yes") {
                    self.advance(Step::ProjectsStart);
                } else {
                    self.advance(Step::EducationStart);
                }
                false
            }

            Step::EducationStart => {
                self.scratch.education = Some(EducationEntry {
                    degree: input.to_string(),
                    ..Default::default()
                });
                self.advance(Step::EducationSchool);
                false
            }
            Step::EducationSchool => {
                self.scratch_education().school = input.to_string();
                self.advance(Step::EducationLocation);
                false
            }
            Step::EducationLocation => {
                self.scratch_education().location = input.to_string();
                self.advance(Step::EducationDate);
                false
            }
            Step::EducationDate => {
                self.scratch_education().date = input.to_string();
                match self.scratch.education.take() {
                    Some(entry) => self.record.education.push(entry),
                    None => warn!(step = %self.current_step, "education completion with no scratch entry"),
                }
                self.advance(Step::EducationAnother);
                true
            }
            Step::EducationAnother => {
                if input.eq_ignore_ascii_case("yes") {
                    self.advance(Step::EducationStart);
                } else {
                    self.advance(Step::CertificationsStart);
                }
                false
            }

            Step::CertificationsStart | Step::CertificationsAnother => {
                let skip = input.eq_ignore_ascii_case(SENTINEL)
                    || (self.current_step == Step::CertificationsStart && input.is_empty());
                if skip {
                    self.advance(Step::SkillsStart);
                    false
                } else {
                    self.record.certifications.push(input.to_string());
                    self.push_bot("Certification added. Enter another, or type 'done'.");
                    self.current_step = Step::CertificationsAnother;
                    true
                }
            }
            Step::SkillsStart => {
                if input.eq_ignore_ascii_case(SENTINEL) {
                    self.advance(Step::LanguagesStart);
                    false
                } else {
                    self.record.skills.push(input.to_string());
                    self.push_bot("Skill added. Enter another, or type 'done'.");
                    true
                }
            }
            Step::LanguagesStart => {
                if input.eq_ignore_ascii_case(SENTINEL) {
                    self.advance(Step::Final);
                    false
                } else {
                    self.record.languages.push(input.to_string());
                    self.push_bot("Language added. Enter another, or type 'done'.");
                    true
                }
            }

            // Guarded by the terminal check in `submit`.
            Step::Final => {
                warn!(step = %self.current_step, "submit reached the terminal step");
                false
            }
        }
    }

    /// Moves to `next` and emits its prompt.
    fn advance(&mut self, next: Step) {
        self.current_step = next;
        self.push_bot(next.prompt());
    }

    fn push_bot(&mut self, text: &str) {
        self.transcript.push(Message {
            text: text.to_string(),
            sender: Sender::Bot,
        });
    }

    fn push_user(&mut self, text: &str) {
        self.transcript.push(Message {
            text: text.to_string(),
            sender: Sender::User,
        });
    }

    fn scratch_experience(&mut self) -> &mut ExperienceEntry {
        self.scratch.experience.get_or_insert_with(Default::default)
    }

    fn scratch_project(&mut self) -> &mut ProjectEntry {
        self.scratch.project.get_or_insert_with(Default::default)
    }

    fn scratch_education(&mut self) -> &mut EducationEntry {
        self.scratch.education.get_or_insert_with(Default::default)
    }
}

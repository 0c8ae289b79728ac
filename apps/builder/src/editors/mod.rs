//! Section editors: validate one section's submission before it replaces the
//! document's data. A rejected submission never reaches the model.

mod history;
mod lists;
mod profile;

use std::fmt;

use serde::Serialize;

use crate::models::resume::SectionData;
use crate::models::section::SectionId;

pub use history::{validate_education, validate_experience, validate_projects};
pub use lists::{validate_achievements, validate_certifications, validate_languages, validate_skills};
pub use profile::{validate_contact, validate_personal_links, validate_summary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path into the submission, e.g. `experienceList[1].jobTitle`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorError {
    pub section: SectionId,
    pub errors: Vec<FieldError>,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} section rejected: ", self.section.label())?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for EditorError {}

/// Validates and normalizes a submission for whichever section it carries.
pub fn validate(data: SectionData) -> Result<SectionData, EditorError> {
    Ok(match data {
        SectionData::Contact(v) => SectionData::Contact(validate_contact(v)?),
        SectionData::Summary(v) => SectionData::Summary(Some(validate_summary(v)?)),
        SectionData::Experience(v) => SectionData::Experience(validate_experience(v)?),
        SectionData::Education(v) => SectionData::Education(validate_education(v)?),
        SectionData::Projects(v) => SectionData::Projects(validate_projects(v)?),
        SectionData::Skills(v) => SectionData::Skills(validate_skills(v)?),
        SectionData::Achievements(v) => SectionData::Achievements(validate_achievements(v)?),
        SectionData::Certifications(v) => {
            SectionData::Certifications(validate_certifications(v)?)
        }
        SectionData::Languages(v) => SectionData::Languages(validate_languages(v)?),
        SectionData::PersonalLinks(v) => SectionData::PersonalLinks(validate_personal_links(v)?),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Shared checks
// ────────────────────────────────────────────────────────────────────────────

/// Collects every problem in a submission so the caller sees them all at once.
pub(crate) struct Checker {
    section: SectionId,
    list_field: &'static str,
    errors: Vec<FieldError>,
}

impl Checker {
    pub(crate) fn new(section: SectionId, list_field: &'static str) -> Self {
        Self {
            section,
            list_field,
            errors: Vec::new(),
        }
    }

    pub(crate) fn path(&self, index: Option<usize>, field: &str) -> String {
        match index {
            Some(i) => format!("{}[{i}].{field}", self.list_field),
            None if field.is_empty() => self.list_field.to_string(),
            None => format!("{}.{field}", self.list_field),
        }
    }

    pub(crate) fn fail(&mut self, index: Option<usize>, field: &str, message: impl Into<String>) {
        let field = self.path(index, field);
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub(crate) fn require(&mut self, index: Option<usize>, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.fail(index, field, "is required");
        }
    }

    pub(crate) fn require_some<T>(&mut self, index: Option<usize>, field: &str, value: &Option<T>) {
        if value.is_none() {
            self.fail(index, field, "is required");
        }
    }

    pub(crate) fn max_entries(&mut self, len: usize, max: usize) {
        if len > max {
            self.fail(None, "", format!("allows at most {max} entries (got {len})"));
        }
    }

    pub(crate) fn max_chars(&mut self, index: Option<usize>, field: &str, value: &str, max: usize) {
        let len = value.chars().count();
        if len > max {
            self.fail(index, field, format!("must be at most {max} characters (got {len})"));
        }
    }

    /// Bullet limits shared by experience and project descriptions.
    pub(crate) fn bullets(
        &mut self,
        index: usize,
        bullets: &[String],
        max_bullets: usize,
        max_chars: usize,
        max_words: usize,
    ) {
        if bullets.len() > max_bullets {
            self.fail(
                Some(index),
                "description",
                format!("allows at most {max_bullets} bullet points (got {})", bullets.len()),
            );
        }
        for (i, bullet) in bullets.iter().enumerate() {
            self.max_chars(Some(index), &format!("description[{i}]"), bullet, max_chars);
        }
        let words = crate::format::text::word_count(bullets);
        if words > max_words {
            self.fail(
                Some(index),
                "description",
                format!("must be at most {max_words} words in total (got {words})"),
            );
        }
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, EditorError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(EditorError {
                section: self.section,
                errors: self.errors,
            })
        }
    }
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trimmed, non-blank bullets.
pub(crate) fn clean_bullets(bullets: Vec<String>) -> Vec<String> {
    bullets
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

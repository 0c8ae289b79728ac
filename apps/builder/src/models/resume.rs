use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::lenient::{self, Scalar};
use crate::models::section::SectionId;

pub const DEFAULT_TEMPLATE_NAME: &str = "DefaultTemplate";
pub const DEFAULT_THEME_COLOR: &str = "#0057D9";

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
    Freelance,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    Tenth,
    Twelfth,
    Diploma,
    Bachelors,
    Masters,
    Mba,
    Phd,
    PostDoctorate,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 8] = [
        EducationLevel::Tenth,
        EducationLevel::Twelfth,
        EducationLevel::Diploma,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::Mba,
        EducationLevel::Phd,
        EducationLevel::PostDoctorate,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EducationLevel::Tenth => "TENTH",
            EducationLevel::Twelfth => "TWELFTH",
            EducationLevel::Diploma => "DIPLOMA",
            EducationLevel::Bachelors => "BACHELORS",
            EducationLevel::Masters => "MASTERS",
            EducationLevel::Mba => "MBA",
            EducationLevel::Phd => "PHD",
            EducationLevel::PostDoctorate => "POST_DOCTORATE",
        }
    }

    /// Parses a stored level code, ignoring case and whitespace (`"post_doctorate"`,
    /// `"Bachelors "`).
    pub fn parse(raw: &str) -> Option<EducationLevel> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        EducationLevel::ALL
            .into_iter()
            .find(|level| level.code() == normalized)
    }
}

/// A missing or `null` category reads as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillCategory {
    Technical,
    Soft,
    Tool,
    Framework,
    Platform,
    Database,
    Management,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageProficiency {
    Basic,
    Intermediate,
    Fluent,
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificationProficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

// ────────────────────────────────────────────────────────────────────────────
// Section records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    #[serde(deserialize_with = "lenient::or_default")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub email: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub address: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub city: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub state: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub country: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub postal_code: String,
    #[serde(deserialize_with = "lenient::non_blank")]
    pub date_of_birth: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        *self == ContactInfo::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::or_default")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub company_name: String,
    pub job_type: Option<JobType>,
    #[serde(deserialize_with = "lenient::non_blank")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient::non_blank")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub currently_working: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub city: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub state: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub country: String,
    #[serde(deserialize_with = "lenient::scalar")]
    pub total_years: Option<Scalar>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub total_months: Option<Scalar>,
    #[serde(deserialize_with = "lenient::bullets")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    /// Level code as stored (`BACHELORS`); unknown codes are kept verbatim.
    #[serde(deserialize_with = "lenient::or_default")]
    pub level: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub stream: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub institute: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub university: String,
    #[serde(deserialize_with = "lenient::scalar")]
    pub start_year: Option<Scalar>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub end_year: Option<Scalar>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub currently_studying: bool,
    /// Score as entered: a CGPA (`8.2`) or a percentage (`85`).
    #[serde(deserialize_with = "lenient::scalar")]
    pub percentage: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    #[serde(deserialize_with = "lenient::or_default")]
    pub skill_name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: SkillCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::non_blank")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub issuer: String,
    #[serde(deserialize_with = "lenient::non_blank")]
    pub issue_date: Option<String>,
    #[serde(deserialize_with = "lenient::non_blank")]
    pub expiry_date: Option<String>,
    pub proficiency_level: Option<CertificationProficiency>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    pub proficiency: Option<LanguageProficiency>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_native: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub tech_stack: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub github_link: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub live_link: String,
    #[serde(deserialize_with = "lenient::bullets")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalLink {
    #[serde(deserialize_with = "lenient::or_default")]
    pub platform: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// The canonical in-memory resume owned by one builder session.
///
/// Every mutation replaces a whole field or collection. The model holds no
/// validation; section editors check submissions before they land here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub title: String,
    pub summary: Option<String>,
    pub visibility: Visibility,
    pub template_name: String,
    pub theme_color: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub contact_info: ContactInfo,
    #[serde(deserialize_with = "lenient::or_default")]
    pub experience_list: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub education_list: Vec<EducationEntry>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub skill_list: Vec<Skill>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub achievement_list: Vec<Achievement>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub certification_list: Vec<Certification>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub language_list: Vec<Language>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub project_list: Vec<Project>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub personal_link_list: Vec<PersonalLink>,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            summary: None,
            visibility: Visibility::Private,
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            contact_info: ContactInfo::default(),
            experience_list: Vec::new(),
            education_list: Vec::new(),
            skill_list: Vec::new(),
            achievement_list: Vec::new(),
            certification_list: Vec::new(),
            language_list: Vec::new(),
            project_list: Vec::new(),
            personal_link_list: Vec::new(),
        }
    }
}

/// One section's data, used for whole-section reads and replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "data", rename_all = "camelCase")]
pub enum SectionData {
    Contact(ContactInfo),
    Summary(Option<String>),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    Projects(Vec<Project>),
    Skills(Vec<Skill>),
    Achievements(Vec<Achievement>),
    Certifications(Vec<Certification>),
    Languages(Vec<Language>),
    PersonalLinks(Vec<PersonalLink>),
}

impl SectionData {
    pub fn section_id(&self) -> SectionId {
        match self {
            SectionData::Contact(_) => SectionId::Contact,
            SectionData::Summary(_) => SectionId::Summary,
            SectionData::Experience(_) => SectionId::Experience,
            SectionData::Education(_) => SectionId::Education,
            SectionData::Projects(_) => SectionId::Projects,
            SectionData::Skills(_) => SectionId::Skills,
            SectionData::Achievements(_) => SectionId::Achievements,
            SectionData::Certifications(_) => SectionId::Certifications,
            SectionData::Languages(_) => SectionId::Languages,
            SectionData::PersonalLinks(_) => SectionId::PersonalLinks,
        }
    }

    /// Decodes a section submission whose shape is picked by `id`.
    pub fn from_json(id: SectionId, data: serde_json::Value) -> Result<SectionData, serde_json::Error> {
        use serde_json::from_value;
        Ok(match id {
            SectionId::Contact => SectionData::Contact(from_value(data)?),
            SectionId::Summary => SectionData::Summary(from_value(data)?),
            SectionId::Experience => SectionData::Experience(from_value(data)?),
            SectionId::Education => SectionData::Education(from_value(data)?),
            SectionId::Projects => SectionData::Projects(from_value(data)?),
            SectionId::Skills => SectionData::Skills(from_value(data)?),
            SectionId::Achievements => SectionData::Achievements(from_value(data)?),
            SectionId::Certifications => SectionData::Certifications(from_value(data)?),
            SectionId::Languages => SectionData::Languages(from_value(data)?),
            SectionId::PersonalLinks => SectionData::PersonalLinks(from_value(data)?),
        })
    }

    /// The cleared value for a section: empty list, `null` summary, blank contact.
    pub fn empty(id: SectionId) -> SectionData {
        match id {
            SectionId::Contact => SectionData::Contact(ContactInfo::default()),
            SectionId::Summary => SectionData::Summary(None),
            SectionId::Experience => SectionData::Experience(Vec::new()),
            SectionId::Education => SectionData::Education(Vec::new()),
            SectionId::Projects => SectionData::Projects(Vec::new()),
            SectionId::Skills => SectionData::Skills(Vec::new()),
            SectionId::Achievements => SectionData::Achievements(Vec::new()),
            SectionId::Certifications => SectionData::Certifications(Vec::new()),
            SectionId::Languages => SectionData::Languages(Vec::new()),
            SectionId::PersonalLinks => SectionData::PersonalLinks(Vec::new()),
        }
    }
}

impl ResumeDocument {
    /// Returns a copy of one section's data.
    pub fn section(&self, id: SectionId) -> SectionData {
        match id {
            SectionId::Contact => SectionData::Contact(self.contact_info.clone()),
            SectionId::Summary => SectionData::Summary(self.summary.clone()),
            SectionId::Experience => SectionData::Experience(self.experience_list.clone()),
            SectionId::Education => SectionData::Education(self.education_list.clone()),
            SectionId::Projects => SectionData::Projects(self.project_list.clone()),
            SectionId::Skills => SectionData::Skills(self.skill_list.clone()),
            SectionId::Achievements => SectionData::Achievements(self.achievement_list.clone()),
            SectionId::Certifications => {
                SectionData::Certifications(self.certification_list.clone())
            }
            SectionId::Languages => SectionData::Languages(self.language_list.clone()),
            SectionId::PersonalLinks => {
                SectionData::PersonalLinks(self.personal_link_list.clone())
            }
        }
    }

    /// Replaces one section wholesale. Other sections are untouched.
    pub fn replace_section(&mut self, data: SectionData) {
        match data {
            SectionData::Contact(v) => self.contact_info = v,
            SectionData::Summary(v) => self.summary = v,
            SectionData::Experience(v) => self.experience_list = v,
            SectionData::Education(v) => self.education_list = v,
            SectionData::Projects(v) => self.project_list = v,
            SectionData::Skills(v) => self.skill_list = v,
            SectionData::Achievements(v) => self.achievement_list = v,
            SectionData::Certifications(v) => self.certification_list = v,
            SectionData::Languages(v) => self.language_list = v,
            SectionData::PersonalLinks(v) => self.personal_link_list = v,
        }
    }

    pub fn clear_section(&mut self, id: SectionId) {
        self.replace_section(SectionData::empty(id));
    }

    pub fn has_content(&self, id: SectionId) -> bool {
        match id {
            SectionId::Contact => !self.contact_info.is_empty(),
            SectionId::Summary => self
                .summary
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty()),
            SectionId::Experience => !self.experience_list.is_empty(),
            SectionId::Education => !self.education_list.is_empty(),
            SectionId::Projects => !self.project_list.is_empty(),
            SectionId::Skills => !self.skill_list.is_empty(),
            SectionId::Achievements => !self.achievement_list.is_empty(),
            SectionId::Certifications => !self.certification_list.is_empty(),
            SectionId::Languages => !self.language_list.is_empty(),
            SectionId::PersonalLinks => !self.personal_link_list.is_empty(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted versions
// ────────────────────────────────────────────────────────────────────────────

/// A persisted snapshot as returned by the persistence API.
///
/// Every document field is optional on the wire; [`ResumeVersion::to_document`]
/// applies the builder defaults. Contact info travels as `resumeContactInfoResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeVersion {
    pub version_label: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
    #[serde(default, alias = "contactInfo")]
    pub resume_contact_info_response: Option<ContactInfo>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub experience_list: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub education_list: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub skill_list: Vec<Skill>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub achievement_list: Vec<Achievement>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub certification_list: Vec<Certification>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub language_list: Vec<Language>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub project_list: Vec<Project>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub personal_link_list: Vec<PersonalLink>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

impl ResumeVersion {
    /// Builds the builder document from this snapshot's full field set.
    pub fn to_document(&self) -> ResumeDocument {
        ResumeDocument {
            title: self.title.clone().unwrap_or_default(),
            summary: non_empty(&self.summary),
            visibility: self.visibility.unwrap_or_default(),
            template_name: non_empty(&self.template_name)
                .unwrap_or_else(|| DEFAULT_TEMPLATE_NAME.to_string()),
            theme_color: non_empty(&self.theme_color)
                .unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string()),
            contact_info: self.resume_contact_info_response.clone().unwrap_or_default(),
            experience_list: self.experience_list.clone(),
            education_list: self.education_list.clone(),
            skill_list: self.skill_list.clone(),
            achievement_list: self.achievement_list.clone(),
            certification_list: self.certification_list.clone(),
            language_list: self.language_list.clone(),
            project_list: self.project_list.clone(),
            personal_link_list: self.personal_link_list.clone(),
        }
    }

    /// Wraps a document as a persisted snapshot (used by the in-memory store).
    pub fn from_document(
        version_label: String,
        document: &ResumeDocument,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version_label,
            created_at: Some(created_at),
            updated_at: Some(created_at),
            title: Some(document.title.clone()),
            summary: document.summary.clone(),
            visibility: Some(document.visibility),
            template_name: Some(document.template_name.clone()),
            theme_color: Some(document.theme_color.clone()),
            resume_contact_info_response: Some(document.contact_info.clone()),
            experience_list: document.experience_list.clone(),
            education_list: document.education_list.clone(),
            skill_list: document.skill_list.clone(),
            achievement_list: document.achievement_list.clone(),
            certification_list: document.certification_list.clone(),
            language_list: document.language_list.clone(),
            project_list: document.project_list.clone(),
            personal_link_list: document.personal_link_list.clone(),
        }
    }

    pub fn summary_view(&self) -> ResumeSummary {
        ResumeSummary {
            version_label: self.version_label.clone(),
            title: self.title.clone().unwrap_or_default(),
            template_name: self.template_name.clone(),
            visibility: self.visibility,
            created_at: self.created_at,
        }
    }
}

/// Lightweight projection returned by the "all resumes" listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub version_label: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_matches_builder_defaults() {
        let doc = ResumeDocument::default();
        assert_eq!(doc.template_name, "DefaultTemplate");
        assert_eq!(doc.theme_color, "#0057D9");
        assert_eq!(doc.visibility, Visibility::Private);
        assert!(doc.summary.is_none());
        for id in SectionId::ALL {
            assert!(!doc.has_content(id), "{id} should start empty");
        }
    }

    #[test]
    fn test_version_with_null_fields_loads() {
        let version: ResumeVersion = serde_json::from_str(
            r#"{
                "versionLabel": "v4",
                "title": null,
                "resumeContactInfoResponse": {"firstName": "Jane", "address": null, "postalCode": null},
                "projectList": [{"title": "CLI", "githubLink": null, "liveLink": null, "techStack": null}],
                "skillList": [{"skillName": "Rust", "category": null}],
                "languageList": [{"name": "English", "isNative": null}],
                "personalLinkList": [{"platform": null, "url": "https://example.dev"}],
                "experienceList": [{"jobTitle": "Dev", "city": null, "currentlyWorking": null}]
            }"#,
        )
        .unwrap();
        let doc = version.to_document();
        assert_eq!(doc.contact_info.first_name, "Jane");
        assert_eq!(doc.contact_info.address, "");
        assert_eq!(doc.project_list[0].github_link, "");
        assert_eq!(doc.skill_list[0].category, SkillCategory::Other);
        assert!(!doc.language_list[0].is_native);
        assert_eq!(doc.personal_link_list[0].platform, "");
        assert!(!doc.experience_list[0].currently_working);
        assert_eq!(doc.title, "");
    }

    #[test]
    fn test_partial_json_deserializes_with_defaults() {
        let doc: ResumeDocument = serde_json::from_str(
            r#"{
                "title": "Engineer",
                "experienceList": null,
                "educationList": [{"level": "BACHELORS", "startYear": 2018, "percentage": "8.2"}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.title, "Engineer");
        assert!(doc.experience_list.is_empty());
        assert_eq!(doc.template_name, "DefaultTemplate");
        assert_eq!(doc.education_list[0].start_year, Some(Scalar::from(2018)));
    }

    #[test]
    fn test_serializes_camel_case_and_arrays() {
        let mut doc = ResumeDocument::default();
        doc.experience_list.push(ExperienceEntry {
            job_title: "Dev".into(),
            description: vec!["Built things".into()],
            ..Default::default()
        });
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["templateName"], "DefaultTemplate");
        assert_eq!(json["visibility"], "PRIVATE");
        assert!(json["experienceList"][0]["description"].is_array());
        assert!(json["summary"].is_null());
    }

    #[test]
    fn test_replace_and_clear_section_only_touch_one_field() {
        let mut doc = ResumeDocument::default();
        doc.replace_section(SectionData::Skills(vec![Skill {
            skill_name: "Rust".into(),
            category: SkillCategory::Technical,
        }]));
        doc.replace_section(SectionData::Summary(Some("Hello".into())));
        assert!(doc.has_content(SectionId::Skills));

        doc.clear_section(SectionId::Skills);
        assert!(doc.skill_list.is_empty());
        assert_eq!(doc.summary.as_deref(), Some("Hello"));

        doc.clear_section(SectionId::Summary);
        assert!(doc.summary.is_none());
    }

    #[test]
    fn test_section_read_matches_replace() {
        let mut doc = ResumeDocument::default();
        let links = SectionData::PersonalLinks(vec![PersonalLink {
            platform: "GitHub".into(),
            url: "https://github.com/x".into(),
        }]);
        doc.replace_section(links.clone());
        assert_eq!(doc.section(SectionId::PersonalLinks), links);
        assert_eq!(links.section_id(), SectionId::PersonalLinks);
    }

    #[test]
    fn test_version_to_document_applies_defaults() {
        let version: ResumeVersion = serde_json::from_str(
            r#"{
                "versionLabel": "v3",
                "title": "Dev",
                "templateName": "",
                "resumeContactInfoResponse": {"firstName": "Jane"},
                "experienceList": [{"jobTitle": "Dev", "description": "a\nb"}]
            }"#,
        )
        .unwrap();
        let doc = version.to_document();
        assert_eq!(doc.template_name, "DefaultTemplate");
        assert_eq!(doc.theme_color, "#0057D9");
        assert_eq!(doc.contact_info.first_name, "Jane");
        assert_eq!(doc.experience_list[0].description, vec!["a", "b"]);
    }

    #[test]
    fn test_education_level_parse_is_lenient() {
        assert_eq!(EducationLevel::parse("bachelors"), Some(EducationLevel::Bachelors));
        assert_eq!(
            EducationLevel::parse(" POST_DOCTORATE "),
            Some(EducationLevel::PostDoctorate)
        );
        assert_eq!(EducationLevel::parse("Bootcamp"), None);
    }
}

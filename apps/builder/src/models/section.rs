use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of resume sections a layout can order and a template can render.
///
/// Serialized with the exact ids the builder surface uses (`personalLinks` is camelCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    Contact,
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
    Achievements,
    Certifications,
    Languages,
    PersonalLinks,
}

impl SectionId {
    /// Every section, in declaration order.
    pub const ALL: [SectionId; 10] = [
        SectionId::Contact,
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Projects,
        SectionId::Skills,
        SectionId::Achievements,
        SectionId::Certifications,
        SectionId::Languages,
        SectionId::PersonalLinks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Contact => "contact",
            SectionId::Summary => "summary",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Projects => "projects",
            SectionId::Skills => "skills",
            SectionId::Achievements => "achievements",
            SectionId::Certifications => "certifications",
            SectionId::Languages => "languages",
            SectionId::PersonalLinks => "personalLinks",
        }
    }

    /// Human label for navigators and errors: `personalLinks` → `Personal Links`.
    pub fn label(&self) -> String {
        let mut label = String::new();
        for (i, c) in self.as_str().chars().enumerate() {
            if i == 0 {
                label.extend(c.to_uppercase());
            } else if c.is_uppercase() {
                label.push(' ');
                label.push(c);
            } else {
                label.push(c);
            }
        }
        label
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section '{}'", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for id in SectionId::ALL {
            assert_eq!(id.as_str().parse::<SectionId>().unwrap(), id);
        }
    }

    #[test]
    fn test_serde_uses_camel_case_ids() {
        let json = serde_json::to_string(&SectionId::PersonalLinks).unwrap();
        assert_eq!(json, "\"personalLinks\"");
        let parsed: SectionId = serde_json::from_str("\"skills\"").unwrap();
        assert_eq!(parsed, SectionId::Skills);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!("hobbies".parse::<SectionId>().is_err());
        assert!(serde_json::from_str::<SectionId>("\"hobbies\"").is_err());
    }

    #[test]
    fn test_label_splits_camel_case() {
        assert_eq!(SectionId::PersonalLinks.label(), "Personal Links");
        assert_eq!(SectionId::Skills.label(), "Skills");
    }
}

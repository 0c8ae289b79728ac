use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::section::SectionId;

/// The six rendering variants. Serialized with their stored template names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    #[serde(rename = "DefaultTemplate")]
    Default,
    #[serde(rename = "ProfessionalModernTemplate")]
    ProfessionalModern,
    #[serde(rename = "SalesProfessionalTemplate")]
    SalesProfessional,
    #[serde(rename = "ClassicEleganceTemplate")]
    ClassicElegance,
    #[serde(rename = "ModernProfileTemplate")]
    ModernProfile,
    #[serde(rename = "LexingtonResumeTemplate")]
    Lexington,
}

use SectionId::*;

const DEFAULT_SECTIONS: &[SectionId] = &SectionId::ALL;
const PROFESSIONAL_MODERN_SECTIONS: &[SectionId] = &[
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
];
const SALES_PROFESSIONAL_SECTIONS: &[SectionId] = &[
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Achievements,
    Certifications,
    Languages,
];
const CLASSIC_ELEGANCE_SECTIONS: &[SectionId] = SALES_PROFESSIONAL_SECTIONS;
const MODERN_PROFILE_SECTIONS: &[SectionId] = &[
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Achievements,
    Languages,
];
const LEXINGTON_SECTIONS: &[SectionId] = &[
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Achievements,
    Certifications,
    Languages,
    PersonalLinks,
];

impl TemplateKind {
    pub const ALL: [TemplateKind; 6] = [
        TemplateKind::Default,
        TemplateKind::ProfessionalModern,
        TemplateKind::SalesProfessional,
        TemplateKind::ClassicElegance,
        TemplateKind::ModernProfile,
        TemplateKind::Lexington,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Default => "DefaultTemplate",
            TemplateKind::ProfessionalModern => "ProfessionalModernTemplate",
            TemplateKind::SalesProfessional => "SalesProfessionalTemplate",
            TemplateKind::ClassicElegance => "ClassicEleganceTemplate",
            TemplateKind::ModernProfile => "ModernProfileTemplate",
            TemplateKind::Lexington => "LexingtonResumeTemplate",
        }
    }

    /// The sections this template can render. Visibility is clamped to this set.
    pub fn capabilities(&self) -> &'static [SectionId] {
        match self {
            TemplateKind::Default => DEFAULT_SECTIONS,
            TemplateKind::ProfessionalModern => PROFESSIONAL_MODERN_SECTIONS,
            TemplateKind::SalesProfessional => SALES_PROFESSIONAL_SECTIONS,
            TemplateKind::ClassicElegance => CLASSIC_ELEGANCE_SECTIONS,
            TemplateKind::ModernProfile => MODERN_PROFILE_SECTIONS,
            TemplateKind::Lexington => LEXINGTON_SECTIONS,
        }
    }

    pub fn supports(&self, id: SectionId) -> bool {
        self.capabilities().contains(&id)
    }

    /// Theme colors offered by the template picker; the first is the template default.
    pub fn palette(&self) -> &'static [&'static str] {
        match self {
            TemplateKind::Default => &["#0057D9", "#1F2937", "#0F766E", "#B91C1C"],
            TemplateKind::ProfessionalModern => &["#1E3A8A", "#0057D9", "#374151", "#065F46"],
            TemplateKind::SalesProfessional => &["#C2410C", "#0057D9", "#7C3AED", "#111827"],
            TemplateKind::ClassicElegance => &["#1F2937", "#7F1D1D", "#1E3A8A", "#14532D"],
            TemplateKind::ModernProfile => &["#0E7490", "#0057D9", "#9D174D", "#3F3F46"],
            TemplateKind::Lexington => &["#111827", "#0057D9", "#92400E", "#4C1D95"],
        }
    }

    /// Lenient lookup for rendering: unknown or blank names use the default template.
    pub fn resolve(name: &str) -> TemplateKind {
        name.parse().unwrap_or(TemplateKind::Default)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTemplate(pub String);

impl fmt::Display for UnknownTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown template '{}'", self.0)
    }
}

impl std::error::Error for UnknownTemplate {}

impl FromStr for TemplateKind {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_supports_everything() {
        for id in SectionId::ALL {
            assert!(TemplateKind::Default.supports(id));
        }
    }

    #[test]
    fn test_capability_table() {
        assert!(!TemplateKind::ProfessionalModern.supports(Languages));
        assert!(TemplateKind::ProfessionalModern.supports(Projects));
        assert!(!TemplateKind::ModernProfile.supports(Certifications));
        assert!(TemplateKind::Lexington.supports(PersonalLinks));
        assert!(!TemplateKind::Lexington.supports(Projects));
        assert_eq!(
            TemplateKind::ClassicElegance.capabilities(),
            TemplateKind::SalesProfessional.capabilities()
        );
    }

    #[test]
    fn test_parse_and_resolve() {
        assert_eq!(
            "ModernProfileTemplate".parse::<TemplateKind>().unwrap(),
            TemplateKind::ModernProfile
        );
        assert!("FancyTemplate".parse::<TemplateKind>().is_err());
        assert_eq!(TemplateKind::resolve("FancyTemplate"), TemplateKind::Default);
        assert_eq!(TemplateKind::resolve(""), TemplateKind::Default);
    }

    #[test]
    fn test_serde_uses_template_names() {
        let json = serde_json::to_string(&TemplateKind::Lexington).unwrap();
        assert_eq!(json, "\"LexingtonResumeTemplate\"");
    }
}

use crate::editors::{trim_in_place, Checker, EditorError};
use crate::format::parse_date;
use crate::models::resume::{Achievement, Certification, Language, LanguageProficiency, Skill};
use crate::models::section::SectionId;

const MAX_SKILL_ROWS: usize = 10;
const MAX_ACHIEVEMENTS: usize = 5;
const MAX_ACHIEVEMENT_CHARS: usize = 300;
const MAX_CERTIFICATIONS: usize = 6;
const MAX_LANGUAGES: usize = 10;

/// Each row may hold several comma-separated names; every name becomes its own skill
/// under the row's category.
pub fn validate_skills(rows: Vec<Skill>) -> Result<Vec<Skill>, EditorError> {
    let mut check = Checker::new(SectionId::Skills, "skillList");
    check.max_entries(rows.len(), MAX_SKILL_ROWS);

    let mut skills = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let names: Vec<&str> = row
            .skill_name
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            check.fail(Some(i), "skillName", "is required");
        }
        skills.extend(names.into_iter().map(|name| Skill {
            skill_name: name.to_string(),
            category: row.category,
        }));
    }
    if rows.is_empty() {
        check.fail(None, "", "needs at least one skill");
    }
    check.finish(skills)
}

pub fn validate_achievements(
    mut achievements: Vec<Achievement>,
) -> Result<Vec<Achievement>, EditorError> {
    let mut check = Checker::new(SectionId::Achievements, "achievementList");
    check.max_entries(achievements.len(), MAX_ACHIEVEMENTS);

    for (i, a) in achievements.iter_mut().enumerate() {
        trim_in_place(&mut a.title);
        trim_in_place(&mut a.description);
        check.require(Some(i), "title", &a.title);
        check.require(Some(i), "description", &a.description);
        check.max_chars(Some(i), "description", &a.description, MAX_ACHIEVEMENT_CHARS);
    }
    check.finish(achievements)
}

pub fn validate_certifications(
    mut certifications: Vec<Certification>,
) -> Result<Vec<Certification>, EditorError> {
    let mut check = Checker::new(SectionId::Certifications, "certificationList");
    check.max_entries(certifications.len(), MAX_CERTIFICATIONS);

    for (i, c) in certifications.iter_mut().enumerate() {
        trim_in_place(&mut c.title);
        trim_in_place(&mut c.issuer);
        check.require(Some(i), "title", &c.title);
        check.require(Some(i), "issuer", &c.issuer);
        check.require_some(Some(i), "issueDate", &c.issue_date);

        let issued = c.issue_date.as_deref().and_then(parse_date);
        let expires = c.expiry_date.as_deref().and_then(parse_date);
        if let (Some(issued), Some(expires)) = (issued, expires) {
            if expires <= issued {
                check.fail(Some(i), "expiryDate", "must be after issueDate");
            }
        }
    }
    check.finish(certifications)
}

/// `isNative` is derived from the proficiency so the two never disagree.
pub fn validate_languages(mut languages: Vec<Language>) -> Result<Vec<Language>, EditorError> {
    let mut check = Checker::new(SectionId::Languages, "languageList");
    check.max_entries(languages.len(), MAX_LANGUAGES);

    for (i, lang) in languages.iter_mut().enumerate() {
        trim_in_place(&mut lang.name);
        check.require(Some(i), "name", &lang.name);
        check.require_some(Some(i), "proficiency", &lang.proficiency);
        lang.is_native = lang.proficiency == Some(LanguageProficiency::Native);
    }
    check.finish(languages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SkillCategory;

    fn achievement() -> Achievement {
        Achievement {
            title: "Hackathon winner".into(),
            description: "First place out of 120 teams".into(),
            date: Some("2023-04".into()),
        }
    }

    #[test]
    fn test_skills_expand_comma_names() {
        let out = validate_skills(vec![
            Skill {
                skill_name: "Rust, Go,, Python ".into(),
                category: SkillCategory::Technical,
            },
            Skill {
                skill_name: "Leadership".into(),
                category: SkillCategory::Soft,
            },
        ])
        .unwrap();
        let names: Vec<&str> = out.iter().map(|s| s.skill_name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go", "Python", "Leadership"]);
        assert_eq!(out[3].category, SkillCategory::Soft);
    }

    #[test]
    fn test_skills_reject_blank_rows_and_empty_list() {
        assert!(validate_skills(vec![]).is_err());
        let err = validate_skills(vec![Skill {
            skill_name: " , ".into(),
            category: SkillCategory::Tool,
        }])
        .unwrap_err();
        assert_eq!(err.errors[0].field, "skillList[0].skillName");
    }

    #[test]
    fn test_six_achievements_rejected() {
        assert!(validate_achievements(vec![achievement(); 5]).is_ok());
        let err = validate_achievements(vec![achievement(); 6]).unwrap_err();
        assert!(err.errors[0].message.contains("at most 5"));
    }

    #[test]
    fn test_achievement_description_limit() {
        let mut a = achievement();
        a.description = "x".repeat(301);
        assert!(validate_achievements(vec![a]).is_err());
    }

    #[test]
    fn test_certification_expiry_after_issue() {
        let cert = Certification {
            title: "CKA".into(),
            issuer: "CNCF".into(),
            issue_date: Some("2023-05-01".into()),
            expiry_date: Some("2023-04-01".into()),
            proficiency_level: None,
        };
        assert!(validate_certifications(vec![cert.clone()]).is_err());

        let cert = Certification {
            expiry_date: None,
            ..cert
        };
        assert!(validate_certifications(vec![cert]).is_ok());
    }

    #[test]
    fn test_language_native_flag_follows_proficiency() {
        let out = validate_languages(vec![
            Language {
                name: "Hindi".into(),
                proficiency: Some(LanguageProficiency::Native),
                is_native: false,
            },
            Language {
                name: "English".into(),
                proficiency: Some(LanguageProficiency::Fluent),
                is_native: true,
            },
        ])
        .unwrap();
        assert!(out[0].is_native);
        assert!(!out[1].is_native);
    }

    #[test]
    fn test_language_requires_proficiency() {
        let err = validate_languages(vec![Language {
            name: "French".into(),
            proficiency: None,
            is_native: false,
        }])
        .unwrap_err();
        assert_eq!(err.errors[0].field, "languageList[0].proficiency");
    }
}

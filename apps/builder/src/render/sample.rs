//! Built-in sample resume used by template gallery previews.

use crate::models::lenient::Scalar;
use crate::models::resume::{
    Achievement, Certification, CertificationProficiency, ContactInfo, EducationEntry,
    ExperienceEntry, JobType, Language, LanguageProficiency, PersonalLink, Project,
    ResumeDocument, Skill, SkillCategory,
};
use crate::models::section::SectionId;

fn s(text: &str) -> String {
    text.to_string()
}

pub fn sample_resume() -> ResumeDocument {
    ResumeDocument {
        title: s("Software Developer"),
        summary: Some(s(
            "Backend-leaning software developer who builds dependable web services and \
             the tooling around them. Comfortable owning a feature from schema design to \
             production monitoring.",
        )),
        contact_info: ContactInfo {
            first_name: s("Jane"),
            last_name: s("Smith"),
            email: s("jane.smith@example.com"),
            phone_number: s("9876543210"),
            address: s("12 Lake View Road"),
            city: s("Bengaluru"),
            state: s("Karnataka"),
            country: s("India"),
            postal_code: s("560001"),
            date_of_birth: None,
        },
        experience_list: vec![
            ExperienceEntry {
                job_title: s("Software Engineer"),
                company_name: s("Northwind Systems"),
                job_type: Some(JobType::FullTime),
                start_date: Some(s("2022-01-01")),
                end_date: Some(s("2024-03-01")),
                currently_working: false,
                city: s("Hyderabad"),
                state: s("Telangana"),
                country: s("India"),
                total_years: Some(Scalar::from(2)),
                total_months: Some(Scalar::from(2)),
                description: vec![
                    s("Moved order processing onto an event queue, cutting checkout latency by 35%."),
                    s("Wrote the integration test harness now used by four product teams."),
                    s("Mentored two interns through their first production releases."),
                ],
            },
            ExperienceEntry {
                job_title: s("Software Engineering Intern"),
                company_name: s("Brightline Labs"),
                job_type: Some(JobType::Internship),
                start_date: Some(s("2021-05-01")),
                end_date: Some(s("2021-11-01")),
                currently_working: false,
                city: s("Pune"),
                state: s("Maharashtra"),
                country: s("India"),
                total_years: None,
                total_months: Some(Scalar::from(6)),
                description: vec![s("Automated weekly reporting that previously took a day of manual work.")],
            },
        ],
        education_list: vec![EducationEntry {
            level: s("BACHELORS"),
            degree: s("B.E."),
            stream: s("Information Technology"),
            institute: s("Institute of Engineering"),
            university: s("State Technical University"),
            start_year: Some(Scalar::from(2018)),
            end_year: Some(Scalar::from(2022)),
            currently_studying: false,
            percentage: Some(Scalar::from("8.2")),
        }],
        skill_list: [
            ("Rust", SkillCategory::Technical),
            ("TypeScript", SkillCategory::Technical),
            ("PostgreSQL", SkillCategory::Database),
            ("Docker", SkillCategory::Tool),
            ("Team leadership", SkillCategory::Soft),
        ]
        .into_iter()
        .map(|(name, category)| Skill {
            skill_name: s(name),
            category,
        })
        .collect(),
        achievement_list: vec![
            Achievement {
                title: s("Regional hackathon winner"),
                description: s("Built a support-ticket triage assistant in 24 hours."),
                date: Some(s("2022-08-12")),
            },
            Achievement {
                title: s("Intern of the cohort"),
                description: s("Recognized for the reporting automation project."),
                date: Some(s("2021-11-30")),
            },
        ],
        certification_list: vec![
            Certification {
                title: s("Cloud Practitioner"),
                issuer: s("CloudCert Board"),
                issue_date: Some(s("2023-01-10")),
                expiry_date: Some(s("2026-01-10")),
                proficiency_level: Some(CertificationProficiency::Advanced),
            },
            Certification {
                title: s("Web Accessibility Fundamentals"),
                issuer: s("Open Learning"),
                issue_date: Some(s("2022-07-01")),
                expiry_date: None,
                proficiency_level: Some(CertificationProficiency::Intermediate),
            },
        ],
        language_list: vec![
            Language {
                name: s("English"),
                proficiency: Some(LanguageProficiency::Fluent),
                is_native: false,
            },
            Language {
                name: s("Kannada"),
                proficiency: Some(LanguageProficiency::Native),
                is_native: true,
            },
        ],
        project_list: vec![
            Project {
                title: s("Job Board"),
                tech_stack: s("Rust, Axum, PostgreSQL"),
                github_link: s("https://github.com/janesmith/job-board"),
                live_link: s("https://jobs.example.com"),
                description: vec![
                    s("Role-based job posting and candidate search."),
                    s("Token authentication and an admin dashboard."),
                ],
            },
            Project {
                title: s("Portfolio Site"),
                tech_stack: s("TypeScript, Static hosting"),
                github_link: s("https://github.com/janesmith/portfolio"),
                live_link: String::new(),
                description: vec![s("Personal site with a contact form and dark mode.")],
            },
        ],
        personal_link_list: vec![
            PersonalLink {
                platform: s("LinkedIn"),
                url: s("https://linkedin.com/in/janesmith"),
            },
            PersonalLink {
                platform: s("GitHub"),
                url: s("https://github.com/janesmith"),
            },
        ],
        ..ResumeDocument::default()
    }
}

/// Copies `document`, filling every empty section from the sample resume.
pub fn with_sample_fallback(document: &ResumeDocument) -> ResumeDocument {
    let sample = sample_resume();
    let mut filled = document.clone();
    for id in SectionId::ALL {
        if !filled.has_content(id) {
            filled.replace_section(sample.section(id));
        }
    }
    if filled.title.trim().is_empty() {
        filled.title = sample.title;
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_every_section() {
        let sample = sample_resume();
        for id in SectionId::ALL {
            assert!(sample.has_content(id), "sample is missing {id}");
        }
    }

    #[test]
    fn test_fallback_keeps_user_data() {
        let mut doc = ResumeDocument::default();
        doc.summary = Some("Mine".into());
        let filled = with_sample_fallback(&doc);
        assert_eq!(filled.summary.as_deref(), Some("Mine"));
        assert_eq!(filled.contact_info.first_name, "Jane");
        assert_eq!(filled.template_name, doc.template_name);
    }
}

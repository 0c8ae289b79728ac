//! Section content builders shared by the templates.
//!
//! Each builder formats one record the way the templates show it; templates pick
//! the builders and the arrangement.

use crate::format::{self, dates, display_bullets, join_present, sentence_case};
use crate::models::resume::{
    Achievement, Certification, ContactInfo, EducationEntry, ExperienceEntry, Language,
    PersonalLink, Project, ResumeDocument, Skill, SkillCategory,
};
use crate::render::model::{Block, Entry, Span};

pub const PIPE: &str = " | ";
const EN_DASH: &str = " – ";
const EM_DASH: &str = " — ";

// ────────────────────────────────────────────────────────────────────────────
// Contact
// ────────────────────────────────────────────────────────────────────────────

/// Phone, email, links and location, in that order, blanks skipped.
pub fn contact_spans(contact: &ContactInfo, links: &[PersonalLink]) -> Vec<Span> {
    let mut spans = Vec::new();
    for value in [&contact.phone_number, &contact.email] {
        if !value.trim().is_empty() {
            spans.push(Span::plain(value.trim()));
        }
    }
    spans.extend(links.iter().filter_map(link_span));
    let location = format::location(&contact.city, &contact.state, &contact.country);
    if !location.is_empty() {
        spans.push(Span::plain(location));
    }
    spans
}

/// Contact details as one block per line, for templates that list them in a column.
pub fn contact_blocks(contact: &ContactInfo) -> Vec<Block> {
    let location = format::location(&contact.city, &contact.state, &contact.country);
    let address = join_present(
        [
            contact.address.as_str(),
            location.as_str(),
            contact.postal_code.as_str(),
        ],
        ", ",
    );
    [
        contact.phone_number.trim(),
        contact.email.trim(),
        address.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .map(Block::text)
    .collect()
}

/// Link label falls back to the URL host when the platform is blank.
pub fn link_span(link: &PersonalLink) -> Option<Span> {
    let url = link.url.trim();
    if url.is_empty() {
        return None;
    }
    let label = if link.platform.trim().is_empty() {
        url_host(url).to_string()
    } else {
        link.platform.trim().to_string()
    };
    Some(Span::link(label, url))
}

fn url_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

pub fn link_blocks(links: &[PersonalLink]) -> Vec<Block> {
    links
        .iter()
        .filter_map(|link| {
            let span = link_span(link)?;
            let url = link.url.trim().to_string();
            Some(Block::Paragraph {
                spans: vec![Span::strong(format!("{}: ", span.text)), Span::link(url.clone(), url)],
            })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

pub fn summary_blocks(document: &ResumeDocument) -> Vec<Block> {
    document
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| vec![Block::text(s)])
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Experience & projects
// ────────────────────────────────────────────────────────────────────────────

pub fn experience_range(e: &ExperienceEntry) -> String {
    dates::date_range(
        e.start_date.as_deref(),
        e.end_date.as_deref(),
        e.currently_working,
    )
}

pub fn experience_location(e: &ExperienceEntry) -> String {
    format::location(&e.city, &e.state, &e.country)
}

/// `jobTitle | companyName | location | dates | 2y 3m` on one line.
pub fn experience_one_line(e: &ExperienceEntry) -> Entry {
    let role = join_present([e.job_title.as_str(), e.company_name.as_str()], PIPE);
    let mut title = vec![Span::strong(role)];
    let duration = dates::duration_label(e.total_years.as_ref(), e.total_months.as_ref());
    let rest = join_present(
        [
            experience_location(e).as_str(),
            experience_range(e).as_str(),
            duration.as_deref().unwrap_or(""),
        ],
        PIPE,
    );
    if !rest.is_empty() {
        title.push(Span::plain(format!("{PIPE}{rest}")));
    }
    Entry {
        title,
        bullets: display_bullets(&e.description),
        ..Default::default()
    }
}

/// Title line with dates aside, company and location underneath.
pub fn experience_stacked(e: &ExperienceEntry) -> Entry {
    let range = experience_range(e);
    let subtitle = join_present(
        [e.company_name.as_str(), experience_location(e).as_str()],
        PIPE,
    );
    Entry {
        title: vec![Span::strong(e.job_title.trim())],
        subtitle: if subtitle.is_empty() {
            Vec::new()
        } else {
            vec![Span::emphasis(subtitle)]
        },
        aside: Some(range).filter(|r| !r.is_empty()),
        bullets: display_bullets(&e.description),
    }
}

pub fn project_entry(p: &Project) -> Entry {
    let mut subtitle = Vec::new();
    if !p.tech_stack.trim().is_empty() {
        subtitle.push(Span::muted(p.tech_stack.trim()));
    }
    for (label, url) in [("GitHub", &p.github_link), ("Live", &p.live_link)] {
        if !url.trim().is_empty() {
            if !subtitle.is_empty() {
                subtitle.push(Span::plain(PIPE));
            }
            subtitle.push(Span::link(label, url.trim()));
        }
    }
    Entry {
        title: vec![Span::strong(p.title.trim())],
        subtitle,
        aside: None,
        bullets: display_bullets(&p.description),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn education_range(e: &EducationEntry) -> String {
    dates::year_range(e.start_year.as_ref(), e.end_year.as_ref(), e.currently_studying)
}

pub fn education_score(e: &EducationEntry) -> Option<String> {
    e.percentage.as_ref().map(format::format_score)
}

/// `Bachelor's in Computer Science` style credential text.
pub fn education_credential(e: &EducationEntry) -> String {
    let degree = match (e.degree.trim(), e.stream.trim()) {
        ("", "") => String::new(),
        (degree, "") => degree.to_string(),
        ("", stream) => stream.to_string(),
        (degree, stream) => format!("{degree} in {stream}"),
    };
    let level = format::level_label(e.level.trim());
    join_present([level.as_str(), degree.as_str()], EN_DASH)
}

/// `label – degree in stream | institute | university | 2018 - 2022 | 8.2 CGPA`
pub fn education_line(e: &EducationEntry) -> String {
    let score = education_score(e).unwrap_or_default();
    join_present(
        [
            education_credential(e).as_str(),
            e.institute.as_str(),
            e.university.as_str(),
            education_range(e).as_str(),
            score.as_str(),
        ],
        PIPE,
    )
}

pub fn education_entry(e: &EducationEntry) -> Entry {
    let score = education_score(e).unwrap_or_default();
    let place = join_present([e.institute.as_str(), e.university.as_str()], ", ");
    let subtitle = join_present([place.as_str(), score.as_str()], PIPE);
    Entry {
        title: vec![Span::strong(education_credential(e))],
        subtitle: if subtitle.is_empty() {
            Vec::new()
        } else {
            vec![Span::emphasis(subtitle)]
        },
        aside: Some(education_range(e)).filter(|r| !r.is_empty()),
        bullets: Vec::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lists
// ────────────────────────────────────────────────────────────────────────────

pub fn skill_names(skills: &[Skill]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.skill_name.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// One `Category: a, b, c` paragraph per category, in first-seen order.
pub fn skills_by_category(skills: &[Skill]) -> Vec<Block> {
    let mut groups: Vec<(SkillCategory, Vec<String>)> = Vec::new();
    for skill in skills {
        let name = skill.skill_name.trim();
        if name.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|(c, _)| *c == skill.category) {
            Some((_, names)) => names.push(name.to_string()),
            None => groups.push((skill.category, vec![name.to_string()])),
        }
    }
    groups
        .into_iter()
        .map(|(category, names)| Block::Paragraph {
            spans: vec![
                Span::strong(format!("{}: ", category_label(category))),
                Span::plain(names.join(", ")),
            ],
        })
        .collect()
}

pub fn category_label(category: SkillCategory) -> String {
    let code = serde_json::to_value(category)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    sentence_case(&code)
}

/// `English (Fluent)`; the proficiency is omitted when unknown.
pub fn language_item(l: &Language) -> String {
    let proficiency = l
        .proficiency
        .and_then(|p| serde_json::to_value(p).ok())
        .and_then(|v| v.as_str().map(sentence_case));
    match proficiency {
        Some(p) => format!("{} ({p})", l.name.trim()),
        None => l.name.trim().to_string(),
    }
}

pub fn language_names(languages: &[Language]) -> Vec<String> {
    languages
        .iter()
        .filter(|l| !l.name.trim().is_empty())
        .map(language_item)
        .collect()
}

/// `title — description | Mar 2023`
pub fn achievement_line(a: &Achievement) -> String {
    let head = join_present([a.title.as_str(), a.description.as_str()], EM_DASH);
    let date = a.date.as_deref().map(dates::month_year).unwrap_or_default();
    join_present([head.as_str(), date.as_str()], PIPE)
}

pub fn achievement_lines(achievements: &[Achievement]) -> Vec<String> {
    achievements
        .iter()
        .map(achievement_line)
        .filter(|l| !l.is_empty())
        .collect()
}

/// `title – issuer | May 2023 - No Expiry | Level: Advanced`
pub fn certification_line(c: &Certification) -> String {
    let head = join_present([c.title.as_str(), c.issuer.as_str()], EN_DASH);
    let issued = c.issue_date.as_deref().map(dates::month_year).unwrap_or_default();
    let expires = c
        .expiry_date
        .as_deref()
        .map(dates::month_year)
        .unwrap_or_else(|| "No Expiry".to_string());
    let validity = if issued.is_empty() {
        String::new()
    } else {
        format!("{issued} - {expires}")
    };
    let level = c
        .proficiency_level
        .and_then(|p| serde_json::to_value(p).ok())
        .and_then(|v| v.as_str().map(|s| format!("Level: {}", sentence_case(s))))
        .unwrap_or_default();
    join_present([head.as_str(), validity.as_str(), level.as_str()], PIPE)
}

pub fn certification_lines(certifications: &[Certification]) -> Vec<String> {
    certifications
        .iter()
        .map(certification_line)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lenient::Scalar;
    use crate::models::resume::{CertificationProficiency, LanguageProficiency};

    #[test]
    fn test_experience_one_line_format() {
        let e = ExperienceEntry {
            job_title: "Engineer".into(),
            company_name: "Acme".into(),
            city: "Pune".into(),
            country: "India".into(),
            start_date: Some("2022-01".into()),
            end_date: Some("2024-03".into()),
            total_years: Some(Scalar::from(2)),
            total_months: Some(Scalar::from(2)),
            description: vec!["a".into(), "".into(), "b".into(), "c".into(), "d".into()],
            ..Default::default()
        };
        let entry = experience_one_line(&e);
        assert_eq!(
            crate::render::model::spans_text(&entry.title),
            "Engineer | Acme | Pune, India | Jan 2022 - Mar 2024 | 2y 2m"
        );
        assert_eq!(entry.bullets, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_education_line_format() {
        let e = EducationEntry {
            level: "BACHELORS".into(),
            degree: "B.Tech".into(),
            stream: "Computer Science".into(),
            institute: "College of Engineering".into(),
            university: "State University".into(),
            start_year: Some(Scalar::from(2018)),
            end_year: Some(Scalar::from(2022)),
            percentage: Some(Scalar::from("8.2")),
            ..Default::default()
        };
        assert_eq!(
            education_line(&e),
            "Bachelor's – B.Tech in Computer Science | College of Engineering | State University | 2018 - 2022 | 8.2 CGPA"
        );
    }

    #[test]
    fn test_certification_line_format() {
        let c = Certification {
            title: "CKA".into(),
            issuer: "CNCF".into(),
            issue_date: Some("2023-05-01".into()),
            expiry_date: None,
            proficiency_level: Some(CertificationProficiency::Advanced),
        };
        assert_eq!(
            certification_line(&c),
            "CKA – CNCF | May 2023 - No Expiry | Level: Advanced"
        );
    }

    #[test]
    fn test_achievement_line_format() {
        let a = Achievement {
            title: "Hackathon".into(),
            description: "First place".into(),
            date: Some("2023-04".into()),
        };
        assert_eq!(achievement_line(&a), "Hackathon — First place | Apr 2023");
    }

    #[test]
    fn test_language_item_sentence_case() {
        let l = Language {
            name: "English".into(),
            proficiency: Some(LanguageProficiency::Fluent),
            is_native: false,
        };
        assert_eq!(language_item(&l), "English (Fluent)");
    }

    #[test]
    fn test_skills_grouped_in_first_seen_order() {
        let skills = vec![
            Skill {
                skill_name: "Rust".into(),
                category: SkillCategory::Technical,
            },
            Skill {
                skill_name: "Jira".into(),
                category: SkillCategory::Tool,
            },
            Skill {
                skill_name: "Go".into(),
                category: SkillCategory::Technical,
            },
        ];
        let blocks = skills_by_category(&skills);
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::Paragraph { spans } => {
                assert_eq!(crate::render::model::spans_text(spans), "Technical: Rust, Go")
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn test_contact_spans_and_link_fallback() {
        let contact = ContactInfo {
            email: "jane@example.com".into(),
            phone_number: "9876543210".into(),
            city: "Pune".into(),
            ..Default::default()
        };
        let links = vec![PersonalLink {
            platform: "".into(),
            url: "https://github.com/jane".into(),
        }];
        let spans = contact_spans(&contact, &links);
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["9876543210", "jane@example.com", "github.com", "Pune"]);
        assert_eq!(spans[2].href.as_deref(), Some("https://github.com/jane"));
    }
}

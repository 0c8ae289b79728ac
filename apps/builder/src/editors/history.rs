use crate::editors::{clean_bullets, trim_in_place, Checker, EditorError};
use crate::format::parse_date;
use crate::models::resume::{EducationEntry, EducationLevel, ExperienceEntry, Project};
use crate::models::section::SectionId;

const MAX_EXPERIENCE: usize = 3;
const MAX_EXPERIENCE_BULLET_CHARS: usize = 450;
const MAX_EDUCATION: usize = 4;
const MAX_PROJECTS: usize = 3;
const MAX_PROJECT_BULLET_CHARS: usize = 150;
const MAX_BULLETS: usize = 3;
const MAX_DESCRIPTION_WORDS: usize = 60;

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

fn experience_is_blank(e: &ExperienceEntry) -> bool {
    [&e.job_title, &e.company_name, &e.city, &e.state, &e.country]
        .iter()
        .all(|s| s.trim().is_empty())
        && e.job_type.is_none()
        && e.start_date.is_none()
        && e.end_date.is_none()
        && !e.currently_working
        && e.total_years.is_none()
        && e.total_months.is_none()
        && e.description.iter().all(|b| b.trim().is_empty())
}

pub fn validate_experience(
    entries: Vec<ExperienceEntry>,
) -> Result<Vec<ExperienceEntry>, EditorError> {
    let mut entries: Vec<ExperienceEntry> = entries
        .into_iter()
        .filter(|e| !experience_is_blank(e))
        .collect();

    let mut check = Checker::new(SectionId::Experience, "experienceList");
    check.max_entries(entries.len(), MAX_EXPERIENCE);

    for (i, entry) in entries.iter_mut().enumerate() {
        trim_in_place(&mut entry.job_title);
        trim_in_place(&mut entry.company_name);
        entry.description = clean_bullets(std::mem::take(&mut entry.description));

        check.require(Some(i), "jobTitle", &entry.job_title);
        check.require(Some(i), "companyName", &entry.company_name);
        check.require_some(Some(i), "jobType", &entry.job_type);
        check.require_some(Some(i), "startDate", &entry.start_date);

        if entry.currently_working {
            entry.end_date = None;
        } else {
            check.require_some(Some(i), "endDate", &entry.end_date);
        }

        let start = entry.start_date.as_deref().and_then(parse_date);
        let end = entry.end_date.as_deref().and_then(parse_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                check.fail(Some(i), "endDate", "must not be before startDate");
            }
        }

        check.bullets(
            i,
            &entry.description,
            MAX_BULLETS,
            MAX_EXPERIENCE_BULLET_CHARS,
            MAX_DESCRIPTION_WORDS,
        );
    }
    check.finish(entries)
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

fn education_is_blank(e: &EducationEntry) -> bool {
    [&e.level, &e.degree, &e.stream, &e.institute, &e.university]
        .iter()
        .all(|s| s.trim().is_empty())
        && e.start_year.is_none()
        && e.end_year.is_none()
        && e.percentage.is_none()
        && !e.currently_studying
}

pub fn validate_education(entries: Vec<EducationEntry>) -> Result<Vec<EducationEntry>, EditorError> {
    let mut entries: Vec<EducationEntry> = entries
        .into_iter()
        .filter(|e| !education_is_blank(e))
        .collect();

    let mut check = Checker::new(SectionId::Education, "educationList");
    check.max_entries(entries.len(), MAX_EDUCATION);

    for (i, entry) in entries.iter_mut().enumerate() {
        for field in [
            &mut entry.degree,
            &mut entry.stream,
            &mut entry.institute,
            &mut entry.university,
        ] {
            trim_in_place(field);
        }

        if entry.level.trim().is_empty() {
            check.fail(Some(i), "level", "is required");
        } else {
            match EducationLevel::parse(&entry.level) {
                Some(level) => entry.level = level.code().to_string(),
                None => check.fail(Some(i), "level", format!("'{}' is not a known level", entry.level)),
            }
        }
        check.require(Some(i), "university", &entry.university);
        check.require_some(Some(i), "startYear", &entry.start_year);

        if entry.currently_studying {
            entry.end_year = None;
        } else {
            check.require_some(Some(i), "endYear", &entry.end_year);
        }
    }
    check.finish(entries)
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

fn project_is_blank(p: &Project) -> bool {
    [&p.title, &p.tech_stack, &p.github_link, &p.live_link]
        .iter()
        .all(|s| s.trim().is_empty())
        && p.description.iter().all(|b| b.trim().is_empty())
}

pub fn validate_projects(projects: Vec<Project>) -> Result<Vec<Project>, EditorError> {
    let mut projects: Vec<Project> = projects
        .into_iter()
        .filter(|p| !project_is_blank(p))
        .collect();

    let mut check = Checker::new(SectionId::Projects, "projectList");
    check.max_entries(projects.len(), MAX_PROJECTS);

    for (i, project) in projects.iter_mut().enumerate() {
        for field in [
            &mut project.title,
            &mut project.tech_stack,
            &mut project.github_link,
            &mut project.live_link,
        ] {
            trim_in_place(field);
        }
        project.description = clean_bullets(std::mem::take(&mut project.description));

        check.require(Some(i), "title", &project.title);
        if project.description.is_empty() {
            check.fail(Some(i), "description", "needs at least one bullet point");
        }
        check.bullets(
            i,
            &project.description,
            MAX_BULLETS,
            MAX_PROJECT_BULLET_CHARS,
            MAX_DESCRIPTION_WORDS,
        );
    }
    check.finish(projects)
}

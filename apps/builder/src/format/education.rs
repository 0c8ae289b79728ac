use crate::models::lenient::Scalar;
use crate::models::resume::EducationLevel;

/// Scores at or below this are read as a CGPA, anything above as a percentage.
const CGPA_CEILING: f64 = 10.0;

/// Display label for a stored level code; unknown codes pass through unchanged.
pub fn level_label(raw: &str) -> String {
    match EducationLevel::parse(raw) {
        Some(level) => level_display(level).to_string(),
        None => raw.to_string(),
    }
}

pub fn level_display(level: EducationLevel) -> &'static str {
    match level {
        EducationLevel::Tenth => "X",
        EducationLevel::Twelfth => "XII",
        EducationLevel::Diploma => "Diploma",
        EducationLevel::Bachelors => "Bachelor's",
        EducationLevel::Masters => "Master's",
        EducationLevel::Mba => "MBA",
        EducationLevel::Phd => "Ph.D.",
        EducationLevel::PostDoctorate => "Post-Doc",
    }
}

/// `8.2` → `8.2 CGPA`, `85` → `85%`. Non-numeric scores are shown as entered.
pub fn format_score(score: &Scalar) -> String {
    let shown = score.to_string();
    match score.as_f64() {
        Some(value) if value <= CGPA_CEILING => format!("{shown} CGPA"),
        Some(_) => format!("{shown}%"),
        None => shown,
    }
}

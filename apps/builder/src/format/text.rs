use crate::models::resume::ContactInfo;

pub const MAX_DISPLAY_BULLETS: usize = 3;
pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Non-blank bullets, trimmed, capped at [`MAX_DISPLAY_BULLETS`].
pub fn display_bullets(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .take(MAX_DISPLAY_BULLETS)
        .map(str::to_string)
        .collect()
}

/// `FLUENT` → `Fluent`, `full time` → `Full time`.
pub fn sentence_case(raw: &str) -> String {
    let lower = raw.trim().replace('_', " ").to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Joins the non-blank parts with `sep`.
pub fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// `city, state, country` with blanks skipped.
pub fn location(city: &str, state: &str, country: &str) -> String {
    join_present([city, state, country], ", ")
}

/// First and last name, or [`NAME_PLACEHOLDER`] when both are blank.
pub fn full_name(contact: &ContactInfo) -> String {
    let name = join_present([contact.first_name.as_str(), contact.last_name.as_str()], " ");
    if name.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        name
    }
}

pub fn word_count(parts: &[String]) -> usize {
    parts.iter().map(|p| p.split_whitespace().count()).sum()
}

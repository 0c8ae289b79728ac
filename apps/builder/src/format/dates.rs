use chrono::{DateTime, NaiveDate};

use crate::models::lenient::Scalar;

pub const PRESENT: &str = "Present";
const RANGE_SEPARATOR: &str = " - ";

/// Parses the date shapes the builder stores: `YYYY-MM-DD`, `YYYY-MM`, and
/// RFC 3339 / ISO timestamps (only the calendar date is kept).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    // Zone-less timestamps such as `2022-01-15T00:00:00.000`
    match (s.get(..10), s.as_bytes().get(10)) {
        (Some(day), Some(b'T')) => NaiveDate::parse_from_str(day, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// `2022-01-15` → `Jan 2022`. Unparseable input passes through trimmed.
pub fn month_year(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%b %Y").to_string(),
        None => raw.trim().to_string(),
    }
}

/// Joins the formatted start and end of a dated entry with ` - `.
///
/// A set `current` flag replaces the end with `Present`; missing parts are
/// omitted, so a lone start renders without a separator.
pub fn date_range(start: Option<&str>, end: Option<&str>, current: bool) -> String {
    let start = start.map(month_year).filter(|s| !s.is_empty());
    let end = if current {
        Some(PRESENT.to_string())
    } else {
        end.map(month_year).filter(|s| !s.is_empty())
    };
    join_range(start, end)
}

/// Year-only variant used by education entries (`2018 - 2022`, `2021 - Present`).
pub fn year_range(start: Option<&Scalar>, end: Option<&Scalar>, current: bool) -> String {
    let start = start.map(Scalar::to_string).filter(|s| !s.is_empty());
    let end = if current {
        Some(PRESENT.to_string())
    } else {
        end.map(Scalar::to_string).filter(|s| !s.is_empty())
    };
    join_range(start, end)
}

fn join_range(start: Option<String>, end: Option<String>) -> String {
    [start, end]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(RANGE_SEPARATOR)
}

/// `(2, 3)` → `2y 3m`; zero parts are dropped and `None` means nothing to show.
pub fn duration_label(years: Option<&Scalar>, months: Option<&Scalar>) -> Option<String> {
    let whole = |v: Option<&Scalar>| {
        v.and_then(Scalar::as_f64)
            .filter(|n| n.is_finite() && *n >= 1.0)
            .map(|n| n.trunc() as u32)
    };
    let parts: Vec<String> = [
        whole(years).map(|y| format!("{y}y")),
        whole(months).map(|m| format!("{m}m")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_stored_shapes() {
        let jan = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(parse_date("2022-01"), Some(jan));
        assert_eq!(parse_date("2022-01-01"), Some(jan));
        assert_eq!(parse_date("2022-01-01T10:00:00Z"), Some(jan));
        assert_eq!(parse_date("2022-01-01T10:00:00.000"), Some(jan));
        assert_eq!(parse_date("last spring"), None);
        assert_eq!(parse_date("  "), None);
    }

    #[test]
    fn test_month_year_passes_through_unparseable() {
        assert_eq!(month_year("2024-03-09"), "Mar 2024");
        assert_eq!(month_year(" Summer 2020 "), "Summer 2020");
    }

    #[test]
    fn test_date_range_closed() {
        assert_eq!(
            date_range(Some("2022-01"), Some("2024-03"), false),
            "Jan 2022 - Mar 2024"
        );
    }

    #[test]
    fn test_date_range_current_ignores_end() {
        assert_eq!(
            date_range(Some("2022-01"), Some("2024-03"), true),
            "Jan 2022 - Present"
        );
    }

    #[test]
    fn test_date_range_missing_parts_omitted() {
        assert_eq!(date_range(Some("2022-01"), None, false), "Jan 2022");
        assert_eq!(date_range(None, Some("2024-03"), false), "Mar 2024");
        assert_eq!(date_range(None, None, false), "");
        assert_eq!(date_range(None, None, true), "Present");
    }

    #[test]
    fn test_year_range() {
        let start = Scalar::from(2018);
        let end = Scalar::from("2022");
        assert_eq!(year_range(Some(&start), Some(&end), false), "2018 - 2022");
        assert_eq!(year_range(Some(&start), None, true), "2018 - Present");
    }

    #[test]
    fn test_duration_label() {
        let two = Scalar::from(2);
        let three = Scalar::from("3");
        let zero = Scalar::from(0);
        assert_eq!(
            duration_label(Some(&two), Some(&three)).as_deref(),
            Some("2y 3m")
        );
        assert_eq!(duration_label(Some(&zero), Some(&three)).as_deref(), Some("3m"));
        assert_eq!(duration_label(None, Some(&zero)), None);
    }
}

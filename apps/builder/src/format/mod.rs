//! Pure display helpers shared by every template and the editors.

pub mod dates;
pub mod education;
pub mod text;

pub use dates::{date_range, duration_label, month_year, parse_date, year_range};
pub use education::{format_score, level_label};
pub use text::{display_bullets, full_name, join_present, location, sentence_case};

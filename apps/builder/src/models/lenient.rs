//! Tolerant deserializers for partially filled builder input.
//!
//! Form submissions and persisted versions disagree about shapes: years arrive as
//! numbers or strings, bullet descriptions as arrays or as one newline/`•`-separated
//! string, and absent lists as `null`. These helpers accept every observed shape and
//! normalize it without losing the original scalar representation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A year or score exactly as submitted (number or text), so re-serialization
/// keeps the caller's format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Number(_) => false,
            Scalar::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    List(Vec<Option<String>>),
}

/// Splits a free-text description into bullets on newlines and `•` markers.
pub fn split_bullets(text: &str) -> Vec<String> {
    text.split(['\n', '•'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `null` → `[]`, `"a\nb"` → `["a", "b"]`, `["a", null]` → `["a"]`.
///
/// Array elements are kept verbatim (including blank ones) so an editor can round-trip
/// an in-progress bullet; only a single-string description is split.
pub fn bullets<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(TextOrList::Text(text)) => split_bullets(&text),
        Some(TextOrList::List(items)) => items.into_iter().flatten().collect(),
    })
}

/// `null` → `""`, `["a", "b"]` → `"a b"`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrList>::deserialize(deserializer)? {
        None => String::new(),
        Some(TextOrList::Text(text)) => text,
        Some(TextOrList::List(items)) => items
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    })
}

/// `null` → `T::default()`, for collections the backend omits or nulls out.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blank strings become `None`; everything else is kept.
pub fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Like [`non_blank`] for [`Scalar`] values: `""` and `null` are absent.
pub fn scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.filter(|s| !s.is_blank()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "bullets")]
        description: Vec<String>,
        #[serde(default, deserialize_with = "scalar")]
        year: Option<Scalar>,
        #[serde(default, deserialize_with = "text")]
        note: String,
    }

    #[test]
    fn test_bullets_from_single_string() {
        let p: Probe =
            serde_json::from_str(r#"{"description": "Led team\n• Shipped v2 •Cut costs"}"#)
                .unwrap();
        assert_eq!(p.description, vec!["Led team", "Shipped v2", "Cut costs"]);
    }

    #[test]
    fn test_bullets_from_null_and_array() {
        let p: Probe = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert!(p.description.is_empty());
        let p: Probe = serde_json::from_str(r#"{"description": ["a", null, ""]}"#).unwrap();
        assert_eq!(p.description, vec!["a", ""]);
    }

    #[test]
    fn test_scalar_keeps_number_or_text() {
        let p: Probe = serde_json::from_str(r#"{"year": 2018}"#).unwrap();
        assert_eq!(p.year, Some(Scalar::Number(2018.into())));
        assert_eq!(p.year.unwrap().to_string(), "2018");

        let p: Probe = serde_json::from_str(r#"{"year": "8.2"}"#).unwrap();
        assert_eq!(p.year.as_ref().and_then(Scalar::as_f64), Some(8.2));

        let p: Probe = serde_json::from_str(r#"{"year": ""}"#).unwrap();
        assert!(p.year.is_none());
    }

    #[test]
    fn test_text_joins_list() {
        let p: Probe = serde_json::from_str(r#"{"note": ["Won", " the cup "]}"#).unwrap();
        assert_eq!(p.note, "Won the cup");
    }
}

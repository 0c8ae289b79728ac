//! Structured page model produced by every template.
//!
//! Templates decide arrangement and wording; exporters decide geometry. Both sides
//! only meet here, so the HTML preview and every file format show the same content.

use serde::Serialize;

use crate::layout::TemplateKind;
use crate::models::section::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    #[default]
    Plain,
    Strong,
    Emphasis,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::Plain,
            href: None,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            style: SpanStyle::Strong,
            ..Self::plain(text)
        }
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self {
            style: SpanStyle::Emphasis,
            ..Self::plain(text)
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            style: SpanStyle::Muted,
            ..Self::plain(text)
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::plain(text)
        }
    }
}

/// Plain text of a span run, as a single line.
pub fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// A dated item: job, degree, project, certification.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Entry {
    pub title: Vec<Span>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtitle: Vec<Span>,
    /// Right-aligned detail, usually the date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aside: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph { spans: Vec<Span> },
    Bullets { items: Vec<String> },
    /// Short items shown on one wrapped line, e.g. skills.
    Inline { items: Vec<String>, separator: String },
    Entry(Entry),
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Paragraph {
            spans: vec![Span::plain(text)],
        }
    }

    pub fn inline(items: Vec<String>, separator: &str) -> Self {
        Block::Inline {
            items,
            separator: separator.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub id: SectionId,
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionRole {
    Main,
    Sidebar,
}

/// One column of the page. Widths of all regions sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub role: RegionRole,
    pub width: f32,
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAlign {
    #[default]
    Center,
    Left,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Header {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Contact details shown under the name, already joined per item.
    pub contact: Vec<Span>,
    pub align: HeaderAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedResume {
    pub template: TemplateKind,
    pub theme_color: String,
    pub title: String,
    pub header: Header,
    pub regions: Vec<Region>,
}

impl RenderedResume {
    /// Section ids in the order they appear, region by region.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.regions
            .iter()
            .flat_map(|r| r.sections.iter().map(|s| s.id))
            .collect()
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionBlock> {
        self.regions
            .iter()
            .flat_map(|r| r.sections.iter())
            .find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serializes_with_type_tag() {
        let json = serde_json::to_value(Block::inline(vec!["Rust".into()], ", ")).unwrap();
        assert_eq!(json["type"], "inline");
        assert_eq!(json["separator"], ", ");
    }

    #[test]
    fn test_spans_text_concatenates() {
        let spans = vec![Span::strong("Dev"), Span::plain(" | "), Span::muted("Acme")];
        assert_eq!(spans_text(&spans), "Dev | Acme");
    }
}

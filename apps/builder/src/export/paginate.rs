//! Fixed-scale page layout shared by the PDF and PNG encoders.
//!
//! Coordinates are points on an A4 portrait page measured from the top-left.
//! Every rendered block is placed as one unit: a block that does not fit in the
//! remaining column height moves whole to the next page. A section heading is
//! kept together with its first block.

use crate::export::metrics::metrics;
use crate::render::model::{spans_text, Block, Entry, Header, HeaderAlign, Span, SpanStyle};
use crate::render::RenderedResume;

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
/// Content inset inside the zero-margin page.
const INSET: f32 = 36.0;
const COLUMN_GAP: f32 = 14.0;
const LEADING: f32 = 1.3;

const NAME_SIZE: f32 = 20.0;
const HEADLINE_SIZE: f32 = 11.0;
const CONTACT_SIZE: f32 = 9.0;
const HEADING_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 10.5;
const BODY_SIZE: f32 = 9.5;
const DETAIL_SIZE: f32 = 9.0;
const BULLET_INDENT: f32 = 10.0;
const BULLET: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const TEXT: Rgb = Rgb(0.12, 0.16, 0.22);
    pub const MUTED: Rgb = Rgb(0.42, 0.45, 0.50);

    /// `#RRGGBB` or `#RGB`; anything else is `None`.
    pub fn parse_hex(raw: &str) -> Option<Rgb> {
        let hex = raw.trim().strip_prefix('#')?;
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| {
            u8::from_str_radix(expanded.get(i..i + 2)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.0), byte(self.1), byte(self.2))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text {
        x: f32,
        baseline: f32,
        size: f32,
        bold: bool,
        color: Rgb,
        text: String,
    },
    Rule {
        x: f32,
        y: f32,
        width: f32,
        color: Rgb,
    },
}

impl Mark {
    fn shifted(self, dy: f32) -> Mark {
        match self {
            Mark::Text {
                x,
                baseline,
                size,
                bold,
                color,
                text,
            } => Mark::Text {
                x,
                baseline: baseline + dy,
                size,
                bold,
                color,
                text,
            },
            Mark::Rule { x, y, width, color } => Mark::Rule {
                x,
                y: y + dy,
                width,
                color,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub marks: Vec<Mark>,
}

/// Lays the resume out on as many pages as it needs. Always returns at least one page.
pub fn paginate(resume: &RenderedResume) -> Vec<Page> {
    let theme = Rgb::parse_hex(&resume.theme_color).unwrap_or(Rgb::TEXT);
    let content_width = PAGE_WIDTH - 2.0 * INSET;

    let header = header_unit(&resume.header, theme, INSET, content_width);
    let body_top = INSET + header.height;
    let mut pages = vec![Page {
        marks: header.marks,
    }];

    let columns = resume.regions.len().max(1) as f32;
    let available = content_width - COLUMN_GAP * (columns - 1.0);
    let mut x = INSET;
    for region in &resume.regions {
        let width = available * region.width;
        let mut flow = Flow {
            page: 0,
            y: body_top,
            page_top: body_top,
        };
        for section in &region.sections {
            let mut units = section.blocks.iter().map(|block| block_unit(block, x, width));
            let mut head = heading_unit(&section.heading, theme, x, width);
            if let Some(first) = units.next() {
                head.append(first);
            }
            flow.place(&mut pages, head);
            for unit in units {
                flow.place(&mut pages, unit);
            }
        }
        x += width + COLUMN_GAP;
    }
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Flow
// ────────────────────────────────────────────────────────────────────────────

struct Flow {
    page: usize,
    y: f32,
    page_top: f32,
}

impl Flow {
    fn place(&mut self, pages: &mut Vec<Page>, unit: Unit) {
        let bottom = PAGE_HEIGHT - INSET;
        // An oversized unit at the top of a page is placed anyway.
        if self.y + unit.height > bottom && self.y > self.page_top {
            self.page += 1;
            self.y = INSET;
            self.page_top = INSET;
        }
        while pages.len() <= self.page {
            pages.push(Page::default());
        }
        let dy = self.y;
        pages[self.page]
            .marks
            .extend(unit.marks.into_iter().map(|m| m.shifted(dy)));
        self.y += unit.height;
    }
}

/// A block laid out from y = 0; placed as a whole.
#[derive(Debug, Default)]
struct Unit {
    height: f32,
    marks: Vec<Mark>,
}

impl Unit {
    fn line(&mut self, x: f32, size: f32, bold: bool, color: Rgb, text: impl Into<String>) {
        self.marks.push(Mark::Text {
            x,
            baseline: self.height + size,
            size,
            bold,
            color,
            text: text.into(),
        });
        self.height += size * LEADING;
    }

    fn wrapped(&mut self, x: f32, width: f32, size: f32, bold: bool, color: Rgb, text: &str) {
        for line in metrics(bold).wrap(text, size, width) {
            self.line(x, size, bold, color, line);
        }
    }

    fn bullets(&mut self, x: f32, width: f32, items: &[String]) {
        for item in items {
            let lines = metrics(false).wrap(item, BODY_SIZE, width - BULLET_INDENT);
            for (i, line) in lines.into_iter().enumerate() {
                if i == 0 {
                    self.marks.push(Mark::Text {
                        x,
                        baseline: self.height + BODY_SIZE,
                        size: BODY_SIZE,
                        bold: false,
                        color: Rgb::TEXT,
                        text: BULLET.to_string(),
                    });
                }
                self.line(x + BULLET_INDENT, BODY_SIZE, false, Rgb::TEXT, line);
            }
        }
    }

    fn gap(&mut self, points: f32) {
        self.height += points;
    }

    fn append(&mut self, other: Unit) {
        let dy = self.height;
        self.marks
            .extend(other.marks.into_iter().map(|m| m.shifted(dy)));
        self.height += other.height;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Units
// ────────────────────────────────────────────────────────────────────────────

fn aligned_x(text: &str, size: f32, bold: bool, align: HeaderAlign, x: f32, width: f32) -> f32 {
    match align {
        HeaderAlign::Left => x,
        HeaderAlign::Center => x + ((width - metrics(bold).width_pt(text, size)) / 2.0).max(0.0),
    }
}

fn header_unit(header: &Header, theme: Rgb, x: f32, width: f32) -> Unit {
    let mut unit = Unit::default();
    let name = header.name.trim();
    if !name.is_empty() {
        let nx = aligned_x(name, NAME_SIZE, true, header.align, x, width);
        unit.line(nx, NAME_SIZE, true, theme, name);
    }
    if let Some(headline) = &header.headline {
        let hx = aligned_x(headline, HEADLINE_SIZE, false, header.align, x, width);
        unit.line(hx, HEADLINE_SIZE, false, Rgb::TEXT, headline.as_str());
    }
    let contact = header
        .contact
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    for line in metrics(false).wrap(&contact, CONTACT_SIZE, width) {
        let cx = aligned_x(&line, CONTACT_SIZE, false, header.align, x, width);
        unit.line(cx, CONTACT_SIZE, false, Rgb::MUTED, line);
    }
    unit.gap(4.0);
    unit.marks.push(Mark::Rule {
        x,
        y: unit.height,
        width,
        color: theme,
    });
    unit.gap(10.0);
    unit
}

fn heading_unit(heading: &str, theme: Rgb, x: f32, width: f32) -> Unit {
    let mut unit = Unit::default();
    unit.wrapped(x, width, HEADING_SIZE, true, theme, heading);
    unit.marks.push(Mark::Rule {
        x,
        y: unit.height,
        width,
        color: theme,
    });
    unit.gap(5.0);
    unit
}

fn all_strong(spans: &[Span]) -> bool {
    !spans.is_empty() && spans.iter().all(|s| s.style == SpanStyle::Strong)
}

fn block_unit(block: &Block, x: f32, width: f32) -> Unit {
    let mut unit = Unit::default();
    match block {
        Block::Paragraph { spans } => {
            unit.wrapped(x, width, BODY_SIZE, all_strong(spans), Rgb::TEXT, &spans_text(spans));
        }
        Block::Bullets { items } => unit.bullets(x, width, items),
        Block::Inline { items, separator } => {
            unit.wrapped(x, width, BODY_SIZE, false, Rgb::TEXT, &items.join(separator));
        }
        Block::Entry(entry) => entry_into(&mut unit, entry, x, width),
    }
    unit.gap(4.0);
    unit
}

fn entry_into(unit: &mut Unit, entry: &Entry, x: f32, width: f32) {
    let aside = entry.aside.as_deref().unwrap_or("");
    let aside_width = metrics(false).width_pt(aside, DETAIL_SIZE);
    let title_width = if aside.is_empty() {
        width
    } else {
        (width - aside_width - 6.0).max(width / 2.0)
    };

    let title = spans_text(&entry.title);
    let top = unit.height;
    unit.wrapped(x, title_width, TITLE_SIZE, true, Rgb::TEXT, &title);
    if !aside.is_empty() {
        unit.marks.push(Mark::Text {
            x: x + width - aside_width,
            baseline: top + TITLE_SIZE,
            size: DETAIL_SIZE,
            bold: false,
            color: Rgb::MUTED,
            text: aside.to_string(),
        });
        if unit.height == top {
            unit.height += TITLE_SIZE * LEADING;
        }
    }
    if !entry.subtitle.is_empty() {
        let subtitle = spans_text(&entry.subtitle);
        unit.wrapped(x, width, DETAIL_SIZE, false, Rgb::MUTED, &subtitle);
    }
    unit.bullets(x, width, &entry.bullets);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, TemplateKind};
    use crate::models::resume::ExperienceEntry;
    use crate::render::{render_document, sample::sample_resume, RenderOptions};

    fn text_marks(page: &Page) -> Vec<&str> {
        page.marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#000"), Some(Rgb(0.0, 0.0, 0.0)));
        assert_eq!(Rgb::parse_hex("#0057D9").map(Rgb::to_hex).as_deref(), Some("#0057D9"));
        assert_eq!(Rgb::parse_hex("blue"), None);
    }

    #[test]
    fn test_sample_fits_one_page() {
        let doc = sample_resume();
        let rendered = render_document(&doc, &LayoutConfig::default(), &RenderOptions::default());
        let pages = paginate(&rendered);
        assert_eq!(pages.len(), 1);
        assert!(text_marks(&pages[0]).contains(&"JANE SMITH"));
    }

    #[test]
    fn test_long_resume_breaks_between_blocks() {
        let mut doc = sample_resume();
        let entry = ExperienceEntry {
            job_title: "Engineer".into(),
            company_name: "Acme".into(),
            description: vec!["word ".repeat(55); 3],
            ..Default::default()
        };
        doc.experience_list = vec![entry; 12];
        let rendered = render_document(&doc, &LayoutConfig::default(), &RenderOptions::default());
        let pages = paginate(&rendered);
        assert!(pages.len() > 1);
        for page in &pages {
            for mark in &page.marks {
                if let Mark::Text { baseline, .. } = mark {
                    assert!(*baseline <= PAGE_HEIGHT - INSET + 1.0);
                }
            }
        }
    }

    #[test]
    fn test_two_column_marks_stay_in_their_column() {
        let mut doc = sample_resume();
        doc.template_name = TemplateKind::ProfessionalModern.name().into();
        let rendered = render_document(&doc, &LayoutConfig::default(), &RenderOptions::default());
        let pages = paginate(&rendered);
        let sidebar_right = INSET + (PAGE_WIDTH - 2.0 * INSET - COLUMN_GAP) * 0.34;
        let education = pages[0]
            .marks
            .iter()
            .find_map(|m| match m {
                Mark::Text { x, text, .. } if text == "EDUCATION" => Some(*x),
                _ => None,
            })
            .unwrap();
        assert!(education < sidebar_right);
    }

    #[test]
    fn test_empty_resume_still_has_a_page() {
        let rendered = render_document(
            &Default::default(),
            &LayoutConfig::default(),
            &RenderOptions::default(),
        );
        assert_eq!(paginate(&rendered).len(), 1);
    }
}

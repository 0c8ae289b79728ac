//! HTML markup for a [`RenderedResume`], used by the live and gallery previews.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::render::model::{
    Block, Entry, Header, HeaderAlign, Region, RegionRole, RenderedResume, SectionBlock, Span,
    SpanStyle,
};

/// A4 at 96 dpi.
const PAGE_WIDTH_PX: u32 = 794;
const PAGE_MIN_HEIGHT_PX: u32 = 1123;

pub fn to_html(resume: &RenderedResume) -> String {
    let mut out = String::with_capacity(8 * 1024);
    let color = escape(resume.theme_color.as_str());
    let _ = write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>body{{margin:0;font-family:Helvetica,Arial,sans-serif;color:#1f2937}}\
         .page{{width:{PAGE_WIDTH_PX}px;min-height:{PAGE_MIN_HEIGHT_PX}px;margin:0 auto;box-sizing:border-box;padding:32px}}\
         .regions{{display:flex;gap:20px}}\
         h1{{margin:0;color:{color}}} h2{{color:{color};border-bottom:1px solid {color};font-size:14px;margin:14px 0 6px}}\
         .entry{{break-inside:avoid;margin-bottom:8px}} .entry-head{{display:flex;justify-content:space-between}}\
         .muted{{color:#6b7280}} ul{{margin:4px 0;padding-left:18px}} p{{margin:2px 0}}</style></head><body>",
        escape(resume.title.as_str()),
    );
    let _ = write!(
        out,
        "<div class=\"page\" data-template=\"{}\">",
        resume.template.name()
    );
    write_header(&mut out, &resume.header);
    out.push_str("<div class=\"regions\">");
    for region in &resume.regions {
        write_region(&mut out, region);
    }
    out.push_str("</div></div></body></html>");
    out
}

fn write_header(out: &mut String, header: &Header) {
    let align = match header.align {
        HeaderAlign::Center => "center",
        HeaderAlign::Left => "left",
    };
    let _ = write!(
        out,
        "<header style=\"text-align:{align}\"><h1>{}</h1>",
        escape(header.name.as_str())
    );
    if let Some(headline) = &header.headline {
        let _ = write!(out, "<div class=\"headline\">{}</div>", escape(headline.as_str()));
    }
    if !header.contact.is_empty() {
        out.push_str("<div class=\"contact\">");
        for (i, span) in header.contact.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            write_span(out, span);
        }
        out.push_str("</div>");
    }
    out.push_str("</header>");
}

fn write_region(out: &mut String, region: &Region) {
    let role = match region.role {
        RegionRole::Main => "main",
        RegionRole::Sidebar => "sidebar",
    };
    let _ = write!(
        out,
        "<div class=\"region {role}\" style=\"flex:0 0 {:.1}%\">",
        region.width * 100.0
    );
    for section in &region.sections {
        write_section(out, section);
    }
    out.push_str("</div>");
}

fn write_section(out: &mut String, section: &SectionBlock) {
    let _ = write!(
        out,
        "<section id=\"{}\"><h2>{}</h2>",
        section.id.as_str(),
        escape(section.heading.as_str())
    );
    for block in &section.blocks {
        write_block(out, block);
    }
    out.push_str("</section>");
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph { spans } => {
            out.push_str("<p>");
            write_spans(out, spans);
            out.push_str("</p>");
        }
        Block::Bullets { items } => write_list(out, items),
        Block::Inline { items, separator } => {
            let joined = items.join(separator);
            let _ = write!(out, "<p>{}</p>", escape(joined.as_str()));
        }
        Block::Entry(entry) => write_entry(out, entry),
    }
}

fn write_entry(out: &mut String, entry: &Entry) {
    out.push_str("<div class=\"entry\"><div class=\"entry-head\"><div>");
    write_spans(out, &entry.title);
    out.push_str("</div>");
    if let Some(aside) = &entry.aside {
        let _ = write!(out, "<div class=\"muted\">{}</div>", escape(aside.as_str()));
    }
    out.push_str("</div>");
    if !entry.subtitle.is_empty() {
        out.push_str("<div>");
        write_spans(out, &entry.subtitle);
        out.push_str("</div>");
    }
    write_list(out, &entry.bullets);
    out.push_str("</div>");
}

fn write_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str("<ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape(item.as_str()));
    }
    out.push_str("</ul>");
}

fn write_spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        write_span(out, span);
    }
}

fn write_span(out: &mut String, span: &Span) {
    let text = escape(span.text.as_str());
    let styled = match span.style {
        SpanStyle::Plain => text.into_owned(),
        SpanStyle::Strong => format!("<strong>{text}</strong>"),
        SpanStyle::Emphasis => format!("<em>{text}</em>"),
        SpanStyle::Muted => format!("<span class=\"muted\">{text}</span>"),
    };
    match &span.href {
        Some(href) => {
            let _ = write!(out, "<a href=\"{}\">{styled}</a>", escape(href.as_str()));
        }
        None => out.push_str(&styled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, TemplateKind};
    use crate::models::section::SectionId;
    use crate::render::{render_document, sample::sample_resume, RenderOptions};

    #[test]
    fn test_markup_escapes_user_text() {
        let mut doc = sample_resume();
        doc.summary = Some("Ships <fast> & safe".into());
        let html = to_html(&render_document(&doc, &LayoutConfig::default(), &RenderOptions::default()));
        assert!(html.contains("Ships &lt;fast&gt; &amp; safe"));
        assert!(!html.contains("<fast>"));
    }

    #[test]
    fn test_sections_and_theme_present() {
        let mut doc = sample_resume();
        doc.template_name = TemplateKind::Lexington.name().into();
        doc.theme_color = "#123456".into();
        let html = to_html(&render_document(&doc, &LayoutConfig::default(), &RenderOptions::default()));
        assert!(html.contains("data-template=\"LexingtonResumeTemplate\""));
        assert!(html.contains(&format!("<section id=\"{}\">", SectionId::Experience.as_str())));
        assert!(html.contains("#123456"));
        assert!(html.contains("class=\"region sidebar\""));
    }
}

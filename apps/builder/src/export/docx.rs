//! Minimal WordprocessingML package built from the rendered page model.
//!
//! Regions are written one after another in reading order; Word reflows the text,
//! so only the content and run styling carry over.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::{xml_text, ExportError};
use crate::render::model::{Block, Entry, HeaderAlign, Span, SpanStyle};
use crate::render::RenderedResume;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Font sizes in half-points.
const NAME_SIZE: u32 = 36;
const HEADING_SIZE: u32 = 24;
const BODY_SIZE: u32 = 20;

pub fn render_docx(resume: &RenderedResume) -> Result<Vec<u8>, ExportError> {
    let document = document_xml(resume);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", RELS),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(name, options)
            .map_err(|e| ExportError::Docx(e.to_string()))?;
        zip.write_all(body.as_bytes())
            .map_err(|e| ExportError::Docx(e.to_string()))?;
    }
    let cursor = zip
        .finish()
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Run-level formatting.
#[derive(Default, Clone, Copy)]
struct RunStyle<'a> {
    bold: bool,
    italic: bool,
    size: Option<u32>,
    color: Option<&'a str>,
}

fn run(out: &mut String, text: &str, style: RunStyle<'_>) {
    out.push_str("<w:r>");
    if style.bold || style.italic || style.size.is_some() || style.color.is_some() {
        out.push_str("<w:rPr>");
        if style.bold {
            out.push_str("<w:b/>");
        }
        if style.italic {
            out.push_str("<w:i/>");
        }
        if let Some(color) = style.color {
            out.push_str(&format!("<w:color w:val=\"{color}\"/>"));
        }
        if let Some(size) = style.size {
            out.push_str(&format!("<w:sz w:val=\"{size}\"/>"));
        }
        out.push_str("</w:rPr>");
    }
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&xml_text(text));
    out.push_str("</w:t></w:r>");
}

fn span_style(span: &Span) -> RunStyle<'static> {
    RunStyle {
        bold: span.style == SpanStyle::Strong,
        italic: span.style == SpanStyle::Emphasis,
        size: Some(BODY_SIZE),
        color: (span.style == SpanStyle::Muted).then_some("6B7280"),
    }
}

fn paragraph(out: &mut String, centered: bool, body: impl FnOnce(&mut String)) {
    out.push_str("<w:p>");
    if centered {
        out.push_str("<w:pPr><w:jc w:val=\"center\"/></w:pPr>");
    }
    body(out);
    out.push_str("</w:p>");
}

fn spans_paragraph(out: &mut String, spans: &[Span]) {
    paragraph(out, false, |out| {
        for span in spans {
            run(out, &span.text, span_style(span));
        }
    });
}

fn bullet_paragraphs(out: &mut String, items: &[String]) {
    for item in items {
        paragraph(out, false, |out| {
            run(
                out,
                &format!("• {item}"),
                RunStyle {
                    size: Some(BODY_SIZE),
                    ..Default::default()
                },
            );
        });
    }
}

fn entry_paragraphs(out: &mut String, entry: &Entry) {
    paragraph(out, false, |out| {
        for span in &entry.title {
            run(
                out,
                &span.text,
                RunStyle {
                    bold: true,
                    ..span_style(span)
                },
            );
        }
        if let Some(aside) = &entry.aside {
            out.push_str("<w:r><w:tab/></w:r>");
            run(
                out,
                aside,
                RunStyle {
                    size: Some(BODY_SIZE),
                    color: Some("6B7280"),
                    ..Default::default()
                },
            );
        }
    });
    if !entry.subtitle.is_empty() {
        spans_paragraph(out, &entry.subtitle);
    }
    bullet_paragraphs(out, &entry.bullets);
}

pub fn document_xml(resume: &RenderedResume) -> String {
    let hex = resume.theme_color.trim().trim_start_matches('#');
    let theme = Some(hex).filter(|c| c.len() == 6 && c.chars().all(|ch| ch.is_ascii_hexdigit()));
    let centered = resume.header.align == HeaderAlign::Center;

    let mut body = String::with_capacity(16 * 1024);
    paragraph(&mut body, centered, |out| {
        run(
            out,
            &resume.header.name,
            RunStyle {
                bold: true,
                size: Some(NAME_SIZE),
                color: theme,
                ..Default::default()
            },
        );
    });
    if let Some(headline) = &resume.header.headline {
        paragraph(&mut body, centered, |out| {
            run(out, headline, RunStyle::default());
        });
    }
    if !resume.header.contact.is_empty() {
        let contact = resume
            .header
            .contact
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" | ");
        paragraph(&mut body, centered, |out| {
            run(
                out,
                &contact,
                RunStyle {
                    size: Some(BODY_SIZE),
                    ..Default::default()
                },
            );
        });
    }

    for region in &resume.regions {
        for section in &region.sections {
            paragraph(&mut body, false, |out| {
                run(
                    out,
                    &section.heading,
                    RunStyle {
                        bold: true,
                        size: Some(HEADING_SIZE),
                        color: theme,
                        ..Default::default()
                    },
                );
            });
            for block in &section.blocks {
                match block {
                    Block::Paragraph { spans } => spans_paragraph(&mut body, spans),
                    Block::Bullets { items } => bullet_paragraphs(&mut body, items),
                    Block::Inline { items, separator } => {
                        spans_paragraph(&mut body, &[Span::plain(items.join(separator))])
                    }
                    Block::Entry(entry) => entry_paragraphs(&mut body, entry),
                }
            }
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <w:document xmlns:w=\"{W_NS}\"><w:body>{body}\
         <w:sectPr><w:pgSz w:w=\"11906\" w:h=\"16838\"/>\
         <w:pgMar w:top=\"720\" w:right=\"720\" w:bottom=\"720\" w:left=\"720\" w:header=\"0\" w:footer=\"0\" w:gutter=\"0\"/>\
         </w:sectPr></w:body></w:document>"
    )
}

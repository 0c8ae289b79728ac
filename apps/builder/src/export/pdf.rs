use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::export::paginate::{paginate, Mark, Page, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::export::ExportError;
use crate::render::RenderedResume;

/// A4 portrait, zero page margin, standard Helvetica faces (no embedded fonts).
pub fn render_pdf(resume: &RenderedResume) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dict("Helvetica"));
    let bold_id = doc.add_object(font_dict("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular_id, "F2" => bold_id },
    });

    let pages = paginate(resume);
    let mut page_ids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in &pages {
        let content = page_content(page);
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id.into());
    }

    let count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => count,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let title = resume.title.trim();
    if !title.is_empty() {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(win_ansi(title), StringFormat::Literal),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(out)
}

fn font_dict(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();
    for mark in &page.marks {
        match mark {
            Mark::Text {
                x,
                baseline,
                size,
                bold,
                color,
                text,
            } => {
                let font = if *bold { "F2" } else { "F1" };
                operations.push(Operation::new("BT", vec![]));
                operations.push(fill(*color));
                operations.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![(*x).into(), (PAGE_HEIGHT - baseline).into()],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(win_ansi(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            Mark::Rule { x, y, width, color } => {
                let py = PAGE_HEIGHT - y;
                operations.push(Operation::new(
                    "RG",
                    vec![color.0.into(), color.1.into(), color.2.into()],
                ));
                operations.push(Operation::new("w", vec![0.75_f32.into()]));
                operations.push(Operation::new("m", vec![(*x).into(), py.into()]));
                operations.push(Operation::new("l", vec![(x + width).into(), py.into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }
    Content { operations }
}

fn fill(color: Rgb) -> Operation {
    Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()])
}

/// WinAnsi bytes for the standard fonts; unmappable characters become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_snapshot;

    #[test]
    fn test_win_ansi_maps_typographic_marks() {
        assert_eq!(win_ansi("a•b–c"), vec![b'a', 0x95, b'b', 0x96, b'c']);
        assert_eq!(win_ansi("é"), vec![0xE9]);
        assert_eq!(win_ansi("漢"), vec![b'?']);
    }

    #[test]
    fn test_pdf_has_one_a4_page_for_sample() {
        let bytes = render_pdf(&sample_snapshot().rendered).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.7"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("Helvetica-Bold"));
        assert!(text.contains("595"));
    }
}

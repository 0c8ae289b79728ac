use std::fmt::Write;

use resvg::{tiny_skia, usvg};

use crate::export::paginate::{paginate, Mark, Page, PAGE_HEIGHT, PAGE_WIDTH};
use crate::export::{xml_text, ExportError};
use crate::render::RenderedResume;

/// Device scale of the raster capture.
pub const SCALE: f32 = 3.0;

/// Rasterizes the first page.
pub fn render_png(resume: &RenderedResume) -> Result<Vec<u8>, ExportError> {
    let pages = paginate(resume);
    let svg = pages.first().map(page_svg).unwrap_or_default();

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| ExportError::Png(e.to_string()))?;

    let width = (PAGE_WIDTH * SCALE).round() as u32;
    let height = (PAGE_HEIGHT * SCALE).round() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ExportError::Png(format!("cannot allocate {width}x{height} pixmap")))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(SCALE, SCALE),
        &mut pixmap.as_mut(),
    );
    pixmap
        .encode_png()
        .map_err(|e| ExportError::Png(e.to_string()))
}

/// The page as SVG, in page points.
pub fn page_svg(page: &Page) -> String {
    let mut svg = String::with_capacity(16 * 1024);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{PAGE_WIDTH}\" height=\"{PAGE_HEIGHT}\" \
         viewBox=\"0 0 {PAGE_WIDTH} {PAGE_HEIGHT}\">\
         <rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>"
    );
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
                let weight = if *bold { "bold" } else { "normal" };
                let _ = write!(
                    svg,
                    "<text x=\"{x:.2}\" y=\"{baseline:.2}\" font-family=\"Helvetica, Arial, sans-serif\" \
                     font-size=\"{size}\" font-weight=\"{weight}\" fill=\"{}\" xml:space=\"preserve\">{}</text>",
                    color.to_hex(),
                    xml_text(text)
                );
            }
            Mark::Rule { x, y, width, color } => {
                let _ = write!(
                    svg,
                    "<line x1=\"{x:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"0.75\"/>",
                    x + width,
                    color.to_hex()
                );
            }
        }
    }
    svg.push_str("</svg>");
    svg
}

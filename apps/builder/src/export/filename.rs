use crate::export::ExportFormat;

const FALLBACK_TITLE: &str = "resume";

/// Whitespace runs become `_`; a blank title becomes `resume`.
pub fn file_stem(title: &str) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        stem
    }
}

/// PDFs carry the version label (`{title}_{label}.pdf`); other formats are `{title}.{ext}`.
pub fn artifact_filename(format: ExportFormat, title: &str, version_label: &str) -> String {
    let stem = file_stem(title);
    match format {
        ExportFormat::Pdf if !version_label.trim().is_empty() => {
            format!("{stem}_{}.pdf", version_label.trim())
        }
        _ => format!("{stem}.{}", format.extension()),
    }
}

/// `Content-Disposition` value. Non-ASCII and quote characters are replaced in the
/// plain `filename` parameter; the exact name travels percent-encoded in `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let mut encoded = String::with_capacity(filename.len());
    for b in filename.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-') {
            encoded.push(b as char);
        } else {
            encoded.push_str(&format!("%{b:02X}"));
        }
    }
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

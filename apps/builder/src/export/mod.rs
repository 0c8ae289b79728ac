//! File exports of a rendered resume.
//!
//! Encoders are synchronous and CPU-bound; [`pipeline`] runs them off the async
//! runtime with a timeout and the owning session's cancellation token.

pub mod docx;
pub mod filename;
pub mod metrics;
pub mod paginate;
pub mod pdf;
pub mod pipeline;
pub mod png;
pub mod txt;

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::ResumeDocument;
use crate::render::RenderedResume;

pub use pipeline::ExportPipeline;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format '{0}' (expected pdf, png, txt or docx)")]
    UnsupportedFormat(String),

    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("PNG encoding failed: {0}")]
    Png(String),

    #[error("DOCX packaging failed: {0}")]
    Docx(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export exceeded {0}s")]
    Timeout(u64),

    #[error("export cancelled")]
    Cancelled,

    #[error("export task failed: {0}")]
    Join(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Png,
    Txt,
    Docx,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Png => "image/png",
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "png" | "image" => Ok(ExportFormat::Png),
            "txt" | "text" | "json" => Ok(ExportFormat::Txt),
            "docx" | "word" => Ok(ExportFormat::Docx),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Escapes `text` for XML character data, dropping characters XML 1.0 cannot
/// carry at all (C0 controls other than tab, LF and CR, plus U+FFFE and U+FFFF).
pub(crate) fn xml_text(text: &str) -> String {
    let allowed = |c: char| match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => false,
        _ => true,
    };
    if text.chars().all(allowed) {
        return escape(text).into_owned();
    }
    let cleaned: String = text.chars().filter(|&c| allowed(c)).collect();
    escape(cleaned.as_str()).into_owned()
}

/// Everything an encoder needs, captured under the session lock once the page
/// model is complete.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub document: ResumeDocument,
    pub rendered: RenderedResume,
    pub version_label: String,
    /// Names the file: the saved version's title, not unsaved edits.
    pub title: String,
}

/// A finished download.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// Encodes `snapshot` in `format`. Blocking; call through [`ExportPipeline`].
pub fn encode(format: ExportFormat, snapshot: &ExportSnapshot) -> Result<Artifact, ExportError> {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render_pdf(&snapshot.rendered)?,
        ExportFormat::Png => png::render_png(&snapshot.rendered)?,
        ExportFormat::Txt => txt::render_txt(&snapshot.document)?,
        ExportFormat::Docx => docx::render_docx(&snapshot.rendered)?,
    };
    Ok(Artifact {
        filename: filename::artifact_filename(
            format,
            &snapshot.title,
            &snapshot.version_label,
        ),
        content_type: format.content_type(),
        bytes: Bytes::from(bytes),
    })
}

use crate::export::ExportError;
use crate::models::resume::ResumeDocument;

/// The document itself as pretty-printed UTF-8 JSON.
pub fn render_txt(document: &ResumeDocument) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(document)?)
}

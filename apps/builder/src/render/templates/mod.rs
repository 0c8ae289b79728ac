mod classic_elegance;
mod default;
mod lexington;
mod modern_profile;
mod professional_modern;
mod sales_professional;

pub use classic_elegance::ClassicEleganceTemplate;
pub use default::DefaultTemplate;
pub use lexington::LexingtonTemplate;
pub use modern_profile::ModernProfileTemplate;
pub use professional_modern::ProfessionalModernTemplate;
pub use sales_professional::SalesProfessionalTemplate;

use crate::models::resume::ResumeDocument;
use crate::render::model::Block;

/// The resume title shown under the name, if any.
pub(crate) fn headline(document: &ResumeDocument) -> Option<String> {
    Some(document.title.trim().to_string()).filter(|t| !t.is_empty())
}

pub(crate) fn bullet_list(items: Vec<String>) -> Vec<Block> {
    if items.is_empty() {
        Vec::new()
    } else {
        vec![Block::Bullets { items }]
    }
}

pub(crate) fn inline_list(items: Vec<String>, separator: &str) -> Vec<Block> {
    if items.is_empty() {
        Vec::new()
    } else {
        vec![Block::inline(items, separator)]
    }
}

use crate::format::full_name;
use crate::layout::{LayoutConfig, TemplateKind};
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;
use crate::render::model::{Block, Header, HeaderAlign, RenderedResume};
use crate::render::sections as s;
use crate::render::templates::{bullet_list, headline, inline_list};
use crate::render::{
    ordered_sections, section_block, single_column, SectionBlock, TemplateRenderer, Theme,
};

/// Traditional single column: centered name in the theme color, skills grouped
/// by category.
pub struct ClassicEleganceTemplate;

impl TemplateRenderer for ClassicEleganceTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::ClassicElegance
    }

    fn render(
        &self,
        document: &ResumeDocument,
        layout: &LayoutConfig,
        theme: &Theme,
    ) -> RenderedResume {
        let order = ordered_sections(layout, self.kind());
        let contact = if order.contains(&SectionId::Contact) {
            s::contact_spans(&document.contact_info, &[])
        } else {
            Vec::new()
        };
        let sections = order
            .into_iter()
            .filter_map(|id| section(id, document))
            .collect();

        RenderedResume {
            template: self.kind(),
            theme_color: theme.color.clone(),
            title: document.title.clone(),
            header: Header {
                name: full_name(&document.contact_info),
                headline: headline(document),
                contact,
                align: HeaderAlign::Center,
            },
            regions: single_column(sections),
        }
    }
}

fn section(id: SectionId, doc: &ResumeDocument) -> Option<SectionBlock> {
    match id {
        SectionId::Summary => section_block(id, "Professional Summary", s::summary_blocks(doc)),
        SectionId::Experience => section_block(
            id,
            "Experience",
            doc.experience_list
                .iter()
                .map(|e| Block::Entry(s::experience_stacked(e)))
                .collect(),
        ),
        SectionId::Education => section_block(
            id,
            "Education",
            doc.education_list
                .iter()
                .map(|e| Block::Entry(s::education_entry(e)))
                .collect(),
        ),
        SectionId::Skills => section_block(id, "Skills", s::skills_by_category(&doc.skill_list)),
        SectionId::Achievements => section_block(
            id,
            "Achievements",
            bullet_list(s::achievement_lines(&doc.achievement_list)),
        ),
        SectionId::Certifications => section_block(
            id,
            "Certifications",
            bullet_list(s::certification_lines(&doc.certification_list)),
        ),
        SectionId::Languages => section_block(
            id,
            "Languages",
            inline_list(s::language_names(&doc.language_list), " · "),
        ),
        _ => None,
    }
}

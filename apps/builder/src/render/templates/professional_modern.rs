use crate::format::full_name;
use crate::layout::{LayoutConfig, TemplateKind};
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;
use crate::render::model::{Block, Header, HeaderAlign, RenderedResume};
use crate::render::sections as s;
use crate::render::templates::{bullet_list, headline};
use crate::render::{ordered_sections, section_block, two_columns, SectionBlock, TemplateRenderer, Theme};

const SIDEBAR: &[SectionId] = &[
    SectionId::Contact,
    SectionId::Education,
    SectionId::Skills,
    SectionId::Certifications,
];

/// Centered name and role over a left sidebar of contact, education, skills and
/// certifications; the main column carries the narrative sections.
pub struct ProfessionalModernTemplate;

impl TemplateRenderer for ProfessionalModernTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::ProfessionalModern
    }

    fn render(
        &self,
        document: &ResumeDocument,
        layout: &LayoutConfig,
        theme: &Theme,
    ) -> RenderedResume {
        let sections: Vec<SectionBlock> = ordered_sections(layout, self.kind())
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
                contact: Vec::new(),
                align: HeaderAlign::Center,
            },
            regions: two_columns(sections, SIDEBAR, 0.34, true),
        }
    }
}

fn section(id: SectionId, doc: &ResumeDocument) -> Option<SectionBlock> {
    match id {
        SectionId::Contact => section_block(id, "CONTACT", s::contact_blocks(&doc.contact_info)),
        SectionId::Summary => section_block(id, "CAREER OBJECTIVE", s::summary_blocks(doc)),
        SectionId::Experience => section_block(
            id,
            "WORK EXPERIENCE",
            doc.experience_list
                .iter()
                .map(|e| Block::Entry(s::experience_stacked(e)))
                .collect(),
        ),
        SectionId::Education => section_block(
            id,
            "EDUCATION",
            doc.education_list
                .iter()
                .map(|e| Block::Entry(s::education_entry(e)))
                .collect(),
        ),
        SectionId::Skills => section_block(id, "SKILLS", bullet_list(s::skill_names(&doc.skill_list))),
        SectionId::Projects => section_block(
            id,
            "PROJECTS",
            doc.project_list
                .iter()
                .map(|p| Block::Entry(s::project_entry(p)))
                .collect(),
        ),
        SectionId::Certifications => section_block(
            id,
            "CERTIFICATIONS",
            bullet_list(s::certification_lines(&doc.certification_list)),
        ),
        _ => None,
    }
}

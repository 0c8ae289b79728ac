use crate::format::full_name;
use crate::layout::{LayoutConfig, TemplateKind};
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;
use crate::render::model::{Block, Header, HeaderAlign, RenderedResume};
use crate::render::sections as s;
use crate::render::templates::{bullet_list, headline};
use crate::render::{
    ordered_sections, section_block, two_columns, SectionBlock, TemplateRenderer, Theme,
};

const SIDEBAR: &[SectionId] = &[
    SectionId::Achievements,
    SectionId::Skills,
    SectionId::Certifications,
    SectionId::Languages,
    SectionId::PersonalLinks,
];

/// Wide main panel with the career story and a right-hand sidebar of short lists.
pub struct LexingtonTemplate;

impl TemplateRenderer for LexingtonTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Lexington
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
                align: HeaderAlign::Left,
            },
            regions: two_columns(sections, SIDEBAR, 0.34, false),
        }
    }
}

fn section(id: SectionId, doc: &ResumeDocument) -> Option<SectionBlock> {
    match id {
        SectionId::Summary => section_block(id, "Summary", s::summary_blocks(doc)),
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
        SectionId::Achievements => section_block(
            id,
            "Key Achievements",
            bullet_list(s::achievement_lines(&doc.achievement_list)),
        ),
        SectionId::Skills => section_block(id, "Skills", bullet_list(s::skill_names(&doc.skill_list))),
        SectionId::Certifications => section_block(
            id,
            "Certifications",
            bullet_list(s::certification_lines(&doc.certification_list)),
        ),
        SectionId::Languages => section_block(
            id,
            "Languages",
            bullet_list(s::language_names(&doc.language_list)),
        ),
        SectionId::PersonalLinks => {
            section_block(id, "Personal Links", s::link_blocks(&doc.personal_link_list))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::model::RegionRole;
    use crate::render::sample::sample_resume;

    #[test]
    fn test_sidebar_on_the_right_with_links() {
        let rendered = LexingtonTemplate.render(
            &sample_resume(),
            &LayoutConfig::default(),
            &Theme { color: "#111827".into() },
        );
        assert_eq!(rendered.regions[0].role, RegionRole::Main);
        assert_eq!(rendered.regions[1].role, RegionRole::Sidebar);
        assert!(rendered.regions[1]
            .sections
            .iter()
            .any(|s| s.id == SectionId::PersonalLinks));
        assert!(rendered.section(SectionId::Projects).is_none());
    }
}

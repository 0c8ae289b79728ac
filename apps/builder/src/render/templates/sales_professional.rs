use crate::format::full_name;
use crate::layout::{LayoutConfig, TemplateKind};
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;
use crate::render::model::{Block, Header, HeaderAlign, Region, RegionRole, RenderedResume};
use crate::render::sections as s;
use crate::render::templates::{bullet_list, headline, inline_list};
use crate::render::{ordered_sections, section_block, SectionBlock, TemplateRenderer, Theme};

/// Three columns: highlights on the left, experience in the middle, education and
/// skills on the right.
pub struct SalesProfessionalTemplate;

const LEFT: &[SectionId] = &[
    SectionId::Summary,
    SectionId::Achievements,
    SectionId::Languages,
    SectionId::Certifications,
];
const RIGHT: &[SectionId] = &[SectionId::Education, SectionId::Skills];

impl TemplateRenderer for SalesProfessionalTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::SalesProfessional
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

        let mut left = Vec::new();
        let mut middle = Vec::new();
        let mut right = Vec::new();
        for block in order.into_iter().filter_map(|id| section(id, document)) {
            if LEFT.contains(&block.id) {
                left.push(block);
            } else if RIGHT.contains(&block.id) {
                right.push(block);
            } else {
                middle.push(block);
            }
        }

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
            regions: vec![
                Region {
                    role: RegionRole::Sidebar,
                    width: 0.32,
                    sections: left,
                },
                Region {
                    role: RegionRole::Main,
                    width: 0.42,
                    sections: middle,
                },
                Region {
                    role: RegionRole::Sidebar,
                    width: 0.26,
                    sections: right,
                },
            ],
        }
    }
}

fn section(id: SectionId, doc: &ResumeDocument) -> Option<SectionBlock> {
    match id {
        SectionId::Summary => section_block(id, "Summary", s::summary_blocks(doc)),
        SectionId::Achievements => section_block(
            id,
            "Key Achievements",
            bullet_list(s::achievement_lines(&doc.achievement_list)),
        ),
        SectionId::Languages => section_block(
            id,
            "Languages",
            bullet_list(s::language_names(&doc.language_list)),
        ),
        SectionId::Certifications => section_block(
            id,
            "Certifications",
            bullet_list(s::certification_lines(&doc.certification_list)),
        ),
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
        SectionId::Skills => {
            section_block(id, "Skills", inline_list(s::skill_names(&doc.skill_list), ", "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sample::sample_resume;

    #[test]
    fn test_three_columns() {
        let rendered = SalesProfessionalTemplate.render(
            &sample_resume(),
            &LayoutConfig::default(),
            &Theme { color: "#C2410C".into() },
        );
        assert_eq!(rendered.regions.len(), 3);
        let total: f32 = rendered.regions.iter().map(|r| r.width).sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert_eq!(rendered.regions[1].sections[0].id, SectionId::Experience);
        assert!(rendered.section(SectionId::Projects).is_none());
        assert!(!rendered.header.contact.is_empty());
    }
}

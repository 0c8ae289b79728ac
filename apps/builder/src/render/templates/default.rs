use crate::format::full_name;
use crate::layout::{LayoutConfig, TemplateKind};
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;
use crate::render::model::{Block, Header, HeaderAlign, RenderedResume};
use crate::render::sections::{self as s, PIPE};
use crate::render::templates::{bullet_list, inline_list};
use crate::render::{
    ordered_sections, section_block, single_column, SectionBlock, TemplateRenderer, Theme,
};

/// Single column with an upper-cased name and a one-line contact strip.
pub struct DefaultTemplate;

impl TemplateRenderer for DefaultTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Default
    }

    fn render(
        &self,
        document: &ResumeDocument,
        layout: &LayoutConfig,
        theme: &Theme,
    ) -> RenderedResume {
        let order = ordered_sections(layout, self.kind());
        let contact = if order.contains(&SectionId::Contact) {
            s::contact_spans(&document.contact_info, &document.personal_link_list)
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
                name: full_name(&document.contact_info).to_uppercase(),
                headline: None,
                contact,
                align: HeaderAlign::Center,
            },
            regions: single_column(sections),
        }
    }
}

fn section(id: SectionId, doc: &ResumeDocument) -> Option<SectionBlock> {
    match id {
        // Rendered in the header strip.
        SectionId::Contact => None,
        SectionId::Summary => section_block(id, "Summary", s::summary_blocks(doc)),
        SectionId::Experience => section_block(
            id,
            "Professional Experience",
            doc.experience_list
                .iter()
                .map(|e| Block::Entry(s::experience_one_line(e)))
                .collect(),
        ),
        SectionId::Education => section_block(
            id,
            "Education",
            doc.education_list
                .iter()
                .map(s::education_line)
                .filter(|l| !l.is_empty())
                .map(Block::text)
                .collect(),
        ),
        SectionId::Projects => section_block(
            id,
            "Projects",
            doc.project_list
                .iter()
                .map(|p| Block::Entry(s::project_entry(p)))
                .collect(),
        ),
        SectionId::Skills => {
            section_block(id, "Skills", inline_list(s::skill_names(&doc.skill_list), PIPE))
        }
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
            inline_list(s::language_names(&doc.language_list), ", "),
        ),
        SectionId::PersonalLinks => {
            section_block(id, "Personal Links", s::link_blocks(&doc.personal_link_list))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sample::sample_resume;

    #[test]
    fn test_header_is_uppercase_with_contact_strip() {
        let rendered = DefaultTemplate.render(
            &sample_resume(),
            &LayoutConfig::default(),
            &Theme { color: "#0057D9".into() },
        );
        assert_eq!(rendered.header.name, "JANE SMITH");
        let texts: Vec<&str> = rendered.header.contact.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts.first(), Some(&"9876543210"));
        assert!(texts.contains(&"LinkedIn"));
    }

    #[test]
    fn test_hidden_contact_drops_header_strip() {
        let mut layout = LayoutConfig::default();
        layout.toggle_visibility(SectionId::Contact);
        let rendered = DefaultTemplate.render(&sample_resume(), &layout, &Theme { color: "#000".into() });
        assert!(rendered.header.contact.is_empty());
        assert_eq!(rendered.header.name, "JANE SMITH");
    }

    #[test]
    fn test_every_other_section_rendered_in_one_column() {
        let rendered = DefaultTemplate.render(
            &sample_resume(),
            &LayoutConfig::default(),
            &Theme { color: "#000".into() },
        );
        assert_eq!(rendered.regions.len(), 1);
        assert_eq!(rendered.section_ids().len(), 9);
    }
}

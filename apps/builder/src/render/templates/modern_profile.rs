use crate::format::{display_bullets, full_name, join_present};
use crate::layout::{LayoutConfig, TemplateKind};
use crate::models::resume::{ExperienceEntry, ResumeDocument};
use crate::models::section::SectionId;
use crate::render::model::{Block, Entry, Header, HeaderAlign, RenderedResume, Span};
use crate::render::sections::{self as s, PIPE};
use crate::render::templates::{bullet_list, headline, inline_list};
use crate::render::{
    ordered_sections, section_block, single_column, SectionBlock, TemplateRenderer, Theme,
};

/// Left-aligned profile header; each section is a labelled row.
pub struct ModernProfileTemplate;

impl TemplateRenderer for ModernProfileTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::ModernProfile
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
            regions: single_column(sections),
        }
    }
}

/// Company first, role and dates underneath.
fn experience_row(e: &ExperienceEntry) -> Entry {
    let detail = join_present(
        [e.job_title.as_str(), s::experience_range(e).as_str()],
        PIPE,
    );
    Entry {
        title: vec![Span::strong(e.company_name.trim())],
        subtitle: if detail.is_empty() {
            Vec::new()
        } else {
            vec![Span::emphasis(detail)]
        },
        aside: Some(s::experience_location(e)).filter(|l| !l.is_empty()),
        bullets: display_bullets(&e.description),
    }
}

fn section(id: SectionId, doc: &ResumeDocument) -> Option<SectionBlock> {
    match id {
        SectionId::Summary => section_block(id, "PROFILE", s::summary_blocks(doc)),
        SectionId::Experience => section_block(
            id,
            "EXPERIENCE",
            doc.experience_list
                .iter()
                .map(|e| Block::Entry(experience_row(e)))
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
        SectionId::Skills => {
            section_block(id, "SKILLS", inline_list(s::skill_names(&doc.skill_list), " • "))
        }
        SectionId::Achievements => section_block(
            id,
            "ACHIEVEMENTS",
            bullet_list(s::achievement_lines(&doc.achievement_list)),
        ),
        SectionId::Languages => section_block(
            id,
            "LANGUAGES",
            inline_list(s::language_names(&doc.language_list), ", "),
        ),
        _ => None,
    }
}

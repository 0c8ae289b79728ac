//! Template rendering.
//!
//! Every template implements [`TemplateRenderer`] and turns a document plus its
//! layout into a [`RenderedResume`]. Output is deterministic for a given input.

pub mod handlers;
pub mod html;
pub mod model;
pub mod sample;
pub mod sections;
mod templates;

use crate::layout::{LayoutConfig, TemplateKind};
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;

pub use model::{Block, Entry, RenderedResume, Region, RegionRole, SectionBlock, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub color: String,
}

/// A rendering variant with a fixed capability set.
pub trait TemplateRenderer: Send + Sync {
    fn kind(&self) -> TemplateKind;

    fn capabilities(&self) -> &'static [SectionId] {
        self.kind().capabilities()
    }

    fn render(&self, document: &ResumeDocument, layout: &LayoutConfig, theme: &Theme)
        -> RenderedResume;
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Overrides the document's theme color.
    pub theme_color: Option<String>,
    /// Fill empty sections from the built-in sample resume (template gallery previews).
    pub sample_fallback: bool,
}

/// Looks up the renderer for a template.
pub fn renderer_for(kind: TemplateKind) -> &'static dyn TemplateRenderer {
    match kind {
        TemplateKind::Default => &templates::DefaultTemplate,
        TemplateKind::ProfessionalModern => &templates::ProfessionalModernTemplate,
        TemplateKind::SalesProfessional => &templates::SalesProfessionalTemplate,
        TemplateKind::ClassicElegance => &templates::ClassicEleganceTemplate,
        TemplateKind::ModernProfile => &templates::ModernProfileTemplate,
        TemplateKind::Lexington => &templates::LexingtonTemplate,
    }
}

/// Renders `document` with the template its `templateName` selects; unknown
/// names render with the default template.
pub fn render_document(
    document: &ResumeDocument,
    layout: &LayoutConfig,
    options: &RenderOptions,
) -> RenderedResume {
    let kind = TemplateKind::resolve(&document.template_name);
    let color = options
        .theme_color
        .clone()
        .or_else(|| Some(document.theme_color.clone()))
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| kind.palette()[0].to_string());
    let theme = Theme { color };

    if options.sample_fallback {
        let filled = sample::with_sample_fallback(document);
        renderer_for(kind).render(&filled, layout, &theme)
    } else {
        renderer_for(kind).render(document, layout, &theme)
    }
}

/// Visible sections in layout order, restricted to what `kind` can render.
pub(crate) fn ordered_sections(layout: &LayoutConfig, kind: TemplateKind) -> Vec<SectionId> {
    layout
        .visible_ids()
        .into_iter()
        .filter(|id| kind.supports(*id))
        .collect()
}

/// `None` when there is nothing to show, so empty sections leave no heading behind.
pub(crate) fn section_block(
    id: SectionId,
    heading: impl Into<String>,
    blocks: Vec<Block>,
) -> Option<SectionBlock> {
    if blocks.is_empty() {
        None
    } else {
        Some(SectionBlock {
            id,
            heading: heading.into(),
            blocks,
        })
    }
}

/// Splits sections into a sidebar and a main column, keeping layout order in each.
pub(crate) fn two_columns(
    sections: Vec<SectionBlock>,
    in_sidebar: &[SectionId],
    sidebar_width: f32,
    sidebar_first: bool,
) -> Vec<Region> {
    let (side, main): (Vec<_>, Vec<_>) = sections
        .into_iter()
        .partition(|s| in_sidebar.contains(&s.id));
    let sidebar = Region {
        role: RegionRole::Sidebar,
        width: sidebar_width,
        sections: side,
    };
    let main = Region {
        role: RegionRole::Main,
        width: 1.0 - sidebar_width,
        sections: main,
    };
    if sidebar_first {
        vec![sidebar, main]
    } else {
        vec![main, sidebar]
    }
}

pub(crate) fn single_column(sections: Vec<SectionBlock>) -> Vec<Region> {
    vec![Region {
        role: RegionRole::Main,
        width: 1.0,
        sections,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{reconcile_layout, ReconcilePolicy};

    fn with_template(kind: TemplateKind) -> ResumeDocument {
        let mut doc = sample::sample_resume();
        doc.template_name = kind.name().to_string();
        doc
    }

    #[test]
    fn test_each_template_renders_only_its_capabilities() {
        for kind in TemplateKind::ALL {
            let doc = with_template(kind);
            let rendered = render_document(&doc, &LayoutConfig::default(), &RenderOptions::default());
            assert_eq!(rendered.template, kind);
            for id in rendered.section_ids() {
                assert!(kind.supports(id), "{kind} rendered unsupported {id}");
            }
        }
    }

    #[test]
    fn test_hidden_sections_not_rendered() {
        let doc = with_template(TemplateKind::Default);
        let mut layout = LayoutConfig::default();
        layout.toggle_visibility(SectionId::Experience);
        let rendered = render_document(&doc, &layout, &RenderOptions::default());
        assert!(rendered.section(SectionId::Experience).is_none());
        assert!(rendered.section(SectionId::Education).is_some());
    }

    #[test]
    fn test_single_column_follows_layout_order() {
        let doc = with_template(TemplateKind::Default);
        let mut layout = LayoutConfig::default();
        let skills = layout.position(SectionId::Skills);
        layout.reorder(skills, 1).unwrap();
        let rendered = render_document(&doc, &layout, &RenderOptions::default());
        let ids = rendered.section_ids();
        assert_eq!(ids[0], SectionId::Skills);
    }

    #[test]
    fn test_unknown_template_falls_back_to_default() {
        let mut doc = sample::sample_resume();
        doc.template_name = "RetiredTemplate".into();
        let rendered = render_document(&doc, &LayoutConfig::default(), &RenderOptions::default());
        assert_eq!(rendered.template, TemplateKind::Default);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let doc = with_template(TemplateKind::Lexington);
        let layout = reconcile_layout(
            &doc,
            &LayoutConfig::default(),
            TemplateKind::Lexington,
            ReconcilePolicy::PreserveHidden,
        )
        .layout;
        let a = render_document(&doc, &layout, &RenderOptions::default());
        let b = render_document(&doc, &layout, &RenderOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_fallback_fills_empty_sections() {
        let doc = ResumeDocument::default();
        let plain = render_document(&doc, &LayoutConfig::default(), &RenderOptions::default());
        assert!(plain.section_ids().is_empty());
        assert_eq!(plain.header.name, "YOUR NAME");

        let preview = render_document(
            &doc,
            &LayoutConfig::default(),
            &RenderOptions {
                sample_fallback: true,
                ..Default::default()
            },
        );
        assert!(preview.section(SectionId::Experience).is_some());
    }

    #[test]
    fn test_theme_override() {
        let doc = with_template(TemplateKind::ClassicElegance);
        let rendered = render_document(
            &doc,
            &LayoutConfig::default(),
            &RenderOptions {
                theme_color: Some("#111111".into()),
                ..Default::default()
            },
        );
        assert_eq!(rendered.theme_color, "#111111");
    }
}

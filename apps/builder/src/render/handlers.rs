use axum::{
    extract::{Path, Query},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::{reconcile_layout, LayoutConfig, ReconcilePolicy, TemplateKind};
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;
use crate::render::{html, render_document, RenderOptions};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub name: TemplateKind,
    pub capabilities: &'static [SectionId],
    pub palette: &'static [&'static str],
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    pub theme_color: Option<String>,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(
        TemplateKind::ALL
            .into_iter()
            .map(|kind| TemplateInfo {
                name: kind,
                capabilities: kind.capabilities(),
                palette: kind.palette(),
            })
            .collect(),
    )
}

/// GET /api/v1/templates/:name/preview
/// Gallery thumbnail: the template filled with the sample resume.
pub async fn handle_template_preview(
    Path(name): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let kind = name
        .parse::<TemplateKind>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;
    let document = ResumeDocument {
        template_name: kind.name().to_string(),
        theme_color: String::new(),
        ..ResumeDocument::default()
    };
    let layout = reconcile_layout(
        &document,
        &LayoutConfig::default(),
        kind,
        ReconcilePolicy::PreserveHidden,
    )
    .layout;
    let options = RenderOptions {
        theme_color: query.theme_color,
        sample_fallback: true,
    };
    Ok(Html(html::to_html(&render_document(&document, &layout, &options))))
}

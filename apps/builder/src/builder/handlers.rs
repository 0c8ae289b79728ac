use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::builder::service::SessionSeed;
use crate::builder::session::{DocumentPatch, SessionView};
use crate::errors::AppError;
use crate::export::filename::content_disposition;
use crate::export::ExportFormat;
use crate::layout::{Direction, LayoutEntry};
use crate::models::resume::{ResumeSummary, ResumeVersion, SectionData};
use crate::models::section::SectionId;
use crate::persistence::check_version_label;
use crate::render::html;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    #[default]
    Edit,
    Clone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub version_label: Option<String>,
    #[serde(default)]
    pub mode: LoadMode,
    #[serde(default)]
    pub latest: bool,
}

impl OpenSessionRequest {
    fn seed(self) -> SessionSeed {
        match (self.version_label, self.mode) {
            (Some(label), LoadMode::Edit) => SessionSeed::Edit(label),
            (Some(label), LoadMode::Clone) => SessionSeed::Clone(label),
            (None, _) if self.latest => SessionSeed::Latest,
            (None, _) => SessionSeed::Blank,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    pub version_label: String,
    #[serde(default)]
    pub mode: LoadMode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    pub template_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSwitchResponse {
    pub cleared: Vec<SectionId>,
    pub session: SessionView,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub source: usize,
    pub destination: usize,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingRequest {
    pub editing_section_id: Option<SectionId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuery {
    #[serde(default)]
    pub as_new: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub job_description: String,
}

fn parse_section(raw: &str) -> Result<SectionId, AppError> {
    raw.parse()
        .map_err(|e: crate::models::section::UnknownSection| AppError::Validation(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_open_session(
    State(state): State<AppState>,
    body: Option<Json<OpenSessionRequest>>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    if let Some(label) = &request.version_label {
        check_version_label(label)?;
    }
    let view = state.builder.open_session(request.seed()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.builder.with_session(id, |s| Ok(s.view())).await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.builder.close_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .builder
        .with_session(id, |s| {
            s.reset();
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/sections/:section
pub async fn handle_put_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
    Json(data): Json<Value>,
) -> Result<Json<SessionView>, AppError> {
    let section = parse_section(&section)?;
    let data = SectionData::from_json(section, data)
        .map_err(|e| AppError::Validation(format!("Invalid {section} data: {e}")))?;
    let view = state
        .builder
        .with_session(id, |s| {
            s.apply_section(data)?;
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// PATCH /api/v1/sessions/:id/document
pub async fn handle_patch_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DocumentPatch>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .builder
        .with_session(id, |s| {
            s.apply_patch(patch);
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_switch_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<TemplateSwitchResponse>, AppError> {
    let policy = state.builder.policy();
    let response = state
        .builder
        .with_session(id, |s| {
            let cleared = s.switch_template(&req.template_name, policy)?;
            Ok(TemplateSwitchResponse {
                cleared,
                session: s.view(),
            })
        })
        .await?;
    Ok(Json(response))
}

/// PUT /api/v1/sessions/:id/layout
pub async fn handle_replace_layout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entries): Json<Vec<LayoutEntry>>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .builder
        .with_session(id, |s| {
            s.replace_layout(entries)?;
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/layout/reorder
pub async fn handle_reorder_layout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .builder
        .with_session(id, |s| {
            s.reorder(req.source, req.destination)?;
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/layout/:section/move
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<SessionView>, AppError> {
    let section = parse_section(&section)?;
    let view = state
        .builder
        .with_session(id, |s| {
            s.move_section(section, req.direction)?;
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/layout/:section/toggle
pub async fn handle_toggle_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let section = parse_section(&section)?;
    let view = state
        .builder
        .with_session(id, |s| {
            s.toggle_visibility(section);
            Ok(s.view())
        })
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/editing
pub async fn handle_set_editing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EditingRequest>,
) -> Result<StatusCode, AppError> {
    state
        .builder
        .with_session(id, |s| {
            s.set_editing_section(req.editing_section_id);
            Ok(())
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_session_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let rendered = state.builder.with_session(id, |s| Ok(s.render())).await?;
    Ok(Html(html::to_html(&rendered)))
}

/// POST /api/v1/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SaveQuery>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.builder.save(id, query.as_new).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/load
pub async fn handle_load(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LoadRequest>,
) -> Result<Json<SessionView>, AppError> {
    check_version_label(&req.version_label)?;
    let clone = matches!(req.mode, LoadMode::Clone);
    let view = state
        .builder
        .load_into(id, &req.version_label, clone)
        .await?;
    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/export/:format
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format.parse()?;
    let artifact = state.builder.export(id, format).await?;
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&artifact.filename),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted resumes
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let summaries = state.builder.store().get_all_resume_summaries().await?;
    Ok(Json(summaries))
}

/// GET /api/v1/resumes/:label
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<ResumeVersion>, AppError> {
    check_version_label(&label)?;
    let version = state.builder.store().get_resume_by_version(&label).await?;
    Ok(Json(version))
}

/// DELETE /api/v1/resumes/:label
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<Value>, AppError> {
    check_version_label(&label)?;
    let message = state
        .builder
        .store()
        .delete_resume_by_version(&label)
        .await?;
    Ok(Json(json!({ "versionLabel": label, "message": message })))
}

/// POST /api/v1/resumes/:label/match
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Path(label): Path<String>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<Value>, AppError> {
    check_version_label(&label)?;
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description must not be empty".to_string(),
        ));
    }
    let report = state
        .builder
        .store()
        .match_resume_against_job_description(&label, &req.job_description)
        .await?;
    Ok(Json(report))
}

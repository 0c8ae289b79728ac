//! Server-side state of one builder surface.
//!
//! All mutation goes through `&mut self`, so whoever holds the session lock is the
//! single writer. `revision` changes on every document or layout edit; `epoch`
//! changes when the whole workflow is replaced (reset, load, clone). Saves use
//! both to decide whether their result still applies.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::builder::mode::{BuilderMode, SaveRoute};
use crate::editors::{self, EditorError};
use crate::layout::capability::UnknownTemplate;
use crate::layout::{
    reconcile_layout, Direction, LayoutConfig, LayoutEntry, LayoutError, ReconcilePolicy,
    TemplateKind,
};
use crate::models::resume::{ResumeDocument, ResumeSummary, ResumeVersion, SectionData, Visibility};
use crate::models::section::SectionId;
use crate::render::{render_document, RenderOptions, RenderedResume};

/// Scalar document fields; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub visibility: Option<Visibility>,
    pub theme_color: Option<String>,
}

/// Everything a save needs, captured under the lock.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    pub route: SaveRoute,
    pub document: ResumeDocument,
    pub revision: u64,
    pub epoch: u64,
}

/// How a finished save was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Applied,
    /// The document changed while saving; meta and mode advanced, edits kept.
    AppliedKeepingEdits,
    /// The session moved to another resume while saving; nothing changed.
    Discarded,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    #[serde(flatten)]
    pub mode: BuilderMode,
    pub editing_section_id: Option<SectionId>,
    pub resume_meta: Option<ResumeSummary>,
    pub revision: u64,
    pub document: ResumeDocument,
    pub layout: LayoutConfig,
}

pub struct BuilderSession {
    id: Uuid,
    document: ResumeDocument,
    layout: LayoutConfig,
    mode: BuilderMode,
    editing_section: Option<SectionId>,
    meta: Option<ResumeVersion>,
    revision: u64,
    epoch: u64,
    cancel: CancellationToken,
    last_touched: Instant,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            document: ResumeDocument::default(),
            layout: LayoutConfig::default(),
            mode: BuilderMode::Create,
            editing_section: None,
            meta: None,
            revision: 0,
            epoch: 0,
            cancel: CancellationToken::new(),
            last_touched: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn mode(&self) -> &BuilderMode {
        &self.mode
    }

    pub fn meta(&self) -> Option<&ResumeVersion> {
        self.meta.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn touch(&mut self) {
        self.last_touched = Instant::now();
    }

    pub fn last_touched(&self) -> Instant {
        self.last_touched
    }

    fn edited(&mut self) {
        self.revision += 1;
    }

    fn replace_workflow(&mut self, document: ResumeDocument, mode: BuilderMode) {
        let reconciled = reconcile_layout(
            &document,
            &LayoutConfig::default(),
            TemplateKind::resolve(&document.template_name),
            ReconcilePolicy::PreserveHidden,
        );
        self.document = reconciled.document;
        self.layout = reconciled.layout;
        self.mode = mode;
        self.editing_section = None;
        self.epoch += 1;
        self.edited();
    }

    // ────────────────────────────────────────────────────────────────────────
    // Workflows
    // ────────────────────────────────────────────────────────────────────────

    /// "Create New Resume": back to an empty document in create mode.
    pub fn reset(&mut self) {
        self.replace_workflow(ResumeDocument::default(), BuilderMode::Create);
        self.meta = None;
    }

    pub fn load_for_edit(&mut self, version: ResumeVersion) {
        let mode = BuilderMode::edit(version.version_label.clone());
        self.replace_workflow(version.to_document(), mode);
        self.meta = Some(version);
    }

    /// Copies a version's content into a new, not yet persisted resume.
    pub fn clone_from(&mut self, version: &ResumeVersion) {
        self.replace_workflow(version.to_document(), BuilderMode::Clone);
        self.meta = None;
    }

    // ────────────────────────────────────────────────────────────────────────
    // Document edits
    // ────────────────────────────────────────────────────────────────────────

    /// Validates one section's submission and replaces that section only.
    pub fn apply_section(&mut self, data: SectionData) -> Result<(), EditorError> {
        let section = data.section_id();
        let valid = editors::validate(data)?;
        self.document.replace_section(valid);
        self.edited();
        tracing::debug!("Session {} replaced section {section}", self.id);
        Ok(())
    }

    pub fn apply_patch(&mut self, patch: DocumentPatch) {
        if let Some(title) = patch.title {
            self.document.title = title.trim().to_string();
        }
        if let Some(visibility) = patch.visibility {
            self.document.visibility = visibility;
        }
        if let Some(color) = patch.theme_color {
            self.document.theme_color = color.trim().to_string();
        }
        self.edited();
    }

    pub fn set_editing_section(&mut self, id: Option<SectionId>) {
        self.editing_section = id;
    }

    /// Switches template and reconciles the layout; returns the sections whose data was cleared.
    pub fn switch_template(
        &mut self,
        name: &str,
        policy: ReconcilePolicy,
    ) -> Result<Vec<SectionId>, UnknownTemplate> {
        let kind: TemplateKind = name.parse()?;
        let mut document = self.document.clone();
        document.template_name = kind.name().to_string();
        let reconciled = reconcile_layout(&document, &self.layout, kind, policy);
        self.document = reconciled.document;
        self.layout = reconciled.layout;
        self.edited();
        if !reconciled.cleared.is_empty() {
            tracing::info!(
                "Session {} switched to {kind} ({policy}); cleared {:?}",
                self.id,
                reconciled.cleared
            );
        }
        Ok(reconciled.cleared)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Layout edits
    // ────────────────────────────────────────────────────────────────────────

    pub fn reorder(&mut self, source: usize, destination: usize) -> Result<(), LayoutError> {
        self.layout.reorder(source, destination)?;
        self.edited();
        Ok(())
    }

    pub fn move_section(&mut self, id: SectionId, direction: Direction) -> Result<(), LayoutError> {
        self.layout.move_section(id, direction)?;
        self.edited();
        Ok(())
    }

    pub fn toggle_visibility(&mut self, id: SectionId) -> bool {
        let visible = self.layout.toggle_visibility(id);
        self.edited();
        visible
    }

    pub fn replace_layout(&mut self, entries: Vec<LayoutEntry>) -> Result<(), LayoutError> {
        self.layout.replace(entries)?;
        self.edited();
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Save and export
    // ────────────────────────────────────────────────────────────────────────

    pub fn save_ticket(&self, as_new: bool) -> SaveTicket {
        let meta_label = self.meta.as_ref().map(|m| m.version_label.as_str());
        SaveTicket {
            route: self.mode.route_save(meta_label, as_new),
            document: self.document.clone(),
            revision: self.revision,
            epoch: self.epoch,
        }
    }

    /// Applies a successful save. The returned version becomes the meta.
    pub fn complete_save(&mut self, ticket: &SaveTicket, saved: ResumeVersion) -> SaveOutcome {
        if ticket.epoch != self.epoch {
            tracing::warn!(
                "Session {} moved on during save of {}; result not applied",
                self.id,
                saved.version_label
            );
            return SaveOutcome::Discarded;
        }
        self.mode = self.mode.after_save(&saved.version_label);
        self.meta = Some(saved);
        if ticket.revision == self.revision {
            SaveOutcome::Applied
        } else {
            SaveOutcome::AppliedKeepingEdits
        }
    }

    /// The persisted version an export is tied to, if any.
    pub fn download_label(&self) -> Option<String> {
        self.meta
            .as_ref()
            .map(|m| m.version_label.clone())
            .or_else(|| self.mode.version_label().map(str::to_string))
    }

    /// Title of the last saved version, falling back to the working title.
    pub fn download_title(&self) -> String {
        self.meta
            .as_ref()
            .and_then(|m| m.title.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.document.title)
            .to_string()
    }

    pub fn render(&self) -> RenderedResume {
        render_document(&self.document, &self.layout, &RenderOptions::default())
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            mode: self.mode.clone(),
            editing_section_id: self.editing_section,
            resume_meta: self.meta.as_ref().map(ResumeVersion::summary_view),
            revision: self.revision,
            document: self.document.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new()
    }
}

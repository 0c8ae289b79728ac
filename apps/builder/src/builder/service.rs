//! Operations that span a session and the outside world: persistence and export.
//!
//! The session lock is never held across a store call or an encoder run.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::builder::mode::SaveRoute;
use crate::builder::registry::{SessionRegistry, SharedSession};
use crate::builder::session::{BuilderSession, SaveOutcome, SessionView};
use crate::errors::AppError;
use crate::export::{Artifact, ExportFormat, ExportPipeline, ExportSnapshot};
use crate::layout::ReconcilePolicy;
use crate::persistence::{Readiness, ResumeStore};

/// How a new session is seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSeed {
    Blank,
    Latest,
    Edit(String),
    Clone(String),
}

pub struct BuilderService {
    store: Arc<dyn ResumeStore>,
    sessions: SessionRegistry,
    pipeline: ExportPipeline,
    policy: ReconcilePolicy,
}

impl BuilderService {
    pub fn new(
        store: Arc<dyn ResumeStore>,
        export_timeout: Duration,
        policy: ReconcilePolicy,
    ) -> Self {
        Self {
            store,
            sessions: SessionRegistry::new(),
            pipeline: ExportPipeline::new(export_timeout),
            policy,
        }
    }

    pub fn store(&self) -> &dyn ResumeStore {
        self.store.as_ref()
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub async fn session(&self, id: Uuid) -> Result<SharedSession, AppError> {
        self.sessions
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Builder session {id} not found")))
    }

    /// Locks the session, marks it used and runs `f` against it.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BuilderSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let shared = self.session(id).await?;
        let mut session = shared.lock().await;
        session.touch();
        f(&mut session)
    }

    pub async fn open_session(&self, seed: SessionSeed) -> Result<SessionView, AppError> {
        let mut session = BuilderSession::new();
        match seed {
            SessionSeed::Blank => {}
            SessionSeed::Latest => {
                let version = self.store.get_latest_resume().await?;
                session.load_for_edit(version);
            }
            SessionSeed::Edit(label) => {
                let version = self.store.get_resume_by_version(&label).await?;
                session.load_for_edit(version);
            }
            SessionSeed::Clone(label) => {
                let version = self.store.get_resume_by_version(&label).await?;
                session.clone_from(&version);
            }
        }
        let view = session.view();
        self.sessions.insert(session).await;
        Ok(view)
    }

    /// Loads a persisted version into an existing session for editing or cloning.
    pub async fn load_into(
        &self,
        id: Uuid,
        label: &str,
        clone: bool,
    ) -> Result<SessionView, AppError> {
        // Fail fast on an unknown session before calling the store
        self.session(id).await?;
        let version = self.store.get_resume_by_version(label).await?;
        self.with_session(id, |session| {
            if clone {
                session.clone_from(&version);
            } else {
                session.load_for_edit(version);
            }
            Ok(session.view())
        })
        .await
    }

    pub async fn save(&self, id: Uuid, as_new: bool) -> Result<SessionView, AppError> {
        let ticket = self
            .with_session(id, |session| Ok(session.save_ticket(as_new)))
            .await?;

        let saved = match &ticket.route {
            SaveRoute::Create => {
                tracing::info!("Session {id}: creating a new resume version");
                self.store.create_resume(&ticket.document).await?
            }
            SaveRoute::Update(label) => {
                tracing::info!("Session {id}: updating resume {label}");
                self.store.update_resume(label, &ticket.document).await?
            }
        };

        let label = saved.version_label.clone();
        self.with_session(id, |session| {
            match session.complete_save(&ticket, saved) {
                SaveOutcome::Applied => tracing::info!("Session {id}: saved as {label}"),
                SaveOutcome::AppliedKeepingEdits => {
                    tracing::info!("Session {id}: saved as {label}; newer edits are unsaved")
                }
                SaveOutcome::Discarded => {}
            }
            Ok(session.view())
        })
        .await
    }

    /// Snapshot under the lock, readiness check, then encode off the lock.
    pub async fn export(&self, id: Uuid, format: ExportFormat) -> Result<Artifact, AppError> {
        let (snapshot, cancel) = self
            .with_session(id, |session| {
                let version_label = session.download_label().ok_or_else(|| {
                    AppError::RenderPrecondition(
                        "Save your resume before downloading it".to_string(),
                    )
                })?;
                let snapshot = ExportSnapshot {
                    document: session.document().clone(),
                    rendered: session.render(),
                    version_label,
                    title: session.download_title(),
                };
                Ok((snapshot, session.cancel_token().clone()))
            })
            .await?;

        match self
            .store
            .request_download_readiness(&snapshot.version_label)
            .await?
        {
            Readiness::Ready => {}
            Readiness::NotReady(reason) => {
                tracing::info!(
                    "Download of {} refused by the resume service",
                    snapshot.version_label
                );
                return Err(AppError::Entitlement(reason));
            }
        }

        Ok(self.pipeline.export(format, snapshot, &cancel).await?)
    }

    pub async fn close_session(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.remove(id).await {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Builder session {id} not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::mode::BuilderMode;
    use crate::builder::session::DocumentPatch;
    use crate::persistence::{InMemoryResumeStore, StoreOp};
    use crate::render::sample::sample_resume;

    fn service_with(store: Arc<InMemoryResumeStore>) -> BuilderService {
        BuilderService::new(store, Duration::from_secs(30), ReconcilePolicy::ClearOnSwitch)
    }

    async fn titled(service: &BuilderService, id: Uuid, title: &str) {
        service
            .with_session(id, |s| {
                s.apply_patch(DocumentPatch {
                    title: Some(title.into()),
                    ..Default::default()
                });
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_then_plain_save_updates() {
        let store = Arc::new(InMemoryResumeStore::new());
        let service = service_with(store.clone());
        let view = service.open_session(SessionSeed::Blank).await.unwrap();
        titled(&service, view.id, "Backend Engineer").await;

        let first = service.save(view.id, false).await.unwrap();
        assert_eq!(first.mode, BuilderMode::Create);
        assert_eq!(first.resume_meta.unwrap().version_label, "v1");

        service.save(view.id, false).await.unwrap();
        assert_eq!(store.len().await, 1);

        let third = service.save(view.id, true).await.unwrap();
        assert_eq!(third.resume_meta.unwrap().version_label, "v2");
    }

    #[tokio::test]
    async fn test_failed_save_leaves_session_unchanged() {
        let store = Arc::new(InMemoryResumeStore::new());
        let service = service_with(store.clone());
        let view = service.open_session(SessionSeed::Blank).await.unwrap();
        store.fail_next(StoreOp::Create, 500, "down").await;

        let err = service.save(view.id, false).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));

        let after = service.with_session(view.id, |s| Ok(s.view())).await.unwrap();
        assert_eq!(after.mode, BuilderMode::Create);
        assert!(after.resume_meta.is_none());
        assert_eq!(after.revision, view.revision);
    }

    #[tokio::test]
    async fn test_clone_save_creates_new_version() {
        let store = Arc::new(InMemoryResumeStore::new());
        store.create_resume(&sample_resume()).await.unwrap();
        let service = service_with(store.clone());

        let view = service
            .open_session(SessionSeed::Clone("v1".into()))
            .await
            .unwrap();
        assert_eq!(view.mode, BuilderMode::Clone);
        let saved = service.save(view.id, false).await.unwrap();
        assert_eq!(saved.mode, BuilderMode::Create);
        assert_eq!(saved.resume_meta.unwrap().version_label, "v2");
    }

    #[tokio::test]
    async fn test_export_without_save_is_rejected() {
        let service = service_with(Arc::new(InMemoryResumeStore::new()));
        let view = service.open_session(SessionSeed::Blank).await.unwrap();
        let err = service.export(view.id, ExportFormat::Pdf).await.unwrap_err();
        assert!(matches!(err, AppError::RenderPrecondition(_)));
    }

    #[tokio::test]
    async fn test_export_respects_download_quota() {
        let store = Arc::new(InMemoryResumeStore::with_download_limit(1));
        store.create_resume(&sample_resume()).await.unwrap();
        let service = service_with(store);
        let view = service
            .open_session(SessionSeed::Edit("v1".into()))
            .await
            .unwrap();

        let artifact = service.export(view.id, ExportFormat::Txt).await.unwrap();
        assert_eq!(artifact.filename, "Software_Developer.txt");

        let err = service.export(view.id, ExportFormat::Txt).await.unwrap_err();
        assert!(matches!(err, AppError::Entitlement(_)));
    }

    #[tokio::test]
    async fn test_export_is_named_after_saved_title() {
        let service = service_with(Arc::new(InMemoryResumeStore::new()));
        let view = service.open_session(SessionSeed::Blank).await.unwrap();
        titled(&service, view.id, "Backend Engineer").await;
        service.save(view.id, false).await.unwrap();
        titled(&service, view.id, "Unsaved Rename").await;

        let artifact = service.export(view.id, ExportFormat::Txt).await.unwrap();
        assert_eq!(artifact.filename, "Backend_Engineer.txt");
        let artifact = service.export(view.id, ExportFormat::Pdf).await.unwrap();
        assert_eq!(artifact.filename, "Backend_Engineer_v1.pdf");
    }

    #[tokio::test]
    async fn test_latest_seed_on_empty_store_is_not_found() {
        let service = service_with(Arc::new(InMemoryResumeStore::new()));
        let err = service.open_session(SessionSeed::Latest).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_closed_session_is_gone() {
        let service = service_with(Arc::new(InMemoryResumeStore::new()));
        let view = service.open_session(SessionSeed::Blank).await.unwrap();
        service.close_session(view.id).await.unwrap();
        assert!(matches!(
            service.session(view.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}

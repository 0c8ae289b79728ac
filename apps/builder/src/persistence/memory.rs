//! Process-local `ResumeStore`, used when no resume API is configured and in tests.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use super::{Readiness, ResumeStore, StoreError, StoreOp, DOWNLOAD_LIMIT_MESSAGE};
use crate::models::resume::{ResumeDocument, ResumeSummary, ResumeVersion};

#[derive(Default)]
struct Inner {
    versions: Vec<ResumeVersion>,
    next_label: u32,
    downloads: HashMap<String, u32>,
    fail_next: Option<(StoreOp, u16, String)>,
}

impl Inner {
    fn take_failure(&mut self, op: StoreOp) -> Result<(), StoreError> {
        match self.fail_next.take() {
            Some((failing, status, message)) if failing == op => Err(StoreError::Api {
                op,
                status,
                message,
            }),
            other => {
                self.fail_next = other;
                Ok(())
            }
        }
    }

    fn position(&self, label: &str) -> Result<usize, StoreError> {
        self.versions
            .iter()
            .position(|v| v.version_label == label)
            .ok_or_else(|| StoreError::NotFound(label.to_string()))
    }
}

/// Versions are labelled `v1`, `v2`, ... in creation order.
#[derive(Default)]
pub struct InMemoryResumeStore {
    inner: Mutex<Inner>,
    download_limit: Option<u32>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps downloads per version; further readiness checks report `NotReady`.
    pub fn with_download_limit(limit: u32) -> Self {
        Self {
            inner: Mutex::default(),
            download_limit: Some(limit),
        }
    }

    /// Makes the next call of `op` fail with an API error.
    pub async fn fail_next(&self, op: StoreOp, status: u16, message: impl Into<String>) {
        self.inner.lock().await.fail_next = Some((op, status, message.into()));
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.versions.len()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn create_resume(&self, document: &ResumeDocument) -> Result<ResumeVersion, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::Create)?;
        inner.next_label += 1;
        let label = format!("v{}", inner.next_label);
        let version = ResumeVersion::from_document(label, document, Utc::now());
        inner.versions.push(version.clone());
        Ok(version)
    }

    async fn update_resume(
        &self,
        version_label: &str,
        document: &ResumeDocument,
    ) -> Result<ResumeVersion, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::Update)?;
        let index = inner.position(version_label)?;
        let created_at = inner.versions[index].created_at.unwrap_or_else(Utc::now);
        let mut version =
            ResumeVersion::from_document(version_label.to_string(), document, created_at);
        version.updated_at = Some(Utc::now());
        inner.versions[index] = version.clone();
        Ok(version)
    }

    async fn get_resume_by_version(
        &self,
        version_label: &str,
    ) -> Result<ResumeVersion, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::Load)?;
        let index = inner.position(version_label)?;
        Ok(inner.versions[index].clone())
    }

    async fn get_latest_resume(&self) -> Result<ResumeVersion, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::Load)?;
        inner
            .versions
            .last()
            .cloned()
            .ok_or_else(|| StoreError::NotFound("latest".to_string()))
    }

    async fn get_all_resume_summaries(&self) -> Result<Vec<ResumeSummary>, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::List)?;
        Ok(inner.versions.iter().map(ResumeVersion::summary_view).collect())
    }

    async fn delete_resume_by_version(&self, version_label: &str) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::Delete)?;
        let index = inner.position(version_label)?;
        inner.versions.remove(index);
        inner.downloads.remove(version_label);
        Ok(format!("Resume {version_label} deleted"))
    }

    async fn request_download_readiness(
        &self,
        version_label: &str,
    ) -> Result<Readiness, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::Download)?;
        inner.position(version_label)?;
        let used = inner.downloads.entry(version_label.to_string()).or_insert(0);
        if self.download_limit.is_some_and(|limit| *used >= limit) {
            return Ok(Readiness::NotReady(DOWNLOAD_LIMIT_MESSAGE.to_string()));
        }
        *used += 1;
        Ok(Readiness::Ready)
    }

    async fn match_resume_against_job_description(
        &self,
        version_label: &str,
        job_description: &str,
    ) -> Result<Value, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.take_failure(StoreOp::Match)?;
        let index = inner.position(version_label)?;
        let version = &inner.versions[index];

        let jd = job_description.to_lowercase();
        let matched: Vec<&str> = version
            .skill_list
            .iter()
            .map(|s| s.skill_name.as_str())
            .filter(|name| !name.trim().is_empty() && jd.contains(&name.to_lowercase()))
            .collect();
        let total = version.skill_list.len();
        let score = if total == 0 {
            0
        } else {
            matched.len() * 100 / total
        };
        Ok(json!({
            "versionLabel": version_label,
            "matchScore": score,
            "matchedSkills": matched,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sample::sample_resume;

    #[tokio::test]
    async fn test_labels_increase_and_latest_is_last() {
        let store = InMemoryResumeStore::new();
        let doc = sample_resume();
        assert_eq!(store.create_resume(&doc).await.unwrap().version_label, "v1");
        assert_eq!(store.create_resume(&doc).await.unwrap().version_label, "v2");
        assert_eq!(store.get_latest_resume().await.unwrap().version_label, "v2");
        assert_eq!(store.get_all_resume_summaries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_latest_on_empty_store_is_not_found() {
        let store = InMemoryResumeStore::new();
        assert!(matches!(
            store.get_latest_resume().await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_label_and_replaces_content() {
        let store = InMemoryResumeStore::new();
        let mut doc = sample_resume();
        store.create_resume(&doc).await.unwrap();
        doc.title = "Platform Engineer".into();
        let updated = store.update_resume("v1", &doc).await.unwrap();
        assert_eq!(updated.version_label, "v1");
        let loaded = store.get_resume_by_version("v1").await.unwrap();
        assert_eq!(loaded.to_document(), doc);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_download_limit() {
        let store = InMemoryResumeStore::with_download_limit(1);
        store.create_resume(&sample_resume()).await.unwrap();
        assert_eq!(
            store.request_download_readiness("v1").await.unwrap(),
            Readiness::Ready
        );
        assert!(matches!(
            store.request_download_readiness("v1").await.unwrap(),
            Readiness::NotReady(_)
        ));
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let store = InMemoryResumeStore::new();
        store.fail_next(StoreOp::Create, 500, "boom").await;
        assert!(matches!(
            store.create_resume(&sample_resume()).await,
            Err(StoreError::Api { status: 500, .. })
        ));
        assert!(store.create_resume(&sample_resume()).await.is_ok());
    }

    #[tokio::test]
    async fn test_match_reports_overlapping_skills() {
        let store = InMemoryResumeStore::new();
        let doc = sample_resume();
        let skill = doc.skill_list[0].skill_name.clone();
        store.create_resume(&doc).await.unwrap();
        let report = store
            .match_resume_against_job_description("v1", &format!("We need {skill} experience"))
            .await
            .unwrap();
        assert_eq!(report["versionLabel"], "v1");
        assert!(report["matchedSkills"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s == skill.as_str()));
    }
}

//! Persistence contract for resume versions.
//!
//! The builder never owns storage: versions live behind the resume API. The
//! [`ResumeStore`] trait is carried in `AppState` as `Arc<dyn ResumeStore>` so the
//! HTTP adapter and the in-memory store are interchangeable.

pub mod http;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::resume::{ResumeDocument, ResumeSummary, ResumeVersion};

pub use http::HttpResumeStore;
pub use memory::InMemoryResumeStore;

/// Which store call failed; picks the wording of the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Create,
    Update,
    Load,
    List,
    Delete,
    Download,
    Match,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOp::Create => "create",
            StoreOp::Update => "update",
            StoreOp::Load => "load",
            StoreOp::List => "list",
            StoreOp::Delete => "delete",
            StoreOp::Download => "download",
            StoreOp::Match => "match",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resume '{0}' not found")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error during {op} (status {status}): {message}")]
    Api {
        op: StoreOp,
        status: u16,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    #[error("invalid version label '{0}'")]
    InvalidLabel(String),
}

impl StoreError {
    /// The message shown to the person using the builder.
    pub fn friendly_message(&self) -> String {
        match self {
            StoreError::NotFound(_) => "Resume not found.".to_string(),
            StoreError::Http(_) | StoreError::Unavailable(_) => {
                "Network error. Please check your connection.".to_string()
            }
            StoreError::Parse(_) => {
                "The resume service sent an unexpected response. Please try again.".to_string()
            }
            StoreError::InvalidLabel(_) => "That resume version does not exist.".to_string(),
            StoreError::Api {
                op,
                status,
                message,
            } => api_message(*op, *status, message),
        }
    }
}

/// Version labels are single path segments: no separators, no dot segments.
pub fn check_version_label(label: &str) -> Result<(), StoreError> {
    let trimmed = label.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || label.chars().any(char::is_control);
    if invalid {
        return Err(StoreError::InvalidLabel(label.to_string()));
    }
    Ok(())
}

fn api_message(op: StoreOp, status: u16, message: &str) -> String {
    let server_text = Some(message.trim()).filter(|m| !m.is_empty());
    match (op, status) {
        (StoreOp::Create, 400) if message.to_lowercase().contains("limit") => {
            "You've reached the limit for creating resumes. Consider upgrading to Premium to create more."
                .to_string()
        }
        (StoreOp::Create, 400) => {
            "Some of the fields seem invalid. Please review your resume and try again.".to_string()
        }
        (StoreOp::Update, 400) | (StoreOp::Delete, 400) => server_text
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed (status {status})")),
        (_, 401) => "Unauthorized. Please log in again.".to_string(),
        (StoreOp::Match, 403) => {
            "Access denied. JD matching is available for premium users only.".to_string()
        }
        (StoreOp::Delete, 403) => "You do not have permission to delete this resume.".to_string(),
        (_, 403) => "You're not authorized to perform this action.".to_string(),
        (StoreOp::List, 404) => "No resumes found for this user.".to_string(),
        (_, 404) => "Resume not found.".to_string(),
        (_, s) if s >= 500 => "Something went wrong on our end. Please try again later.".to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

/// Outcome of the pre-download entitlement check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(String),
}

pub const DOWNLOAD_LIMIT_MESSAGE: &str =
    "Free users can only download up to 5 resumes. Please upgrade to Premium.";

/// Versioned resume storage.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create_resume(&self, document: &ResumeDocument) -> Result<ResumeVersion, StoreError>;

    async fn update_resume(
        &self,
        version_label: &str,
        document: &ResumeDocument,
    ) -> Result<ResumeVersion, StoreError>;

    async fn get_resume_by_version(&self, version_label: &str)
        -> Result<ResumeVersion, StoreError>;

    /// `StoreError::NotFound` when the account has no resume yet.
    async fn get_latest_resume(&self) -> Result<ResumeVersion, StoreError>;

    async fn get_all_resume_summaries(&self) -> Result<Vec<ResumeSummary>, StoreError>;

    /// Returns the backend's acknowledgement text.
    async fn delete_resume_by_version(&self, version_label: &str) -> Result<String, StoreError>;

    async fn request_download_readiness(&self, version_label: &str)
        -> Result<Readiness, StoreError>;

    /// Opaque match report, passed through unchanged.
    async fn match_resume_against_job_description(
        &self,
        version_label: &str,
        job_description: &str,
    ) -> Result<Value, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(op: StoreOp, status: u16, message: &str) -> StoreError {
        StoreError::Api {
            op,
            status,
            message: message.into(),
        }
    }

    #[test]
    fn test_create_limit_suggests_upgrade() {
        let msg = api(StoreOp::Create, 400, "Resume limit reached").friendly_message();
        assert!(msg.contains("Premium"));
        let msg = api(StoreOp::Create, 400, "bad email").friendly_message();
        assert!(msg.contains("fields seem invalid"));
    }

    #[test]
    fn test_version_label_must_be_one_segment() {
        assert!(check_version_label("v12").is_ok());
        assert!(check_version_label("resume-2024.v3").is_ok());
        for bad in ["", " ", ".", "..", "../../admin/users", "v1/delete", "v1\\x", "v1\n"] {
            assert!(
                matches!(check_version_label(bad), Err(StoreError::InvalidLabel(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            api(StoreOp::Load, 401, "").friendly_message(),
            "Unauthorized. Please log in again."
        );
        assert!(api(StoreOp::Match, 403, "")
            .friendly_message()
            .contains("premium users"));
        assert!(api(StoreOp::Update, 503, "")
            .friendly_message()
            .contains("on our end"));
        assert_eq!(
            api(StoreOp::Update, 400, "Title too long").friendly_message(),
            "Title too long"
        );
    }
}

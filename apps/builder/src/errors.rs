use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editors::EditorError;
use crate::export::ExportError;
use crate::layout::capability::UnknownTemplate;
use crate::layout::LayoutError;
use crate::persistence::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Download not permitted: {0}")]
    Entitlement(String),

    #[error("Export unavailable: {0}")]
    RenderPrecondition(String),

    #[error("Export timed out after {0}s")]
    ExportTimeout(u64),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Entitlement(_) => "ENTITLEMENT_ERROR",
            AppError::RenderPrecondition(_) => "RENDER_PRECONDITION",
            AppError::ExportTimeout(_) => "EXPORT_TIMEOUT",
            AppError::Cancelled(_) => "CANCELLED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::BAD_GATEWAY,
            AppError::Entitlement(_) => StatusCode::FORBIDDEN,
            AppError::RenderPrecondition(_) | AppError::Cancelled(_) => StatusCode::CONFLICT,
            AppError::ExportTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Entitlement(msg)
            | AppError::RenderPrecondition(msg)
            | AppError::Cancelled(msg) => {
                tracing::debug!("{}: {msg}", self.code());
                msg.clone()
            }
            AppError::Persistence(msg) => {
                tracing::warn!("Persistence error: {msg}");
                msg.clone()
            }
            AppError::ExportTimeout(_) => {
                tracing::warn!("{self}");
                self.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<LayoutError> for AppError {
    fn from(err: LayoutError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<UnknownTemplate> for AppError {
    fn from(err: UnknownTemplate) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(label) => AppError::NotFound(format!("Resume '{label}' not found")),
            StoreError::InvalidLabel(label) => {
                AppError::Validation(format!("Invalid version label '{label}'"))
            }
            other => AppError::Persistence(other.friendly_message()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedFormat(format) => AppError::Validation(format!(
                "Unsupported export format '{format}' (expected pdf, png, txt or docx)"
            )),
            ExportError::Timeout(secs) => AppError::ExportTimeout(secs),
            ExportError::Cancelled => {
                AppError::Cancelled("Export cancelled: the session was closed".to_string())
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

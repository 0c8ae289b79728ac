use std::sync::Arc;

use crate::builder::BuilderService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sessions, the resume store and the export pipeline.
    pub builder: Arc<BuilderService>,
}

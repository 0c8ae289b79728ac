//! Builder sessions: per-surface state, save routing and export gating.

pub mod handlers;
pub mod mode;
pub mod registry;
pub mod service;
pub mod session;

pub use mode::{BuilderMode, SaveRoute};
pub use registry::SessionRegistry;
pub use service::{BuilderService, SessionSeed};
pub use session::{BuilderSession, SessionView};

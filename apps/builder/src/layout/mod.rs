// Section layout: ordering, visibility and template capability reconciliation.
// Everything here is pure; sessions decide when to call it.

pub mod capability;
pub mod config;
pub mod reconcile;

pub use capability::TemplateKind;
pub use config::{Direction, LayoutConfig, LayoutEntry, LayoutError};
pub use reconcile::{reconcile_layout, ReconcilePolicy, Reconciled};

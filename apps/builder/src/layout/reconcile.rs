//! Template-switch reconciliation.
//!
//! A single pure reducer keeps the layout consistent with the capability set of
//! the template that renders it. Callers own the decision of when to run it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::capability::TemplateKind;
use crate::layout::config::LayoutConfig;
use crate::models::resume::ResumeDocument;
use crate::models::section::SectionId;

/// What happens to the data of a section the new template cannot show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Hidden sections are emptied, so re-enabling them later shows nothing.
    #[default]
    ClearOnSwitch,
    /// Hidden sections keep their data.
    PreserveHidden,
}

impl FromStr for ReconcilePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" | "clear_on_switch" => Ok(ReconcilePolicy::ClearOnSwitch),
            "preserve" | "preserve_hidden" => Ok(ReconcilePolicy::PreserveHidden),
            other => Err(format!(
                "unknown reconcile policy '{other}' (expected 'clear' or 'preserve')"
            )),
        }
    }
}

impl fmt::Display for ReconcilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcilePolicy::ClearOnSwitch => f.write_str("clear"),
            ReconcilePolicy::PreserveHidden => f.write_str("preserve"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub document: ResumeDocument,
    pub layout: LayoutConfig,
    /// Sections whose data was emptied (always empty under `PreserveHidden`).
    pub cleared: Vec<SectionId>,
}

/// Clamps visibility to `template`'s capabilities and moves supported sections first.
///
/// Afterwards the visible ids are exactly the capability set, in their previous
/// relative order, followed by the hidden remainder.
pub fn reconcile_layout(
    document: &ResumeDocument,
    layout: &LayoutConfig,
    template: TemplateKind,
    policy: ReconcilePolicy,
) -> Reconciled {
    let mut document = document.clone();
    let mut layout = layout.clone();
    let mut cleared = Vec::new();

    for id in SectionId::ALL {
        let supported = template.supports(id);
        layout.set_visible(id, supported);
        if !supported && policy == ReconcilePolicy::ClearOnSwitch && document.has_content(id) {
            document.clear_section(id);
            cleared.push(id);
        }
    }
    layout.partition_by(|id| template.supports(id));

    Reconciled {
        document,
        layout,
        cleared,
    }
}

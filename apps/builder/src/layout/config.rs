use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::section::SectionId;

/// Render order used for fresh documents; every section visible.
pub const DEFAULT_ORDER: [SectionId; 10] = [
    SectionId::Contact,
    SectionId::Summary,
    SectionId::Experience,
    SectionId::Education,
    SectionId::Projects,
    SectionId::Certifications,
    SectionId::Achievements,
    SectionId::Languages,
    SectionId::PersonalLinks,
    SectionId::Skills,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub id: SectionId,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout index {index} is out of range (layout has {len} sections)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Section '{id}' cannot move {direction:?}: already at the edge")]
    AtEdge { id: SectionId, direction: Direction },

    #[error("Layout must contain every section exactly once")]
    NotAPermutation,
}

/// Ordered visibility flags, one entry per [`SectionId`].
///
/// Every constructor keeps the one-entry-per-id invariant, so ordering
/// operations only ever permute entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LayoutEntry>", into = "Vec<LayoutEntry>")]
pub struct LayoutConfig {
    entries: Vec<LayoutEntry>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ORDER
                .into_iter()
                .map(|id| LayoutEntry { id, visible: true })
                .collect(),
        }
    }
}

impl From<Vec<LayoutEntry>> for LayoutConfig {
    /// Repairs arbitrary input: duplicates are dropped (first wins) and missing
    /// ids are appended hidden.
    fn from(raw: Vec<LayoutEntry>) -> Self {
        let mut entries: Vec<LayoutEntry> = Vec::with_capacity(SectionId::ALL.len());
        for entry in raw {
            if !entries.iter().any(|e| e.id == entry.id) {
                entries.push(entry);
            }
        }
        for id in DEFAULT_ORDER {
            if !entries.iter().any(|e| e.id == id) {
                entries.push(LayoutEntry { id, visible: false });
            }
        }
        Self { entries }
    }
}

impl From<LayoutConfig> for Vec<LayoutEntry> {
    fn from(layout: LayoutConfig) -> Self {
        layout.entries
    }
}

impl LayoutConfig {
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn position(&self, id: SectionId) -> usize {
        // Every id is present by construction.
        self.entries
            .iter()
            .position(|e| e.id == id)
            .unwrap_or(self.entries.len())
    }

    pub fn is_visible(&self, id: SectionId) -> bool {
        self.entries.iter().any(|e| e.id == id && e.visible)
    }

    /// Visible ids in render order.
    pub fn visible_ids(&self) -> Vec<SectionId> {
        self.entries
            .iter()
            .filter(|e| e.visible)
            .map(|e| e.id)
            .collect()
    }

    pub(crate) fn set_visible(&mut self, id: SectionId, visible: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.visible = visible;
        }
    }

    /// Moves the entry at `source` so it lands at `destination`.
    pub fn reorder(&mut self, source: usize, destination: usize) -> Result<(), LayoutError> {
        let len = self.entries.len();
        for index in [source, destination] {
            if index >= len {
                return Err(LayoutError::IndexOutOfRange { index, len });
            }
        }
        let entry = self.entries.remove(source);
        self.entries.insert(destination, entry);
        Ok(())
    }

    /// Swaps `id` with its neighbour in `direction`.
    pub fn move_section(&mut self, id: SectionId, direction: Direction) -> Result<(), LayoutError> {
        let index = self.position(id);
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|t| *t < self.entries.len()),
        };
        let target = target.ok_or(LayoutError::AtEdge { id, direction })?;
        self.entries.swap(index, target);
        Ok(())
    }

    /// Flips one visibility flag; order is untouched. Returns the new flag.
    pub fn toggle_visibility(&mut self, id: SectionId) -> bool {
        let index = self.position(id);
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.visible = !entry.visible;
                entry.visible
            }
            None => false,
        }
    }

    /// Replaces the whole layout with `proposed`, which must list every id once.
    pub fn replace(&mut self, proposed: Vec<LayoutEntry>) -> Result<(), LayoutError> {
        let is_permutation = proposed.len() == SectionId::ALL.len()
            && SectionId::ALL
                .iter()
                .all(|id| proposed.iter().filter(|e| e.id == *id).count() == 1);
        if !is_permutation {
            return Err(LayoutError::NotAPermutation);
        }
        self.entries = proposed;
        Ok(())
    }

    /// Stable partition: entries matching `keep_first` move ahead of the rest.
    pub(crate) fn partition_by(&mut self, keep_first: impl Fn(SectionId) -> bool) {
        let (mut first, rest): (Vec<_>, Vec<_>) =
            self.entries.iter().copied().partition(|e| keep_first(e.id));
        first.extend(rest);
        self.entries = first;
    }
}

//! Selection identities and the selection seam.

use serde::{Deserialize, Serialize};

/// Identity of one category row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionId {
    /// Category column display name
    pub column: String,
    /// Row index within the column
    pub index: usize,
    /// Category label of the row
    pub key: String,
}

impl SelectionId {
    /// Create a selection id for a category row.
    #[must_use]
    pub fn new(column: impl Into<String>, index: usize, key: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            index,
            key: key.into(),
        }
    }
}

/// Host selection service.
pub trait SelectionManager {
    /// Apply a click on `id` and return the resulting selection.
    fn select(&mut self, id: &SelectionId, multi_select: bool) -> Vec<SelectionId>;

    /// Drop every selected id.
    fn clear(&mut self);

    /// Currently selected ids.
    fn selected(&self) -> &[SelectionId];

    /// Check whether `id` is selected.
    fn is_selected(&self, id: &SelectionId) -> bool {
        self.selected().contains(id)
    }

    /// Check whether any selection is active.
    fn has_selection(&self) -> bool {
        !self.selected().is_empty()
    }
}

/// In-memory selection manager with host-style toggle semantics.
///
/// A single click selects only the clicked row, and clicking the sole
/// selected row again clears it. A multi-select click toggles the row
/// within the current selection.
#[derive(Debug, Clone, Default)]
pub struct ToggleSelectionManager {
    selected: Vec<SelectionId>,
}

impl ToggleSelectionManager {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionManager for ToggleSelectionManager {
    fn select(&mut self, id: &SelectionId, multi_select: bool) -> Vec<SelectionId> {
        if multi_select {
            if let Some(pos) = self.selected.iter().position(|s| s == id) {
                self.selected.remove(pos);
            } else {
                self.selected.push(id.clone());
            }
        } else if self.selected.len() == 1 && self.selected[0] == *id {
            self.selected.clear();
        } else {
            self.selected = vec![id.clone()];
        }
        self.selected.clone()
    }

    fn clear(&mut self) {
        self.selected.clear();
    }

    fn selected(&self) -> &[SelectionId] {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> SelectionId {
        SelectionId::new("Region", i, format!("R{i}"))
    }

    #[test]
    fn test_single_select_replaces() {
        let mut m = ToggleSelectionManager::new();
        m.select(&id(0), false);
        let ids = m.select(&id(1), false);
        assert_eq!(ids, vec![id(1)]);
        assert!(m.is_selected(&id(1)));
        assert!(!m.is_selected(&id(0)));
    }

    #[test]
    fn test_reselect_sole_item_clears() {
        let mut m = ToggleSelectionManager::new();
        m.select(&id(2), false);
        let ids = m.select(&id(2), false);
        assert!(ids.is_empty());
        assert!(!m.has_selection());
    }

    #[test]
    fn test_multi_select_toggles() {
        let mut m = ToggleSelectionManager::new();
        m.select(&id(0), true);
        m.select(&id(1), true);
        assert_eq!(m.selected().len(), 2);
        m.select(&id(0), true);
        assert_eq!(m.selected(), &[id(1)]);
    }

    #[test]
    fn test_clear() {
        let mut m = ToggleSelectionManager::new();
        m.select(&id(0), false);
        m.clear();
        assert!(!m.has_selection());
    }
}

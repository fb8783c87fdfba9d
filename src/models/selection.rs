use std::collections::BTreeSet;

use super::ImageList;

/// Paths currently marked for a bulk action.
///
/// Kept as a sorted set so iteration matches the order of [`ImageList`].
/// The owner clears it on every list replacement; it never filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    paths: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes `path`. Redundant calls are no-ops.
    ///
    /// Returns whether the set changed.
    pub fn toggle(&mut self, path: &str, included: bool) -> bool {
        if included {
            self.paths.insert(path.to_string())
        } else {
            self.paths.remove(path)
        }
    }

    /// Single select/deselect control: clears a full selection, otherwise
    /// selects every path in `list`.
    pub fn select_all(&mut self, list: &ImageList) {
        if self.paths.len() == list.len() {
            self.paths.clear();
        } else {
            self.paths = list.paths().map(str::to_string).collect();
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// True when every image of a non-empty list is selected.
    pub fn is_full(&self, list: &ImageList) -> bool {
        !list.is_empty() && self.paths.len() == list.len()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.paths.iter().cloned().collect()
    }
}

use tracing::debug;

/// One image in a dataset. The path is its only identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageEntry {
    pub path: String,
}

impl ImageEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Canonical image listing for a dataset: ascending by path, unique by path.
///
/// Built once per successful fetch and replaced wholesale, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageList {
    entries: Vec<ImageEntry>,
}

impl ImageList {
    /// Normalizes entries in whatever order the server produced them.
    ///
    /// Ordering is ordinal (byte-wise) on the path. Repeated paths collapse
    /// to a single entry.
    pub fn from_unordered(mut entries: Vec<ImageEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        let before = entries.len();
        entries.dedup_by(|a, b| a.path == b.path);
        if entries.len() != before {
            debug!(
                dropped = before - entries.len(),
                "Collapsed duplicate image paths"
            );
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries
            .binary_search_by(|e| e.path.as_str().cmp(path))
            .is_ok()
    }
}

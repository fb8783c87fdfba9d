/// Whether the current [`ImageList`](super::ImageList) can be shown as current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryStatus {
    /// Nothing fetched yet.
    #[default]
    Idle,
    Loading,
    Success,
    /// The last fetch failed; the previous list is not trustworthy.
    Error,
}

impl GalleryStatus {
    pub fn is_loaded(self) -> bool {
        self == Self::Success
    }
}

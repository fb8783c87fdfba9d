//! Gallery state machine for one mounted dataset view.
//!
//! `idle -> loading -> success | error`, re-entering `loading` on every
//! refetch. All mutation happens between await points under a short-lived
//! lock, so several operations can be driven concurrently on one task.
//! Every fetch carries a generation number; a response whose generation is
//! no longer current is dropped instead of applied.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use super::batch_delete::{BatchDeleteOrchestrator, BatchOutcome};
use super::commands::{UiCommandSender, UploadOutcome};
use super::fetcher::ListFetcher;
use crate::api::DatasetApi;
use crate::error::Result;
use crate::models::{GalleryStatus, ImageEntry, ImageList, SelectionSet};

#[derive(Debug, Default)]
struct GalleryState {
    dataset: String,
    images: ImageList,
    selection: SelectionSet,
    status: GalleryStatus,
    generation: u64,
}

/// What the rendering layer needs to draw the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub dataset: String,
    pub status: GalleryStatus,
    /// Only populated while `status` is `Success`.
    pub images: Vec<ImageEntry>,
    /// Selected paths in list order.
    pub selected: Vec<String>,
    pub fully_selected: bool,
}

impl GalleryView {
    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.iter().any(|p| p == path)
    }

    pub fn select_all_label(&self) -> &'static str {
        if self.fully_selected {
            "Deselect All"
        } else {
            "Select All"
        }
    }

    /// Label of the bulk delete action, absent when nothing is selected.
    pub fn delete_label(&self) -> Option<String> {
        (!self.selected.is_empty()).then(|| format!("Delete Selected ({})", self.selected.len()))
    }
}

pub struct GalleryController<A> {
    fetcher: ListFetcher<A>,
    deleter: BatchDeleteOrchestrator<A>,
    ui: UiCommandSender,
    state: Mutex<GalleryState>,
}

impl<A: DatasetApi> GalleryController<A> {
    pub fn new(api: Arc<A>, ui: UiCommandSender) -> Self {
        Self {
            fetcher: ListFetcher::new(Arc::clone(&api)),
            deleter: BatchDeleteOrchestrator::new(api, ui.clone()),
            ui,
            state: Mutex::new(GalleryState::default()),
        }
    }

    pub fn dataset(&self) -> String {
        self.state.lock().dataset.clone()
    }

    pub fn status(&self) -> GalleryStatus {
        self.state.lock().status
    }

    pub fn view(&self) -> GalleryView {
        let state = self.state.lock();
        let loaded = state.status.is_loaded();
        let images = if loaded {
            state.images.entries().to_vec()
        } else {
            Vec::new()
        };
        GalleryView {
            dataset: state.dataset.clone(),
            status: state.status,
            images,
            selected: state.selection.to_vec(),
            fully_selected: loaded && state.selection.is_full(&state.images),
        }
    }

    /// Shows `dataset`, discarding everything known about the previous one.
    ///
    /// An empty name leaves the view idle without a request.
    pub async fn mount(&self, dataset: &str) -> Result<()> {
        {
            let mut state = self.state.lock();
            let generation = state.generation + 1;
            *state = GalleryState {
                dataset: dataset.trim().to_string(),
                generation,
                ..GalleryState::default()
            };
            info!(dataset = %state.dataset, "Mounted dataset");
        }
        self.reload(None).await
    }

    /// Refetches the mounted dataset.
    pub async fn refresh(&self) -> Result<()> {
        self.reload(None).await
    }

    /// Adds or removes one image from the selection.
    ///
    /// Paths that are not in the displayed list are never selected.
    pub fn toggle(&self, path: &str, included: bool) -> bool {
        let mut state = self.state.lock();
        if included && !(state.status.is_loaded() && state.images.contains(path)) {
            debug!(path, "Ignoring selection of unlisted image");
            return false;
        }
        state.selection.toggle(path, included)
    }

    /// Selects every listed image, or clears the selection if all are selected.
    pub fn select_all(&self) {
        let mut state = self.state.lock();
        if !state.status.is_loaded() {
            return;
        }
        let GalleryState {
            images, selection, ..
        } = &mut *state;
        selection.select_all(images);
    }

    /// Deletes the selection after confirmation, then reconciles.
    ///
    /// Any failed item fails the whole batch with
    /// [`GalleryError::BatchFailed`](crate::error::GalleryError::BatchFailed);
    /// the list is refetched either way. Nothing happens unless the list is
    /// currently shown.
    pub async fn delete_selected(&self) -> Result<BatchOutcome> {
        let (dataset, paths) = {
            let state = self.state.lock();
            if !state.status.is_loaded() {
                return Ok(BatchOutcome::NothingSelected);
            }
            (state.dataset.clone(), state.selection.to_vec())
        };
        self.delete_paths(paths, &dataset).await
    }

    /// Deletes one image from its card, with the same reconciliation as a batch.
    ///
    /// Only images of the displayed list can be deleted this way.
    pub async fn delete_image(&self, path: &str) -> Result<BatchOutcome> {
        let dataset = {
            let state = self.state.lock();
            if !(state.status.is_loaded() && state.images.contains(path)) {
                debug!(path, "Ignoring delete of unlisted image");
                return Ok(BatchOutcome::NothingSelected);
            }
            state.dataset.clone()
        };
        self.delete_paths(vec![path.to_string()], &dataset).await
    }

    async fn delete_paths(&self, paths: Vec<String>, dataset: &str) -> Result<BatchOutcome> {
        let outcome = self.deleter.delete_selected(&paths, dataset).await;
        let batch = match &outcome {
            BatchOutcome::Completed(report) => report.to_result(),
            _ => return Ok(outcome),
        };

        {
            let mut state = self.state.lock();
            if state.dataset == dataset {
                state.selection.clear();
            }
        }
        let reloaded = self.reload(Some(dataset)).await;

        batch?;
        reloaded?;
        Ok(outcome)
    }

    /// Opens the upload dialog and refetches once images were added.
    pub async fn request_upload(&self) -> Result<UploadOutcome> {
        let dataset = self.dataset();
        if dataset.is_empty() {
            return Ok(UploadOutcome::Cancelled);
        }
        let outcome = self.ui.open_upload(&dataset).await;
        if outcome == UploadOutcome::Uploaded {
            self.reload(Some(&dataset)).await?;
        }
        Ok(outcome)
    }

    /// Fetches the mounted dataset. With `expected`, does nothing if another
    /// dataset has been mounted since.
    async fn reload(&self, expected: Option<&str>) -> Result<()> {
        let (dataset, generation) = {
            let mut state = self.state.lock();
            if expected.is_some_and(|name| name != state.dataset) {
                debug!(dataset = ?expected, "Dataset changed, skipping refresh");
                return Ok(());
            }
            if state.dataset.is_empty() {
                return Ok(());
            }
            state.generation += 1;
            state.status = GalleryStatus::Loading;
            (state.dataset.clone(), state.generation)
        };

        let fetched = self.fetcher.fetch(&dataset).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(dataset = %dataset, generation, "Discarding stale image list");
            return Ok(());
        }
        match fetched {
            Ok(Some(images)) => {
                state.images = images;
                state.selection.clear();
                state.status = GalleryStatus::Success;
                Ok(())
            }
            Ok(None) => {
                state.status = GalleryStatus::Idle;
                Ok(())
            }
            Err(err) => {
                error!(dataset = %dataset, error = %err, "Error fetching images");
                state.selection.clear();
                state.status = GalleryStatus::Error;
                Err(err)
            }
        }
    }
}

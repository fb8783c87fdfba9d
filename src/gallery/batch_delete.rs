//! Confirmed, concurrent multi-image delete.
//!
//! Every request of a batch is issued at once and the batch waits for all of
//! them to settle. Per-item results are kept in a [`BatchReport`]; callers
//! only act on the coarse success flag and reconcile by refetching.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{error, info, warn};

use super::commands::{ConfirmKind, UiCommandSender};
use crate::api::DatasetApi;
use crate::error::GalleryError;

/// Result of a single delete request within a batch.
#[derive(Debug)]
pub struct ItemOutcome {
    pub path: String,
    pub error: Option<GalleryError>,
}

/// Settled outcomes of every request in a batch, in request order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.error.is_some()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.total() - self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Coarse batch status: any failed item fails the whole batch.
    pub fn to_result(&self) -> Result<usize, GalleryError> {
        if self.is_success() {
            Ok(self.total())
        } else {
            Err(GalleryError::BatchFailed {
                failed: self.failed(),
                total: self.total(),
            })
        }
    }
}

#[derive(Debug)]
pub enum BatchOutcome {
    /// Nothing to delete; no prompt was shown and no request sent.
    NothingSelected,
    /// The user declined the confirmation.
    Cancelled,
    /// Every request settled.
    Completed(BatchReport),
}

pub struct BatchDeleteOrchestrator<A> {
    api: Arc<A>,
    ui: UiCommandSender,
}

impl<A: DatasetApi> BatchDeleteOrchestrator<A> {
    pub fn new(api: Arc<A>, ui: UiCommandSender) -> Self {
        Self { api, ui }
    }

    /// Confirms with the user, then deletes `paths` from `dataset` concurrently.
    pub async fn delete_selected(&self, paths: &[String], dataset: &str) -> BatchOutcome {
        if paths.is_empty() {
            return BatchOutcome::NothingSelected;
        }

        let (title, message) = confirm_text(paths.len());
        if !self
            .ui
            .confirm(title, message, ConfirmKind::Warning, "Delete")
            .await
        {
            info!(dataset, count = paths.len(), "Delete cancelled");
            return BatchOutcome::Cancelled;
        }

        BatchOutcome::Completed(self.run(paths, dataset).await)
    }

    async fn run(&self, paths: &[String], dataset: &str) -> BatchReport {
        info!(dataset, count = paths.len(), "Deleting images");

        let api = &self.api;
        let results = join_all(paths.iter().map(|path| api.delete_image(path))).await;

        let items: Vec<ItemOutcome> = paths
            .iter()
            .zip(results)
            .map(|(path, result)| {
                if let Err(err) = &result {
                    warn!(dataset, path = %path, error = %err, "Failed to delete image");
                }
                ItemOutcome {
                    path: path.clone(),
                    error: result.err(),
                }
            })
            .collect();
        let report = BatchReport { items };

        if report.is_success() {
            info!(dataset, count = report.total(), "Deleted images");
        } else {
            error!(
                dataset,
                failed = report.failed(),
                total = report.total(),
                "Error deleting images"
            );
        }
        report
    }
}

fn confirm_text(count: usize) -> (String, String) {
    if count == 1 {
        (
            "Delete Image".to_string(),
            "Are you sure you want to delete this image? This action cannot be undone.".to_string(),
        )
    } else {
        (
            "Delete Selected Images".to_string(),
            format!(
                "Are you sure you want to delete {count} selected images? This action cannot be undone."
            ),
        )
    }
}

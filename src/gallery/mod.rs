//! Gallery state controller for a dataset view.
//!
//! This module provides:
//! - `ListFetcher` - Fetches and normalizes a dataset's image listing
//! - `BatchDeleteOrchestrator` - Confirmed, concurrent multi-image delete
//! - `GalleryController` - The `idle/loading/success/error` state machine
//! - `commands` - Confirmation and upload intents for the presentation layer

pub mod batch_delete;
pub mod commands;
pub mod controller;
pub mod fetcher;

#[cfg(test)]
pub(crate) mod testing;

pub use batch_delete::{BatchDeleteOrchestrator, BatchOutcome, BatchReport};
pub use commands::{ui_channel, ConfirmKind, ConfirmRequest, UiCommand, UiCommandSender, UploadOutcome, UploadRequest};
pub use controller::{GalleryController, GalleryView};
pub use fetcher::ListFetcher;

//! Dataset image gallery: list a dataset's images, keep a selection in sync
//! with the listing and delete the selection in one confirmed batch.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod models;

pub use error::{GalleryError, Result};

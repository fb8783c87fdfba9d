//! Transport seam between the gallery core and the dataset server.
//!
//! - `DatasetApi` - the two calls the core needs
//! - `HttpDatasetApi` - reqwest implementation of the server's JSON endpoints
//! - `wire` - request/response payloads

pub mod http;
pub mod wire;

use std::future::Future;

use crate::error::Result;
use crate::models::ImageEntry;

pub use http::HttpDatasetApi;

pub const LIST_IMAGES_ENDPOINT: &str = "/api/datasets/listImages";
pub const DELETE_IMAGE_ENDPOINT: &str = "/api/img/delete";

/// Remote operations on a dataset server.
pub trait DatasetApi {
    /// Images of `dataset`, in whatever order the server returns them.
    fn list_images(&self, dataset: &str) -> impl Future<Output = Result<Vec<ImageEntry>>> + Send;

    /// Removes one image. Any non-success answer is an error.
    fn delete_image(&self, path: &str) -> impl Future<Output = Result<()>> + Send;
}

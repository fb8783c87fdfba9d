//! reqwest-backed client for the dataset server's JSON endpoints.

use serde::Serialize;
use tracing::{debug, trace};

use super::wire::{decode_list_response, DeleteImageRequest, ListImagesRequest};
use super::{DatasetApi, DELETE_IMAGE_ENDPOINT, LIST_IMAGES_ENDPOINT};
use crate::config::ClientConfig;
use crate::error::{GalleryError, Result};
use crate::models::ImageEntry;

#[derive(Debug, Clone)]
pub struct HttpDatasetApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpDatasetApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GalleryError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// POSTs `body` as JSON and returns the raw response body of a 2xx answer.
    async fn post_json<T: Serialize + Sync + ?Sized>(&self, endpoint: &str, body: &T) -> Result<Vec<u8>> {
        let url = self.config.endpoint(endpoint);
        trace!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GalleryError::network(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GalleryError::network(endpoint, e))?;
        Ok(bytes.to_vec())
    }
}

impl DatasetApi for HttpDatasetApi {
    async fn list_images(&self, dataset: &str) -> Result<Vec<ImageEntry>> {
        let body = self
            .post_json(LIST_IMAGES_ENDPOINT, &ListImagesRequest { dataset_name: dataset })
            .await?;
        let images = decode_list_response(&body)?;
        debug!(dataset, count = images.len(), "Listed images");
        Ok(images)
    }

    async fn delete_image(&self, path: &str) -> Result<()> {
        self.post_json(DELETE_IMAGE_ENDPOINT, &DeleteImageRequest { img_path: path })
            .await?;
        debug!(path, "Deleted image");
        Ok(())
    }
}

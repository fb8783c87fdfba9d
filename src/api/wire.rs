use serde::{Deserialize, Serialize};

use super::LIST_IMAGES_ENDPOINT;
use crate::error::{GalleryError, Result};
use crate::models::ImageEntry;

#[derive(Debug, Serialize)]
pub struct ListImagesRequest<'a> {
    #[serde(rename = "datasetName")]
    pub dataset_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ListImagesResponse {
    pub images: Vec<WireImage>,
}

#[derive(Debug, Deserialize)]
pub struct WireImage {
    pub img_path: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteImageRequest<'a> {
    #[serde(rename = "imgPath")]
    pub img_path: &'a str,
}

/// Parses a `listImages` body. Anything but `{"images":[{"img_path":..}]}` is malformed.
pub fn decode_list_response(body: &[u8]) -> Result<Vec<ImageEntry>> {
    let response: ListImagesResponse = serde_json::from_slice(body)
        .map_err(|e| GalleryError::malformed(LIST_IMAGES_ENDPOINT, e))?;
    Ok(response
        .images
        .into_iter()
        .map(|img| ImageEntry::new(img.img_path))
        .collect())
}

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::DatasetApi;
use crate::error::Result;
use crate::models::ImageList;

/// Loads and normalizes the image listing of a dataset.
pub struct ListFetcher<A> {
    api: Arc<A>,
}

impl<A: DatasetApi> ListFetcher<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetches the current listing of `dataset`.
    ///
    /// Returns `Ok(None)` without touching the network when no dataset is
    /// selected yet (empty name). A failure never yields a partial list.
    pub async fn fetch(&self, dataset: &str) -> Result<Option<ImageList>> {
        if dataset.trim().is_empty() {
            debug!("No dataset selected, skipping fetch");
            return Ok(None);
        }

        info!(dataset, "Fetching images");
        let entries = self.api.list_images(dataset).await?;
        let list = ImageList::from_unordered(entries);
        debug!(dataset, count = list.len(), "Fetched images");
        Ok(Some(list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use crate::gallery::testing::FakeServer;

    #[tokio::test]
    async fn test_fetch_sorts_listing() {
        let server = Arc::new(FakeServer::default().with_dataset("cats", &["b.png", "a.png"]));
        let fetcher = ListFetcher::new(Arc::clone(&server));

        let list = fetcher.fetch("cats").await.unwrap().unwrap();
        let paths: Vec<&str> = list.paths().collect();
        assert_eq!(paths, vec!["a.png", "b.png"]);
        assert_eq!(server.list_calls(), vec!["cats"]);
    }

    #[tokio::test]
    async fn test_empty_dataset_issues_no_request() {
        let server = Arc::new(FakeServer::default());
        let fetcher = ListFetcher::new(Arc::clone(&server));

        assert!(fetcher.fetch("").await.unwrap().is_none());
        assert!(fetcher.fetch("   ").await.unwrap().is_none());
        assert!(server.list_calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let server = Arc::new(FakeServer::default().with_dataset("cats", &["a.png"]));
        server.fail_list("cats", true);
        let fetcher = ListFetcher::new(Arc::clone(&server));

        let err = fetcher.fetch("cats").await.unwrap_err();
        assert!(matches!(err, GalleryError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unknown_dataset_is_empty_list() {
        let server = Arc::new(FakeServer::default());
        let fetcher = ListFetcher::new(Arc::clone(&server));
        let list = fetcher.fetch("dogs").await.unwrap().unwrap();
        assert!(list.is_empty());
    }
}

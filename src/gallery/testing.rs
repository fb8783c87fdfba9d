//! In-memory dataset server used by the gallery tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use super::commands::{UiCommand, UploadOutcome};
use crate::api::{DatasetApi, DELETE_IMAGE_ENDPOINT, LIST_IMAGES_ENDPOINT};
use crate::error::{GalleryError, Result};
use crate::models::ImageEntry;

/// Holds a `list_images` call for one dataset until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
struct ServerState {
    datasets: HashMap<String, Vec<String>>,
    failing_deletes: HashSet<String>,
    failing_lists: HashSet<String>,
    gates: HashMap<String, Arc<Gate>>,
    list_calls: Vec<String>,
    delete_calls: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
}

#[derive(Default)]
pub struct FakeServer {
    state: Mutex<ServerState>,
}

impl FakeServer {
    pub fn with_dataset(self, name: &str, paths: &[&str]) -> Self {
        self.state
            .lock()
            .datasets
            .insert(name.to_string(), paths.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn fail_delete(&self, path: &str) {
        self.state.lock().failing_deletes.insert(path.to_string());
    }

    pub fn fail_list(&self, dataset: &str, failing: bool) {
        let mut state = self.state.lock();
        if failing {
            state.failing_lists.insert(dataset.to_string());
        } else {
            state.failing_lists.remove(dataset);
        }
    }

    pub fn add_image(&self, dataset: &str, path: &str) {
        self.state
            .lock()
            .datasets
            .entry(dataset.to_string())
            .or_default()
            .push(path.to_string());
    }

    pub fn gate(&self, dataset: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.state
            .lock()
            .gates
            .insert(dataset.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.state.lock().list_calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().delete_calls.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.lock().max_in_flight
    }
}

impl DatasetApi for FakeServer {
    async fn list_images(&self, dataset: &str) -> Result<Vec<ImageEntry>> {
        let gate = {
            let mut state = self.state.lock();
            state.list_calls.push(dataset.to_string());
            state.gates.remove(dataset)
        };
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let state = self.state.lock();
        if state.failing_lists.contains(dataset) {
            return Err(GalleryError::Status {
                endpoint: LIST_IMAGES_ENDPOINT.to_string(),
                status: 500,
            });
        }
        Ok(state
            .datasets
            .get(dataset)
            .map(|paths| paths.iter().map(ImageEntry::new).collect())
            .unwrap_or_default())
    }

    async fn delete_image(&self, path: &str) -> Result<()> {
        {
            let mut state = self.state.lock();
            state.delete_calls.push(path.to_string());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
        }
        tokio::task::yield_now().await;

        let mut state = self.state.lock();
        state.in_flight -= 1;
        if state.failing_deletes.contains(path) {
            return Err(GalleryError::Status {
                endpoint: DELETE_IMAGE_ENDPOINT.to_string(),
                status: 500,
            });
        }
        for paths in state.datasets.values_mut() {
            paths.retain(|p| p != path);
        }
        Ok(())
    }
}

/// Answers every UI command in the background and counts confirmation prompts.
pub fn spawn_presenter(
    rx: flume::Receiver<UiCommand>,
    approve: bool,
    upload: UploadOutcome,
) -> Arc<AtomicUsize> {
    let prompts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&prompts);
    tokio::spawn(async move {
        while let Ok(command) = rx.recv_async().await {
            match command {
                UiCommand::Confirm(req) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    req.respond(approve);
                }
                UiCommand::OpenUpload(req) => req.respond(upload),
            }
        }
    });
    prompts
}

//! Intents the gallery sends to the presentation layer.
//!
//! The presentation layer owns every dialog. The core only asks for one and
//! waits on the reply channel; a dropped reply counts as a refusal.

use tokio::sync::oneshot;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// Irreversible action.
    Warning,
}

/// Request for explicit user approval before an action runs.
#[derive(Debug)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub kind: ConfirmKind,
    pub confirm_text: String,
    reply: oneshot::Sender<bool>,
}

impl ConfirmRequest {
    pub fn respond(self, approved: bool) {
        // The requester may have given up waiting; nothing to do then.
        let _ = self.reply.send(approved);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    Cancelled,
}

/// Request to show the upload dialog for a dataset.
#[derive(Debug)]
pub struct UploadRequest {
    pub dataset: String,
    reply: oneshot::Sender<UploadOutcome>,
}

impl UploadRequest {
    pub fn respond(self, outcome: UploadOutcome) {
        let _ = self.reply.send(outcome);
    }
}

#[derive(Debug)]
pub enum UiCommand {
    Confirm(ConfirmRequest),
    OpenUpload(UploadRequest),
}

/// Sending half of the UI command channel, held by the gallery core.
#[derive(Debug, Clone)]
pub struct UiCommandSender {
    tx: flume::Sender<UiCommand>,
}

pub fn ui_channel() -> (UiCommandSender, flume::Receiver<UiCommand>) {
    let (tx, rx) = flume::unbounded();
    (UiCommandSender { tx }, rx)
}

impl UiCommandSender {
    /// Asks for approval and waits for the answer.
    pub async fn confirm(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: ConfirmKind,
        confirm_text: impl Into<String>,
    ) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = ConfirmRequest {
            title: title.into(),
            message: message.into(),
            kind,
            confirm_text: confirm_text.into(),
            reply,
        };
        if self.tx.send_async(UiCommand::Confirm(request)).await.is_err() {
            warn!("No presenter for confirmation request");
            return false;
        }
        answer.await.unwrap_or(false)
    }

    /// Opens the upload dialog for `dataset` and waits until it closes.
    pub async fn open_upload(&self, dataset: &str) -> UploadOutcome {
        let (reply, answer) = oneshot::channel();
        let request = UploadRequest {
            dataset: dataset.to_string(),
            reply,
        };
        if self.tx.send_async(UiCommand::OpenUpload(request)).await.is_err() {
            warn!("No presenter for upload request");
            return UploadOutcome::Cancelled;
        }
        answer.await.unwrap_or(UploadOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_confirm_roundtrip() {
        let (ui, rx) = ui_channel();
        let presenter = tokio::spawn(async move {
            match rx.recv_async().await.unwrap() {
                UiCommand::Confirm(req) => {
                    assert_eq!(req.title, "Delete");
                    assert_eq!(req.kind, ConfirmKind::Warning);
                    req.respond(true);
                }
                other => panic!("unexpected command: {other:?}"),
            }
        });
        assert!(ui.confirm("Delete", "Sure?", ConfirmKind::Warning, "Delete").await);
        presenter.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_reply_is_refusal() {
        let (ui, rx) = ui_channel();
        let presenter = tokio::spawn(async move {
            drop(rx.recv_async().await.unwrap());
        });
        assert!(!ui.confirm("Delete", "Sure?", ConfirmKind::Warning, "Ok").await);
        presenter.await.unwrap();
    }

    #[tokio::test]
    async fn test_no_presenter() {
        let (ui, rx) = ui_channel();
        drop(rx);
        assert!(!ui.confirm("Delete", "Sure?", ConfirmKind::Warning, "Ok").await);
        assert_eq!(ui.open_upload("cats").await, UploadOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_upload_roundtrip() {
        let (ui, rx) = ui_channel();
        let presenter = tokio::spawn(async move {
            match rx.recv_async().await.unwrap() {
                UiCommand::OpenUpload(req) => {
                    assert_eq!(req.dataset, "cats");
                    req.respond(UploadOutcome::Uploaded);
                }
                other => panic!("unexpected command: {other:?}"),
            }
        });
        assert_eq!(ui.open_upload("cats").await, UploadOutcome::Uploaded);
        presenter.await.unwrap();
    }
}

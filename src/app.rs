//! Terminal front end for a dataset gallery.
//!
//! - `parse_command` - Shell command parsing
//! - `render` - Text rendering of a `GalleryView`
//! - `GalleryApp` - Input loop that also answers confirmation and upload dialogs

use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::api::{DatasetApi, HttpDatasetApi};
use crate::config::ClientConfig;
use crate::gallery::{
    ui_channel, BatchOutcome, ConfirmKind, GalleryController, GalleryView, UiCommand,
    UploadOutcome,
};
use crate::models::GalleryStatus;

const HELP: &str = "\
Commands:
  open <dataset>     show another dataset
  ls                 show the gallery again
  refresh            refetch the image list
  sel <path|#>       select an image
  unsel <path|#>     deselect an image
  all                select all / deselect all
  del                delete the selected images
  rm <path|#>        delete one image
  add                add images, then refresh
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Open(String),
    List,
    Refresh,
    Select(String),
    Deselect(String),
    SelectAll,
    DeleteSelected,
    Remove(String),
    Add,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (line, ""),
    };
    let needs_arg = |cmd: fn(String) -> ShellCommand| {
        if arg.is_empty() {
            Err(format!("`{word}` needs an argument"))
        } else {
            Ok(cmd(arg.to_string()))
        }
    };

    match word {
        "" | "ls" | "list" => Ok(ShellCommand::List),
        "open" | "cd" => needs_arg(ShellCommand::Open),
        "refresh" | "r" => Ok(ShellCommand::Refresh),
        "sel" | "select" => needs_arg(ShellCommand::Select),
        "unsel" | "deselect" => needs_arg(ShellCommand::Deselect),
        "all" => Ok(ShellCommand::SelectAll),
        "del" | "delete" => Ok(ShellCommand::DeleteSelected),
        "rm" => needs_arg(ShellCommand::Remove),
        "add" | "upload" => Ok(ShellCommand::Add),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command `{other}`, try `help`")),
    }
}

pub fn render(view: &GalleryView) -> String {
    let mut out = String::new();
    if view.dataset.is_empty() {
        out.push_str("No dataset selected, use `open <dataset>`\n");
        return out;
    }

    out.push_str(&format!("Dataset: {}\n", view.dataset));
    match view.status {
        GalleryStatus::Idle => {}
        GalleryStatus::Loading => out.push_str("Loading...\n"),
        GalleryStatus::Error => out.push_str("Error fetching images\n"),
        GalleryStatus::Success if view.images.is_empty() => out.push_str("No images found\n"),
        GalleryStatus::Success => {
            for (index, image) in view.images.iter().enumerate() {
                let mark = if view.is_selected(&image.path) { 'x' } else { ' ' };
                out.push_str(&format!("{:>4} [{mark}] {}\n", index + 1, image.path));
            }
            out.push_str(&format!("[{}]", view.select_all_label()));
            if let Some(label) = view.delete_label() {
                out.push_str(&format!(" [{label}]"));
            }
            out.push_str(" [Add Images]\n");
        }
    }
    out
}

/// Line-oriented front end for one gallery.
///
/// Dialog requests from the gallery are answered from the same input
/// stream while the operation that raised them is still pending.
pub struct GalleryApp<A> {
    controller: GalleryController<A>,
    ui_rx: flume::Receiver<UiCommand>,
}

impl GalleryApp<HttpDatasetApi> {
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let api = HttpDatasetApi::new(config).context("Failed to create dataset client")?;
        Ok(Self::new(Arc::new(api)))
    }
}

impl<A: DatasetApi> GalleryApp<A> {
    pub fn new(api: Arc<A>) -> Self {
        let (ui, ui_rx) = ui_channel();
        Self {
            controller: GalleryController::new(api, ui),
            ui_rx,
        }
    }

    pub async fn run<R, W>(&self, dataset: &str, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        self.perform(ShellCommand::Open(dataset.to_string()), &mut lines, out)
            .await?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                break;
            };
            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.perform(command, &mut lines, out).await?,
                Err(message) => writeln!(out, "{message}")?,
            }
        }
        Ok(())
    }

    async fn perform<R, W>(&self, command: ShellCommand, lines: &mut Lines<R>, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let gallery = &self.controller;
        match command {
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(());
            }
            ShellCommand::Quit | ShellCommand::List => {}
            ShellCommand::Open(name) => {
                if let Err(err) = self.drive(gallery.mount(&name), lines, out).await? {
                    writeln!(out, "{err}")?;
                }
            }
            ShellCommand::Refresh => {
                if let Err(err) = self.drive(gallery.refresh(), lines, out).await? {
                    writeln!(out, "{err}")?;
                }
            }
            ShellCommand::Select(arg) => {
                let path = self.resolve(&arg);
                if !gallery.toggle(&path, true) && !gallery.view().is_selected(&path) {
                    writeln!(out, "Not in the list: {path}")?;
                }
            }
            ShellCommand::Deselect(arg) => {
                gallery.toggle(&self.resolve(&arg), false);
            }
            ShellCommand::SelectAll => gallery.select_all(),
            ShellCommand::DeleteSelected => {
                let outcome = self.drive(gallery.delete_selected(), lines, out).await?;
                report_delete(outcome, out)?;
            }
            ShellCommand::Remove(arg) => {
                let path = self.resolve(&arg);
                match self.drive(gallery.delete_image(&path), lines, out).await? {
                    Ok(BatchOutcome::NothingSelected) => writeln!(out, "Not in the list: {path}")?,
                    outcome => report_delete(outcome, out)?,
                }
            }
            ShellCommand::Add => match self.drive(gallery.request_upload(), lines, out).await? {
                Ok(UploadOutcome::Uploaded) => writeln!(out, "Images added")?,
                Ok(UploadOutcome::Cancelled) => writeln!(out, "Upload cancelled")?,
                Err(err) => writeln!(out, "{err}")?,
            },
        }
        write!(out, "{}", render(&gallery.view()))?;
        Ok(())
    }

    /// Maps a 1-based list index to its path; anything else is taken as a path.
    fn resolve(&self, arg: &str) -> String {
        let view = self.controller.view();
        if view.images.iter().any(|e| e.path == arg) {
            return arg.to_string();
        }
        arg.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| view.images.get(i))
            .map(|e| e.path.clone())
            .unwrap_or_else(|| arg.to_string())
    }

    /// Polls `op` to completion, presenting any dialog it asks for meanwhile.
    async fn drive<F, R, W>(&self, op: F, lines: &mut Lines<R>, out: &mut W) -> Result<F::Output>
    where
        F: Future,
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        tokio::pin!(op);
        loop {
            tokio::select! {
                result = &mut op => return Ok(result),
                Ok(command) = self.ui_rx.recv_async() => present(command, lines, out).await?,
            }
        }
    }
}

async fn present<R, W>(command: UiCommand, lines: &mut Lines<R>, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match command {
        UiCommand::Confirm(request) => {
            if request.kind == ConfirmKind::Warning {
                write!(out, "Warning: ")?;
            }
            writeln!(out, "{}", request.title)?;
            writeln!(out, "{}", request.message)?;
            write!(out, "Type '{}' to confirm: ", request.confirm_text)?;
            out.flush()?;
            let answer = lines
                .next_line()
                .await
                .context("Failed to read confirmation")?
                .unwrap_or_default();
            let approved = answer.trim().eq_ignore_ascii_case(&request.confirm_text);
            request.respond(approved);
        }
        UiCommand::OpenUpload(request) => {
            write!(
                out,
                "Add images to dataset '{}' on the server, then type 'done': ",
                request.dataset
            )?;
            out.flush()?;
            let answer = lines
                .next_line()
                .await
                .context("Failed to read upload answer")?
                .unwrap_or_default();
            let outcome = if answer.trim().eq_ignore_ascii_case("done") {
                UploadOutcome::Uploaded
            } else {
                UploadOutcome::Cancelled
            };
            request.respond(outcome);
        }
    }
    Ok(())
}

fn report_delete<W: Write>(outcome: crate::error::Result<BatchOutcome>, out: &mut W) -> Result<()> {
    match outcome {
        Ok(BatchOutcome::NothingSelected) => writeln!(out, "Nothing selected")?,
        Ok(BatchOutcome::Cancelled) => writeln!(out, "Delete cancelled")?,
        Ok(BatchOutcome::Completed(report)) => writeln!(out, "Deleted {} images", report.total())?,
        Err(err) => writeln!(out, "Error deleting images: {err}")?,
    }
    Ok(())
}

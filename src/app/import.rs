use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{Context, Result};

use crate::app::App;
use crate::app::constants::{NOTICE_NOTHING_SELECTED, STATUS_IMPORT_RUNNING};
use crate::app::remote_backend::RemoteBackend;
use crate::decode::decode;
use crate::model::{
    DirectoryEntry, ImportFailure, ImportOutcome, ImportResult, ImportUpdate, Notice,
};

/// Fetches, unwraps and decodes one entry. Never fails as a whole.
pub(crate) fn import_entry(backend: &dyn RemoteBackend, entry: &DirectoryEntry) -> ImportResult {
    ImportResult {
        source: entry.clone(),
        outcome: run_stages(backend, entry),
    }
}

fn run_stages(backend: &dyn RemoteBackend, entry: &DirectoryEntry) -> ImportOutcome {
    let Some(url) = entry.content_url.as_deref() else {
        return failed(ImportFailure::NetworkError, "entry has no content URL");
    };
    let raw = match backend.fetch_raw_content(url) {
        Ok(raw) => raw,
        Err(err) => return failed(err.import_failure(), err),
    };
    match decode(&raw) {
        Ok(bytes) => ImportOutcome::Decoded(bytes),
        Err(err) => failed(err.import_failure(), err),
    }
}

fn failed(kind: ImportFailure, detail: impl ToString) -> ImportOutcome {
    ImportOutcome::Failed {
        kind,
        detail: detail.to_string(),
    }
}

/// One result per entry, in input order; failures do not stop the batch.
pub(crate) fn import_all(
    backend: &dyn RemoteBackend,
    entries: &[DirectoryEntry],
) -> Vec<ImportResult> {
    entries
        .iter()
        .map(|entry| import_entry(backend, entry))
        .collect()
}

impl App {
    /// Imports the whole selection on the calling thread.
    pub(crate) fn import_all(&mut self) -> &[ImportResult] {
        if self.importing() {
            self.set_status(STATUS_IMPORT_RUNNING);
            return &self.import_results;
        }
        let results = import_all(self.backend.as_ref(), self.selection.all());
        self.import_results.clear();
        for result in results {
            self.record_import_result(result);
        }
        self.finish_import(false);
        &self.import_results
    }

    /// Runs the import on a worker thread, reporting each result through `poll_import`.
    pub(crate) fn start_import(&mut self) {
        if self.importing() {
            self.set_status(STATUS_IMPORT_RUNNING);
            return;
        }
        if self.selection.is_empty() {
            self.set_status(NOTICE_NOTHING_SELECTED);
            return;
        }
        let entries = self.selection.all().to_vec();
        let backend = self.backend.clone();
        let (tx, rx) = mpsc::channel();
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        std::thread::spawn(move || {
            let mut cancelled = false;
            for entry in &entries {
                if cancel_rx.try_recv().is_ok() {
                    cancelled = true;
                    break;
                }
                let result = import_entry(backend.as_ref(), entry);
                if tx.send(ImportUpdate::Entry(result)).is_err() {
                    return;
                }
            }
            let _ = tx.send(ImportUpdate::Done { cancelled });
        });
        self.import_results.clear();
        self.import_progress = Some(rx);
        self.import_cancel = Some(cancel_tx);
        self.set_status(format!("Importing {} file(s)", self.selection.len()));
    }

    /// Stops issuing new fetches; the in-flight one completes normally.
    pub(crate) fn cancel_import(&mut self) {
        if let Some(cancel) = &self.import_cancel {
            let _ = cancel.send(());
            self.set_status("Cancelling import");
        }
    }

    pub(crate) fn poll_import(&mut self) {
        let Some(rx) = self.import_progress.take() else {
            return;
        };
        let mut done = false;
        loop {
            match rx.try_recv() {
                Ok(ImportUpdate::Entry(result)) => self.record_import_result(result),
                Ok(ImportUpdate::Done { cancelled }) => {
                    self.finish_import(cancelled);
                    done = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.finish_import(true);
                    done = true;
                    break;
                }
            }
        }
        if !done {
            self.import_progress = Some(rx);
        }
    }

    /// Writes every decoded result below `dir`, named after its entry.
    pub(crate) fn save_results(&mut self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).context("create target dir")?;
        let mut written = Vec::new();
        for result in &self.import_results {
            let ImportOutcome::Decoded(bytes) = &result.outcome else {
                continue;
            };
            let path = unique_path(dir, &result.source.name);
            fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
            written.push(path);
        }
        self.set_status(format!("Saved {} file(s) to {}", written.len(), dir.display()));
        Ok(written)
    }

    fn record_import_result(&mut self, result: ImportResult) {
        self.log_line(&format!("Import {}", result.summary()));
        self.import_results.push(result);
    }

    fn finish_import(&mut self, cancelled: bool) {
        self.import_cancel = None;
        let decoded = self.import_results.iter().filter(|r| r.is_decoded()).count();
        let failed = self.import_results.len() - decoded;
        let title = if cancelled {
            "Import cancelled"
        } else if failed == 0 {
            "Import complete"
        } else {
            "Import finished with errors"
        };
        let message = format!("{decoded} decoded, {failed} failed");
        self.set_status(format!("{title}: {message}"));
        self.notice = Some(Notice {
            title: title.to_string(),
            message,
        });
    }
}

fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());
    let mut candidate = dir.join(&base);
    let mut counter = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{counter}-{base}"));
        counter += 1;
    }
    candidate
}

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};

use anyhow::{Context, Result};

use crate::app::constants::STATUS_READY;
use crate::app::logging::prune_log_file;
use crate::app::navigator::PathNavigator;
use crate::app::remote_backend::{HttpBackend, RemoteBackend};
use crate::app::selection::SelectionSet;
use crate::model::{DirectoryEntry, ImportResult, ImportUpdate, ListingUpdate, Notice, PickerConfig};

mod browse;
mod commands;
mod constants;
mod helpers;
mod import;
mod logging;
mod navigator;
mod remote_backend;
mod selection;

pub(crate) use commands::HELP_TEXT;

/// One browsing session against a single repository root.
pub(crate) struct App {
    pub(crate) log_path: PathBuf,
    pub(crate) log_lines: VecDeque<String>,
    pub(crate) status: String,
    pub(crate) notice: Option<Notice>,
    backend: Arc<dyn RemoteBackend>,
    pub(crate) navigator: PathNavigator,
    pub(crate) listing: Vec<DirectoryEntry>,
    pub(crate) listing_error: Option<String>,
    pub(crate) listing_loading: bool,
    listing_generation: u64,
    listing_tx: mpsc::Sender<ListingUpdate>,
    listing_rx: mpsc::Receiver<ListingUpdate>,
    pub(crate) selection: SelectionSet,
    pub(crate) import_results: Vec<ImportResult>,
    pub(crate) import_progress: Option<mpsc::Receiver<ImportUpdate>>,
    import_cancel: Option<mpsc::Sender<()>>,
}

impl App {
    pub(crate) fn load(config: &PickerConfig, token: String, log_path: PathBuf) -> Result<Self> {
        let root_url = config.root_url()?;
        let backend = HttpBackend::new(config, token).context("create HTTP backend")?;
        prune_log_file(&log_path);
        Ok(Self::with_backend(root_url, Arc::new(backend), log_path))
    }

    pub(crate) fn with_backend(
        root_url: String,
        backend: Arc<dyn RemoteBackend>,
        log_path: PathBuf,
    ) -> Self {
        let (listing_tx, listing_rx) = mpsc::channel();
        let mut app = Self {
            log_path,
            log_lines: VecDeque::new(),
            status: STATUS_READY.to_string(),
            notice: None,
            backend,
            navigator: PathNavigator::new(root_url),
            listing: vec![],
            listing_error: None,
            listing_loading: false,
            listing_generation: 0,
            listing_tx,
            listing_rx,
            selection: SelectionSet::default(),
            import_results: vec![],
            import_progress: None,
            import_cancel: None,
        };
        app.set_status(STATUS_READY);
        app
    }

    pub(crate) fn importing(&self) -> bool {
        self.import_progress.is_some()
    }
}

use crate::app::App;
use crate::app::constants::{NOTICE_UNSUPPORTED_TITLE, STATUS_LOADING};
use crate::error::{RemoteError, SelectionError, SessionError};
use crate::model::{DirectoryEntry, EntryKind, ListingUpdate, Notice};

/// What a resolved double-tap on a listing entry did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Activation {
    Entered(String),
    Selected(String),
    Deselected(String),
    Notice(Notice),
}

impl App {
    /// Fetches a listing without touching navigation state.
    pub(crate) fn list_directory(&self, url: &str) -> Result<Vec<DirectoryEntry>, RemoteError> {
        self.backend.list_directory(url)
    }

    /// Lists `url` and makes it current only once the listing arrived.
    pub(crate) fn navigate(&mut self, url: &str) -> Result<&[DirectoryEntry], SessionError> {
        self.listing_generation += 1;
        match self.list_directory(url) {
            Ok(entries) => {
                self.navigator.enter(url);
                self.commit_listing(entries);
                Ok(self.listing.as_slice())
            }
            Err(err) => {
                self.record_listing_error(&err);
                Err(err.into())
            }
        }
    }

    pub(crate) fn refresh(&mut self) -> Result<&[DirectoryEntry], SessionError> {
        let url = self.navigator.fetch_url().to_string();
        self.navigate(&url)
    }

    pub(crate) fn move_up(&mut self) -> Result<String, SessionError> {
        let parent = match self.navigator.parent_url() {
            Ok(parent) => parent,
            Err(err) => {
                self.set_status(err.to_string());
                return Err(err.into());
            }
        };
        self.navigate(&parent)?;
        Ok(parent)
    }

    pub(crate) fn entry(&self, index: usize) -> Result<&DirectoryEntry, SessionError> {
        self.listing.get(index).ok_or(SessionError::NoSuchEntry {
            index,
            len: self.listing.len(),
        })
    }

    pub(crate) fn enter_entry(&mut self, index: usize) -> Result<String, SessionError> {
        let entry = self.entry(index)?;
        let Some(url) = entry.listing_url.clone().filter(|_| entry.kind == EntryKind::Directory)
        else {
            return Err(SessionError::NotADirectory(entry.name.clone()));
        };
        self.navigate(&url)?;
        Ok(url)
    }

    pub(crate) fn activate(&mut self, index: usize) -> Result<Activation, SessionError> {
        let entry = self.entry(index)?.clone();
        match entry.kind {
            EntryKind::Directory => {
                self.enter_entry(index)?;
                Ok(Activation::Entered(self.navigator.display_path().to_string()))
            }
            EntryKind::File => {
                if self.toggle_select(&entry)? {
                    Ok(Activation::Selected(entry.name))
                } else {
                    Ok(Activation::Deselected(entry.name))
                }
            }
            EntryKind::Other => {
                let notice = Notice {
                    title: NOTICE_UNSUPPORTED_TITLE.to_string(),
                    message: format!(
                        "Double-clicked on: {} with Type {}",
                        entry.name, entry.type_name
                    ),
                };
                self.set_status(notice.message.clone());
                self.notice = Some(notice.clone());
                Ok(Activation::Notice(notice))
            }
        }
    }

    /// Selects `entry`, or deselects it when already picked. Returns whether it is now selected.
    pub(crate) fn toggle_select(&mut self, entry: &DirectoryEntry) -> Result<bool, SelectionError> {
        if let Some(removed) = self.selection.remove(entry) {
            self.set_status(format!("Deselected {}", removed.name));
            return Ok(false);
        }
        match self.selection.add(entry.clone()) {
            Ok(_) => {
                self.set_status(format!("Selected {}", entry.name));
                Ok(true)
            }
            Err(err) => {
                self.set_status(err.to_string());
                Err(err)
            }
        }
    }

    pub(crate) fn deselect_at(&mut self, index: usize) -> Result<DirectoryEntry, SelectionError> {
        match self.selection.remove_at(index) {
            Ok(removed) => {
                self.set_status(format!("Deselected {}", removed.name));
                Ok(removed)
            }
            Err(err) => {
                self.set_status(err.to_string());
                Err(err)
            }
        }
    }

    /// Starts a listing on a worker thread; a newer request supersedes older ones.
    pub(crate) fn start_listing(&mut self, url: String) {
        self.listing_generation += 1;
        let generation = self.listing_generation;
        self.listing_loading = true;
        self.set_status(STATUS_LOADING);
        let tx = self.listing_tx.clone();
        let backend = self.backend.clone();
        std::thread::spawn(move || {
            let result = backend.list_directory(&url);
            let _ = tx.send(ListingUpdate {
                generation,
                url,
                result,
            });
        });
    }

    pub(crate) fn start_move_up(&mut self) -> Result<(), SessionError> {
        let parent = self.navigator.parent_url()?;
        self.start_listing(parent);
        Ok(())
    }

    pub(crate) fn start_enter_entry(&mut self, index: usize) -> Result<(), SessionError> {
        let entry = self.entry(index)?;
        let Some(url) = entry.listing_url.clone().filter(|_| entry.kind == EntryKind::Directory)
        else {
            return Err(SessionError::NotADirectory(entry.name.clone()));
        };
        self.start_listing(url);
        Ok(())
    }

    /// Applies the latest finished listing, dropping superseded ones.
    pub(crate) fn poll_listing(&mut self) {
        while let Ok(update) = self.listing_rx.try_recv() {
            if update.generation != self.listing_generation {
                continue;
            }
            self.listing_loading = false;
            match update.result {
                Ok(entries) => {
                    self.navigator.enter(update.url);
                    self.commit_listing(entries);
                }
                Err(err) => self.record_listing_error(&err),
            }
        }
    }

    fn commit_listing(&mut self, entries: Vec<DirectoryEntry>) {
        self.listing = entries;
        self.listing_error = None;
        self.listing_loading = false;
        let message = format!(
            "{} ({} entries)",
            self.navigator.display_path(),
            self.listing.len()
        );
        self.set_status(message);
    }

    fn record_listing_error(&mut self, err: &RemoteError) {
        self.listing_error = Some(err.to_string());
        self.listing_loading = false;
        self.report_error("Listing", err);
    }
}

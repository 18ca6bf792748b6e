use reqwest::blocking::Client;

use crate::error::RemoteError;
use crate::http::{build_client, get, parse_listing};
use crate::model::{DirectoryEntry, PickerConfig};

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::mpsc;

pub(crate) trait RemoteBackend: Send + Sync {
    fn list_directory(&self, url: &str) -> Result<Vec<DirectoryEntry>, RemoteError>;
    fn fetch_raw_content(&self, url: &str) -> Result<Vec<u8>, RemoteError>;
}

pub(crate) struct HttpBackend {
    client: Client,
    token: String,
}

impl HttpBackend {
    pub(crate) fn new(config: &PickerConfig, token: String) -> Result<Self, RemoteError> {
        Ok(Self {
            client: build_client(config)?,
            token,
        })
    }
}

impl RemoteBackend for HttpBackend {
    fn list_directory(&self, url: &str) -> Result<Vec<DirectoryEntry>, RemoteError> {
        let body = get(&self.client, url, &self.token)?;
        parse_listing(&body)
    }

    fn fetch_raw_content(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        get(&self.client, url, &self.token)
    }
}

/// Canned responses keyed by URL; unknown URLs answer HTTP 404.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockBackend {
    listings: std::sync::Mutex<HashMap<String, Result<Vec<DirectoryEntry>, RemoteError>>>,
    contents: std::sync::Mutex<HashMap<String, Result<Vec<u8>, RemoteError>>>,
    gates: std::sync::Mutex<HashMap<String, mpsc::Receiver<()>>>,
    requests: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockBackend {
    pub(crate) fn set_listing(&self, url: &str, result: Result<Vec<DirectoryEntry>, RemoteError>) {
        self.listings.lock().unwrap().insert(url.to_string(), result);
    }

    pub(crate) fn set_content(&self, url: &str, result: Result<Vec<u8>, RemoteError>) {
        self.contents.lock().unwrap().insert(url.to_string(), result);
    }

    /// Makes the next request for `url` wait until the returned sender fires.
    pub(crate) fn gate(&self, url: &str) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().insert(url.to_string(), rx);
        tx
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_string());
        let gate = self.gates.lock().unwrap().remove(url);
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
    }
}

#[cfg(test)]
impl RemoteBackend for MockBackend {
    fn list_directory(&self, url: &str) -> Result<Vec<DirectoryEntry>, RemoteError> {
        self.record(url);
        self.listings
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(Err(RemoteError::Http { status: 404 }))
    }

    fn fetch_raw_content(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        self.record(url);
        self.contents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(Err(RemoteError::Http { status: 404 }))
    }
}

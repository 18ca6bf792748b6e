use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RemoteError};

pub(crate) const DEFAULT_API_BASE: &str = "https://api.github.com";
pub(crate) const DEFAULT_USER_AGENT: &str = "repo-file-picker";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct PickerConfig {
    #[serde(default = "default_api_base")]
    pub(crate) api_base: String,
    #[serde(default)]
    pub(crate) owner: String,
    #[serde(default)]
    pub(crate) repo: String,
    #[serde(default)]
    pub(crate) path: String,
    #[serde(default)]
    pub(crate) git_ref: Option<String>,
    #[serde(default = "default_user_agent")]
    pub(crate) user_agent: String,
    #[serde(default)]
    pub(crate) request_timeout_secs: Option<u64>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            owner: String::new(),
            repo: String::new(),
            path: String::new(),
            git_ref: None,
            user_agent: default_user_agent(),
            request_timeout_secs: None,
        }
    }
}

impl PickerConfig {
    pub(crate) fn root_url(&self) -> Result<String, ConfigError> {
        let owner = self.owner.trim();
        let repo = self.repo.trim();
        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::InvalidRoot(
                "repository owner and name are required".to_string(),
            ));
        }
        let base = self.api_base.trim_end_matches('/');
        let path = self.path.trim_matches('/');
        let mut url = format!("{base}/repos/{owner}/{repo}/contents");
        if !path.is_empty() {
            url.push('/');
            url.push_str(path);
        }
        if let Some(git_ref) = self.git_ref.as_deref().filter(|r| !r.trim().is_empty()) {
            url.push_str("?ref=");
            url.push_str(git_ref.trim());
        }
        Ok(url)
    }

    /// Applies an `owner/repo[/path]` override from the command line.
    pub(crate) fn apply_target(&mut self, target: &str) -> Result<(), ConfigError> {
        let mut parts = target.trim_matches('/').splitn(3, '/');
        let owner = parts.next().unwrap_or_default();
        let repo = parts.next().unwrap_or_default();
        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::InvalidRoot(format!(
                "expected owner/repo[/path], got {target:?}"
            )));
        }
        self.owner = owner.to_string();
        self.repo = repo.to_string();
        self.path = parts.next().unwrap_or_default().to_string();
        Ok(())
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    File,
    Directory,
    Other,
}

impl EntryKind {
    pub(crate) fn from_type(raw: &str) -> Self {
        match raw {
            "file" => EntryKind::File,
            "dir" => EntryKind::Directory,
            _ => EntryKind::Other,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// One record of a listing response as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListingRecord {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) entry_type: String,
    #[serde(default)]
    pub(crate) url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirectoryEntry {
    pub(crate) name: String,
    pub(crate) kind: EntryKind,
    /// Raw `type` string, kept so unmapped kinds can still be shown.
    pub(crate) type_name: String,
    pub(crate) listing_url: Option<String>,
    pub(crate) content_url: Option<String>,
}

#[cfg(test)]
impl DirectoryEntry {
    pub(crate) fn file(name: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            type_name: "file".to_string(),
            listing_url: None,
            content_url: Some(content_url.into()),
        }
    }

    pub(crate) fn directory(name: impl Into<String>, listing_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            type_name: "dir".to_string(),
            listing_url: Some(listing_url.into()),
            content_url: None,
        }
    }
}

impl DirectoryEntry {
    pub(crate) fn identity_key(&self) -> &str {
        self.content_url
            .as_deref()
            .or(self.listing_url.as_deref())
            .unwrap_or(&self.name)
    }

    pub(crate) fn label(&self) -> String {
        match self.kind {
            EntryKind::Directory => format!("{}/", self.name),
            EntryKind::File => self.name.clone(),
            EntryKind::Other => format!("{} [{}]", self.name, self.type_name),
        }
    }
}

impl From<ListingRecord> for DirectoryEntry {
    fn from(record: ListingRecord) -> Self {
        let kind = EntryKind::from_type(&record.entry_type);
        let (listing_url, content_url) = match kind {
            EntryKind::Directory => (record.url, None),
            EntryKind::File => (None, record.url),
            EntryKind::Other => (None, None),
        };
        Self {
            name: record.name,
            kind,
            type_name: record.entry_type,
            listing_url,
            content_url,
        }
    }
}

/// Wire shape of a single file's content response. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentEnvelope {
    pub(crate) content: String,
    #[serde(default)]
    pub(crate) encoding: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImportFailure {
    NetworkError,
    HttpError,
    EnvelopeParseError,
    Base64DecodeError,
}

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImportFailure::NetworkError => "network error",
            ImportFailure::HttpError => "HTTP error",
            ImportFailure::EnvelopeParseError => "envelope parse error",
            ImportFailure::Base64DecodeError => "base64 decode error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ImportOutcome {
    Decoded(Vec<u8>),
    Failed { kind: ImportFailure, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportResult {
    pub(crate) source: DirectoryEntry,
    pub(crate) outcome: ImportOutcome,
}

impl ImportResult {
    pub(crate) fn is_decoded(&self) -> bool {
        matches!(self.outcome, ImportOutcome::Decoded(_))
    }

    pub(crate) fn summary(&self) -> String {
        match &self.outcome {
            ImportOutcome::Decoded(bytes) => {
                format!("{}: {} bytes", self.source.name, bytes.len())
            }
            ImportOutcome::Failed { kind, detail } => {
                format!("{}: {kind}: {detail}", self.source.name)
            }
        }
    }
}

pub(crate) enum ImportUpdate {
    Entry(ImportResult),
    Done { cancelled: bool },
}

pub(crate) struct ListingUpdate {
    pub(crate) generation: u64,
    pub(crate) url: String,
    pub(crate) result: Result<Vec<DirectoryEntry>, RemoteError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) title: String,
    pub(crate) message: String,
}

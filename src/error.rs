use thiserror::Error;

use crate::model::{EntryKind, ImportFailure};

/// Failures of the directory-listing and raw-content requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed (HTTP {status})")]
    Auth { status: u16 },
    #[error("Server returned HTTP {status}")]
    Http { status: u16 },
    #[error("Malformed listing: {0}")]
    Decode(String),
}

impl RemoteError {
    pub(crate) fn import_failure(&self) -> ImportFailure {
        match self {
            RemoteError::Network(_) => ImportFailure::NetworkError,
            RemoteError::Auth { .. } | RemoteError::Http { .. } => ImportFailure::HttpError,
            RemoteError::Decode(_) => ImportFailure::EnvelopeParseError,
        }
    }
}

/// Failures while unwrapping a content envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContentError {
    #[error("Invalid content envelope: {0}")]
    EnvelopeParse(String),
    #[error("Unsupported content encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("Invalid base64 payload: {0}")]
    Base64Decode(String),
}

impl ContentError {
    pub(crate) fn import_failure(&self) -> ImportFailure {
        match self {
            ContentError::EnvelopeParse(_) | ContentError::UnsupportedEncoding(_) => {
                ImportFailure::EnvelopeParseError
            }
            ContentError::Base64Decode(_) => ImportFailure::Base64DecodeError,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigationError {
    #[error("Already at the root directory")]
    AtRoot,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectionError {
    #[error("No selected file at position {index} (selection has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{name} cannot be selected ({kind})")]
    NotSelectable { name: String, kind: EntryKind },
}

/// Failure of a single session action triggered by the front-end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("No entry at position {index} (listing has {len})")]
    NoSuchEntry { index: usize, len: usize },
    #[error("{0} is not a directory")]
    NotADirectory(String),
}

/// Startup failures; the entry point decides whether they are fatal.
#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingToken(&'static str),
    #[error("Invalid repository root: {0}")]
    InvalidRoot(String),
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

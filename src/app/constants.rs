pub(crate) const STATUS_READY: &str = "Ready";
pub(crate) const STATUS_LOADING: &str = "Loading...";
pub(crate) const STATUS_IMPORT_RUNNING: &str = "An import is already running";

pub(crate) const LOG_TIMESTAMP_FORMAT: &str = "%m-%d %H:%M:%S";
pub(crate) const LOG_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const LOG_SEPARATOR: &str = " | ";

pub(crate) const LOG_RETENTION_DAYS: i64 = 7;
pub(crate) const LOG_MAX_ENTRIES: usize = 10_000;
pub(crate) const LOG_MAX_IN_MEMORY: usize = 100;

pub(crate) const NOTICE_UNSUPPORTED_TITLE: &str = "Info";
pub(crate) const NOTICE_NOTHING_SELECTED: &str = "No files selected";

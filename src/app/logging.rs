use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{Datelike, Local, NaiveDateTime};

use crate::app::App;
use crate::app::constants::{
    LOG_MAX_ENTRIES, LOG_MAX_IN_MEMORY, LOG_PARSE_FORMAT, LOG_RETENTION_DAYS, LOG_SEPARATOR,
    LOG_TIMESTAMP_FORMAT,
};

impl App {
    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.log_line(&message);
        self.status = message;
    }

    /// Status line for a failed action: `"<action> failed: <err>"`.
    pub(crate) fn report_error(&mut self, action: &str, err: &impl Display) {
        self.set_status(format!("{action} failed: {err}"));
    }

    pub(crate) fn recent_logs(&self) -> impl Iterator<Item = &str> {
        self.log_lines.iter().map(String::as_str)
    }

    pub(super) fn log_line(&mut self, message: &str) {
        let line = format!(
            "{}{LOG_SEPARATOR}{message}",
            Local::now().format(LOG_TIMESTAMP_FORMAT)
        );
        append_to_file(&self.log_path, &line);
        self.log_lines.push_back(line);
        while self.log_lines.len() > LOG_MAX_IN_MEMORY {
            self.log_lines.pop_front();
        }
    }
}

fn append_to_file(path: &Path, line: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{line}");
    }
}

/// Keeps only recent log lines, capped at `LOG_MAX_ENTRIES`.
pub(crate) fn prune_log_file(path: &Path) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    let now = Local::now();
    let cutoff = now.naive_local() - chrono::Duration::days(LOG_RETENTION_DAYS);
    let year = now.year();
    let mut kept: Vec<&str> = content
        .lines()
        .filter(|line| {
            line.split_once(LOG_SEPARATOR)
                .and_then(|(stamp, _)| {
                    NaiveDateTime::parse_from_str(&format!("{year}-{stamp}"), LOG_PARSE_FORMAT)
                        .ok()
                })
                .is_some_and(|parsed| parsed >= cutoff)
        })
        .collect();
    if kept.len() > LOG_MAX_ENTRIES {
        kept.drain(..kept.len() - LOG_MAX_ENTRIES);
    }
    if kept.is_empty() {
        let _ = fs::remove_file(path);
        return;
    }
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let _ = fs::write(path, kept.join("\n") + "\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::remote_backend::MockBackend;
    use crate::app::test_support::temp_log_path;
    use std::sync::Arc;

    #[test]
    fn prune_log_file_removes_old_entries() {
        let path = temp_log_path();
        let now = Local::now().naive_local();
        let old = now - chrono::Duration::days(LOG_RETENTION_DAYS + 1);
        let recent = now - chrono::Duration::days(1);
        let old_line = format!("{}{}old", old.format(LOG_TIMESTAMP_FORMAT), LOG_SEPARATOR);
        let recent_line = format!("{}{}recent", recent.format(LOG_TIMESTAMP_FORMAT), LOG_SEPARATOR);
        fs::write(&path, format!("{old_line}\ngarbage\n{recent_line}\n")).unwrap();
        prune_log_file(&path);
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("old"));
        assert!(!content.contains("garbage"));
        assert!(content.contains("recent"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn prune_log_file_removes_file_without_recent_lines() {
        let path = temp_log_path();
        fs::write(&path, "not a log line\n").unwrap();
        prune_log_file(&path);
        assert!(!path.exists());
    }

    #[test]
    fn status_is_written_to_file_and_memory() {
        let mut app = App::for_test_with_backend(Arc::new(MockBackend::default()));
        app.set_status("Selected a.txt");
        assert_eq!(app.status, "Selected a.txt");
        assert!(app.recent_logs().any(|line| line.ends_with("Selected a.txt")));
        let content = fs::read_to_string(&app.log_path).unwrap();
        assert!(content.contains("Selected a.txt"));
        let _ = fs::remove_file(&app.log_path);
    }

    #[test]
    fn in_memory_log_is_bounded() {
        let mut app = App::for_test_with_backend(Arc::new(MockBackend::default()));
        for i in 0..(LOG_MAX_IN_MEMORY + 5) {
            app.set_status(format!("line {i}"));
        }
        assert_eq!(app.log_lines.len(), LOG_MAX_IN_MEMORY);
        let _ = fs::remove_file(&app.log_path);
    }
}

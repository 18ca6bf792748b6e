use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;
use crate::app::browse::Activation;
use crate::app::constants::NOTICE_NOTHING_SELECTED;
use crate::view;

pub(crate) const HELP_TEXT: &str = "ls | open <n> | up | pick <n> | drop <n> | sel | import | bg | wait | cancel | results | save <dir> | log | quit";

impl App {
    /// Runs one front-end command. Returns `true` when the session should end.
    pub(crate) fn handle_command(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        self.poll_listing();
        self.poll_import();
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(false);
        };
        let argument = words.next();
        match command {
            "q" | "quit" | "exit" => return Ok(true),
            "ls" | "refresh" => {
                if self.refresh().is_ok() {
                    view::write_listing(out, self)?;
                }
            }
            "open" => {
                let index = parse_index(argument)?;
                match self.activate(index) {
                    Ok(Activation::Entered(_)) => view::write_listing(out, self)?,
                    Ok(Activation::Notice(_)) => {}
                    Ok(Activation::Selected(_) | Activation::Deselected(_)) => {
                        view::write_selection(out, self)?;
                    }
                    Err(err) => self.report_error("Open", &err),
                }
            }
            "up" | "back" => {
                if self.move_up().is_ok() {
                    view::write_listing(out, self)?;
                }
            }
            "pick" => {
                let index = parse_index(argument)?;
                match self.entry(index).cloned() {
                    Ok(entry) => {
                        if self.toggle_select(&entry).is_ok() {
                            view::write_selection(out, self)?;
                        }
                    }
                    Err(err) => self.report_error("Pick", &err),
                }
            }
            "drop" => {
                let index = parse_index(argument)?;
                if self.deselect_at(index).is_ok() {
                    view::write_selection(out, self)?;
                }
            }
            "sel" => view::write_selection(out, self)?,
            "import" => {
                if !self.selection.is_empty() {
                    self.import_all();
                    view::write_results(out, self)?;
                } else {
                    self.set_status(NOTICE_NOTHING_SELECTED);
                }
            }
            "bg" => self.start_import(),
            "wait" => {
                while self.importing() {
                    std::thread::sleep(std::time::Duration::from_millis(50));
                    self.poll_import();
                }
                view::write_results(out, self)?;
            }
            "cancel" => self.cancel_import(),
            "results" => view::write_results(out, self)?,
            "save" => {
                let dir = argument.context("save needs a target directory")?;
                if let Err(err) = self.save_results(Path::new(dir)) {
                    self.report_error("Save", &err);
                }
            }
            "log" => {
                for line in self.recent_logs() {
                    writeln!(out, "{line}")?;
                }
            }
            _ => writeln!(out, "{HELP_TEXT}")?,
        }
        if let Some(notice) = self.notice.take() {
            writeln!(out, "[{}] {}", notice.title, notice.message)?;
        }
        writeln!(out, "-- {}", self.status)?;
        Ok(false)
    }
}

fn parse_index(argument: Option<&str>) -> Result<usize> {
    let raw = argument.context("missing entry number")?;
    raw.parse::<usize>()
        .with_context(|| format!("invalid entry number {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::remote_backend::MockBackend;
    use crate::app::test_support::ROOT;
    use crate::model::DirectoryEntry;
    use std::sync::Arc;

    fn app() -> App {
        let backend = Arc::new(MockBackend::default());
        backend.set_listing(
            ROOT,
            Ok(vec![
                DirectoryEntry::file("a.txt", "U1"),
                DirectoryEntry::directory("sub", format!("{ROOT}/sub")),
            ]),
        );
        backend.set_listing(&format!("{ROOT}/sub"), Ok(vec![]));
        backend.set_content("U1", Ok(br#"{"content":"aGVsbG8=","encoding":"base64"}"#.to_vec()));
        App::for_test_with_backend(backend)
    }

    fn run(app: &mut App, line: &str) -> String {
        let mut out = Vec::<u8>::new();
        app.handle_command(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn browse_pick_and_import_flow() {
        let mut app = app();
        let listing = run(&mut app, "ls");
        assert!(listing.contains("sub/"));
        let selection = run(&mut app, "pick 0");
        assert!(selection.contains("a.txt"));
        let results = run(&mut app, "import");
        assert!(results.contains("ok a.txt: 5 bytes"));
        assert!(results.contains("Import complete"));
    }

    #[test]
    fn background_import_then_wait() {
        let mut app = app();
        run(&mut app, "ls");
        run(&mut app, "pick 0");
        run(&mut app, "bg");
        let results = run(&mut app, "wait");
        assert!(results.contains("a.txt: 5 bytes"));
    }

    #[test]
    fn import_with_empty_selection_reports_status() {
        let mut app = app();
        let output = run(&mut app, "import");
        assert!(output.contains(NOTICE_NOTHING_SELECTED));
        assert!(app.import_results.is_empty());
    }

    #[test]
    fn open_then_up_returns_to_root() {
        let mut app = app();
        run(&mut app, "ls");
        run(&mut app, "open 1");
        assert!(!app.navigator.is_at_root());
        run(&mut app, "up");
        assert!(app.navigator.is_at_root());
        let output = run(&mut app, "up");
        assert!(output.contains("Already at the root"));
    }

    #[test]
    fn quit_ends_session() {
        let mut app = app();
        assert!(app.handle_command("quit", &mut Vec::<u8>::new()).unwrap());
        assert!(!app.handle_command("", &mut Vec::<u8>::new()).unwrap());
    }

    #[test]
    fn bad_index_is_an_error() {
        let mut app = app();
        assert!(app.handle_command("pick x", &mut Vec::<u8>::new()).is_err());
        assert!(app.handle_command("drop", &mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn drop_out_of_range_reports_status() {
        let mut app = app();
        let output = run(&mut app, "drop 3");
        assert!(output.contains("No selected file at position 3"));
    }
}

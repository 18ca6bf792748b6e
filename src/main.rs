use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

mod app;
mod decode;
mod error;
mod http;
mod model;
mod storage;
mod view;

use app::App;
use storage::{config_path, load_or_init_config, load_token, log_path};

fn main() -> Result<()> {
    let path = config_path()?;
    let mut config = load_or_init_config(&path)
        .with_context(|| format!("load config from {}", path.display()))?;
    if let Some(target) = std::env::args().nth(1) {
        config.apply_target(&target)?;
    }
    let token = load_token(|var| std::env::var(var).ok())?;
    let mut app = App::load(&config, token, log_path()?)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", app::HELP_TEXT)?;
    if app.refresh().is_ok() {
        view::write_listing(&mut out, &app)?;
    }
    writeln!(out, "-- {}", app.status)?;

    run_app(&mut app, &mut out)
}

fn run_app(app: &mut App, out: &mut impl Write) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("read command")?;
        match app.handle_command(&line, out) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(err) => writeln!(out, "error: {err:#}")?,
        }
    }
}

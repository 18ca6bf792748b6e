use std::io::{self, Write};

use crate::app::App;
use crate::model::ImportOutcome;

pub(crate) fn write_listing(out: &mut impl Write, app: &App) -> io::Result<()> {
    writeln!(out, "Dir: {}", app.navigator.display_path())?;
    if let Some(err) = &app.listing_error {
        writeln!(out, "  ! {err}")?;
    }
    if app.listing.is_empty() {
        return writeln!(out, "  Empty");
    }
    for (index, entry) in app.listing.iter().enumerate() {
        let marker = if app.selection.contains(entry) { "*" } else { " " };
        writeln!(out, "{marker}{index:>3}  {}", entry.label())?;
    }
    Ok(())
}

pub(crate) fn write_selection(out: &mut impl Write, app: &App) -> io::Result<()> {
    if app.selection.is_empty() {
        return writeln!(out, "Selected: none");
    }
    writeln!(out, "Selected:")?;
    for (index, entry) in app.selection.all().iter().enumerate() {
        writeln!(out, "{index:>4}  {}", entry.name)?;
    }
    Ok(())
}

pub(crate) fn write_results(out: &mut impl Write, app: &App) -> io::Result<()> {
    for result in &app.import_results {
        let mark = match result.outcome {
            ImportOutcome::Decoded(_) => "ok",
            ImportOutcome::Failed { .. } => "!!",
        };
        writeln!(out, "{mark} {}", result.summary())?;
    }
    Ok(())
}

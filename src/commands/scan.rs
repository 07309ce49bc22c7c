//! `todos scan` command.

use std::path::Path;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::render;
use crate::scan::{self, MarkerMatcher};

/// Execute the `scan` command.
///
/// # Errors
///
/// Returns an error string if the output format is unknown, the settings
/// file is malformed, or the marker pattern cannot be compiled.
pub fn run(ctx: &ServiceContext, dir: &Path, output: &str) -> Result<(), String> {
    if output != "table" && output != "csv" {
        return Err(format!("Unknown output format: {output}. Supported formats: table, csv"));
    }

    let config = Config::load(ctx.fs.as_ref(), dir)?;
    let matcher = MarkerMatcher::new(&config.markers)?;
    let outcome = scan::scan(ctx.fs.as_ref(), dir, &matcher);

    if output == "csv" {
        print!("{}", render::format_markers_csv(&outcome.markers));
        return Ok(());
    }

    println!("{}", render::format_markers_table(&outcome.markers));
    println!(
        "\n{} marker(s) in {} file(s), {} skipped ({}).",
        outcome.markers.len(),
        outcome.files_scanned,
        outcome.files_skipped,
        ctx.clock.now().to_rfc3339()
    );
    Ok(())
}

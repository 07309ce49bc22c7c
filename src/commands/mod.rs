//! Command dispatch and handlers.

pub mod scan;
pub mod sync;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    match command {
        Command::Scan { dir, output } => scan::run(&ctx, dir, output),
        Command::Sync { dir, dry_run } => sync::run(&ctx, dir, *dry_run),
    }
}

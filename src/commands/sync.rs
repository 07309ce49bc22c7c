//! `todos sync` command.

use std::path::Path;

use regex::Regex;

use crate::adapters::live::github::GithubIssueTracker;
use crate::config::{Config, TrackerConfig};
use crate::context::ServiceContext;
use crate::ports::tracker::IssueTracker;
use crate::reconcile;
use crate::render;
use crate::scan::{self, MarkerMatcher};

/// Execute the `sync` command.
///
/// Scans first and always prints the scan summary; a missing tracker
/// configuration downgrades the run to scan-only instead of failing it.
///
/// # Errors
///
/// Returns an error string if scanning setup fails or the tracker listing
/// cannot be fetched.
pub fn run(ctx: &ServiceContext, dir: &Path, dry_run: bool) -> Result<(), String> {
    let config = Config::load(ctx.fs.as_ref(), dir)?;
    let matcher = MarkerMatcher::new(&config.markers)?;
    let title_pattern = Regex::new(&config.title_pattern)
        .map_err(|e| format!("Invalid title_pattern in configuration: {e}"))?;

    let outcome = scan::scan(ctx.fs.as_ref(), dir, &matcher);
    println!(
        "{} marker(s) in {} file(s), {} skipped.",
        outcome.markers.len(),
        outcome.files_scanned,
        outcome.files_skipped
    );

    let tracker_config = match TrackerConfig::from_env() {
        Ok(tracker_config) => tracker_config,
        Err(e) => {
            println!("Tracker not configured, skipping sync: {e}");
            return Ok(());
        }
    };

    let tracker = GithubIssueTracker::new(&tracker_config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(async {
        let tracked = tracker
            .list_open_issues()
            .await
            .map_err(|e| format!("Failed to list open issues: {e}"))?;

        let result = reconcile::reconcile(&outcome.markers, &tracked, &title_pattern);
        for title in &result.collisions {
            eprintln!("Warning: multiple markers share title {title}; one issue will be created");
        }

        if dry_run {
            println!("Dry run — would perform:");
            println!("{}", render::format_plan(&result));
            return Ok(());
        }

        let report = crate::sync::sync(&result, &tracker, config.concurrency).await;
        println!("Sync complete ({}):", ctx.clock.now().to_rfc3339());
        println!("{}", render::format_report(&report));
        Ok(())
    })
}

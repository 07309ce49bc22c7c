//! Sync orchestration: applies a reconciliation result to the tracker.
//!
//! Best-effort, not a transaction: every operation is a single atomic remote
//! call, independent of the others. Failures are collected into the report
//! instead of aborting the batch.

use futures::stream::{self, StreamExt};

use crate::ports::tracker::IssueTracker;
use crate::reconcile::{ReconciliationResult, Title};
use crate::scan::Marker;

/// A single failed tracker operation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyncFailure {
    /// Title of the issue the operation was for.
    pub title: String,
    /// Why the operation failed.
    pub error: String,
}

/// Summary of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Issues successfully created.
    pub created: usize,
    /// Issues successfully closed.
    pub closed: usize,
    /// Titles that matched on both sides; nothing was done.
    pub unchanged: usize,
    /// Operations that failed, with their errors.
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// Number of failed operations.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Builds the issue body for a marker.
#[must_use]
pub fn issue_body(marker: &Marker) -> String {
    format!(
        "## Location\n{}:{}\n\n## Comment\n{}\n",
        marker.file_path.display(),
        marker.line_number,
        marker.text
    )
}

/// Applies the planned operations, closing vanished markers' issues first,
/// then creating issues for new markers.
///
/// At most `concurrency` tracker calls are in flight at once (a bound of 0
/// is treated as 1). Within a batch no operation depends on another; order
/// of completion is not observable in the report.
pub async fn sync(
    result: &ReconciliationResult,
    tracker: &dyn IssueTracker,
    concurrency: usize,
) -> SyncReport {
    let concurrency = concurrency.max(1);
    let mut report = SyncReport { unchanged: result.unchanged.len(), ..SyncReport::default() };

    let close_outcomes: Vec<Result<(), SyncFailure>> = stream::iter(&result.to_close)
        .map(|issue| async move {
            tracker.close_issue(&issue.remote_id).await.map_err(|e| SyncFailure {
                title: issue.title.clone(),
                error: e.to_string(),
            })
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;
    for outcome in close_outcomes {
        match outcome {
            Ok(()) => report.closed += 1,
            Err(failure) => report.failures.push(failure),
        }
    }

    let create_outcomes: Vec<Result<(), SyncFailure>> = stream::iter(&result.to_create)
        .map(|marker| async move {
            let title = Title::for_marker(marker);
            let body = issue_body(marker);
            tracker
                .create_issue(title.as_str(), &body)
                .await
                .map(|_| ())
                .map_err(|e| SyncFailure {
                    title: title.as_str().to_string(),
                    error: e.to_string(),
                })
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;
    for outcome in create_outcomes {
        match outcome {
            Ok(()) => report.created += 1,
            Err(failure) => report.failures.push(failure),
        }
    }

    report.failures.sort();
    report
}

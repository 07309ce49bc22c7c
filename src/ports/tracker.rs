//! Issue tracker port for reconciling action comments.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`IssueTracker`] to keep the trait
/// dyn-compatible while adapters perform network I/O.
pub type TrackerFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// State of a tracked issue in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// The issue is open and participates in reconciliation.
    Open,
    /// The issue is closed; inert history.
    Closed,
}

/// A remote record previously created for an action comment.
///
/// Owned by the remote tracker. The reconciler only reads and compares it;
/// state changes happen exclusively through tracker operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedIssue {
    /// Tracker-assigned identifier, opaque to the core.
    pub remote_id: String,
    /// The issue title; the identity key correlating it with a marker.
    pub title: String,
    /// Current state in the tracker.
    pub state: IssueState,
}

/// Manages issues in an external tracker.
///
/// The core needs exactly three operations; everything transport-level
/// (auth, retries, rate limiting) belongs to the implementation.
pub trait IssueTracker: Send + Sync {
    /// Lists the issues currently open in the tracker.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the listing cannot be fetched.
    fn list_open_issues(&self) -> TrackerFuture<'_, Vec<TrackedIssue>>;

    /// Creates a new issue and returns its tracker-assigned identifier.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the issue cannot be created.
    fn create_issue<'a>(&'a self, title: &'a str, body: &'a str) -> TrackerFuture<'a, String>;

    /// Closes the issue with the given tracker-assigned identifier.
    ///
    /// Closing an already-closed issue is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the issue cannot be closed.
    fn close_issue<'a>(&'a self, remote_id: &'a str) -> TrackerFuture<'a, ()>;
}

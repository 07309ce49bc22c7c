//! Reconciliation: set difference between scanned markers and tracked issues.
//!
//! Idempotent by construction: converged inputs partition into empty
//! create/close sets, so re-running changes nothing.

pub mod title;

use std::collections::{BTreeSet, HashMap, HashSet};

use regex::Regex;

pub use title::Title;

use crate::ports::tracker::{IssueState, TrackedIssue};
use crate::scan::Marker;

/// Outcome of comparing scanned markers against open tracked issues.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationResult {
    /// Markers with no corresponding open issue; one per distinct title,
    /// sorted by title.
    pub to_create: Vec<Marker>,
    /// Open issues whose marker no longer exists, sorted by title.
    pub to_close: Vec<TrackedIssue>,
    /// Titles present on both sides; reported for observability, never
    /// acted on.
    pub unchanged: Vec<Title>,
    /// Titles produced by more than one marker in this scan. Collapsed to a
    /// single create; surfaced so the caller can warn.
    pub collisions: Vec<Title>,
}

impl ReconciliationResult {
    /// Returns `true` when there is nothing to create or close.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.to_create.is_empty() && self.to_close.is_empty()
    }
}

/// Partitions markers and tracked issues into create/close/unchanged sets.
///
/// Only open tracked issues whose title matches `title_pattern` participate;
/// closed issues are inert history and foreign titles are ignored entirely
/// (never created, never closed). Duplicate marker titles collapse to one
/// create request and are recorded as collisions. The partition is a hash
/// set difference over titles, invariant under permutation of either input;
/// output vectors are sorted by title so logs and dry-run diffs reproduce.
#[must_use]
pub fn reconcile(
    markers: &[Marker],
    tracked: &[TrackedIssue],
    title_pattern: &Regex,
) -> ReconciliationResult {
    let mut by_title: HashMap<Title, &Marker> = HashMap::new();
    let mut collisions: BTreeSet<Title> = BTreeSet::new();
    for marker in markers {
        let title = Title::for_marker(marker);
        if by_title.contains_key(&title) {
            collisions.insert(title);
        } else {
            by_title.insert(title, marker);
        }
    }

    let open_titles: HashSet<Title> = tracked
        .iter()
        .filter(|issue| issue.state == IssueState::Open && title_pattern.is_match(&issue.title))
        .map(|issue| Title::from_remote(&issue.title))
        .collect();

    let mut to_create: Vec<(Title, Marker)> = by_title
        .iter()
        .filter(|(title, _)| !open_titles.contains(*title))
        .map(|(title, marker)| (title.clone(), (*marker).clone()))
        .collect();
    to_create.sort_by(|a, b| a.0.cmp(&b.0));

    let mut unchanged: BTreeSet<Title> = BTreeSet::new();
    let mut to_close: Vec<(Title, TrackedIssue)> = Vec::new();
    for issue in tracked {
        if issue.state != IssueState::Open || !title_pattern.is_match(&issue.title) {
            continue;
        }
        let title = Title::from_remote(&issue.title);
        if by_title.contains_key(&title) {
            unchanged.insert(title);
        } else {
            to_close.push((title, issue.clone()));
        }
    }
    to_close.sort_by(|a, b| a.0.cmp(&b.0));

    ReconciliationResult {
        to_create: to_create.into_iter().map(|(_, marker)| marker).collect(),
        to_close: to_close.into_iter().map(|(_, issue)| issue).collect(),
        unchanged: unchanged.into_iter().collect(),
        collisions: collisions.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn marker(file_name: &str, line_number: usize) -> Marker {
        Marker {
            file_path: PathBuf::from(file_name),
            file_name: file_name.to_string(),
            file_type: String::new(),
            line_number,
            text: format!("// TODO: at {file_name}:{line_number}"),
        }
    }

    fn open_issue(remote_id: &str, title: &str) -> TrackedIssue {
        TrackedIssue {
            remote_id: remote_id.to_string(),
            title: title.to_string(),
            state: IssueState::Open,
        }
    }

    fn pattern() -> Regex {
        Regex::new("^TODO:.+:[0-9]+$").unwrap()
    }

    fn titles(markers: &[Marker]) -> Vec<String> {
        markers.iter().map(|m| Title::for_marker(m).as_str().to_string()).collect()
    }

    #[test]
    fn new_marker_with_no_tracked_issues_is_created() {
        // Scenario A.
        let result = reconcile(&[marker("a.js", 3)], &[], &pattern());
        assert_eq!(titles(&result.to_create), vec!["TODO:a.js:3"]);
        assert!(result.to_close.is_empty());
        assert!(result.unchanged.is_empty());
    }

    #[test]
    fn vanished_marker_closes_its_issue() {
        // Scenario B.
        let tracked = vec![open_issue("1", "TODO:a.js:3")];
        let result = reconcile(&[], &tracked, &pattern());
        assert!(result.to_create.is_empty());
        assert_eq!(result.to_close, tracked);
    }

    #[test]
    fn matching_marker_and_issue_are_unchanged() {
        // Scenario C.
        let result =
            reconcile(&[marker("a.js", 3)], &[open_issue("1", "TODO:a.js:3")], &pattern());
        assert!(result.is_converged());
        assert_eq!(result.unchanged, vec![Title::from_remote("TODO:a.js:3")]);
    }

    #[test]
    fn duplicate_titles_collapse_to_one_create_with_collision() {
        // Scenario D: two markers at the same (file, line).
        let result = reconcile(&[marker("a.js", 3), marker("a.js", 3)], &[], &pattern());
        assert_eq!(result.to_create.len(), 1);
        assert_eq!(result.collisions, vec![Title::from_remote("TODO:a.js:3")]);
    }

    #[test]
    fn closed_issues_are_inert() {
        // Scenario E: a closed issue with no marker is not re-processed.
        let closed = TrackedIssue {
            remote_id: "9".to_string(),
            title: "TODO:gone.js:7".to_string(),
            state: IssueState::Closed,
        };
        let result = reconcile(&[], &[closed], &pattern());
        assert!(result.is_converged());
        assert!(result.unchanged.is_empty());
    }

    #[test]
    fn closed_issue_with_matching_marker_is_recreated() {
        // A marker that reappears after its issue was closed gets a fresh
        // issue; the closed record stays untouched.
        let closed = TrackedIssue {
            remote_id: "9".to_string(),
            title: "TODO:a.js:3".to_string(),
            state: IssueState::Closed,
        };
        let result = reconcile(&[marker("a.js", 3)], &[closed], &pattern());
        assert_eq!(titles(&result.to_create), vec!["TODO:a.js:3"]);
        assert!(result.to_close.is_empty());
    }

    #[test]
    fn foreign_titles_are_ignored_entirely() {
        let tracked = vec![
            open_issue("1", "Release checklist"),
            open_issue("2", "TODO:a.js:3"),
        ];
        let result = reconcile(&[], &tracked, &pattern());
        assert_eq!(result.to_close, vec![tracked[1].clone()]);
    }

    #[test]
    fn both_empty_is_a_no_op() {
        let result = reconcile(&[], &[], &pattern());
        assert!(result.is_converged());
        assert!(result.unchanged.is_empty());
        assert!(result.collisions.is_empty());
    }

    #[test]
    fn partition_is_invariant_under_permutation() {
        let markers = vec![marker("a.js", 3), marker("b.js", 5), marker("c.js", 9)];
        let mut reversed_markers = markers.clone();
        reversed_markers.reverse();

        let tracked = vec![
            open_issue("1", "TODO:b.js:5"),
            open_issue("2", "TODO:stale.js:1"),
            open_issue("3", "TODO:older.js:2"),
        ];
        let mut reversed_tracked = tracked.clone();
        reversed_tracked.reverse();

        let forward = reconcile(&markers, &tracked, &pattern());
        let backward = reconcile(&reversed_markers, &reversed_tracked, &pattern());
        assert_eq!(forward, backward);
    }

    #[test]
    fn outputs_are_sorted_by_title() {
        let markers = vec![marker("z.js", 1), marker("a.js", 1)];
        let tracked = vec![
            open_issue("1", "TODO:y.js:2"),
            open_issue("2", "TODO:b.js:2"),
        ];
        let result = reconcile(&markers, &tracked, &pattern());
        assert_eq!(titles(&result.to_create), vec!["TODO:a.js:1", "TODO:z.js:1"]);
        assert_eq!(result.to_close[0].title, "TODO:b.js:2");
        assert_eq!(result.to_close[1].title, "TODO:y.js:2");
    }

    #[test]
    fn every_marker_lands_in_create_or_unchanged() {
        // Completeness: no marker is silently dropped.
        let markers = vec![marker("a.js", 3), marker("b.js", 5)];
        let tracked = vec![open_issue("1", "TODO:a.js:3")];
        let result = reconcile(&markers, &tracked, &pattern());

        for m in &markers {
            let title = Title::for_marker(m);
            let created = result.to_create.iter().any(|c| Title::for_marker(c) == title);
            let unchanged = result.unchanged.contains(&title);
            assert!(created || unchanged, "marker {title} was dropped");
        }
    }

    #[test]
    fn duplicate_open_issues_share_one_fate() {
        // Two open issues with the same title: both close when the marker is
        // gone, both count as unchanged when it remains.
        let tracked = vec![open_issue("1", "TODO:a.js:3"), open_issue("2", "TODO:a.js:3")];

        let gone = reconcile(&[], &tracked, &pattern());
        assert_eq!(gone.to_close.len(), 2);

        let present = reconcile(&[marker("a.js", 3)], &tracked, &pattern());
        assert!(present.is_converged());
        assert_eq!(present.unchanged.len(), 1);
    }
}

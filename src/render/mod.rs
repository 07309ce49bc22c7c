//! Output formatting for scan results, dry-run plans, and sync reports.
//!
//! Pure string builders over the core's data; commands decide where the
//! text goes.

use std::fmt::Write as _;

use crate::reconcile::{ReconciliationResult, Title};
use crate::scan::Marker;
use crate::sync::SyncReport;

/// Formats markers as an aligned text table.
#[must_use]
pub fn format_markers_table(markers: &[Marker]) -> String {
    if markers.is_empty() {
        return "No action comments found.".to_string();
    }

    let rows: Vec<(String, String, String)> = markers
        .iter()
        .map(|m| {
            (m.file_path.display().to_string(), m.line_number.to_string(), m.text.clone())
        })
        .collect();

    let file_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(4).max(4);
    let line_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(4).max(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:<file_width$}  {:>line_width$}  TEXT", "FILE", "LINE");
    let _ = writeln!(out, "{:-<file_width$}  {:-<line_width$}  ----", "", "");
    for (file, line, text) in &rows {
        let _ = writeln!(out, "{file:<file_width$}  {line:>line_width$}  {text}");
    }
    out
}

/// Formats markers as CSV with a `file,line,text` header.
#[must_use]
pub fn format_markers_csv(markers: &[Marker]) -> String {
    let mut out = String::from("file,line,text\n");
    for marker in markers {
        let _ = writeln!(
            out,
            "{},{},{}",
            csv_field(&marker.file_path.display().to_string()),
            marker.line_number,
            csv_field(&marker.text)
        );
    }
    out
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Formats the planned operations of a reconciliation as a listing.
#[must_use]
pub fn format_plan(result: &ReconciliationResult) -> String {
    if result.is_converged() && result.unchanged.is_empty() {
        return "Nothing to reconcile.".to_string();
    }

    let mut lines = Vec::new();
    for issue in &result.to_close {
        lines.push(format!("  CLOSE {} (issue {})", issue.title, issue.remote_id));
    }
    for marker in &result.to_create {
        lines.push(format!("  CREATE {}", Title::for_marker(marker)));
    }
    for title in &result.unchanged {
        lines.push(format!("  UNCHANGED {title}"));
    }
    lines.join("\n")
}

/// Formats a sync report as a summary with failures listed.
#[must_use]
pub fn format_report(report: &SyncReport) -> String {
    let mut out = format!(
        "  created: {}\n  closed: {}\n  unchanged: {}\n  failed: {}",
        report.created,
        report.closed,
        report.unchanged,
        report.failed()
    );
    for failure in &report.failures {
        let _ = write!(out, "\n  FAILED {}: {}", failure.title, failure.error);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::ports::tracker::{IssueState, TrackedIssue};
    use crate::sync::SyncFailure;

    fn marker(path: &str, line_number: usize, text: &str) -> Marker {
        let file_path = PathBuf::from(path);
        Marker {
            file_name: file_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string(),
            file_type: String::new(),
            file_path,
            line_number,
            text: text.to_string(),
        }
    }

    #[test]
    fn table_aligns_columns() {
        let markers =
            vec![marker("a.js", 3, "// TODO: one"), marker("dir/longer.rs", 12, "// TODO: two")];
        let table = format_markers_table(&markers);
        assert!(table.contains("FILE"));
        assert!(table.contains("a.js"));
        assert!(table.contains("dir/longer.rs"));
        assert!(table.contains("// TODO: two"));
    }

    #[test]
    fn empty_table_has_a_message() {
        assert_eq!(format_markers_table(&[]), "No action comments found.");
    }

    #[test]
    fn csv_quotes_awkward_fields() {
        let markers = vec![marker("a.js", 3, "// TODO: commas, and \"quotes\"")];
        let csv = format_markers_csv(&markers);
        assert!(csv.starts_with("file,line,text\n"));
        assert!(csv.contains("\"// TODO: commas, and \"\"quotes\"\"\""));
    }

    #[test]
    fn plan_lists_closes_creates_and_unchanged() {
        let result = ReconciliationResult {
            to_create: vec![marker("new.js", 1, "// TODO: fresh")],
            to_close: vec![TrackedIssue {
                remote_id: "7".to_string(),
                title: "TODO:gone.js:2".to_string(),
                state: IssueState::Open,
            }],
            unchanged: vec![Title::from_remote("TODO:same.js:5")],
            collisions: Vec::new(),
        };
        let plan = format_plan(&result);
        assert!(plan.contains("CLOSE TODO:gone.js:2 (issue 7)"));
        assert!(plan.contains("CREATE TODO:new.js:1"));
        assert!(plan.contains("UNCHANGED TODO:same.js:5"));
    }

    #[test]
    fn empty_plan_has_a_message() {
        let result = ReconciliationResult {
            to_create: Vec::new(),
            to_close: Vec::new(),
            unchanged: Vec::new(),
            collisions: Vec::new(),
        };
        assert_eq!(format_plan(&result), "Nothing to reconcile.");
    }

    #[test]
    fn report_lists_counts_and_failures() {
        let report = SyncReport {
            created: 2,
            closed: 1,
            unchanged: 3,
            failures: vec![SyncFailure {
                title: "TODO:bad.js:1".to_string(),
                error: "rate limited".to_string(),
            }],
        };
        let text = format_report(&report);
        assert!(text.contains("created: 2"));
        assert!(text.contains("failed: 1"));
        assert!(text.contains("FAILED TODO:bad.js:1: rate limited"));
    }
}

//! Source tree scanning: directory traversal plus marker extraction.

pub mod extract;
pub mod walker;

use std::path::Path;

pub use extract::{extract_markers, Marker, MarkerMatcher};
pub use walker::Walker;

use crate::ports::filesystem::FileSystem;

/// What one scan pass found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Every recognized action comment, in walk order.
    pub markers: Vec<Marker>,
    /// Number of files whose contents were searched.
    pub files_scanned: usize,
    /// Number of files skipped because they could not be read as UTF-8.
    pub files_skipped: usize,
}

/// Walks `root` and extracts markers from every readable file.
///
/// Unreadable files (binary, permission errors) are counted and skipped;
/// they never fail the scan.
#[must_use]
pub fn scan(fs: &dyn FileSystem, root: &Path, matcher: &MarkerMatcher) -> ScanOutcome {
    let mut outcome = ScanOutcome { markers: Vec::new(), files_scanned: 0, files_skipped: 0 };
    for path in Walker::new(fs, root.to_path_buf()) {
        match fs.read_to_string(&path) {
            Ok(contents) => {
                outcome.files_scanned += 1;
                outcome.markers.extend(extract_markers(&path, &contents, matcher));
            }
            Err(_) => outcome.files_skipped += 1,
        }
    }
    outcome
}

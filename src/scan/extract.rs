//! Per-line extraction of action comments from file contents.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single recognized action comment in a source file.
///
/// Produced fresh on every scan; nothing persists between runs — the remote
/// tracker is the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Full path of the file containing the comment.
    pub file_path: PathBuf,
    /// File name component, used for identity.
    pub file_name: String,
    /// File extension, empty when absent.
    pub file_type: String,
    /// 1-based line number of the comment.
    pub line_number: usize,
    /// The matching line, trimmed.
    pub text: String,
}

/// Compiled matcher for action-comment lines.
pub struct MarkerMatcher {
    pattern: Regex,
}

impl MarkerMatcher {
    /// Builds a matcher recognizing lines that contain any of the given
    /// keywords followed by a colon (e.g. `TODO: fix this`).
    ///
    /// # Errors
    ///
    /// Returns an error if no keywords are given or the compiled pattern is
    /// invalid.
    pub fn new(keywords: &[String]) -> Result<Self, String> {
        if keywords.is_empty() {
            return Err("At least one marker keyword is required".to_string());
        }
        let alternatives =
            keywords.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        let pattern = Regex::new(&format!(r"\b(?:{alternatives}):"))
            .map_err(|e| format!("Failed to compile marker pattern: {e}"))?;
        Ok(Self { pattern })
    }

    /// Returns `true` if the line contains an action comment.
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// Extracts all markers from one file's contents.
#[must_use]
pub fn extract_markers(path: &Path, contents: &str, matcher: &MarkerMatcher) -> Vec<Marker> {
    let file_name =
        path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();
    let file_type =
        path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_string();

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| matcher.is_match(line))
        .map(|(index, line)| Marker {
            file_path: path.to_path_buf(),
            file_name: file_name.clone(),
            file_type: file_type.clone(),
            line_number: index + 1,
            text: line.trim().to_string(),
        })
        .collect()
}

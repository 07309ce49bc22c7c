//! Stable identity keys correlating markers with tracked issues.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scan::Marker;

/// Deterministic identity key for an action comment.
///
/// Built from the marker's file name and line number as
/// `TODO:<file_name>:<line_number>`. The comment's free text is deliberately
/// excluded: editing a comment in place keeps its identity, while markers at
/// distinct locations never share one. The fixed `TODO:` tag namespaces the
/// titles this tool manages among unrelated issues in the same tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Builds the title identifying the given marker.
    #[must_use]
    pub fn for_marker(marker: &Marker) -> Self {
        Self(format!("TODO:{}:{}", marker.file_name, marker.line_number))
    }

    /// Wraps a title string read back from the tracker.
    #[must_use]
    pub fn from_remote(title: &str) -> Self {
        Self(title.to_string())
    }

    /// The title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn marker(file_name: &str, line_number: usize, text: &str) -> Marker {
        Marker {
            file_path: PathBuf::from(file_name),
            file_name: file_name.to_string(),
            file_type: String::new(),
            line_number,
            text: text.to_string(),
        }
    }

    #[test]
    fn title_embeds_file_name_and_line() {
        let title = Title::for_marker(&marker("a.js", 3, "// TODO: x"));
        assert_eq!(title.as_str(), "TODO:a.js:3");
    }

    #[test]
    fn same_location_same_title_regardless_of_text() {
        let first = Title::for_marker(&marker("a.js", 3, "// TODO: old wording"));
        let second = Title::for_marker(&marker("a.js", 3, "// TODO: new wording"));
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_locations_produce_distinct_titles() {
        let by_line = Title::for_marker(&marker("a.js", 3, "t"));
        let other_line = Title::for_marker(&marker("a.js", 4, "t"));
        let other_file = Title::for_marker(&marker("b.js", 3, "t"));
        assert_ne!(by_line, other_line);
        assert_ne!(by_line, other_file);
    }

    #[test]
    fn round_trips_through_remote_string() {
        let title = Title::for_marker(&marker("a.js", 3, "t"));
        assert_eq!(Title::from_remote(title.as_str()), title);
    }
}

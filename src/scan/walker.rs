//! Lazy directory traversal through the `FileSystem` port.

use std::path::{Path, PathBuf};

use crate::ports::filesystem::FileSystem;

/// Directory names never descended into.
const VENDOR_DIRS: &[&str] = &["node_modules", "target", "vendor", "dist", "build"];

/// Depth-first walk over a directory tree, yielding file paths.
///
/// The sequence is lazy, finite, and non-restartable. Dot-prefixed entries
/// and vendor/dependency directories are skipped; unreadable directories are
/// skipped silently. Because `list_dir` returns sorted names, the yielded
/// order is deterministic for a given tree. The walker itself never logs;
/// observers live with the consumer.
pub struct Walker<'a> {
    fs: &'a dyn FileSystem,
    stack: Vec<PathBuf>,
}

impl<'a> Walker<'a> {
    /// Creates a walk rooted at the given path.
    ///
    /// A missing root produces an empty walk. The root itself is always
    /// visited, even if its own name would be skipped one level down.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, root: PathBuf) -> Self {
        let stack = if fs.exists(&root) { vec![root] } else { Vec::new() };
        Self { fs, stack }
    }

    fn expand(&mut self, dir: &Path) {
        let Ok(names) = self.fs.list_dir(dir) else {
            return;
        };
        // Reverse so the sorted names pop in order.
        for name in names.iter().rev() {
            if name.starts_with('.') {
                continue;
            }
            let child = dir.join(name);
            if VENDOR_DIRS.contains(&name.as_str()) && self.fs.is_dir(&child) {
                continue;
            }
            self.stack.push(child);
        }
    }
}

impl Iterator for Walker<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        while let Some(path) = self.stack.pop() {
            if self.fs.is_dir(&path) {
                self.expand(&path);
                continue;
            }
            return Some(path);
        }
        None
    }
}

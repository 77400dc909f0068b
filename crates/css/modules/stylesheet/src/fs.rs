//! Where `@import` and `StyleSheet::from_file` read sheets from.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};

/// Source of stylesheet text, addressed by `/` separated relative paths.
pub trait FileSystem {
    /// Read a whole file as UTF-8.
    ///
    /// # Errors
    /// Returns an error when the file is missing or unreadable.
    fn read_all_text(&self, path: &str) -> Result<String>;

    /// Resolve `path` against the file that imports it. Paths starting with
    /// `/` are taken from the root.
    fn resolve(&self, from: Option<&str>, path: &str) -> String {
        if path.starts_with('/') {
            return normalize_path(path);
        }
        let directory = from
            .and_then(|file| file.rsplit_once('/'))
            .map_or("", |(directory, _)| directory);
        normalize_path(&format!("{directory}/{path}"))
    }
}

/// Collapse `.`, `..` and repeated separators; the result has no leading `/`.
pub fn normalize_path(path: &str) -> String {
    let mut parts = Vec::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }
    parts.join("/")
}

/// Files on disk below a root directory.
#[derive(Clone, Debug)]
pub struct OsFileSystem {
    root: PathBuf,
}

impl OsFileSystem {
    #[inline]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSystem for OsFileSystem {
    fn read_all_text(&self, path: &str) -> Result<String> {
        let full = self.root.join(normalize_path(path));
        fs::read_to_string(&full).with_context(|| format!("reading {}", full.display()))
    }
}

/// In-memory files, for embedded sheets and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryFileSystem {
    files: HashMap<String, String>,
}

impl MemoryFileSystem {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: &str, text: impl Into<String>) {
        self.files.insert(normalize_path(path), text.into());
    }

    #[must_use]
    pub fn with_file(mut self, path: &str, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_all_text(&self, path: &str) -> Result<String> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| anyhow!("file not found: {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_against_the_importing_file() {
        let files = MemoryFileSystem::new();
        assert_eq!(files.resolve(Some("ui/hud/main.scss"), "../theme.scss"), "ui/theme.scss");
        assert_eq!(files.resolve(Some("main.scss"), "./a/b.scss"), "a/b.scss");
        assert_eq!(files.resolve(Some("ui/main.scss"), "/root.scss"), "root.scss");
        assert_eq!(files.resolve(None, "x.scss"), "x.scss");
    }
}

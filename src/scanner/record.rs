// Scanned file records and the ranked inventory

use super::score::count_lines;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// One scanned text file
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Absolute filesystem path
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated; unique within one scan
    pub relative_path: String,
    pub file_name: String,
    /// Extension as found on disk, without the leading dot
    pub extension: String,
    /// Decoded text; not serialized, the inventory dump only carries metadata
    #[serde(skip_serializing)]
    pub content: String,
    pub line_count: usize,
    pub importance_score: f64,
}

impl FileRecord {
    /// Build a record, deriving name, extension and line count from the inputs.
    pub fn new(
        path: impl Into<PathBuf>,
        relative_path: impl Into<String>,
        content: impl Into<String>,
        importance_score: f64,
    ) -> Self {
        let path = path.into();
        let content = content.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = extension_of(&path);
        let line_count = count_lines(&content);

        Self {
            path,
            relative_path: relative_path.into(),
            file_name,
            extension,
            content,
            line_count,
            importance_score,
        }
    }

    /// Lower-cased extension used for every comparison
    pub fn extension_lower(&self) -> String {
        self.extension.to_lowercase()
    }

    /// Lower-cased content, computed on demand
    pub fn content_lower(&self) -> String {
        self.content.to_lowercase()
    }
}

/// Extension of a path without the dot, empty when there is none.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Relative path joined with `/` regardless of platform
pub fn relative_path_of(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A file that could not be loaded; the scan continues without it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReadWarning {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for FileReadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not read {}: {}", self.path.display(), self.message)
    }
}

/// File records ordered by descending importance score.
///
/// Equal scores keep the order the records were handed in.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    records: Vec<FileRecord>,
}

impl Inventory {
    /// Rank records; the sort is stable so discovery order breaks ties
    pub fn from_records(mut records: Vec<FileRecord>) -> Self {
        records.sort_by(|a, b| b.importance_score.total_cmp(&a.importance_score));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[FileRecord] {
        &self.records
    }

    /// The `n` highest-ranked records (fewer if the inventory is shorter)
    pub fn top(&self, n: usize) -> &[FileRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Look up a record by relative path
    pub fn get(&self, relative_path: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.relative_path == relative_path)
    }

    pub fn total_lines(&self) -> usize {
        self.records.iter().map(|r| r.line_count).sum()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

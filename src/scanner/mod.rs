// Repository scanner: walks a root directory and builds the ranked inventory

pub mod record;
pub mod score;

pub use record::*;
pub use score::*;

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Result of scanning one root directory
#[derive(Debug)]
pub struct ScanReport {
    /// Canonical root the relative paths are computed against
    pub root: PathBuf,
    /// Loaded files, highest importance first
    pub inventory: Inventory,
    /// Files and directories that could not be read
    pub warnings: Vec<FileReadWarning>,
}

/// Walks a directory tree and loads text files into an [`Inventory`]
pub struct Scanner {
    ignore_dirs: HashSet<String>,
    ignore_files: Vec<glob::Pattern>,
    text_extensions: HashSet<String>,
    scorer: ImportanceScorer,
    show_progress: bool,
}

impl Scanner {
    /// Create a scanner from its filter configuration
    pub fn new(config: ScanConfig) -> Result<Self> {
        let ignore_files = config
            .ignore_files
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            ignore_dirs: config.ignore_dirs.iter().cloned().collect(),
            ignore_files,
            text_extensions: config
                .text_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            scorer: ImportanceScorer::new(&config),
            show_progress: config.show_progress,
        })
    }

    /// Scan `root` and return every loadable text file ranked by importance.
    ///
    /// Fails only when `root` is not an existing directory. Unreadable files
    /// are reported in [`ScanReport::warnings`].
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        if !root.is_dir() {
            return Err(Error::InvalidRoot(root.to_path_buf()));
        }
        let root = root.canonicalize()?;

        let (candidates, mut warnings) = self.discover(&root);
        debug!("{} candidate files under {}", candidates.len(), root.display());

        let progress = self.progress_bar(candidates.len());

        // Reads may finish in any order; collect keeps discovery order and
        // ranking happens only once everything is loaded.
        let loaded: Vec<std::result::Result<FileRecord, FileReadWarning>> = candidates
            .par_iter()
            .map(|path| {
                let result = self.load(path, &root);
                progress.inc(1);
                result
            })
            .collect();

        progress.finish_and_clear();

        let mut records = Vec::with_capacity(loaded.len());
        for result in loaded {
            match result {
                Ok(record) => records.push(record),
                Err(warning) => {
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        let inventory = Inventory::from_records(records);
        info!(
            "scanned {}: {} files, {} warnings",
            root.display(),
            inventory.len(),
            warnings.len()
        );

        Ok(ScanReport {
            root,
            inventory,
            warnings,
        })
    }

    /// Walk the tree in file-name order, pruning ignored directories before
    /// descending, and return the paths that pass the file filters.
    fn discover(&self, root: &Path) -> (Vec<PathBuf>, Vec<FileReadWarning>) {
        let mut files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let warning = FileReadWarning {
                        path: e.path().unwrap_or(root).to_path_buf(),
                        message: e.to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            // Symlinked directories are never followed
            if entry.path_is_symlink() && entry.path().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.is_ignored_file(&name) {
                debug!("skipping ignored file {}", entry.path().display());
                continue;
            }

            if !self.is_text_file(entry.path()) {
                continue;
            }

            files.push(entry.into_path());
        }

        (files, warnings)
    }

    /// Directories named in the ignore set or starting with `.` are pruned.
    /// The root itself is always walked.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        let pruned = self.is_ignored_dir(&entry.file_name().to_string_lossy());
        if pruned {
            debug!("pruning {}", entry.path().display());
        }
        pruned
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignore_dirs.contains(name)
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignore_files.iter().any(|p| p.matches(name))
    }

    pub fn is_text_file(&self, path: &Path) -> bool {
        let ext = extension_of(path).to_lowercase();
        self.text_extensions.contains(&ext)
    }

    fn load(&self, path: &Path, root: &Path) -> std::result::Result<FileRecord, FileReadWarning> {
        let bytes = std::fs::read(path).map_err(|e| FileReadWarning {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let content = decode_text(&bytes);
        let score = self.scorer.score(&extension_of(path), &content);
        let relative = relative_path_of(path, root);

        Ok(FileRecord::new(path, relative, content, score))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} Scanning files [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_config() -> ScanConfig {
        ScanConfig {
            show_progress: false,
            ..ScanConfig::default()
        }
    }

    fn scanner() -> Scanner {
        Scanner::new(quiet_config()).unwrap()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn paths(report: &ScanReport) -> Vec<String> {
        report
            .inventory
            .iter()
            .map(|r| r.relative_path.clone())
            .collect()
    }

    #[test]
    fn test_invalid_root_missing() {
        let result = scanner().scan(Path::new("/nonexistent/radar/root"));
        assert!(matches!(result, Err(Error::InvalidRoot(_))));
    }

    #[test]
    fn test_invalid_root_is_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.py", "x = 1\n");
        let result = scanner().scan(&dir.path().join("main.py"));
        assert!(matches!(result, Err(Error::InvalidRoot(_))));
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let report = scanner().scan(dir.path()).unwrap();
        assert!(report.inventory.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_ignored_dirs_pruned_at_any_depth() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.py", "x = 1\n");
        write(dir.path(), "node_modules/lib/index.js", "x\n");
        write(dir.path(), "src/__pycache__/cached.py", "x\n");
        write(dir.path(), "src/deep/venv/lib/site.py", "x\n");
        write(dir.path(), "src/deep/keep.py", "x\n");
        write(dir.path(), "docs/guide.md", "x\n");

        let report = scanner().scan(dir.path()).unwrap();
        let mut found = paths(&report);
        found.sort();
        assert_eq!(found, vec!["main.py", "src/deep/keep.py"]);
    }

    #[test]
    fn test_hidden_dirs_pruned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.py", "x\n");
        write(dir.path(), ".cache/data.json", "{}\n");
        write(dir.path(), "src/.hidden/secret.py", "x\n");

        let report = scanner().scan(dir.path()).unwrap();
        assert_eq!(paths(&report), vec!["app.py"]);
    }

    #[test]
    fn test_hidden_root_is_still_scanned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".project/app.py", "x\n");
        let report = scanner().scan(&dir.path().join(".project")).unwrap();
        assert_eq!(paths(&report), vec!["app.py"]);
    }

    #[test]
    fn test_ignored_files_exact_and_suffix() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "requirements.txt", "flask\n");
        write(dir.path(), "package.json", "{}\n");
        write(dir.path(), "notes.txt", "hello\n");
        write(dir.path(), "run.log", "log line\n");

        let report = scanner().scan(dir.path()).unwrap();
        assert_eq!(paths(&report), vec!["notes.txt"]);
    }

    #[test]
    fn test_extension_allow_list() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.rs", "fn main() {}\n");
        write(dir.path(), "image.png", "not really\n");
        write(dir.path(), "Makefile", "all:\n");
        write(dir.path(), "analysis.R", "library(dplyr)\n");
        write(dir.path(), "QUERY.SQL", "select 1;\n");

        let report = scanner().scan(dir.path()).unwrap();
        let mut found = paths(&report);
        found.sort();
        assert_eq!(found, vec!["QUERY.SQL", "analysis.R"]);
    }

    #[test]
    fn test_record_fields() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "pkg/Module.PY", "import os\nx = 1\n");

        let report = scanner().scan(dir.path()).unwrap();
        let rec = report.inventory.get("pkg/Module.PY").unwrap();
        assert_eq!(rec.file_name, "Module.PY");
        assert_eq!(rec.extension, "PY");
        assert!(rec.path.is_absolute());
        assert_eq!(rec.line_count, 2);
        assert_eq!(rec.importance_score, 6.0);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.csv"), b"a,b\n\xff\xfe,c\n").unwrap();

        let report = scanner().scan(dir.path()).unwrap();
        let rec = report.inventory.get("data.csv").unwrap();
        assert_eq!(rec.content, "a,b\n,c\n");
        assert_eq!(rec.importance_score, 2.0);
    }

    #[test]
    fn test_equal_scores_follow_discovery_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "c.md", "one\n");
        write(dir.path(), "a.md", "one\n");
        write(dir.path(), "b.md", "one\n");
        write(dir.path(), "big.md", "one\ntwo\nthree\n");

        let report = scanner().scan(dir.path()).unwrap();
        assert_eq!(paths(&report), vec!["big.md", "a.md", "b.md", "c.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_becomes_warning() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.py", "x = 1\n");
        std::os::unix::fs::symlink(dir.path().join("missing.py"), dir.path().join("broken.py"))
            .unwrap();

        let report = scanner().scan(dir.path()).unwrap();
        assert_eq!(paths(&report), vec!["good.py"]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].path.ends_with("broken.py"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_not_followed() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        write(outside.path(), "elsewhere.py", "x\n");
        write(dir.path(), "main.py", "x\n");
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

        let report = scanner().scan(dir.path()).unwrap();
        assert_eq!(paths(&report), vec!["main.py"]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_custom_config_overrides_filters() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "tests/test_main.py", "x\n");
        write(dir.path(), "vendor/lib.py", "x\n");
        write(dir.path(), "lib.rs", "fn f() {}\n");

        let config = ScanConfig {
            ignore_dirs: vec!["vendor".to_string()],
            text_extensions: vec!["py".to_string(), "rs".to_string()],
            source_extensions: vec!["rs".to_string()],
            show_progress: false,
            ..ScanConfig::default()
        };
        let report = Scanner::new(config).unwrap().scan(dir.path()).unwrap();
        assert_eq!(paths(&report), vec!["lib.rs", "tests/test_main.py"]);
        assert_eq!(report.inventory.as_slice()[0].importance_score, 2.0);
    }

    #[test]
    fn test_filter_predicates() {
        let s = scanner();
        assert!(s.is_ignored_dir(".git"));
        assert!(s.is_ignored_dir(".anything"));
        assert!(s.is_ignored_dir("node_modules"));
        assert!(!s.is_ignored_dir("src"));
        assert!(s.is_ignored_file("module.pyc"));
        assert!(s.is_ignored_file(".DS_Store"));
        assert!(!s.is_ignored_file("main.py"));
        assert!(s.is_text_file(Path::new("a/b/script.PS1")));
        assert!(!s.is_text_file(Path::new("a/b/binary.exe")));
    }
}

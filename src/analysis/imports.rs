// Textual dependency extraction
//
// Line-anchored regex search, no parsing:
// - Python: `from <name>` / `import <name>` at the start of a line
// - R: the argument of every `library(...)` call

use crate::analysis::language::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

static PYTHON_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:from\s+([\w.]+)|import\s+([\w.]+))").expect("valid regex")
});

static R_LIBRARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"library\((.*?)\)").expect("valid regex"));

/// Extract referenced modules for languages that support it.
///
/// Returns `None` for families without extraction.
pub fn extract_dependencies(language: Language, content: &str) -> Option<Vec<String>> {
    match language {
        Language::Python => Some(python_dependencies(content)),
        Language::R => Some(r_libraries(content)),
        Language::JavaScript => None,
    }
}

/// Unique module names, sorted
pub fn python_dependencies(content: &str) -> Vec<String> {
    let names: BTreeSet<String> = PYTHON_IMPORT
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect();
    names.into_iter().collect()
}

/// Library names in first-seen order, without repeats
pub fn r_libraries(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    R_LIBRARY
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_imports_sorted_unique() {
        let content = "import os\nfrom flask import Flask\nimport os\nfrom app.models import User\n";
        assert_eq!(
            python_dependencies(content),
            vec!["app.models", "flask", "os"]
        );
    }

    #[test]
    fn test_python_imports_are_line_anchored() {
        let content = "def f():\n    import json\nx = 'from here import nothing'\n";
        assert!(python_dependencies(content).is_empty());
    }

    #[test]
    fn test_python_import_lists_take_first_name() {
        let content = "import os, sys\nfrom . import sibling\nfrom ..pkg import thing\n";
        assert_eq!(python_dependencies(content), vec![".", "..pkg", "os"]);
    }

    #[test]
    fn test_python_no_imports() {
        assert!(python_dependencies("x = 1\n").is_empty());
    }

    #[test]
    fn test_r_libraries() {
        let content = "library(dplyr)\nlibrary(ggplot2); x <- 1\nlibrary(dplyr)\n";
        assert_eq!(r_libraries(content), vec!["dplyr", "ggplot2"]);
    }

    #[test]
    fn test_r_library_inside_expression() {
        let content = "suppressMessages(library(tidyr))\n";
        assert_eq!(r_libraries(content), vec!["tidyr"]);
    }

    #[test]
    fn test_extract_by_language() {
        assert_eq!(
            extract_dependencies(Language::Python, "import re\n"),
            Some(vec!["re".to_string()])
        );
        assert_eq!(
            extract_dependencies(Language::R, "x <- 1\n"),
            Some(Vec::new())
        );
        assert_eq!(
            extract_dependencies(Language::JavaScript, "import x from 'y'\n"),
            None
        );
    }
}

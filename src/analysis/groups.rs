// Purpose-based file grouping
//
// Each rule chain applies to one extension family and is evaluated in
// order; the first matching rule assigns the group and stops the search.

use crate::analysis::language::Language;
use crate::scanner::FileRecord;
use serde::{Deserialize, Serialize};

pub const WEB_API: &str = "Web API";
pub const DATA_MODELS: &str = "Data Models";
pub const TESTS: &str = "Tests";
pub const FRONTEND_COMPONENTS: &str = "Frontend Components";

/// Label used for files that belong to no group
pub const UNGROUPED: &str = "Other";

/// What a rule looks at. Both checks are case-insensitive substring searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "needle")]
pub enum Matcher {
    ContentContains(String),
    PathContains(String),
}

impl Matcher {
    /// `content_lower` must already be lower-cased
    pub fn matches(&self, record: &FileRecord, content_lower: &str) -> bool {
        match self {
            Matcher::ContentContains(needle) => content_lower.contains(&needle.to_lowercase()),
            Matcher::PathContains(needle) => record
                .relative_path
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRule {
    pub label: String,
    pub matcher: Matcher,
}

impl GroupRule {
    pub fn content(label: &str, keyword: &str) -> Self {
        Self {
            label: label.to_string(),
            matcher: Matcher::ContentContains(keyword.to_string()),
        }
    }

    pub fn path(label: &str, fragment: &str) -> Self {
        Self {
            label: label.to_string(),
            matcher: Matcher::PathContains(fragment.to_string()),
        }
    }
}

/// Ordered rules for one set of extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleChain {
    /// Lower-case extensions without the dot
    pub extensions: Vec<String>,
    pub rules: Vec<GroupRule>,
}

impl RuleChain {
    pub fn for_language(language: Language, rules: Vec<GroupRule>) -> Self {
        Self {
            extensions: language.extensions().iter().map(|e| e.to_string()).collect(),
            rules,
        }
    }

    pub fn applies_to(&self, extension_lower: &str) -> bool {
        self.extensions.iter().any(|e| e == extension_lower)
    }

    /// Label of the first matching rule
    pub fn classify(&self, record: &FileRecord, content_lower: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(record, content_lower))
            .map(|rule| rule.label.as_str())
    }
}

/// Python files: web framework, then models, then test paths.
/// JavaScript/TypeScript files: component framework.
pub fn default_rule_chains() -> Vec<RuleChain> {
    vec![
        RuleChain::for_language(
            Language::Python,
            vec![
                GroupRule::content(WEB_API, "flask"),
                GroupRule::content(DATA_MODELS, "model"),
                GroupRule::path(TESTS, "test"),
            ],
        ),
        RuleChain::for_language(
            Language::JavaScript,
            vec![GroupRule::content(FRONTEND_COMPONENTS, "react")],
        ),
    ]
}

/// Group for one file across all chains; a file gets at most one label
pub fn classify<'a>(
    chains: &'a [RuleChain],
    record: &FileRecord,
    content_lower: &str,
) -> Option<&'a str> {
    let ext = record.extension_lower();
    chains
        .iter()
        .filter(|chain| chain.applies_to(&ext))
        .find_map(|chain| chain.classify(record, content_lower))
}

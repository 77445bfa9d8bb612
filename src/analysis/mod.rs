// Structural analysis of a scanned inventory

pub mod flow;
pub mod groups;
pub mod imports;
pub mod language;

pub use flow::*;
pub use groups::{classify, default_rule_chains, GroupRule, Matcher, RuleChain};
pub use imports::*;
pub use language::*;

use crate::config::AnalysisConfig;
use crate::scanner::Inventory;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Everything derived from one inventory
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResult {
    /// Highest-ranked relative paths, in inventory order
    pub core_files: Vec<String>,
    /// Relative path -> referenced module or library names
    pub dependencies: BTreeMap<String, Vec<String>>,
    /// Group label -> relative paths, in inventory order
    pub file_groups: BTreeMap<String, Vec<String>>,
    pub data_flow: Vec<DataFlowEntry>,
    pub tech_stack: BTreeSet<String>,
}

impl AnalysisResult {
    /// Group label of a file, or [`groups::UNGROUPED`]
    pub fn group_of(&self, path: &str) -> &str {
        self.file_groups
            .iter()
            .find(|(_, files)| files.iter().any(|f| f == path))
            .map(|(label, _)| label.as_str())
            .unwrap_or(groups::UNGROUPED)
    }

    pub fn dependencies_of(&self, path: &str) -> &[String] {
        self.dependencies
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn operations_of(&self, path: &str) -> Vec<FlowOperation> {
        self.data_flow
            .iter()
            .filter(|entry| entry.file == path)
            .map(|entry| entry.operation)
            .collect()
    }

    pub fn is_core(&self, path: &str) -> bool {
        self.core_files.iter().any(|f| f == path)
    }
}

/// Derives core files, dependencies, tech stack, groups and data flow.
///
/// Pure over the inventory: no I/O and no failure path.
pub struct Analyzer {
    core_divisor: usize,
    rule_chains: Vec<RuleChain>,
}

impl Analyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            core_divisor: config.core_divisor.max(1),
            rule_chains: default_rule_chains(),
        }
    }

    /// Replace the grouping rules
    pub fn with_rule_chains(mut self, chains: Vec<RuleChain>) -> Self {
        self.rule_chains = chains;
        self
    }

    pub fn analyze(&self, inventory: &Inventory) -> AnalysisResult {
        let core_count = inventory.len() / self.core_divisor;
        let mut result = AnalysisResult {
            core_files: inventory
                .top(core_count)
                .iter()
                .map(|r| r.relative_path.clone())
                .collect(),
            ..Default::default()
        };

        for record in inventory {
            let path = &record.relative_path;

            if let Some(language) = Language::from_extension(&record.extension) {
                result.tech_stack.insert(language.tech_label().to_string());

                if let Some(deps) = extract_dependencies(language, &record.content) {
                    result.dependencies.insert(path.clone(), deps);
                }
            }

            let content_lower = record.content_lower();
            if let Some(label) = classify(&self.rule_chains, record, &content_lower) {
                debug!("{} -> {}", path, label);
                result
                    .file_groups
                    .entry(label.to_string())
                    .or_default()
                    .push(path.clone());
            }

            for operation in detect_operations(&record.content) {
                result.data_flow.push(DataFlowEntry {
                    file: path.clone(),
                    operation,
                });
            }
        }

        info!(
            "analysis: {} core files, {} groups, {} data-flow tags, stack {:?}",
            result.core_files.len(),
            result.file_groups.len(),
            result.data_flow.len(),
            result.tech_stack
        );

        result
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

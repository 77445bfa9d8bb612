// Coarse read/write data-flow tags

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static READ_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)read|load|import|fetch").expect("valid regex"));

static WRITE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)write|save|export|create").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowOperation {
    Read,
    Write,
}

impl fmt::Display for FlowOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowOperation::Read => write!(f, "read"),
            FlowOperation::Write => write!(f, "write"),
        }
    }
}

/// One data-flow tag for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowEntry {
    pub file: String,
    pub operation: FlowOperation,
}

/// Operations whose keywords appear in `content`, read before write
pub fn detect_operations(content: &str) -> Vec<FlowOperation> {
    let mut ops = Vec::with_capacity(2);
    if READ_PATTERN.is_match(content) {
        ops.push(FlowOperation::Read);
    }
    if WRITE_PATTERN.is_match(content) {
        ops.push(FlowOperation::Write);
    }
    ops
}

//! Radar - Repository analysis and documentation report
//!
//! Walks a repository, ranks its text files by importance and derives a
//! structural analysis (core files, dependencies, tech stack, file groups,
//! data flow) that feeds documentation generation.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;

// Re-export main types
pub use analysis::{AnalysisResult, Analyzer, DataFlowEntry, FlowOperation};
pub use config::Config;
pub use error::{Error, Result};
pub use output::{DocumentWriter, DocumentationGenerator, PromptGenerator, SummaryGenerator};
pub use scanner::{FileReadWarning, FileRecord, Inventory, ScanReport, Scanner};

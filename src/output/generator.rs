// Documentation generators
//
// The language-model backed generator lives outside this crate; it plugs in
// through `DocumentationGenerator`. Two offline implementations ship here.

use crate::analysis::AnalysisResult;
use crate::error::{Error, Result};
use crate::output::templates::{self, TemplateEngine};
use crate::scanner::{FileRecord, Inventory};
use rayon::prelude::*;
use tracing::{info, warn};

/// Produces the overview and per-file documents for a scanned repository
pub trait DocumentationGenerator: Send + Sync {
    fn overview(&self, inventory: &Inventory, analysis: &AnalysisResult) -> Result<String>;

    fn component(&self, record: &FileRecord, analysis: &AnalysisResult) -> Result<String>;
}

/// Deterministic markdown built from the analysis alone
pub struct SummaryGenerator {
    engine: TemplateEngine,
    project_name: String,
}

impl SummaryGenerator {
    pub fn new(project_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            project_name: project_name.into(),
        })
    }
}

impl DocumentationGenerator for SummaryGenerator {
    fn overview(&self, inventory: &Inventory, analysis: &AnalysisResult) -> Result<String> {
        self.engine
            .render_overview(templates::OVERVIEW, &self.project_name, inventory, analysis)
    }

    fn component(&self, record: &FileRecord, analysis: &AnalysisResult) -> Result<String> {
        self.engine
            .render_component(templates::COMPONENT, record, analysis)
    }
}

/// Prompts for an external text generation service, one per document
pub struct PromptGenerator {
    engine: TemplateEngine,
    project_name: String,
}

impl PromptGenerator {
    pub fn new(project_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            project_name: project_name.into(),
        })
    }
}

impl DocumentationGenerator for PromptGenerator {
    fn overview(&self, inventory: &Inventory, analysis: &AnalysisResult) -> Result<String> {
        self.engine.render_overview(
            templates::OVERVIEW_PROMPT,
            &self.project_name,
            inventory,
            analysis,
        )
    }

    fn component(&self, record: &FileRecord, analysis: &AnalysisResult) -> Result<String> {
        self.engine
            .render_component(templates::COMPONENT_PROMPT, record, analysis)
    }
}

/// Generate documents for every core file on at most `workers` threads.
///
/// A file whose generation fails is logged and left out. The returned
/// `(relative_path, document)` pairs follow core-file order.
pub fn generate_components(
    generator: &dyn DocumentationGenerator,
    inventory: &Inventory,
    analysis: &AnalysisResult,
    workers: usize,
) -> Result<Vec<(String, String)>> {
    let core: Vec<&FileRecord> = analysis
        .core_files
        .iter()
        .filter_map(|path| inventory.get(path))
        .collect();

    if core.is_empty() {
        return Ok(Vec::new());
    }

    let threads = workers.clamp(1, core.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| Error::other(format!("failed to start worker pool: {}", e)))?;

    let documents: Vec<(String, String)> = pool.install(|| {
        core.par_iter()
            .filter_map(|record| match generator.component(record, analysis) {
                Ok(doc) => Some((record.relative_path.clone(), doc)),
                Err(e) => {
                    warn!("failed to document {}: {}", record.relative_path, e);
                    None
                }
            })
            .collect()
    });

    info!(
        "documented {}/{} core files on {} threads",
        documents.len(),
        core.len(),
        threads
    );
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;

    fn sample(n: usize) -> (Inventory, AnalysisResult) {
        let records = (0..n)
            .map(|i| {
                let name = format!("mod{}.py", i);
                FileRecord::new(format!("/r/{}", name), name, "x = 1\n".repeat(i + 1), (i + 1) as f64)
            })
            .collect();
        let inventory = Inventory::from_records(records);
        let analysis = Analyzer::default().analyze(&inventory);
        (inventory, analysis)
    }

    /// Fails for one chosen file
    struct FlakyGenerator {
        fail_on: String,
    }

    impl DocumentationGenerator for FlakyGenerator {
        fn overview(&self, _: &Inventory, _: &AnalysisResult) -> Result<String> {
            Ok(String::new())
        }

        fn component(&self, record: &FileRecord, _: &AnalysisResult) -> Result<String> {
            if record.relative_path == self.fail_on {
                Err(Error::generation(&record.relative_path, "boom"))
            } else {
                Ok(format!("doc for {}", record.relative_path))
            }
        }
    }

    #[test]
    fn test_components_follow_core_order() {
        let (inventory, analysis) = sample(20);
        let generator = SummaryGenerator::new("Demo").unwrap();
        let docs = generate_components(&generator, &inventory, &analysis, 8).unwrap();

        let paths: Vec<&str> = docs.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["mod19.py", "mod18.py", "mod17.py", "mod16.py"]);
        assert!(docs[0].1.starts_with("# mod19.py"));
    }

    #[test]
    fn test_no_core_files_yields_nothing() {
        let (inventory, analysis) = sample(4);
        let generator = SummaryGenerator::new("Demo").unwrap();
        let docs = generate_components(&generator, &inventory, &analysis, 8).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_failed_file_is_skipped() {
        let (inventory, analysis) = sample(10);
        let generator = FlakyGenerator {
            fail_on: "mod9.py".to_string(),
        };
        let docs = generate_components(&generator, &inventory, &analysis, 1).unwrap();
        assert_eq!(docs, vec![("mod8.py".to_string(), "doc for mod8.py".to_string())]);
    }

    #[test]
    fn test_prompt_generator() {
        let (inventory, analysis) = sample(5);
        let generator = PromptGenerator::new("Demo").unwrap();

        let overview = generator.overview(&inventory, &analysis).unwrap();
        assert!(overview.contains("PROJECT: Demo"));

        let record = inventory.get("mod4.py").unwrap();
        let prompt = generator.component(record, &analysis).unwrap();
        assert!(prompt.contains("FILE: mod4.py"));
        assert!(prompt.contains("x = 1"));
    }

    #[test]
    fn test_summary_generator_overview() {
        let (inventory, analysis) = sample(5);
        let generator = SummaryGenerator::new("Demo").unwrap();
        let overview = generator.overview(&inventory, &analysis).unwrap();
        assert!(overview.starts_with("# Demo"));
    }
}

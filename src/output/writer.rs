// Persists generated documents
//
// Layout under the scanned root:
//   <root>/<directory_name>/<overview_file>
//   <root>/<directory_name>/<components_dir>/<basename>.md
//   <root>/<directory_name>/analysis.json

use crate::analysis::AnalysisResult;
use crate::config::OutputConfig;
use crate::error::Result;
use crate::scanner::{FileReadWarning, Inventory};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the documentation tree for one scanned root
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    output_dir: PathBuf,
    overview_file: String,
    components_dir: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    inventory: &'a Inventory,
    analysis: &'a AnalysisResult,
    warnings: &'a [FileReadWarning],
}

impl DocumentWriter {
    pub fn new(root: &Path, config: &OutputConfig) -> Self {
        Self {
            output_dir: root.join(&config.directory_name),
            overview_file: config.overview_file.clone(),
            components_dir: config.components_dir.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the overview and one file per component document
    pub fn write(&self, overview: &str, components: &[(String, String)]) -> Result<WriteReport> {
        let components_dir = self.output_dir.join(&self.components_dir);
        fs::create_dir_all(&components_dir)?;

        let overview_path = self.output_dir.join(&self.overview_file);
        fs::write(&overview_path, overview)?;
        debug!("wrote {}", overview_path.display());

        let mut component_paths = Vec::with_capacity(components.len());
        for (relative_path, document) in components {
            let path = components_dir.join(component_file_name(relative_path));
            fs::write(&path, document)?;
            debug!("wrote {}", path.display());
            component_paths.push(path);
        }

        Ok(WriteReport {
            output_dir: self.output_dir.clone(),
            overview_path,
            component_paths,
        })
    }

    /// Dump inventory metadata and analysis as `analysis.json`
    pub fn write_json(
        &self,
        root: &Path,
        inventory: &Inventory,
        analysis: &AnalysisResult,
        warnings: &[FileReadWarning],
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let report = JsonReport {
            root,
            inventory,
            analysis,
            warnings,
        };
        let json = serde_json::to_string_pretty(&report)?;
        let path = self.output_dir.join("analysis.json");
        fs::write(&path, json)?;
        Ok(path)
    }
}

/// File name of a component document: the basename of the relative path
/// plus `.md`.
///
/// Files sharing a basename in different directories map to the same name.
pub fn component_file_name(relative_path: &str) -> String {
    let base = relative_path
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(relative_path);
    format!("{}.md", base)
}

/// Report of what was written
#[derive(Debug, Default)]
pub struct WriteReport {
    pub output_dir: PathBuf,
    pub overview_path: PathBuf,
    pub component_paths: Vec<PathBuf>,
}

impl WriteReport {
    pub fn summary(&self) -> String {
        format!(
            "Wrote {} and {} component documents to {}",
            self.overview_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            self.component_paths.len(),
            self.output_dir.display()
        )
    }
}

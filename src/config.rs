use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
}

/// Scanner filters and scoring inputs.
///
/// Extensions are written without the leading dot and compared lower-cased.
/// `ignore_files` entries are glob patterns matched against the file name,
/// so plain names match exactly and `*.log` style entries match by suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub ignore_dirs: Vec<String>,
    pub ignore_files: Vec<String>,
    pub text_extensions: Vec<String>,
    pub source_extensions: Vec<String>,
    pub import_markers: Vec<String>,
    pub show_progress: bool,
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Core files are the first `len / core_divisor` inventory entries
    pub core_divisor: usize,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub directory_name: String,
    pub overview_file: String,
    pub components_dir: String,
    pub workers: usize,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Prompts,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            "prompts" | "prompt" => Some(OutputFormat::Prompts),
            _ => None,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: strings(&[
                // virtualenvs and caches
                ".venv", "venv", "env", "guruenv", "__pycache__",
                // dependencies and builds
                "node_modules", "dist", "build", "site-packages",
                // version control and IDEs
                ".git", ".idea", ".vscode", ".hg", ".svn",
                // our own output
                "RADAR", "output",
                // tests and docs
                "tests", "test", "docs", "documentation",
                // temp and tool caches
                ".pytest_cache", ".mypy_cache", ".coverage", "tmp", "temp",
            ]),
            ignore_files: strings(&[
                ".env", ".env.example", "pyvenv.cfg",
                "requirements.txt", "package.json", "package-lock.json",
                ".editorconfig", ".gitignore", ".gitattributes",
                ".DS_Store", "Thumbs.db",
                "*.log", "*.pyc", "*.pyo", "*.pyd",
            ]),
            text_extensions: strings(&[
                "py", "r", "txt", "md", "csv", "json", "vba", "sql", "js", "ts", "html",
                "css", "yaml", "yml", "ini", "cfg", "conf", "sh", "bat", "ps1",
            ]),
            source_extensions: strings(&["py", "r", "js", "ts"]),
            import_markers: strings(&["import ", "require"]),
            show_progress: true,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { core_divisor: 5 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory_name: "RADAR".to_string(),
            overview_file: "VISAO_GERAL.md".to_string(),
            components_dir: "componentes".to_string(),
            workers: 8,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        format: Option<OutputFormat>,
        output_dir: Option<String>,
        exclude_dirs: Vec<String>,
        no_progress: bool,
    ) {
        if let Some(fmt) = format {
            self.output.format = fmt;
        }

        if let Some(dir) = output_dir {
            self.output.directory_name = dir;
        }

        if !exclude_dirs.is_empty() {
            self.scan.ignore_dirs.extend(exclude_dirs);
        }

        if no_progress {
            self.scan.show_progress = false;
        }
    }

    /// Scanner settings with the output directory added to the ignore set
    pub fn scan_config(&self) -> ScanConfig {
        let mut scan = self.scan.clone();
        if !scan.ignore_dirs.contains(&self.output.directory_name) {
            scan.ignore_dirs.push(self.output.directory_name.clone());
        }
        scan
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.analysis.core_divisor == 0 {
            return Err(Error::config_validation("core_divisor must be at least 1"));
        }

        if self.output.workers == 0 {
            return Err(Error::config_validation("workers must be at least 1"));
        }

        if self.scan.text_extensions.is_empty() {
            return Err(Error::config_validation(
                "at least one text extension required",
            ));
        }

        for ext in &self.scan.source_extensions {
            let known = self
                .scan
                .text_extensions
                .iter()
                .any(|t| t.eq_ignore_ascii_case(ext));
            if !known {
                return Err(Error::config_validation(format!(
                    "source extension '{}' is not a text extension",
                    ext
                )));
            }
        }

        for pattern in &self.scan.ignore_files {
            glob::Pattern::new(pattern)?;
        }

        if self.output.directory_name.trim().is_empty() {
            return Err(Error::config_validation("output directory name is empty"));
        }

        for (key, name) in [
            ("directory_name", &self.output.directory_name),
            ("components_dir", &self.output.components_dir),
        ] {
            if !is_plain_name(name) {
                return Err(Error::config_validation(format!(
                    "{} must be a single directory name, got '{}'",
                    key, name
                )));
            }
        }

        Ok(())
    }
}

/// A bare file or directory name: no separators and no `.`/`..`
fn is_plain_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}

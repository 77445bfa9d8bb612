//! CLI module for Radar

mod args;

pub use args::{Args, Command};

use crate::analysis::Analyzer;
use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::output::{
    generate_components, DocumentWriter, DocumentationGenerator, PromptGenerator,
    SummaryGenerator,
};
use crate::scanner::Scanner;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` when verbose
fn init_logging(verbose: bool) {
    let default = if verbose { "radar=debug" } else { "radar=info" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Analyze {
            path,
            config,
            format,
            output_dir,
            exclude_dirs,
            no_progress,
            verbose,
        } => {
            init_logging(verbose);

            let format = match format {
                Some(f) => Some(
                    OutputFormat::parse(&f)
                        .ok_or_else(|| Error::other(format!("Unknown format: {}", f)))?,
                ),
                None => None,
            };

            let mut cfg = match &config {
                Some(config_path) => Config::load(config_path)?,
                None => Config::load_or_default(Path::new("radar.toml")),
            };
            cfg.merge_cli(format, output_dir, exclude_dirs, no_progress);
            cfg.validate()?;

            analyze(&path, &cfg)
        }

        Command::Version => {
            println!("radar {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Scan, analyze and write documentation for one repository
pub fn analyze(path: &Path, cfg: &Config) -> Result<()> {
    println!("Scanning {}", path.display());
    let scanner = Scanner::new(cfg.scan_config())?;
    let report = scanner.scan(path)?;

    if !report.warnings.is_empty() {
        println!("{} files could not be read", report.warnings.len());
    }

    if report.inventory.is_empty() {
        println!("No source files found to analyze.");
        return Ok(());
    }
    println!("Found {} files", report.inventory.len());

    let analysis = Analyzer::new(&cfg.analysis).analyze(&report.inventory);
    println!(
        "Analysis complete: {} core files, stack: {}",
        analysis.core_files.len(),
        if analysis.tech_stack.is_empty() {
            "none".to_string()
        } else {
            analysis
                .tech_stack
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    );

    let writer = DocumentWriter::new(&report.root, &cfg.output);
    let project_name = project_name(cfg, &report.root);

    match cfg.output.format {
        OutputFormat::Json => {
            let out = writer.write_json(
                &report.root,
                &report.inventory,
                &analysis,
                &report.warnings,
            )?;
            println!("JSON written to: {}", out.display());
        }
        OutputFormat::Markdown | OutputFormat::Prompts => {
            let generator: Box<dyn DocumentationGenerator> = match cfg.output.format {
                OutputFormat::Prompts => Box::new(PromptGenerator::new(project_name)?),
                _ => Box::new(SummaryGenerator::new(project_name)?),
            };

            let overview = generator.overview(&report.inventory, &analysis)?;
            let components = generate_components(
                generator.as_ref(),
                &report.inventory,
                &analysis,
                cfg.output.workers,
            )?;
            let written = writer.write(&overview, &components)?;
            println!("{}", written.summary());
        }
    }

    Ok(())
}

/// Configured project name, or the root directory name
fn project_name(cfg: &Config, root: &Path) -> String {
    if cfg.project.name == "Untitled Project" || cfg.project.name.is_empty() {
        root.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Project")
            .to_string()
    } else {
        cfg.project.name.clone()
    }
}

// Template engine for overview and component documents

use crate::analysis::AnalysisResult;
use crate::error::Result;
use crate::scanner::{FileRecord, Inventory};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

pub const OVERVIEW: &str = "overview.md";
pub const COMPONENT: &str = "component.md";
pub const OVERVIEW_PROMPT: &str = "overview_prompt.txt";
pub const COMPONENT_PROMPT: &str = "component_prompt.txt";

/// Row of the key-file table in the overview
#[derive(Debug, Serialize)]
pub struct KeyFile<'a> {
    pub relative_path: &'a str,
    pub group: &'a str,
    pub line_count: usize,
    pub importance_score: f64,
}

/// Template engine wrapping Tera with embedded templates and filters
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            (OVERVIEW, include_str!("../../templates/overview.md.tera")),
            (COMPONENT, include_str!("../../templates/component.md.tera")),
            (
                OVERVIEW_PROMPT,
                include_str!("../../templates/overview_prompt.txt.tera"),
            ),
            (
                COMPONENT_PROMPT,
                include_str!("../../templates/component_prompt.txt.tera"),
            ),
        ])?;

        register_filters(&mut tera);
        Ok(Self { tera })
    }

    /// Render a project-level template
    pub fn render_overview(
        &self,
        template: &str,
        project_name: &str,
        inventory: &Inventory,
        analysis: &AnalysisResult,
    ) -> Result<String> {
        let key_files: Vec<KeyFile> = analysis
            .core_files
            .iter()
            .filter_map(|path| inventory.get(path))
            .map(|record| KeyFile {
                relative_path: &record.relative_path,
                group: analysis.group_of(&record.relative_path),
                line_count: record.line_count,
                importance_score: record.importance_score,
            })
            .collect();

        let mut context = Context::new();
        context.insert("project_name", project_name);
        context.insert("total_files", &inventory.len());
        context.insert("total_lines", &inventory.total_lines());
        context.insert("core_files", &analysis.core_files);
        context.insert("tech_stack", &analysis.tech_stack);
        context.insert("file_groups", &analysis.file_groups);
        context.insert("data_flow", &analysis.data_flow);
        context.insert("dependencies", &analysis.dependencies);
        context.insert("key_files", &key_files);

        self.render(template, &context)
    }

    /// Render a per-file template
    pub fn render_component(
        &self,
        template: &str,
        record: &FileRecord,
        analysis: &AnalysisResult,
    ) -> Result<String> {
        let path = record.relative_path.as_str();
        let operations: Vec<String> = analysis
            .operations_of(path)
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut context = Context::new();
        context.insert("file", record);
        context.insert("content", &record.content);
        context.insert("group", analysis.group_of(path));
        context.insert("dependencies", analysis.dependencies_of(path));
        context.insert("operations", &operations);
        context.insert("is_core", &analysis.is_core(path));
        context.insert("tech_stack", &analysis.tech_stack);

        self.render(template, &context)
    }

    /// Render a custom template with context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("pluralize", pluralize);
    tera.register_filter("score", score);
}

/// Pluralize a word based on count
fn pluralize(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value.as_u64().unwrap_or(0);
    let singular = args
        .get("singular")
        .and_then(|v| v.as_str())
        .unwrap_or("item");
    let default_plural = format!("{}s", singular);
    let plural = args
        .get("plural")
        .and_then(|v| v.as_str())
        .unwrap_or(&default_plural);

    if count == 1 {
        Ok(Value::String(format!("{} {}", count, singular)))
    } else {
        Ok(Value::String(format!("{} {}", count, plural)))
    }
}

/// Importance score without a trailing `.0` for whole numbers
fn score(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let n = value.as_f64().unwrap_or(0.0);
    Ok(Value::String(format!("{}", n)))
}

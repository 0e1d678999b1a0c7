//! Deps command handler.
//!
//! Lists an application's northbound and southbound dependencies, the
//! applications still available to map in each direction, and optionally
//! the writes needed to reach a desired dependency set.

use super::exit_codes;
use super::output::{OutputTarget, write_output};
use crate::config::OutputFormat;
use crate::dependencies::{DependencyChange, DependencyOption, DependencyOverview, plan_changes};
use crate::error::PlannerError;
use crate::model::{Application, ApplicationDependency, load_json};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Inputs of the `deps` command.
#[derive(Debug, Clone)]
pub struct DepsConfig {
    pub applications: PathBuf,
    pub dependencies: PathBuf,
    /// Application id or exact name
    pub app: String,
    /// Desired dependencies of the application (JSON array)
    pub desired: Option<PathBuf>,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Look an application up by id, falling back to exact name.
fn resolve_application<'a>(applications: &'a [Application], key: &str) -> Result<&'a Application> {
    if let Ok(id) = key.parse::<u64>()
        && let Some(app) = applications.iter().find(|a| a.id == id)
    {
        return Ok(app);
    }
    if let Some(app) = applications.iter().find(|a| a.name == key) {
        return Ok(app);
    }
    match key.parse::<u64>() {
        Ok(id) => Err(PlannerError::unknown_application(id).into()),
        Err(_) => anyhow::bail!("no application named '{key}'"),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DepsReport {
    #[serde(flatten)]
    overview: DependencyOverview,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<Vec<DependencyChange>>,
}

fn current_dependencies(overview: &DependencyOverview) -> Vec<ApplicationDependency> {
    overview
        .northbound
        .iter()
        .chain(&overview.southbound)
        .map(|option| option.value.clone())
        .collect()
}

fn push_section(out: &mut String, title: &str, options: &[DependencyOption]) {
    out.push_str(&format!("{title} ({})\n", options.len()));
    if options.is_empty() {
        out.push_str("  (none)\n");
    }
    for option in options {
        out.push_str(&format!("  {}\n", option.label));
    }
    out.push('\n');
}

fn format_deps_text(report: &DepsReport) -> String {
    let overview = &report.overview;
    let mut out = format!("Dependencies of {}\n\n", overview.application);
    push_section(&mut out, "Northbound (depend on it)", &overview.northbound);
    push_section(&mut out, "Southbound (it depends on)", &overview.southbound);
    out.push_str(&format!(
        "Available to add: {} northbound, {} southbound\n",
        overview.northbound_options.len(),
        overview.southbound_options.len()
    ));

    if let Some(changes) = &report.changes {
        out.push_str(&format!("\nPlanned changes ({})\n", changes.len()));
        if changes.is_empty() {
            out.push_str("  (none)\n");
        }
        for change in changes {
            let (sign, dep) = match change {
                DependencyChange::Create(dep) => ('+', dep),
                DependencyChange::Delete(dep) => ('-', dep),
            };
            out.push_str(&format!("  {sign} {} -> {}\n", dep.from.name, dep.to.name));
        }
    }
    out
}

/// Run the deps command
#[allow(clippy::needless_pass_by_value)]
pub fn run_deps(config: DepsConfig) -> Result<i32> {
    let applications: Vec<Application> = load_json(&config.applications)
        .with_context(|| format!("failed to load {}", config.applications.display()))?;
    let dependencies: Vec<ApplicationDependency> = load_json(&config.dependencies)
        .with_context(|| format!("failed to load {}", config.dependencies.display()))?;
    tracing::info!(
        applications = applications.len(),
        dependencies = dependencies.len(),
        "loaded inventory"
    );

    let application = resolve_application(&applications, &config.app)?;
    let overview = DependencyOverview::build(application, &applications, &dependencies);

    let changes = match &config.desired {
        Some(path) => {
            let desired: Vec<ApplicationDependency> = load_json(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            Some(plan_changes(&current_dependencies(&overview), &desired))
        }
        None => None,
    };

    let report = DepsReport { overview, changes };
    let content = match config.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => format_deps_text(&report),
    };
    write_output(
        &content,
        &OutputTarget::from_option(config.output_file.clone()),
        config.quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}

//! Wizard command handlers.
//!
//! `wizard validate` checks an analysis values document step by step;
//! `wizard targets` applies rule bundle card selections to one.

use super::exit_codes;
use super::output::{OutputTarget, format_text_table, write_output};
use crate::config::{AppConfig, OutputFormat};
use crate::model::{Application, RuleBundle, load_json};
use crate::wizard::targets::{default_card_target, ordered_bundles};
use crate::wizard::{AnalysisWizard, WizardStep, WizardValues, analyzable_applications_by_mode};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Read a wizard values document (YAML or JSON).
pub fn load_values(path: &Path) -> Result<WizardValues> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse wizard values in {}", path.display()))
}

// ============================================================================
// wizard validate
// ============================================================================

/// Inputs of `wizard validate`.
#[derive(Debug, Clone)]
pub struct WizardValidateConfig {
    pub values: PathBuf,
    /// Applications the analysis is submitted for
    pub applications: PathBuf,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct FieldReport {
    field: String,
    message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct StepReport {
    step: String,
    valid: bool,
    errors: Vec<FieldReport>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    applications: usize,
    analyzable: usize,
    can_submit: bool,
    steps: Vec<StepReport>,
}

impl ValidationReport {
    fn build(applications: &[Application], values: WizardValues) -> Self {
        let analyzable = values.mode.mode.map_or(0, |mode| {
            analyzable_applications_by_mode(applications)
                .get(&mode)
                .map_or(0, Vec::len)
        });
        let wizard = AnalysisWizard::new(applications, values);
        let steps = WizardStep::ALL
            .iter()
            .filter(|step| **step != WizardStep::Review)
            .map(|step| {
                let errors: Vec<FieldReport> = wizard
                    .step_errors(*step)
                    .into_iter()
                    .map(|e| FieldReport {
                        field: e.field.to_string(),
                        message: e.message,
                    })
                    .collect();
                StepReport {
                    step: step.title().to_string(),
                    valid: errors.is_empty(),
                    errors,
                }
            })
            .collect();
        Self {
            applications: applications.len(),
            analyzable,
            can_submit: wizard.can_submit(),
            steps,
        }
    }

    fn to_text(&self) -> String {
        let mut out = format!(
            "Analysis for {} applications ({} analyzable in the selected mode)\n\n",
            self.applications, self.analyzable
        );
        for step in &self.steps {
            let mark = if step.valid { "ok" } else { "FAIL" };
            out.push_str(&format!("  [{mark:>4}] {}\n", step.step));
            for error in &step.errors {
                out.push_str(&format!("         {}: {}\n", error.field, error.message));
            }
        }
        out.push_str(if self.can_submit {
            "\nReady to submit\n"
        } else {
            "\nNot ready to submit\n"
        });
        out
    }
}

/// Run `wizard validate`
#[allow(clippy::needless_pass_by_value)]
pub fn run_wizard_validate(config: WizardValidateConfig) -> Result<i32> {
    let applications: Vec<Application> = load_json(&config.applications)
        .with_context(|| format!("failed to load {}", config.applications.display()))?;
    let values = load_values(&config.values)?;

    let report = ValidationReport::build(&applications, values);
    tracing::debug!(can_submit = report.can_submit, "validated wizard values");

    let content = match config.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => report.to_text(),
    };
    write_output(
        &content,
        &OutputTarget::from_option(config.output_file.clone()),
        config.quiet,
    )?;

    Ok(if report.can_submit {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    })
}

// ============================================================================
// wizard targets
// ============================================================================

/// A card pick on the command line: `<bundle-id>` or `<bundle-id>:<target>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSelection {
    pub bundle_id: u64,
    pub target: Option<String>,
}

impl FromStr for CardSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (id, target) = match s.split_once(':') {
            Some((id, target)) => (id, Some(target.to_string())),
            None => (s, None),
        };
        let bundle_id = id
            .trim()
            .parse()
            .map_err(|_| format!("'{id}' is not a bundle id"))?;
        if target.as_deref() == Some("") {
            return Err(format!("missing target after '{id}:'"));
        }
        Ok(Self { bundle_id, target })
    }
}

/// Inputs of `wizard targets`.
#[derive(Debug, Clone, Default)]
pub struct WizardTargetsConfig {
    /// Values to start from; an empty form if not given
    pub values: Option<PathBuf>,
    /// Exported rule bundles (JSON array)
    pub bundles: PathBuf,
    /// Card order; falls back to the configured order, then file order
    pub order: Vec<u64>,
    pub select: Vec<CardSelection>,
    pub deselect: Vec<u64>,
    pub format: OutputFormat,
    /// Write the updated values document here
    pub write: Option<PathBuf>,
    pub quiet: bool,
    pub settings: AppConfig,
}

fn find_bundle(bundles: &[RuleBundle], id: u64) -> Result<&RuleBundle> {
    match bundles.iter().find(|b| b.id == id) {
        Some(bundle) => Ok(bundle),
        None => bail!("no rule bundle with id {id}"),
    }
}

/// Apply deselections, then selections, to `values`.
fn apply_card_changes(
    values: &mut WizardValues,
    bundles: &[RuleBundle],
    select: &[CardSelection],
    deselect: &[u64],
) -> Result<()> {
    for id in deselect {
        let bundle = find_bundle(bundles, *id)?;
        values.toggle_card(false, "", bundle);
    }
    for selection in select {
        let bundle = find_bundle(bundles, selection.bundle_id)?;
        let target = match selection.target.as_deref().or_else(|| default_card_target(bundle)) {
            Some(target) => target.to_string(),
            None => bail!("rule bundle '{}' has no targets to select", bundle.name),
        };
        if bundle.is_category() && !bundle.owns_target(&target) {
            bail!("'{target}' is not a target of rule bundle '{}'", bundle.name);
        }
        if values.is_card_selected(bundle) {
            values.select_card_target(&target, bundle);
        } else {
            values.toggle_card(true, &target, bundle);
        }
    }
    Ok(())
}

fn format_cards(cards: &[&RuleBundle], values: &WizardValues) -> String {
    let rows: Vec<Vec<String>> = cards
        .iter()
        .map(|bundle| {
            let selected = values.is_card_selected(bundle);
            let targets: Vec<&str> = bundle
                .targets()
                .filter(|t| !selected || values.targets.form_targets.iter().any(|f| f == t))
                .collect();
            vec![
                if selected { "[x]" } else { "[ ]" }.to_string(),
                bundle.id.to_string(),
                bundle.name.clone(),
                if bundle.is_category() { "category" } else { "bundle" }.to_string(),
                targets.join(", "),
            ]
        })
        .collect();
    let mut out = format_text_table(&["", "Id", "Name", "Kind", "Targets"], &rows, 40);
    out.push_str(&format!(
        "\nTargets: {}\nSources: {}\n",
        join_or_none(&values.targets.form_targets),
        join_or_none(&values.custom_rules.form_sources)
    ));
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

/// Run `wizard targets`
#[allow(clippy::needless_pass_by_value)]
pub fn run_wizard_targets(config: WizardTargetsConfig) -> Result<i32> {
    let bundles: Vec<RuleBundle> = load_json(&config.bundles)
        .with_context(|| format!("failed to load {}", config.bundles.display()))?;
    let mut values = match &config.values {
        Some(path) => load_values(path)?,
        None => WizardValues::with_defaults(
            config.settings.wizard.default_mode,
            config.settings.wizard.default_scope,
        ),
    };

    apply_card_changes(&mut values, &bundles, &config.select, &config.deselect)?;

    let order = if config.order.is_empty() {
        config.settings.wizard.bundle_order.clone()
    } else {
        config.order.clone()
    };
    let cards = if order.is_empty() {
        bundles.iter().collect()
    } else {
        ordered_bundles(&order, &bundles)
    };

    if let Some(path) = &config.write {
        let yaml = serde_yaml::to_string(&values).context("failed to serialize values")?;
        std::fs::write(path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
        if !config.quiet {
            eprintln!("Values written to {}", path.display());
        }
    }

    let content = match config.format {
        OutputFormat::Json => serde_json::to_string_pretty(&values)?,
        OutputFormat::Table => format_cards(&cards, &values),
    };
    write_output(&content, &OutputTarget::Stdout, config.quiet)?;
    Ok(exit_codes::SUCCESS)
}

//! Analysis wizard.
//!
//! A multi-step form collecting everything needed to submit an analysis for
//! a set of applications:
//!
//! | Step          | Values                                   |
//! |---------------|------------------------------------------|
//! | Mode          | [`ModeStepValues`]                       |
//! | Set targets   | [`TargetsStepValues`] (see [`targets`])  |
//! | Scope         | [`ScopeStepValues`]                      |
//! | Custom rules  | [`CustomRulesStepValues`]                |
//! | Options       | [`OptionsStepValues`]                    |
//! | Review        | read-only summary                        |
//!
//! [`AnalysisWizard`] moves between steps, refusing to advance past a step
//! whose values fail validation.

mod schema;
pub mod targets;

pub use schema::{
    AnalysisMode, AnalysisScope, CustomRulesStepValues, FieldError, MODE_INCOMPATIBLE_MESSAGE,
    ModeStepValues, OptionsStepValues, REQUIRED_MESSAGE, ScopeStepValues,
    TARGET_REQUIRED_MESSAGE, TargetsStepValues, WizardSchema, WizardValues,
    analyzable_applications_by_mode,
};

use crate::error::{PlannerError, Result};
use crate::model::Application;
use std::fmt;

/// Wizard steps in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    Mode,
    SetTargets,
    Scope,
    CustomRules,
    Options,
    Review,
}

impl WizardStep {
    pub const ALL: [Self; 6] = [
        Self::Mode,
        Self::SetTargets,
        Self::Scope,
        Self::CustomRules,
        Self::Options,
        Self::Review,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Mode => "Analysis mode",
            Self::SetTargets => "Set targets",
            Self::Scope => "Scope",
            Self::CustomRules => "Custom rules",
            Self::Options => "Options",
            Self::Review => "Review",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Wizard navigation over one set of values.
#[derive(Debug, Clone)]
pub struct AnalysisWizard<'a> {
    schema: WizardSchema<'a>,
    values: WizardValues,
    current: WizardStep,
}

impl<'a> AnalysisWizard<'a> {
    #[must_use]
    pub const fn new(applications: &'a [Application], values: WizardValues) -> Self {
        Self {
            schema: WizardSchema::new(applications),
            values,
            current: WizardStep::Mode,
        }
    }

    #[must_use]
    pub const fn current_step(&self) -> WizardStep {
        self.current
    }

    #[must_use]
    pub const fn values(&self) -> &WizardValues {
        &self.values
    }

    pub const fn values_mut(&mut self) -> &mut WizardValues {
        &mut self.values
    }

    #[must_use]
    pub const fn schema(&self) -> &WizardSchema<'a> {
        &self.schema
    }

    /// Validation errors of one step. The review step has none of its own.
    pub fn step_errors(&self, step: WizardStep) -> Vec<FieldError> {
        let values = &self.values;
        match step {
            WizardStep::Mode => self.schema.validate_mode(&values.mode),
            WizardStep::SetTargets => self.schema.validate_targets(&values.targets),
            WizardStep::Scope => self.schema.validate_scope(&values.scope),
            WizardStep::CustomRules => self.schema.validate_custom_rules(&values.custom_rules),
            WizardStep::Options => self.schema.validate_options(&values.options),
            WizardStep::Review => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        self.step_errors(step).is_empty()
    }

    /// Advance one step if the current step is valid. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if !self.is_step_valid(self.current) {
            tracing::debug!(step = %self.current, "current step is invalid");
            return false;
        }
        match self.current.next() {
            Some(step) => {
                self.current = step;
                true
            }
            None => false,
        }
    }

    /// Go back one step. Always allowed.
    pub fn back(&mut self) -> bool {
        match self.current.prev() {
            Some(step) => {
                self.current = step;
                true
            }
            None => false,
        }
    }

    /// Jump to `step` if every step before it is valid.
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        let reachable = WizardStep::ALL
            .iter()
            .take_while(|s| **s < step)
            .all(|s| self.is_step_valid(*s));
        if reachable {
            self.current = step;
        }
        reachable
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.schema.validate_all(&self.values).is_empty()
    }

    /// Consume the wizard, returning the values if every field is valid.
    pub fn submit(self) -> Result<WizardValues> {
        let errors = self.schema.validate_all(&self.values);
        if errors.is_empty() {
            tracing::info!(
                applications = self.schema.applications().len(),
                targets = self.values.targets.form_targets.len(),
                "analysis submitted"
            );
            Ok(self.values)
        } else {
            let summary: Vec<String> = errors.iter().map(ToString::to_string).collect();
            Err(PlannerError::validation(summary.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apps() -> Vec<Application> {
        let mut app = Application::new(1, "inventory");
        app.binary = Some("g:a:1".into());
        vec![app]
    }

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::Mode.next(), Some(WizardStep::SetTargets));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Mode.prev(), None);
        assert_eq!(WizardStep::Options.prev(), Some(WizardStep::CustomRules));
    }

    #[test]
    fn test_next_blocks_on_invalid_step() {
        let apps = apps();
        let mut wizard = AnalysisWizard::new(&apps, WizardValues::default());
        assert!(wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::SetTargets);

        assert!(!wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::SetTargets);

        wizard.values_mut().targets.form_targets.push("eap7".into());
        assert!(wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::Scope);
    }

    #[test]
    fn test_go_to_requires_earlier_steps_valid() {
        let apps = apps();
        let mut wizard = AnalysisWizard::new(&apps, WizardValues::default());
        assert!(!wizard.go_to(WizardStep::Review));
        assert!(wizard.go_to(WizardStep::SetTargets));

        wizard.values_mut().targets.form_targets.push("eap7".into());
        assert!(wizard.go_to(WizardStep::Review));
        assert!(wizard.back());
        assert_eq!(wizard.current_step(), WizardStep::Options);
    }

    #[test]
    fn test_submit_reports_every_error() {
        let apps = apps();
        let mut values = WizardValues::default();
        values.scope.has_excluded_packages = true;
        let wizard = AnalysisWizard::new(&apps, values);
        assert!(!wizard.can_submit());

        let err = wizard.submit().unwrap_err().to_string();
        assert!(err.contains("formTargets"));
        assert!(err.contains("excludedPackages"));
    }

    #[test]
    fn test_submit_returns_values() {
        let apps = apps();
        let mut values = WizardValues::default();
        values.targets.form_targets.push("eap7".into());
        let submitted = AnalysisWizard::new(&apps, values.clone())
            .submit()
            .expect("valid values");
        assert_eq!(submitted, values);
    }
}

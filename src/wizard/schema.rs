//! Analysis wizard form values and their per-step validation rules.

use crate::model::{Application, ReadFile, Ref};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const TARGET_REQUIRED_MESSAGE: &str = "At least 1 target is required";
pub const MODE_INCOMPATIBLE_MESSAGE: &str = "Selected mode not supported for selected applications";

// ============================================================================
// Enumerations
// ============================================================================

/// What the analysis inspects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    /// Deployed binary, by coordinates
    #[default]
    Binary,
    /// Source code only
    SourceCode,
    /// Source code plus its dependencies
    SourceCodeDeps,
    /// A binary uploaded with the request
    BinaryUpload,
}

impl AnalysisMode {
    pub const ALL: [Self; 4] = [
        Self::Binary,
        Self::SourceCode,
        Self::SourceCodeDeps,
        Self::BinaryUpload,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::SourceCode => "source-code",
            Self::SourceCodeDeps => "source-code-deps",
            Self::BinaryUpload => "binary-upload",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::SourceCode => "Source code",
            Self::SourceCodeDeps => "Source code + dependencies",
            Self::BinaryUpload => "Upload a local binary",
        }
    }

    /// Whether `application` can be analyzed in this mode.
    #[must_use]
    pub fn accepts(self, application: &Application) -> bool {
        match self {
            Self::Binary => application.is_binary_enabled(),
            Self::SourceCode | Self::SourceCodeDeps => application.is_source_code_enabled(),
            Self::BinaryUpload => true,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which dependencies are analyzed alongside the application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum AnalysisScope {
    /// Application code only
    #[default]
    #[serde(rename = "app")]
    App,
    /// Application plus open-source libraries
    #[serde(rename = "app,oss")]
    AppOss,
    /// Application plus a selected list of packages
    #[serde(rename = "app,oss,select")]
    AppOssSelect,
}

impl AnalysisScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::AppOss => "app,oss",
            Self::AppOssSelect => "app,oss,select",
        }
    }

    #[must_use]
    pub fn includes_select(self) -> bool {
        self.as_str().split(',').any(|part| part == "select")
    }
}

/// Applications analyzable under each mode, in inventory order.
pub fn analyzable_applications_by_mode(
    applications: &[Application],
) -> IndexMap<AnalysisMode, Vec<&Application>> {
    AnalysisMode::ALL
        .into_iter()
        .map(|mode| {
            let accepted = applications.iter().filter(|app| mode.accepts(app)).collect();
            (mode, accepted)
        })
        .collect()
}

// ============================================================================
// Step values
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModeStepValues {
    #[serde(default)]
    pub mode: Option<AnalysisMode>,
    /// Uploaded artifact file name (binary-upload mode)
    #[serde(default)]
    pub artifact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetsStepValues {
    #[serde(default)]
    pub form_targets: Vec<String>,
    #[serde(default)]
    pub form_rule_bundles: Vec<Ref>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopeStepValues {
    #[serde(default)]
    pub with_known: Option<AnalysisScope>,
    #[serde(default)]
    pub included_packages: Vec<String>,
    #[serde(default)]
    pub has_excluded_packages: bool,
    #[serde(default)]
    pub excluded_packages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomRulesStepValues {
    #[serde(default)]
    pub form_sources: Vec<String>,
    #[serde(default)]
    pub custom_rules_files: Vec<ReadFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionsStepValues {
    #[serde(default)]
    pub diva: bool,
    #[serde(default)]
    pub excluded_rules_tags: Vec<String>,
}

/// All wizard values, as one flat camelCase document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WizardValues {
    #[serde(flatten)]
    pub mode: ModeStepValues,
    #[serde(flatten)]
    pub targets: TargetsStepValues,
    #[serde(flatten)]
    pub scope: ScopeStepValues,
    #[serde(flatten)]
    pub custom_rules: CustomRulesStepValues,
    #[serde(flatten)]
    pub options: OptionsStepValues,
}

impl Default for WizardValues {
    fn default() -> Self {
        Self::with_defaults(AnalysisMode::default(), AnalysisScope::default())
    }
}

impl WizardValues {
    /// Empty form with a preselected mode and scope.
    #[must_use]
    pub fn with_defaults(mode: AnalysisMode, scope: AnalysisScope) -> Self {
        Self {
            mode: ModeStepValues {
                mode: Some(mode),
                artifact: None,
            },
            targets: TargetsStepValues::default(),
            scope: ScopeStepValues {
                with_known: Some(scope),
                ..ScopeStepValues::default()
            },
            custom_rules: CustomRulesStepValues::default(),
            options: OptionsStepValues::default(),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// A failed rule on one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// camelCase field name as it appears in the values document
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Validation rules for every wizard step.
///
/// The mode step depends on the applications being analyzed; the other
/// steps only look at their own values.
#[derive(Debug, Clone, Copy)]
pub struct WizardSchema<'a> {
    applications: &'a [Application],
}

impl<'a> WizardSchema<'a> {
    #[must_use]
    pub const fn new(applications: &'a [Application]) -> Self {
        Self { applications }
    }

    #[must_use]
    pub const fn applications(&self) -> &'a [Application] {
        self.applications
    }

    pub fn validate_mode(&self, values: &ModeStepValues) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match values.mode {
            None => errors.push(FieldError::new("mode", REQUIRED_MESSAGE)),
            Some(mode) => {
                let analyzable = self
                    .applications
                    .iter()
                    .filter(|app| mode.accepts(app))
                    .count();
                let compatible = if mode == AnalysisMode::BinaryUpload {
                    analyzable == 1
                } else {
                    analyzable > 0
                };
                if !compatible {
                    errors.push(FieldError::new("mode", MODE_INCOMPATIBLE_MESSAGE));
                }
                let has_artifact = values.artifact.as_deref().is_some_and(|a| !a.is_empty());
                if mode == AnalysisMode::BinaryUpload && !has_artifact {
                    errors.push(FieldError::new("artifact", REQUIRED_MESSAGE));
                }
            }
        }
        errors
    }

    pub fn validate_targets(&self, values: &TargetsStepValues) -> Vec<FieldError> {
        if values.form_targets.is_empty() {
            vec![FieldError::new("formTargets", TARGET_REQUIRED_MESSAGE)]
        } else {
            Vec::new()
        }
    }

    pub fn validate_scope(&self, values: &ScopeStepValues) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match values.with_known {
            None => errors.push(FieldError::new("withKnown", REQUIRED_MESSAGE)),
            Some(scope) if scope.includes_select() && values.included_packages.is_empty() => {
                errors.push(FieldError::new(
                    "includedPackages",
                    "At least 1 package is required",
                ));
            }
            Some(_) => {}
        }
        if values.has_excluded_packages && values.excluded_packages.is_empty() {
            errors.push(FieldError::new(
                "excludedPackages",
                "At least 1 package is required",
            ));
        }
        errors
    }

    /// Custom sources and rule files are optional.
    pub fn validate_custom_rules(&self, _values: &CustomRulesStepValues) -> Vec<FieldError> {
        Vec::new()
    }

    /// Advanced options are optional.
    pub fn validate_options(&self, _values: &OptionsStepValues) -> Vec<FieldError> {
        Vec::new()
    }

    /// Every step's errors, in step order.
    pub fn validate_all(&self, values: &WizardValues) -> Vec<FieldError> {
        let mut errors = self.validate_mode(&values.mode);
        errors.extend(self.validate_targets(&values.targets));
        errors.extend(self.validate_scope(&values.scope));
        errors.extend(self.validate_custom_rules(&values.custom_rules));
        errors.extend(self.validate_options(&values.options));
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Repository;

    fn binary_app(id: u64) -> Application {
        let mut app = Application::new(id, format!("bin-{id}"));
        app.binary = Some("g:a:1".into());
        app
    }

    fn source_app(id: u64) -> Application {
        let mut app = Application::new(id, format!("src-{id}"));
        app.repository = Some(Repository {
            kind: "git".into(),
            url: "https://example.com/repo.git".into(),
            ..Repository::default()
        });
        app
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_analyzable_by_mode() {
        let apps = vec![binary_app(1), source_app(2), Application::new(3, "bare")];
        let by_mode = analyzable_applications_by_mode(&apps);
        assert_eq!(by_mode[&AnalysisMode::Binary].len(), 1);
        assert_eq!(by_mode[&AnalysisMode::SourceCodeDeps][0].id, 2);
        assert_eq!(by_mode[&AnalysisMode::BinaryUpload].len(), 3);
    }

    #[test]
    fn test_mode_is_required() {
        let apps = vec![binary_app(1)];
        let errors = WizardSchema::new(&apps).validate_mode(&ModeStepValues::default());
        assert_eq!(errors, vec![FieldError::new("mode", REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_mode_needs_an_analyzable_application() {
        let apps = vec![source_app(1)];
        let schema = WizardSchema::new(&apps);
        let binary = ModeStepValues {
            mode: Some(AnalysisMode::Binary),
            artifact: None,
        };
        assert_eq!(fields(&schema.validate_mode(&binary)), vec!["mode"]);

        let source = ModeStepValues {
            mode: Some(AnalysisMode::SourceCode),
            artifact: None,
        };
        assert!(schema.validate_mode(&source).is_empty());
    }

    #[test]
    fn test_binary_upload_needs_exactly_one_app_and_artifact() {
        let two = vec![binary_app(1), binary_app(2)];
        let upload = ModeStepValues {
            mode: Some(AnalysisMode::BinaryUpload),
            artifact: None,
        };
        assert_eq!(
            fields(&WizardSchema::new(&two).validate_mode(&upload)),
            vec!["mode", "artifact"]
        );

        let one = vec![binary_app(1)];
        let with_artifact = ModeStepValues {
            artifact: Some("app.war".into()),
            ..upload
        };
        assert!(WizardSchema::new(&one).validate_mode(&with_artifact).is_empty());
    }

    #[test]
    fn test_targets_need_one_entry() {
        let schema = WizardSchema::new(&[]);
        let errors = schema.validate_targets(&TargetsStepValues::default());
        assert_eq!(errors[0].message, TARGET_REQUIRED_MESSAGE);

        let values = TargetsStepValues {
            form_targets: vec!["cloud-readiness".into()],
            form_rule_bundles: Vec::new(),
        };
        assert!(schema.validate_targets(&values).is_empty());
    }

    #[test]
    fn test_scope_conditional_packages() {
        let schema = WizardSchema::new(&[]);
        let mut values = ScopeStepValues {
            with_known: Some(AnalysisScope::AppOssSelect),
            has_excluded_packages: true,
            ..ScopeStepValues::default()
        };
        assert_eq!(
            fields(&schema.validate_scope(&values)),
            vec!["includedPackages", "excludedPackages"]
        );

        values.with_known = Some(AnalysisScope::AppOss);
        values.excluded_packages = vec!["org.acme".into()];
        assert!(schema.validate_scope(&values).is_empty());
    }

    #[test]
    fn test_validate_all_concatenates_steps() {
        let apps = vec![binary_app(1)];
        let mut values = WizardValues::default();
        values.scope.with_known = None;
        assert_eq!(
            fields(&WizardSchema::new(&apps).validate_all(&values)),
            vec!["formTargets", "withKnown"]
        );
    }

    #[test]
    fn test_values_document_is_flat_camel_case() {
        let yaml = concat!(
            "mode: source-code-deps\n",
            "formTargets: [eap7]\n",
            "withKnown: app,oss,select\n",
            "includedPackages: [org.acme]\n",
            "diva: true\n",
        );
        let values: WizardValues = serde_yaml::from_str(yaml).expect("valid values");
        assert_eq!(values.mode.mode, Some(AnalysisMode::SourceCodeDeps));
        assert_eq!(values.scope.with_known, Some(AnalysisScope::AppOssSelect));
        assert!(values.options.diva);
        assert!(values.scope.with_known.is_some_and(AnalysisScope::includes_select));
    }
}

//! Configuration validation for migration-planner.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, OutputConfig, TableConfig, TuiConfig, WizardConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

/// Largest page size accepted.
const MAX_ITEMS_PER_PAGE: usize = 1000;

/// Characters that would break `prefix:name` query parameters.
const RESERVED_PREFIX_CHARS: &[char] = &[':', '&', '=', '?', '#', ' '];

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.table.validate());
        errors.extend(self.output.validate());
        errors.extend(self.tui.validate());
        errors.extend(self.wizard.validate());
        errors
    }
}

impl Validatable for TableConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(1..=MAX_ITEMS_PER_PAGE).contains(&self.items_per_page) {
            errors.push(ConfigError::new(
                "table.items_per_page",
                format!(
                    "Page size must be between 1 and {MAX_ITEMS_PER_PAGE}, got {}",
                    self.items_per_page
                ),
            ));
        }

        if self.per_page_options.is_empty() {
            errors.push(ConfigError::new(
                "table.per_page_options",
                "At least one page size option is required",
            ));
        } else if let Some(bad) = self
            .per_page_options
            .iter()
            .find(|n| !(1..=MAX_ITEMS_PER_PAGE).contains(*n))
        {
            errors.push(ConfigError::new(
                "table.per_page_options",
                format!("Page size option {bad} is out of range"),
            ));
        } else if !self.per_page_options.contains(&self.items_per_page) {
            errors.push(ConfigError::new(
                "table.per_page_options",
                format!(
                    "Options {:?} do not include items_per_page {}",
                    self.per_page_options, self.items_per_page
                ),
            ));
        }

        if let Some(prefix) = &self.url_param_prefix
            && prefix.contains(RESERVED_PREFIX_CHARS)
        {
            errors.push(ConfigError::new(
                "table.url_param_prefix",
                format!("Prefix '{prefix}' contains a reserved character"),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let valid_themes = ["dark", "light", "high-contrast"];
        if !valid_themes.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    valid_themes.join(", ")
                ),
            ));
        }
        if !(16..=5000).contains(&self.tick_rate_ms) {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                format!(
                    "Tick rate must be between 16 and 5000 ms, got {}",
                    self.tick_rate_ms
                ),
            ));
        }
        errors
    }
}

impl Validatable for WizardConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self.bundle_order.iter().find(|id| !seen.insert(**id)) {
            errors.push(ConfigError::new(
                "wizard.bundle_order",
                format!("Bundle id {dup} is listed more than once"),
            ));
        }
        errors
    }
}

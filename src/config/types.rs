//! Configuration types for migration-planner.

use crate::table::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PER_PAGE_OPTIONS, TableVariant};
use crate::wizard::{AnalysisMode, AnalysisScope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// File settings are loaded first; CLI arguments are merged over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Table behavior (page sizes, density, URL parameter names)
    pub table: TableConfig,
    /// Output configuration for non-interactive commands
    pub output: OutputConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
    /// Analysis wizard defaults
    pub wizard: WizardConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Start from a named preset.
    pub fn preset(mut self, preset: super::ConfigPreset) -> Self {
        self.config = AppConfig::from_preset(preset);
        self
    }

    /// Set the initial page size.
    pub const fn items_per_page(mut self, items_per_page: usize) -> Self {
        self.config.table.items_per_page = items_per_page;
        self
    }

    /// Set the page sizes offered by the pagination controls.
    pub fn per_page_options(mut self, options: Vec<usize>) -> Self {
        self.config.table.per_page_options = options;
        self
    }

    /// Set the table density.
    pub const fn variant(mut self, variant: TableVariant) -> Self {
        self.config.table.variant = variant;
        self
    }

    /// Prefix URL query parameter names.
    pub fn url_param_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.table.url_param_prefix = Some(prefix.into());
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Set the TUI theme.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.tui.theme = theme.into();
        self
    }

    /// Enable mouse scrolling in the TUI.
    pub const fn mouse(mut self, enabled: bool) -> Self {
        self.config.tui.mouse_enabled = enabled;
        self
    }

    /// Set the wizard's preselected analysis mode.
    pub const fn default_mode(mut self, mode: AnalysisMode) -> Self {
        self.config.wizard.default_mode = mode;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Component Configuration Types
// ============================================================================

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TableConfig {
    /// Initial page size
    #[schemars(range(min = 1, max = 1000))]
    pub items_per_page: usize,
    /// Page sizes offered by the pagination controls
    pub per_page_options: Vec<usize>,
    /// Row density: default or compact
    pub variant: TableVariant,
    /// Prefix for URL query parameter names (`prefix:pageNumber`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_param_prefix: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            per_page_options: DEFAULT_PER_PAGE_OPTIONS.to_vec(),
            variant: TableVariant::Default,
            url_param_prefix: None,
        }
    }
}

/// Output format for non-interactive commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Disable colored output
    pub no_color: bool,
}

/// TUI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
    /// Event poll interval in milliseconds
    #[schemars(range(min = 16, max = 5000))]
    pub tick_rate_ms: u64,
    /// Show the key hints footer
    pub show_help_bar: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: false,
            tick_rate_ms: 250,
            show_help_bar: true,
        }
    }
}

/// Analysis wizard defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WizardConfig {
    /// Preselected analysis mode
    pub default_mode: AnalysisMode,
    /// Preselected analysis scope
    pub default_scope: AnalysisScope,
    /// Rule bundle ids in card display order
    pub bundle_order: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .items_per_page(20)
            .variant(TableVariant::Compact)
            .url_param_prefix("apps")
            .output_format(OutputFormat::Json)
            .build();
        assert_eq!(config.table.items_per_page, 20);
        assert_eq!(config.table.variant, TableVariant::Compact);
        assert_eq!(config.table.url_param_prefix.as_deref(), Some("apps"));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_builder_from_preset() {
        let config = AppConfig::builder()
            .preset(super::super::ConfigPreset::Compact)
            .mouse(true)
            .build();
        assert_eq!(config.table.variant, TableVariant::Compact);
        assert!(config.tui.mouse_enabled);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("table:\n  items_per_page: 50\n").expect("valid yaml");
        assert_eq!(config.table.items_per_page, 50);
        assert_eq!(config.table.per_page_options, vec![10, 20, 50, 100]);
        assert_eq!(config.tui.theme, "dark");
    }
}

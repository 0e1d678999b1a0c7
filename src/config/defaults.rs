//! Default configurations and presets for migration-planner.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AppConfig, OutputConfig, OutputFormat, TableConfig, TuiConfig};
use crate::table::TableVariant;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default settings suitable for most inventories
    Default,
    /// Dense rows and longer pages for small terminals
    Compact,
    /// Long pages for inventories with thousands of applications
    LargeInventory,
    /// Machine-readable output for scripts
    Scripting,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Compact => "compact",
            Self::LargeInventory => "large-inventory",
            Self::Scripting => "scripting",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "compact" | "dense" => Some(Self::Compact),
            "large-inventory" | "large" => Some(Self::LargeInventory),
            "scripting" | "script" | "ci" => Some(Self::Scripting),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Ten rows per page with the default row density",
            Self::Compact => "Compact rows, twenty per page",
            Self::LargeInventory => "Fifty rows per page with larger page size options",
            Self::Scripting => "JSON output without colors",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Default,
            Self::Compact,
            Self::LargeInventory,
            Self::Scripting,
        ]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Compact => Self {
                table: TableConfig {
                    items_per_page: 20,
                    variant: TableVariant::Compact,
                    ..TableConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::LargeInventory => Self {
                table: TableConfig {
                    items_per_page: 50,
                    per_page_options: vec![50, 100, 200, 500],
                    ..TableConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::Scripting => Self {
                output: OutputConfig {
                    format: OutputFormat::Json,
                    no_color: true,
                },
                tui: TuiConfig {
                    show_help_bar: false,
                    ..TuiConfig::default()
                },
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("large"), Some(ConfigPreset::LargeInventory));
        assert_eq!(ConfigPreset::from_name("unknown"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in ConfigPreset::all() {
            let config = AppConfig::from_preset(*preset);
            assert!(config.is_valid(), "{preset} preset is invalid: {:?}", config.validate());
        }
    }
}

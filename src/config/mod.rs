//! Configuration module for migration-planner.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use migration_planner::config::{AppConfig, ConfigPreset, Validatable};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Compact);
//! assert!(config.is_valid());
//!
//! let config = AppConfig::builder()
//!     .items_per_page(20)
//!     .url_param_prefix("apps")
//!     .build();
//! assert_eq!(config.table.items_per_page, 20);
//! ```
//!
//! # Configuration File
//!
//! Place a `.migration-planner.yaml` file in your project root or
//! `~/.config/migration-planner/`:
//!
//! ```yaml
//! table:
//!   items_per_page: 20
//!   variant: compact
//! wizard:
//!   default_mode: source-code
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, OutputConfig, OutputFormat, TableConfig, TuiConfig,
    WizardConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    CONFIG_FILE_NAMES, ConfigFileError, discover_config_file, generate_example_config,
    generate_full_example_config, load_config_file, load_or_default, user_config_dir,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it for validation and autocompletion of
/// `.migration-planner.yaml` files.
pub fn generate_json_schema() -> crate::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// JSON Schema of the analysis wizard values document.
pub fn generate_wizard_values_schema() -> crate::Result<String> {
    let schema = schemars::schema_for!(crate::wizard::WizardValues);
    Ok(serde_json::to_string_pretty(&schema)?)
}

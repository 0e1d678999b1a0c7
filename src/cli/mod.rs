//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod browse;
mod deps;
pub mod output;
mod wizard;

pub use browse::{BrowseConfig, run_browse};
pub use deps::{DepsConfig, run_deps};
pub use wizard::{
    CardSelection, WizardTargetsConfig, WizardValidateConfig, load_values, run_wizard_targets,
    run_wizard_validate,
};

/// Process exit codes.
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Input was read but did not validate
    pub const VALIDATION_FAILED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

//! **Application inventory tables and migration analysis planning.**
//!
//! `migration-planner` provides the client-side state behind an application
//! inventory: data tables that filter, sort, paginate, select and expand
//! rows, a multi-step wizard that collects and validates the parameters of a
//! migration analysis, and an editor for the dependencies between
//! applications. A command-line tool and an interactive terminal browser are
//! built on the same library.
//!
//! ## Core Concepts & Modules
//!
//! - **[`table`]**: [`TableControls`] composes independent filter, sort,
//!   pagination, selection and expansion state into one props bundle. Local
//!   tables derive the page from the full item set; remote tables mirror
//!   their state into request parameters. [`TableUrlParams`] persists the
//!   state as URL query parameters.
//! - **[`model`]**: Applications, rule bundles and dependencies as exported
//!   by the inventory service.
//! - **[`inventory`]**: The applications table: columns, filter categories
//!   and sort values.
//! - **[`wizard`]**: [`AnalysisWizard`] steps through mode, targets, scope,
//!   custom rules and options, validating each step.
//! - **[`dependencies`]**: Northbound and southbound dependencies of one
//!   application and the writes needed to reach a desired set.
//! - **[`config`]**: YAML settings with presets, validation and discovery.
//!
//! ## Getting Started: A Local Table
//!
//! ```
//! use migration_planner::inventory::{AppFilter, inventory_table};
//! use migration_planner::config::TableConfig;
//! use migration_planner::model::Application;
//! use migration_planner::table::FilterValue;
//!
//! let applications = vec![
//!     Application::new(1, "billing"),
//!     Application::new(2, "orders"),
//!     Application::new(3, "order-history"),
//! ];
//! let mut table = inventory_table(&applications, &TableConfig::default());
//! table.on_filter_change(AppFilter::Name, FilterValue::from("order"));
//!
//! let derived = table.derive_local(&applications);
//! assert_eq!(derived.total_item_count, 2);
//! assert_eq!(derived.current_page_items[0].name, "order-history");
//! ```
//!
//! ## Persisting Table State in a URL
//!
//! ```
//! use migration_planner::inventory::{AppSortColumn, inventory_table};
//! use migration_planner::config::TableConfig;
//! use migration_planner::table::TableUrlParams;
//!
//! let mut table = inventory_table(&[], &TableConfig::default());
//! table.on_sort_header_click(AppSortColumn::Name);
//!
//! let params = TableUrlParams::with_prefix("apps");
//! let pairs = params.to_pairs(table.state());
//! assert!(pairs.contains(&("apps:sortDirection".to_string(), "desc".to_string())));
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `migration-planner` binary exposes `browse`, `wizard`, `deps` and
//! `config` subcommands; run it with `--help` for details.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // usize↔u16 casts in TUI layout math are bounded by the terminal size
    clippy::cast_possible_truncation,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long — splitting hurts readability
    clippy::too_many_lines,
    // State structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // Variable names like `from`/`to` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod inventory;
pub mod model;
pub mod table;
pub mod tui;
pub mod wizard;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, OutputConfig, TableConfig, TuiConfig};
pub use config::{ConfigError, Validatable};
pub use dependencies::{DependencyChange, DependencyOverview, plan_changes};
pub use error::{ErrorContext, OptionContext, PlannerError, Result};
pub use inventory::{AppColumn, AppFilter, AppSortColumn, InventoryTable, inventory_table};
pub use model::{Application, ApplicationDependency, Ref, RuleBundle};
pub use table::{
    FetchStatus, FilterValue, SortDirection, TableControlArgs, TableControlProps, TableControls,
    TableUrlParams,
};
pub use wizard::{AnalysisWizard, WizardStep, WizardValues};

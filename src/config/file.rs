//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, OutputFormat, TableConfig, TuiConfig};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".migration-planner.yaml",
    ".migration-planner.yml",
    "migration-planner.yaml",
    "migration-planner.yml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "migration-planner";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/migration-planner/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(path) = user_config_dir().and_then(|dir| find_config_in_dir(&dir)) {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// The per-user config directory, e.g. `~/.config/migration-planner`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a CLI config
    /// built from unset flags leaves file settings alone.
    pub fn merge(&mut self, other: &Self) {
        let table_defaults = TableConfig::default();
        if other.table.items_per_page != table_defaults.items_per_page {
            self.table.items_per_page = other.table.items_per_page;
        }
        if other.table.per_page_options != table_defaults.per_page_options {
            self.table
                .per_page_options
                .clone_from(&other.table.per_page_options);
        }
        if other.table.variant != table_defaults.variant {
            self.table.variant = other.table.variant;
        }
        if other.table.url_param_prefix.is_some() {
            self.table
                .url_param_prefix
                .clone_from(&other.table.url_param_prefix);
        }

        if other.output.format != OutputFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        let tui_defaults = TuiConfig::default();
        if other.tui.theme != tui_defaults.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
        if other.tui.mouse_enabled {
            self.tui.mouse_enabled = true;
        }
        if other.tui.tick_rate_ms != tui_defaults.tick_rate_ms {
            self.tui.tick_rate_ms = other.tui.tick_rate_ms;
        }

        if !other.wizard.bundle_order.is_empty() {
            self.wizard
                .bundle_order
                .clone_from(&other.wizard.bundle_order);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Migration planner configuration
# Place this file at .migration-planner.yaml in your project root or ~/.config/migration-planner/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Migration Planner Configuration File
# ====================================
#
# Place it at:
#   - .migration-planner.yaml in your project root
#   - ~/.config/migration-planner/migration-planner.yaml for global config
#
# CLI arguments always override file settings.

# Table behavior
table:
  # Initial page size; must be one of per_page_options
  items_per_page: 10
  # Page sizes offered by the pagination controls
  per_page_options: [10, 20, 50, 100]
  # Row density: default, compact
  variant: default
  # Prefix for URL query parameters (prefix:pageNumber, ...)
  # url_param_prefix: apps

# Output of non-interactive commands
output:
  # Format: table, json
  format: table
  no_color: false

# TUI configuration
tui:
  # Theme: dark, light, high-contrast
  theme: dark
  mouse_enabled: false
  tick_rate_ms: 250
  show_help_bar: true

# Analysis wizard defaults
wizard:
  # Mode: binary, source-code, source-code-deps, binary-upload
  default_mode: binary
  # Scope: app, 'app,oss', 'app,oss,select'
  default_scope: app
  # Rule bundle ids in card display order
  bundle_order: []
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableVariant;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".migration-planner.yaml");
        std::fs::write(&config_path, "table:\n  items_per_page: 20\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
table:
  items_per_page: 20
  variant: compact
wizard:
  default_mode: source-code
  bundle_order: [3, 1]
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.table.items_per_page, 20);
        assert_eq!(config.table.variant, TableVariant::Compact);
        assert_eq!(
            config.wizard.default_mode,
            crate::wizard::AnalysisMode::SourceCode
        );
        assert_eq!(config.wizard.bundle_order, vec![3, 1]);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "table: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .items_per_page(20)
            .theme("light")
            .build();
        let overrides = AppConfig::builder()
            .output_format(OutputFormat::Json)
            .url_param_prefix("apps")
            .build();

        base.merge(&overrides);

        assert_eq!(base.table.items_per_page, 20);
        assert_eq!(base.tui.theme, "light");
        assert_eq!(base.output.format, OutputFormat::Json);
        assert_eq!(base.table.url_param_prefix.as_deref(), Some("apps"));
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("table:"));
        assert!(example.contains("items_per_page"));

        let full: AppConfig =
            serde_yaml::from_str(&generate_full_example_config()).expect("example parses");
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "tui:\n  theme: light").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}

//! migration-planner: browse an application inventory and plan its analysis
//!
//! Tables of applications with filters, sorting, paging and selection; the
//! analysis wizard's validation and target selection; dependency mapping.

#![allow(
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::needless_pass_by_value
)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use migration_planner::{
    cli::{self, BrowseConfig, CardSelection, DepsConfig, WizardTargetsConfig, WizardValidateConfig},
    config::{AppConfig, ConfigPreset, OutputFormat, Validatable},
    table::TableVariant,
};
use std::io;
use std::io::IsTerminal as _;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "migration-planner")]
#[command(version)]
#[command(
    about = "Browse an application inventory and plan its migration analysis",
    long_about = None
)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Wizard values failed validation
    3  Error occurred

EXAMPLES:
    # Browse the inventory interactively
    migration-planner browse applications.json

    # Second page of the Retail applications as JSON
    migration-planner browse applications.json -o json \\
        --query 'filters=%7B%22businessService%22%3A%5B%22Retail%22%5D%7D&pageNumber=2'

    # Check saved wizard answers
    migration-planner wizard validate answers.yaml --applications applications.json

    # Dependencies of one application
    migration-planner deps applications.json dependencies.json --app orders")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a settings preset (default, compact, large-inventory, scripting)
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Report format accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Table density accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Default,
    Compact,
}

impl From<VariantArg> for TableVariant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Default => Self::Default,
            VariantArg::Compact => Self::Compact,
        }
    }
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `browse` subcommand
#[derive(Parser)]
struct BrowseArgs {
    /// Exported applications (JSON array)
    applications: PathBuf,

    /// Report format (interactive TUI on a terminal when not given)
    #[arg(short, long)]
    output: Option<FormatArg>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Initial name search
    #[arg(short, long)]
    search: Option<String>,

    /// Restore table state from a URL query string (filters, sort, page)
    #[arg(long)]
    query: Option<String>,

    /// Page number (1-based)
    #[arg(long)]
    page: Option<usize>,

    /// Items on one page
    #[arg(long)]
    per_page: Option<usize>,

    /// Report every matching application on one page
    #[arg(long, conflicts_with_all = ["page", "per_page"])]
    all: bool,

    /// Table density
    #[arg(long)]
    variant: Option<VariantArg>,

    /// Prefix of the URL query parameter names
    #[arg(long)]
    param_prefix: Option<String>,

    /// Color theme (dark, light, high-contrast)
    #[arg(long)]
    theme: Option<String>,

    /// Enable mouse scrolling in the TUI
    #[arg(long)]
    mouse: bool,
}

/// Arguments for `wizard validate`
#[derive(Parser)]
struct WizardValidateArgs {
    /// Saved wizard answers (YAML)
    values: PathBuf,

    /// Applications the analysis runs on (JSON array)
    #[arg(short, long)]
    applications: PathBuf,

    /// Report format (configured output format if not given)
    #[arg(short, long)]
    format: Option<FormatArg>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for `wizard targets`
#[derive(Parser)]
struct WizardTargetsArgs {
    /// Rule bundles (JSON array)
    bundles: PathBuf,

    /// Saved wizard answers to start from (YAML)
    #[arg(long)]
    values: Option<PathBuf>,

    /// Bundle ids in display order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    order: Vec<u64>,

    /// Select a card: `ID` or `ID:TARGET` for category bundles
    #[arg(long, value_name = "CARD")]
    select: Vec<CardSelection>,

    /// Deselect a card by bundle id
    #[arg(long, value_name = "ID")]
    deselect: Vec<u64>,

    /// Report format (configured output format if not given)
    #[arg(short, long)]
    format: Option<FormatArg>,

    /// Write the updated answers back as YAML
    #[arg(long)]
    write: Option<PathBuf>,
}

/// Arguments for the `deps` subcommand
#[derive(Parser)]
struct DepsArgs {
    /// Exported applications (JSON array)
    applications: PathBuf,

    /// Exported dependencies (JSON array)
    dependencies: PathBuf,

    /// Application id or exact name
    #[arg(short, long)]
    app: String,

    /// Desired dependencies; prints the writes needed to get there
    #[arg(long)]
    desired: Option<PathBuf>,

    /// Report format (configured output format if not given)
    #[arg(short, long)]
    format: Option<FormatArg>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the application inventory
    Browse(BrowseArgs),

    /// Analysis wizard helpers
    Wizard {
        #[command(subcommand)]
        action: WizardAction,
    },

    /// Show an application's dependencies
    Deps(DepsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Schema of the wizard answers file instead
        #[arg(long)]
        wizard: bool,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `wizard` command
#[derive(Subcommand)]
enum WizardAction {
    /// Check saved answers step by step
    Validate(WizardValidateArgs),
    /// List target cards and apply selections
    Targets(WizardTargetsArgs),
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .migration-planner.yaml in the current directory
    Init,
}

/// Interactive browse sessions keep logs off the alternate screen.
fn is_interactive_browse(cli: &Cli) -> bool {
    let report_requested = match &cli.command {
        Commands::Browse(args) => args.output.is_some() || args.output_file.is_some(),
        _ => true,
    };
    !report_requested && io::stdout().is_terminal()
}

/// Settings overrides carried by the global and browse flags.
fn cli_overrides(cli: &Cli) -> Result<AppConfig> {
    let mut builder = AppConfig::builder();
    if let Some(name) = &cli.preset {
        let preset = ConfigPreset::from_name(name)
            .with_context(|| format!("unknown preset '{name}'"))?;
        builder = builder.preset(preset);
    }
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        builder = builder.no_color(true);
    }
    if let Commands::Browse(args) = &cli.command {
        if let Some(variant) = args.variant {
            builder = builder.variant(variant.into());
        }
        if let Some(prefix) = &args.param_prefix {
            builder = builder.url_param_prefix(prefix);
        }
        if let Some(theme) = &args.theme {
            builder = builder.theme(theme);
        }
        if args.mouse {
            builder = builder.mouse(true);
        }
    }
    Ok(builder.build())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet || is_interactive_browse(&cli) {
        "off"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let overrides = cli_overrides(&cli)?;
    let (settings, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("using config file {}", path.display());
    }
    for error in settings.validate() {
        tracing::warn!("invalid setting {error}");
    }

    // Dispatch to command handlers
    let exit_code = match cli.command {
        Commands::Browse(args) => cli::run_browse(BrowseConfig {
            applications: args.applications,
            output: args.output.map(Into::into),
            output_file: args.output_file,
            search: args.search,
            query: args.query,
            page: args.page,
            per_page: args.per_page,
            all: args.all,
            quiet: cli.quiet,
            settings,
        })?,

        Commands::Wizard { action } => match action {
            WizardAction::Validate(args) => cli::run_wizard_validate(WizardValidateConfig {
                values: args.values,
                applications: args.applications,
                format: args.format.map_or(settings.output.format, Into::into),
                output_file: args.output_file,
                quiet: cli.quiet,
            })?,
            WizardAction::Targets(args) => cli::run_wizard_targets(WizardTargetsConfig {
                values: args.values,
                bundles: args.bundles,
                order: args.order,
                select: args.select,
                deselect: args.deselect,
                format: args.format.map_or(settings.output.format, Into::into),
                write: args.write,
                quiet: cli.quiet,
                settings,
            })?,
        },

        Commands::Deps(args) => cli::run_deps(DepsConfig {
            applications: args.applications,
            dependencies: args.dependencies,
            app: args.app,
            desired: args.desired,
            format: args.format.map_or(settings.output.format, Into::into),
            output_file: args.output_file,
            quiet: cli.quiet,
        })?,

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "migration-planner",
                &mut io::stdout(),
            );
            cli::exit_codes::SUCCESS
        }

        Commands::ConfigSchema { output, wizard } => {
            let schema = if wizard {
                migration_planner::config::generate_wizard_values_schema()?
            } else {
                migration_planner::config::generate_json_schema()?
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            cli::exit_codes::SUCCESS
        }

        Commands::Config { action } => {
            run_config_action(action, cli.config.as_deref(), &settings, loaded_from)?;
            cli::exit_codes::SUCCESS
        }
    };

    if exit_code != cli::exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn run_config_action(
    action: ConfigAction,
    explicit: Option<&std::path::Path>,
    settings: &AppConfig,
    loaded_from: Option<PathBuf>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(settings).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                migration_planner::config::user_config_dir().map(|p| p.display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in migration_planner::config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match migration_planner::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".migration-planner.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = migration_planner::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}

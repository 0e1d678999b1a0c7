//! Browse command handler.
//!
//! Implements the `browse` subcommand: the application inventory as an
//! interactive table, or as a one-page report.

use super::exit_codes;
use super::output::{
    BrowseOutput, OutputTarget, detect_browse_output, format_text_table, write_output,
};
use crate::config::{AppConfig, OutputFormat};
use crate::inventory::{AppColumn, AppFilter, InventoryProps, InventoryTable, inventory_args};
use crate::model::{Application, load_json};
use crate::table::{
    FetchStatus, FilterValue, TableKey, TableUrlParams, UrlParamNames,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Widest a text report column may grow.
const MAX_COLUMN_WIDTH: usize = 40;

/// Inputs of the `browse` command.
#[derive(Debug, Clone, Default)]
pub struct BrowseConfig {
    /// Exported applications (JSON array)
    pub applications: PathBuf,
    /// Report format; `None` opens the TUI on a terminal
    pub output: Option<OutputFormat>,
    /// Report file (stdout if not set)
    pub output_file: Option<PathBuf>,
    /// Initial name search
    pub search: Option<String>,
    /// Table state as a URL query string
    pub query: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    /// Report every matching application on one page
    pub all: bool,
    pub quiet: bool,
    /// Effective configuration (file merged with CLI overrides)
    pub settings: AppConfig,
}

/// Run the browse command
#[allow(clippy::needless_pass_by_value)]
pub fn run_browse(config: BrowseConfig) -> Result<i32> {
    let applications: Vec<Application> = load_json(&config.applications)
        .with_context(|| format!("failed to load {}", config.applications.display()))?;
    tracing::info!(count = applications.len(), "loaded applications");

    let url_params = TableUrlParams::new(UrlParamNames::new(
        config.settings.table.url_param_prefix.as_deref(),
    ));
    let mut table = build_table(&applications, &config, &url_params);

    let target = OutputTarget::from_option(config.output_file.clone());
    match detect_browse_output(config.output, &target) {
        BrowseOutput::Tui => {
            crate::tui::run_tui(applications, table, url_params, &config.settings)
                .context("terminal UI failed")?;
        }
        BrowseOutput::Report(format) => {
            let props = table.local_props(&applications, FetchStatus::loaded());
            let query = url_params.to_query_string(table.state());
            let content = match format {
                OutputFormat::Json => {
                    serde_json::to_string_pretty(&BrowseReport::new(&props, query))
                        .context("failed to serialize report")?
                }
                OutputFormat::Table => format_browse_table(&props, &query),
            };
            write_output(&content, &target, config.quiet)?;
        }
    }
    Ok(exit_codes::SUCCESS)
}

/// Table controls with state restored from the query string and flags.
///
/// Flags are applied after the query string, so they win.
fn build_table(
    applications: &[Application],
    config: &BrowseConfig,
    url_params: &TableUrlParams,
) -> InventoryTable {
    let mut args = inventory_args(applications, &config.settings.table);
    if config.all {
        args = args.without_pagination();
    }
    let mut table = InventoryTable::new(args);

    if let Some(query) = &config.query {
        url_params.apply_query_string(query, table.state_mut());
    }
    if let Some(search) = &config.search {
        table.on_filter_change(AppFilter::Name, FilterValue::from(search.as_str()));
    }
    if let Some(per_page) = config.per_page {
        table.on_per_page_change(per_page);
    }
    if let Some(page) = config.page {
        table.on_page_change(page);
    }
    table
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseReport<'a> {
    items: Vec<&'a Application>,
    total_item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items_per_page: Option<usize>,
    query: String,
}

impl<'a> BrowseReport<'a> {
    fn new(props: &InventoryProps<'a>, query: String) -> Self {
        let pagination = props.pagination.as_ref();
        Self {
            items: props.current_page_items.clone(),
            total_item_count: props.total_item_count,
            page_number: pagination.map(|p| p.page_number),
            page_count: pagination.map(|p| p.page_count),
            items_per_page: pagination.map(|p| p.items_per_page),
            query,
        }
    }
}

fn format_browse_table(props: &InventoryProps<'_>, query: &str) -> String {
    let mut out = String::new();
    let active_filters = props.filter_toolbar.active_filter_count;
    if active_filters > 0 {
        out.push_str(&format!(
            "Applications ({} matching, {active_filters} filters active)\n\n",
            props.total_item_count
        ));
    } else {
        out.push_str(&format!("Applications ({})\n\n", props.total_item_count));
    }

    if props.is_empty() {
        out.push_str("No applications match the current filters\n");
        return out;
    }

    let headers: Vec<String> = props
        .column_headers
        .iter()
        .map(|header| {
            let direction = header
                .sort
                .as_ref()
                .filter(|sort| sort.is_active)
                .and_then(|sort| sort.direction);
            match direction {
                Some(direction) => format!("{} {}", header.label, direction.indicator()),
                None => header.label.clone(),
            }
        })
        .collect();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = props
        .current_page_items
        .iter()
        .map(|app| AppColumn::all().iter().map(|c| c.cell_text(app)).collect())
        .collect();
    out.push_str(&format_text_table(&headers, &rows, MAX_COLUMN_WIDTH));

    if let Some(pagination) = &props.pagination {
        out.push_str(&format!(
            "\n{}  (page {} of {})\n",
            pagination.range_label(),
            pagination.page_number,
            pagination.page_count.max(1)
        ));
    }
    if !query.is_empty() {
        out.push_str(&format!("query: ?{query}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ref;

    fn inventory() -> Vec<Application> {
        (1..=5)
            .map(|id| {
                let mut app = Application::new(id, format!("app-{id}"));
                if id % 2 == 0 {
                    app.business_service = Some(Ref::new(1, "Retail"));
                }
                app
            })
            .collect()
    }

    fn config() -> BrowseConfig {
        BrowseConfig {
            settings: AppConfig::builder().items_per_page(2).per_page_options(vec![2, 10]).build(),
            ..BrowseConfig::default()
        }
    }

    #[test]
    fn test_flags_override_query_string() {
        let apps = inventory();
        let params = TableUrlParams::default();
        let config = BrowseConfig {
            query: Some("pageNumber=2&itemsPerPage=2".into()),
            page: Some(3),
            ..config()
        };
        let table = build_table(&apps, &config, &params);
        assert_eq!(table.state().pagination.page_number(), 3);
        assert_eq!(table.state().pagination.items_per_page(), 2);
    }

    #[test]
    fn test_all_disables_pagination() {
        let apps = inventory();
        let config = BrowseConfig {
            all: true,
            ..config()
        };
        let mut table = build_table(&apps, &config, &TableUrlParams::default());
        let props = table.local_props(&apps, FetchStatus::loaded());
        assert_eq!(props.current_page_items.len(), 5);
        assert!(props.pagination.is_none());
    }

    #[test]
    fn test_table_report() {
        let apps = inventory();
        let config = BrowseConfig {
            search: Some("app-".into()),
            ..config()
        };
        let mut table = build_table(&apps, &config, &TableUrlParams::default());
        let props = table.local_props(&apps, FetchStatus::loaded());
        let out = format_browse_table(&props, "filters=x");
        assert!(out.starts_with("Applications (5 matching, 1 filters active)"));
        assert!(out.contains("NAME"));
        assert!(out.contains("app-2"));
        assert!(!out.contains("app-3"));
        assert!(out.contains("1 - 2 of 5  (page 1 of 3)"));
        assert!(out.contains("query: ?filters=x"));
    }

    #[test]
    fn test_empty_report() {
        let apps = inventory();
        let config = BrowseConfig {
            search: Some("nothing".into()),
            ..config()
        };
        let mut table = build_table(&apps, &config, &TableUrlParams::default());
        let props = table.local_props(&apps, FetchStatus::loaded());
        assert!(format_browse_table(&props, "").contains("No applications match"));
    }

    #[test]
    fn test_json_report() {
        let apps = inventory();
        let mut table = build_table(&apps, &config(), &TableUrlParams::default());
        let props = table.local_props(&apps, FetchStatus::loaded());
        let json = serde_json::to_value(BrowseReport::new(&props, String::new())).unwrap();
        assert_eq!(json["totalItemCount"], 5);
        assert_eq!(json["pageCount"], 3);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }
}

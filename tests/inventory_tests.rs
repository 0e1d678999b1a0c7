//! Integration tests for the inventory table and the `browse` report.

use migration_planner::{
    cli::{BrowseConfig, exit_codes, run_browse},
    config::{AppConfig, OutputFormat, TableConfig},
    inventory::{AppFilter, AppSortColumn, inventory_table},
    model::{Application, load_json},
    table::{FetchStatus, FilterValue, SortDirection, TableUrlParams},
};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn applications() -> Vec<Application> {
    load_json(&fixture_path("applications.json")).expect("Failed to load applications fixture")
}

fn names<'a>(items: &[&'a Application]) -> Vec<&'a str> {
    items.iter().map(|app| app.name.as_str()).collect()
}

// ============================================================================
// Table behavior
// ============================================================================

mod table_tests {
    use super::*;

    #[test]
    fn test_default_view_sorted_by_name() {
        let apps = applications();
        let mut table = inventory_table(&apps, &TableConfig::default());
        let props = table.local_props(&apps, FetchStatus::loaded());

        assert_eq!(props.total_item_count, 12);
        assert_eq!(props.current_page_items.len(), 10);
        assert_eq!(
            names(&props.current_page_items)[..4],
            ["auth-gateway", "Billing", "customers-tomcat", "inventory"]
        );
        let pagination = props.pagination.expect("paginated");
        assert_eq!(pagination.page_count, 2);
        assert_eq!(pagination.range_label(), "1 - 10 of 12");
    }

    #[test]
    fn test_filter_options_come_from_inventory() {
        let apps = applications();
        let table = inventory_table(&apps, &TableConfig::default());
        let categories = &table.args().filter_categories;

        let business: Vec<&str> = categories[1].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(business, ["Retail", "Fulfilment", "Finance"]);
        let sources: Vec<&str> = categories[2].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(sources, ["git", "subversion"]);
    }

    #[test]
    fn test_combined_filters() {
        let apps = applications();
        let mut table = inventory_table(&apps, &TableConfig::default());
        table.on_filter_change(AppFilter::SourceKind, FilterValue::from("git"));
        let derived = table.derive_local(&apps);
        // ledger has an empty repository url
        assert_eq!(
            names(&derived.current_page_items),
            ["auth-gateway", "customers-tomcat", "order-history", "orders", "returns"]
        );

        table.on_filter_change(AppFilter::Name, FilterValue::from("ORDER"));
        let derived = table.derive_local(&apps);
        assert_eq!(names(&derived.current_page_items), ["order-history", "orders"]);

        table.on_filter_change(
            AppFilter::SourceKind,
            FilterValue::from(vec!["git".to_string(), "subversion".to_string()]),
        );
        table.on_filter_change(AppFilter::Name, FilterValue::None);
        assert_eq!(table.derive_local(&apps).total_item_count, 7);
    }

    #[test]
    fn test_sort_by_business_service_puts_missing_last() {
        let apps = applications();
        let mut table = inventory_table(&apps, &TableConfig::default());
        table.on_sort_header_click(AppSortColumn::BusinessService);
        table.on_per_page_change(20);
        let derived = table.derive_local(&apps);
        let services: Vec<Option<&str>> = derived
            .current_page_items
            .iter()
            .map(|app| app.business_service_name())
            .collect();
        assert_eq!(services[0], Some("Finance"));
        assert_eq!(services[8], Some("Retail"));
        assert_eq!(services[9..].len(), 3);
        assert!(services[9..].iter().all(Option::is_none));
    }

    #[test]
    fn test_shrinking_filter_clamps_page() {
        let apps = applications();
        let mut table = inventory_table(&apps, &TableConfig::default());
        table.on_page_change(2);
        assert_eq!(table.derive_local(&apps).current_page_items.len(), 2);

        table.on_filter_change(AppFilter::BusinessService, FilterValue::from("Finance"));
        let derived = table.derive_local(&apps);
        assert_eq!(derived.total_item_count, 3);
        assert_eq!(derived.current_page_items.len(), 3);
        assert_eq!(table.state().pagination.page_number(), 1);
    }

    #[test]
    fn test_selection_survives_filtering() {
        let apps = applications();
        let mut table = inventory_table(&apps, &TableConfig::default());
        let page = table.derive_local(&apps).current_page_items;
        table.on_select_all(page, true);
        assert_eq!(table.state().selection.selected_count(), 10);

        table.on_filter_change(AppFilter::Name, FilterValue::from("order"));
        let props = table.local_props(&apps, FetchStatus::loaded());
        assert!(props.are_all_selected);
        assert_eq!(props.selected_count, 10);
        assert_eq!(table.selected_items(&apps).len(), 10);
    }

    #[test]
    fn test_url_round_trip_restores_view() {
        let apps = applications();
        let params = TableUrlParams::with_prefix("apps");
        let mut table = inventory_table(&apps, &TableConfig::default());
        table.on_filter_change(AppFilter::BusinessService, FilterValue::from("Fulfilment"));
        table.on_sort_header_click(AppSortColumn::Name);
        let query = params.to_query_string(table.state());

        let mut restored = inventory_table(&apps, &TableConfig::default());
        params.apply_query_string(&query, restored.state_mut());
        let sort = restored.state().sort.active_sort().copied().expect("sort restored");
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(
            names(&restored.derive_local(&apps).current_page_items),
            ["shipping", "orders", "order-history"]
        );
    }
}

// ============================================================================
// browse command
// ============================================================================

mod browse_tests {
    use super::*;

    fn run_report(config: BrowseConfig) -> serde_json::Value {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("report.json");
        let code = run_browse(BrowseConfig {
            applications: fixture_path("applications.json"),
            output: Some(OutputFormat::Json),
            output_file: Some(output.clone()),
            quiet: true,
            ..config
        })
        .expect("browse succeeds");
        assert_eq!(code, exit_codes::SUCCESS);
        let content = std::fs::read_to_string(&output).expect("report written");
        serde_json::from_str(&content).expect("valid JSON")
    }

    #[test]
    fn test_json_report_from_query_string() {
        let report = run_report(BrowseConfig {
            query: Some(
                "filters=%7B%22businessService%22%3A%5B%22Fulfilment%22%5D%7D\
                 &sortColumn=name&sortDirection=desc"
                    .to_string(),
            ),
            ..BrowseConfig::default()
        });
        assert_eq!(report["totalItemCount"], 3);
        assert_eq!(report["items"][0]["name"], "shipping");
        assert_eq!(report["pageNumber"], 1);
        assert!(report["query"].as_str().unwrap().contains("sortDirection=desc"));
    }

    #[test]
    fn test_json_report_second_page() {
        let report = run_report(BrowseConfig {
            page: Some(2),
            per_page: Some(5),
            ..BrowseConfig::default()
        });
        assert_eq!(report["pageCount"], 3);
        assert_eq!(report["itemsPerPage"], 5);
        assert_eq!(report["items"].as_array().unwrap().len(), 5);
        assert_eq!(report["items"][0]["name"], "notifications");
    }

    #[test]
    fn test_json_report_all() {
        let report = run_report(BrowseConfig {
            all: true,
            settings: AppConfig::builder().items_per_page(5).build(),
            ..BrowseConfig::default()
        });
        assert_eq!(report["items"].as_array().unwrap().len(), 12);
        assert!(report.get("pageNumber").is_none());
    }

    #[test]
    fn test_text_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("report.txt");
        run_browse(BrowseConfig {
            applications: fixture_path("applications.json"),
            output: Some(OutputFormat::Table),
            output_file: Some(output.clone()),
            search: Some("order".to_string()),
            quiet: true,
            ..BrowseConfig::default()
        })
        .expect("browse succeeds");
        let content = std::fs::read_to_string(&output).expect("report written");
        assert!(content.starts_with("Applications (2 matching, 1 filters active)"));
        assert!(content.contains("NAME ▲"));
        assert!(content.contains("order-history"));
        assert!(content.contains("1 - 2 of 2  (page 1 of 1)"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = run_browse(BrowseConfig {
            applications: fixture_path("no-such-file.json"),
            output: Some(OutputFormat::Json),
            ..BrowseConfig::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }
}

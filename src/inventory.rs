//! The application inventory table.
//!
//! Column, sort and filter keys for browsing applications, plus the
//! [`TableControlArgs`] wiring shared by the TUI and the non-interactive
//! `browse` output.

use crate::config::TableConfig;
use crate::model::Application;
use crate::table::{
    ActiveSort, ColumnNames, ExpandableVariant, FilterCategory, FilterSelectOption, SortValue,
    TableControlArgs, TableControlProps, TableControls, compare_by_sort_values,
};
use indexmap::IndexSet;

crate::table_keys! {
    /// Rendered columns of the inventory table.
    pub enum AppColumn {
        Name => "name",
        Description => "description",
        BusinessService => "businessService",
        Source => "source",
        Tags => "tags",
    }
}

crate::table_keys! {
    /// Columns the inventory table can be sorted by.
    pub enum AppSortColumn {
        Name => "name",
        BusinessService => "businessService",
    }
}

crate::table_keys! {
    /// Filter categories of the inventory table.
    pub enum AppFilter {
        Name => "name",
        BusinessService => "businessService",
        SourceKind => "sourceKind",
    }
}

impl From<AppSortColumn> for AppColumn {
    fn from(column: AppSortColumn) -> Self {
        match column {
            AppSortColumn::Name => Self::Name,
            AppSortColumn::BusinessService => Self::BusinessService,
        }
    }
}

pub type InventoryArgs = TableControlArgs<Application, AppColumn, AppSortColumn, AppFilter>;
pub type InventoryTable = TableControls<Application, AppColumn, AppSortColumn, AppFilter>;
pub type InventoryProps<'a> =
    TableControlProps<'a, Application, AppColumn, AppSortColumn, AppFilter>;

impl AppColumn {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::BusinessService => "Business service",
            Self::Source => "Source",
            Self::Tags => "Tags",
        }
    }

    /// Plain-text cell content.
    #[must_use]
    pub fn cell_text(self, application: &Application) -> String {
        match self {
            Self::Name => application.name.clone(),
            Self::Description => application.description.clone().unwrap_or_default(),
            Self::BusinessService => application
                .business_service_name()
                .unwrap_or_default()
                .to_string(),
            Self::Source => application
                .repository
                .as_ref()
                .filter(|_| application.is_source_code_enabled())
                .map(|repo| repo.url.clone())
                .unwrap_or_default(),
            Self::Tags => application.tag_names().collect::<Vec<_>>().join(", "),
        }
    }
}

fn sort_value(application: &Application, column: AppSortColumn) -> SortValue {
    match column {
        AppSortColumn::Name => SortValue::from(application.name.as_str()),
        AppSortColumn::BusinessService => SortValue::from(application.business_service_name()),
    }
}

/// Distinct values in first-seen order, as select options.
fn distinct_options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FilterSelectOption> {
    values
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(|value| FilterSelectOption::new(value, value))
        .collect()
}

/// Table arguments for the inventory, with filter options drawn from
/// `applications`.
#[must_use]
pub fn inventory_args(applications: &[Application], config: &TableConfig) -> InventoryArgs {
    let business_services =
        distinct_options(applications.iter().filter_map(Application::business_service_name));
    let source_kinds = distinct_options(applications.iter().filter_map(Application::source_kind));

    InventoryArgs::new(
        ColumnNames::from_fn(|column: AppColumn| column.label().to_string()),
        Application::identity,
    )
    .with_filter_category(FilterCategory::search(AppFilter::Name, "Name", |app: &Application| {
        app.name.clone()
    }))
    .with_filter_category(FilterCategory::select(
        AppFilter::BusinessService,
        "Business service",
        business_services,
        |app: &Application| app.business_service_name().map(str::to_string),
    ))
    .with_filter_category(FilterCategory::multi_select(
        AppFilter::SourceKind,
        "Source",
        source_kinds,
        |app: &Application| app.source_kind().map(str::to_string).into_iter().collect(),
    ))
    .with_compare(compare_by_sort_values(sort_value))
    .selectable(true)
    .expandable(ExpandableVariant::Single)
    .variant(config.variant)
    .initial_sort(ActiveSort::asc(AppSortColumn::Name))
    .items_per_page(config.items_per_page, config.per_page_options.clone())
}

/// Fresh inventory table controls.
#[must_use]
pub fn inventory_table(applications: &[Application], config: &TableConfig) -> InventoryTable {
    InventoryTable::new(inventory_args(applications, config))
}

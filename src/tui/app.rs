//! Inventory browser state.
//!
//! Wraps the inventory [`InventoryTable`] with what only the terminal needs:
//! a cursor row, the search input and a status line. Every action goes
//! through the table's event handlers; the visible page is re-derived from
//! the full application list on each call.

use crate::inventory::{AppFilter, AppSortColumn, InventoryTable};
use crate::model::Application;
use crate::table::{FilterSelectOption, FilterValue, LocalDerivedState, TableKey, TableUrlParams};

/// Name search being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub active: bool,
    pub query: String,
}

pub struct BrowseApp {
    pub(crate) applications: Vec<Application>,
    pub(crate) table: InventoryTable,
    url_params: TableUrlParams,
    /// Cursor position within the current page
    pub cursor: usize,
    pub search: SearchInput,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub show_help_bar: bool,
    pub tick: u64,
}

impl BrowseApp {
    #[must_use]
    pub fn new(
        applications: Vec<Application>,
        table: InventoryTable,
        url_params: TableUrlParams,
    ) -> Self {
        let search_query = table
            .state()
            .filter
            .value(AppFilter::Name)
            .and_then(|value| value.values().first().cloned())
            .unwrap_or_default();
        Self {
            applications,
            table,
            url_params,
            cursor: 0,
            search: SearchInput {
                active: false,
                query: search_query,
            },
            status_message: None,
            should_quit: false,
            show_help_bar: true,
            tick: 0,
        }
    }

    fn derive(&mut self) -> LocalDerivedState<'_, Application> {
        self.table.derive_local(&self.applications)
    }

    /// Number of rows on the current page.
    pub fn page_len(&mut self) -> usize {
        self.derive().current_page_items.len()
    }

    /// The application under the cursor.
    pub fn cursor_item(&mut self) -> Option<&Application> {
        let cursor = self.cursor;
        self.table
            .derive_local(&self.applications)
            .current_page_items
            .get(cursor)
            .copied()
    }

    fn clamp_cursor(&mut self) {
        let len = self.page_len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.page_len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        let total = self.derive().total_item_count;
        let pagination = &self.table.state().pagination;
        if !pagination.is_last_page(total) {
            let next = pagination.page_number() + 1;
            self.table.on_page_change(next);
            self.cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        let pagination = &self.table.state().pagination;
        if !pagination.is_first_page() {
            let prev = pagination.page_number() - 1;
            self.table.on_page_change(prev);
            self.cursor = 0;
        }
    }

    /// Step through the configured page sizes.
    pub fn cycle_per_page(&mut self, forward: bool) {
        let options = &self.table.args().per_page_options;
        if options.is_empty() {
            return;
        }
        let current = self.table.state().pagination.items_per_page();
        let index = options.iter().position(|n| *n == current);
        let next = match (index, forward) {
            (Some(i), true) => (i + 1).min(options.len() - 1),
            (Some(i), false) => i.saturating_sub(1),
            (None, _) => 0,
        };
        let items_per_page = options[next];
        if items_per_page != current {
            self.table.on_per_page_change(items_per_page);
            self.cursor = 0;
            self.set_status_message(format!("{items_per_page} per page"));
        }
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    fn active_sort_column(&self) -> AppSortColumn {
        self.table
            .state()
            .sort
            .active_sort()
            .map_or(AppSortColumn::Name, |sort| sort.column_key)
    }

    /// Flip the direction of the active sort.
    pub fn toggle_sort(&mut self) {
        let column = self.active_sort_column();
        self.table.on_sort_header_click(column);
    }

    /// Sort by the next sortable column, ascending.
    pub fn next_sort_column(&mut self) {
        let columns = AppSortColumn::all();
        let current = self.active_sort_column();
        let index = columns.iter().position(|c| *c == current).unwrap_or(0);
        let next = columns[(index + 1) % columns.len()];
        self.table.on_sort_header_click(next);
        self.set_status_message(format!("Sorted by {}", next.as_str()));
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    pub fn start_search(&mut self) {
        self.search.active = true;
    }

    /// Leave search input, keeping the filter.
    pub fn finish_search(&mut self) {
        self.search.active = false;
    }

    pub fn search_push(&mut self, c: char) {
        self.search.query.push(c);
        self.apply_search();
    }

    pub fn search_pop(&mut self) {
        self.search.query.pop();
        self.apply_search();
    }

    /// Drop the name search, leaving other filters alone.
    pub fn clear_search(&mut self) {
        self.search = SearchInput::default();
        self.apply_search();
    }

    fn apply_search(&mut self) {
        let value = FilterValue::from(self.search.query.as_str());
        self.table.on_filter_change(AppFilter::Name, value);
        self.clamp_cursor();
    }

    /// Move a select-style category to its next option, wrapping to "any".
    pub fn cycle_filter(&mut self, key: AppFilter) {
        let Some(category) = self.table.args().filter_categories.iter().find(|c| c.key == key)
        else {
            return;
        };
        let current = self
            .table
            .state()
            .filter
            .value(key)
            .and_then(|value| value.values().first().cloned());
        let next = next_option(&category.options, current.as_deref()).cloned();
        let title = category.title.clone();

        let value = next.as_deref().map_or(FilterValue::None, FilterValue::from);
        self.table.on_filter_change(key, value);
        self.set_status_message(match &next {
            Some(v) => format!("{title}: {v}"),
            None => format!("{title}: any"),
        });
        self.clamp_cursor();
    }

    pub fn clear_filters(&mut self) {
        self.table.on_clear_filters();
        self.search = SearchInput::default();
        self.cursor = 0;
        self.set_status_message("Filters cleared");
    }

    // ------------------------------------------------------------------
    // Selection and expansion
    // ------------------------------------------------------------------

    pub fn toggle_cursor_selection(&mut self) {
        let cursor = self.cursor;
        let derived = self.table.derive_local(&self.applications);
        if let Some(item) = derived.current_page_items.get(cursor) {
            let selected = self.table.state().selection.is_selected(*item, Application::identity);
            self.table.on_row_select(item, !selected);
        }
    }

    /// Select the whole page, or deselect it if it is already selected.
    pub fn toggle_page_selection(&mut self) {
        let derived = self.table.derive_local(&self.applications);
        let page = derived.current_page_items;
        let all_selected = self
            .table
            .state()
            .selection
            .are_all_selected(page.iter().copied(), Application::identity);
        self.table.on_select_all(page, !all_selected);
    }

    pub fn toggle_cursor_expansion(&mut self) {
        let cursor = self.cursor;
        let derived = self.table.derive_local(&self.applications);
        if let Some(item) = derived.current_page_items.get(cursor) {
            self.table.on_row_toggle_expand(item);
        }
    }

    /// Put the current table state on the status line as a query string.
    pub fn show_url(&mut self) {
        let query = self.url_params.to_query_string(self.table.state());
        self.set_status_message(format!("?{query}"));
    }
}

/// The option after `current`, or `None` after the last one.
fn next_option<'a>(options: &'a [FilterSelectOption], current: Option<&str>) -> Option<&'a String> {
    match current {
        None => options.first().map(|o| &o.value),
        Some(current) => options
            .iter()
            .position(|o| o.value == current)
            .and_then(|i| options.get(i + 1))
            .map(|o| &o.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::inventory::inventory_table;
    use crate::model::Ref;
    use crate::table::SortDirection;

    fn app() -> BrowseApp {
        let applications: Vec<Application> = (1..=25)
            .map(|id| {
                let mut app = Application::new(id, format!("app-{id:02}"));
                if id <= 3 {
                    app.business_service = Some(Ref::new(1, "Retail"));
                }
                app
            })
            .collect();
        let table = inventory_table(&applications, &TableConfig::default());
        BrowseApp::new(applications, table, TableUrlParams::default())
    }

    #[test]
    fn test_cursor_stays_on_page() {
        let mut app = app();
        for _ in 0..20 {
            app.select_next();
        }
        assert_eq!(app.cursor, 9);
        app.next_page();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.table.state().pagination.page_number(), 2);
        app.next_page();
        app.next_page();
        assert_eq!(app.table.state().pagination.page_number(), 3);
        assert_eq!(app.page_len(), 5);
    }

    #[test]
    fn test_search_filters_and_clamps_cursor() {
        let mut app = app();
        app.cursor = 8;
        app.start_search();
        for c in "app-2".chars() {
            app.search_push(c);
        }
        // app-20..app-25
        assert_eq!(app.page_len(), 6);
        assert_eq!(app.cursor, 5);
        app.clear_search();
        assert_eq!(app.page_len(), 10);
    }

    #[test]
    fn test_cycle_filter_wraps_to_any() {
        let mut app = app();
        app.cycle_filter(AppFilter::BusinessService);
        assert_eq!(app.page_len(), 3);
        app.cycle_filter(AppFilter::BusinessService);
        assert_eq!(app.page_len(), 10);
        assert_eq!(app.status_message.as_deref(), Some("Business service: any"));
    }

    #[test]
    fn test_sort_keys() {
        let mut app = app();
        app.toggle_sort();
        let sort = app.table.state().sort.active_sort().copied().unwrap();
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(app.cursor_item().unwrap().name, "app-25");

        app.next_sort_column();
        let sort = app.table.state().sort.active_sort().copied().unwrap();
        assert_eq!(sort.column_key, AppSortColumn::BusinessService);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_selection_keys() {
        let mut app = app();
        app.toggle_cursor_selection();
        assert_eq!(app.table.state().selection.selected_count(), 1);
        app.toggle_cursor_selection();
        assert_eq!(app.table.state().selection.selected_count(), 0);

        app.toggle_page_selection();
        assert_eq!(app.table.state().selection.selected_count(), 10);
        app.toggle_page_selection();
        assert_eq!(app.table.state().selection.selected_count(), 0);
    }

    #[test]
    fn test_expand_and_per_page() {
        let mut app = app();
        app.toggle_cursor_expansion();
        assert!(app.table.state().expansion.is_row_expanded("app-01"));

        app.cycle_per_page(true);
        assert_eq!(app.table.state().pagination.items_per_page(), 20);
        app.cycle_per_page(false);
        app.cycle_per_page(false);
        assert_eq!(app.table.state().pagination.items_per_page(), 10);
    }

    #[test]
    fn test_show_url() {
        let mut app = app();
        app.next_page();
        app.show_url();
        let message = app.status_message.clone().unwrap();
        assert!(message.starts_with('?'));
        assert!(message.contains("pageNumber=2"));
    }
}

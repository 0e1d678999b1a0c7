//! Table control composer.
//!
//! [`TableControls`] owns the filter, sort, pagination, selection and
//! expansion state of one table and merges them, together with the column
//! metadata, into a single [`TableControlProps`] bundle for rendering.
//!
//! Two modes are supported:
//!
//! - **Local**: [`TableControls::local_props`] receives the full item set
//!   and derives the visible page itself (filter → sort → paginate).
//! - **Remote**: [`TableControls::remote_props`] receives a page the server
//!   already filtered, sorted and paginated, plus the total count. The state
//!   is only mirrored to request / URL parameters (see `url_params`).
//!
//! Using both modes against the same data set is a caller error and is not
//! checked.

use super::expansion::{ExpandableVariant, ExpansionState};
use super::filter::{
    FilterCategory, FilterKind, FilterSelectOption, FilterState, FilterValue, apply_filters,
};
use super::keys::{ColumnNames, IdProperty, TableKey, identity_of};
use super::pagination::{
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_PER_PAGE_OPTIONS, PaginationState, apply_pagination,
};
use super::selection::SelectionState;
use super::sort::{ActiveSort, CompareFn, SortDirection, SortState, apply_sort};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Density of the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableVariant {
    #[default]
    Default,
    Compact,
}

/// Loading / error signals from the data source, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl FetchStatus {
    #[must_use]
    pub const fn loaded() -> Self {
        Self {
            is_loading: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn loading() -> Self {
        Self {
            is_loading: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_loading: false,
            error: Some(error.into()),
        }
    }

    const fn is_settled(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }
}

/// Static configuration of a table.
///
/// `T` is the row item, `C` the column key, `S` the sortable subset of
/// columns and `F` the filter category key.
pub struct TableControlArgs<T, C: TableKey, S, F> {
    pub column_names: ColumnNames<C>,
    pub id_property: IdProperty<T>,
    pub filter_categories: Vec<FilterCategory<T, F>>,
    /// Comparator for local sorting; without one, local mode keeps item order
    pub compare: Option<CompareFn<T, S>>,
    pub is_selectable: bool,
    pub has_pagination: bool,
    pub expandable_variant: Option<ExpandableVariant>,
    pub has_actions_column: bool,
    pub variant: TableVariant,
    pub per_page_options: Vec<usize>,
    pub initial_sort: Option<ActiveSort<S>>,
    pub initial_items_per_page: usize,
}

impl<T, C: TableKey, S: TableKey, F: TableKey> TableControlArgs<T, C, S, F> {
    /// Paginated, non-selectable, non-expandable table with no filters.
    pub fn new(column_names: ColumnNames<C>, id_property: IdProperty<T>) -> Self {
        Self {
            column_names,
            id_property,
            filter_categories: Vec::new(),
            compare: None,
            is_selectable: false,
            has_pagination: true,
            expandable_variant: None,
            has_actions_column: false,
            variant: TableVariant::Default,
            per_page_options: DEFAULT_PER_PAGE_OPTIONS.to_vec(),
            initial_sort: None,
            initial_items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }

    #[must_use]
    pub fn with_filter_category(mut self, category: FilterCategory<T, F>) -> Self {
        self.filter_categories.push(category);
        self
    }

    #[must_use]
    pub fn with_compare(mut self, compare: CompareFn<T, S>) -> Self {
        self.compare = Some(compare);
        self
    }

    #[must_use]
    pub const fn selectable(mut self, is_selectable: bool) -> Self {
        self.is_selectable = is_selectable;
        self
    }

    #[must_use]
    pub const fn expandable(mut self, variant: ExpandableVariant) -> Self {
        self.expandable_variant = Some(variant);
        self
    }

    #[must_use]
    pub const fn with_actions_column(mut self) -> Self {
        self.has_actions_column = true;
        self
    }

    #[must_use]
    pub const fn without_pagination(mut self) -> Self {
        self.has_pagination = false;
        self
    }

    #[must_use]
    pub const fn variant(mut self, variant: TableVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub const fn initial_sort(mut self, sort: ActiveSort<S>) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    #[must_use]
    pub fn items_per_page(mut self, items_per_page: usize, per_page_options: Vec<usize>) -> Self {
        self.initial_items_per_page = items_per_page.max(1);
        if !per_page_options.is_empty() {
            self.per_page_options = per_page_options;
        }
        self
    }

    /// Columns rendered, including selection, expand-toggle and actions columns.
    #[must_use]
    pub fn num_rendered_columns(&self) -> usize {
        self.column_names.len()
            + usize::from(self.is_selectable)
            + usize::from(self.expandable_variant == Some(ExpandableVariant::Single))
            + usize::from(self.has_actions_column)
    }
}

/// The mutable state of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableControlState<C: TableKey, S: TableKey, F: TableKey> {
    pub filter: FilterState<F>,
    pub sort: SortState<S>,
    pub pagination: PaginationState,
    pub selection: SelectionState,
    pub expansion: ExpansionState<C>,
}

impl<C: TableKey, S: TableKey, F: TableKey> TableControlState<C, S, F> {
    #[must_use]
    pub fn new(
        initial_sort: Option<ActiveSort<S>>,
        items_per_page: usize,
        expandable_variant: Option<ExpandableVariant>,
    ) -> Self {
        Self {
            filter: FilterState::new(),
            sort: SortState::new(initial_sort),
            pagination: PaginationState::new(items_per_page),
            selection: SelectionState::new(),
            expansion: ExpansionState::new(expandable_variant),
        }
    }
}

/// Result of local filter → sort → paginate derivation.
#[derive(Debug)]
pub struct LocalDerivedState<'a, T> {
    /// Every item passing the filters, in sorted order
    pub filtered_items: Vec<&'a T>,
    pub current_page_items: Vec<&'a T>,
    pub total_item_count: usize,
}

/// Header of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeaderProps<C, S> {
    pub column_key: C,
    pub label: String,
    pub sort: Option<SortHeaderProps<S>>,
}

/// Sort affordance of a sortable column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortHeaderProps<S> {
    pub column_key: S,
    pub column_index: usize,
    pub is_active: bool,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCategoryProps<F> {
    pub key: F,
    pub title: String,
    pub kind: FilterKind,
    pub placeholder: Option<String>,
    pub options: Vec<FilterSelectOption>,
}

/// Everything a filter toolbar needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToolbarProps<F: TableKey> {
    pub categories: Vec<FilterCategoryProps<F>>,
    pub filter_values: IndexMap<F, FilterValue>,
    pub active_filter_count: usize,
}

/// Everything pagination controls need to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationProps {
    pub item_count: usize,
    pub page_number: usize,
    pub items_per_page: usize,
    pub page_count: usize,
    pub per_page_options: Vec<usize>,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl PaginationProps {
    /// "first - last of total" for the current page, 1-based.
    #[must_use]
    pub fn range_label(&self) -> String {
        if self.item_count == 0 {
            return "0 - 0 of 0".to_string();
        }
        let first = (self.page_number - 1)
            .saturating_mul(self.items_per_page)
            .saturating_add(1);
        let last = self
            .page_number
            .saturating_mul(self.items_per_page)
            .min(self.item_count);
        format!("{first} - {last} of {}", self.item_count)
    }
}

/// Per-row selection and expansion flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProps<C> {
    pub row_index: usize,
    pub identity: Option<String>,
    pub is_selectable: bool,
    pub is_selected: bool,
    pub is_expanded: bool,
    pub expanded_columns: Vec<C>,
}

/// The unified bundle handed to the table renderer.
#[derive(Debug)]
pub struct TableControlProps<'a, T, C: TableKey, S, F: TableKey> {
    pub current_page_items: Vec<&'a T>,
    pub total_item_count: usize,
    pub num_rendered_columns: usize,
    pub column_headers: Vec<ColumnHeaderProps<C, S>>,
    pub filter_toolbar: FilterToolbarProps<F>,
    pub pagination: Option<PaginationProps>,
    pub rows: Vec<RowProps<C>>,
    pub variant: TableVariant,
    pub is_selectable: bool,
    pub expandable_variant: Option<ExpandableVariant>,
    pub has_actions_column: bool,
    /// Whether every item on the page is selected
    pub are_all_selected: bool,
    pub selected_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<'a, T, C: TableKey, S, F: TableKey> TableControlProps<'a, T, C, S, F> {
    /// Page items paired with their row props.
    pub fn rows_with_items(&self) -> impl Iterator<Item = (&'a T, &RowProps<C>)> + '_ {
        self.current_page_items.iter().copied().zip(self.rows.iter())
    }

    /// Loaded successfully but nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.error.is_none() && self.current_page_items.is_empty()
    }
}

/// State plus configuration of one table.
pub struct TableControls<T, C: TableKey, S: TableKey, F: TableKey> {
    args: TableControlArgs<T, C, S, F>,
    state: TableControlState<C, S, F>,
}

impl<T, C, S, F> TableControls<T, C, S, F>
where
    C: TableKey,
    S: TableKey + Into<C>,
    F: TableKey,
{
    /// Fresh state as configured by `args`.
    pub fn new(args: TableControlArgs<T, C, S, F>) -> Self {
        let state = TableControlState::new(
            args.initial_sort,
            args.initial_items_per_page,
            args.expandable_variant,
        );
        Self { args, state }
    }

    /// Resume from existing state, e.g. restored from URL parameters.
    pub const fn with_state(
        args: TableControlArgs<T, C, S, F>,
        state: TableControlState<C, S, F>,
    ) -> Self {
        Self { args, state }
    }

    pub const fn args(&self) -> &TableControlArgs<T, C, S, F> {
        &self.args
    }

    pub const fn state(&self) -> &TableControlState<C, S, F> {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut TableControlState<C, S, F> {
        &mut self.state
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn on_sort_header_click(&mut self, column_key: S) {
        self.state.sort.toggle(column_key);
    }

    pub fn on_filter_change(&mut self, key: F, value: FilterValue) {
        self.state.filter.set_filter_value(key, value);
    }

    pub fn on_filters_replace(&mut self, values: IndexMap<F, FilterValue>) {
        self.state.filter.set_filter_values(values);
    }

    pub fn on_clear_filters(&mut self) {
        self.state.filter.clear_all();
    }

    pub fn on_page_change(&mut self, page_number: usize) {
        self.state.pagination.set_page_number(page_number);
    }

    pub fn on_per_page_change(&mut self, items_per_page: usize) {
        self.state.pagination.set_items_per_page(items_per_page);
    }

    /// Select or deselect one row. Ignored on non-selectable tables.
    pub fn on_row_select(&mut self, item: &T, is_selecting: bool) {
        if !self.args.is_selectable {
            return;
        }
        if is_selecting {
            self.state.selection.select(item, self.args.id_property);
        } else {
            self.state.selection.deselect_item(item, self.args.id_property);
        }
    }

    /// Select or deselect a batch of rows (page or filtered set).
    pub fn on_select_all<'a>(&mut self, items: impl IntoIterator<Item = &'a T>, is_selecting: bool)
    where
        T: 'a,
    {
        if !self.args.is_selectable {
            return;
        }
        if is_selecting {
            self.state.selection.select_all(items, self.args.id_property);
        } else {
            self.state.selection.deselect_all(items, self.args.id_property);
        }
    }

    /// Toggle a whole row in single expansion mode.
    pub fn on_row_toggle_expand(&mut self, item: &T) {
        if let Some(id) = identity_of(item, self.args.id_property) {
            self.state.expansion.toggle_row(id);
        }
    }

    /// Toggle one cell in compound expansion mode.
    pub fn on_cell_toggle_expand(&mut self, item: &T, column_key: C) {
        if let Some(id) = identity_of(item, self.args.id_property) {
            self.state.expansion.toggle_cell(id, column_key);
        }
    }

    // ------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------

    /// Filter, sort and paginate `items`, clamping the page number if the
    /// filtered set no longer reaches the current page.
    pub fn derive_local<'a>(&mut self, items: &'a [T]) -> LocalDerivedState<'a, T> {
        let filtered = apply_filters(
            items,
            self.state.filter.filter_values(),
            &self.args.filter_categories,
        );
        let sorted = match &self.args.compare {
            Some(compare) => apply_sort(filtered, self.state.sort.active_sort(), compare),
            None => filtered,
        };
        let total_item_count = sorted.len();

        let current_page_items = if self.args.has_pagination {
            self.state.pagination.clamp_to(total_item_count);
            apply_pagination(&sorted, &self.state.pagination).to_vec()
        } else {
            sorted.clone()
        };

        LocalDerivedState {
            filtered_items: sorted,
            current_page_items,
            total_item_count,
        }
    }

    /// Props for local mode, derived from the full item set.
    pub fn local_props<'a>(
        &mut self,
        items: &'a [T],
        fetch: FetchStatus,
    ) -> TableControlProps<'a, T, C, S, F> {
        let derived = self.derive_local(items);
        self.build_props(derived.current_page_items, derived.total_item_count, fetch)
    }

    /// Props for remote mode, from a server-provided page.
    ///
    /// Once the fetch has settled, the page number is clamped to the
    /// reported total so the next request asks for a page that exists.
    pub fn remote_props<'a>(
        &mut self,
        current_page_items: &'a [T],
        total_item_count: usize,
        fetch: FetchStatus,
    ) -> TableControlProps<'a, T, C, S, F> {
        if self.args.has_pagination && fetch.is_settled() {
            self.state.pagination.clamp_to(total_item_count);
        }
        self.build_props(current_page_items.iter().collect(), total_item_count, fetch)
    }

    /// Selected items among `items`; stale identities are skipped.
    pub fn selected_items<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.state.selection.selected_items(items, self.args.id_property)
    }

    fn build_props<'a>(
        &self,
        current_page_items: Vec<&'a T>,
        total_item_count: usize,
        fetch: FetchStatus,
    ) -> TableControlProps<'a, T, C, S, F> {
        let id_property = self.args.id_property;
        let rows = current_page_items
            .iter()
            .enumerate()
            .map(|(row_index, item)| {
                let identity = identity_of(*item, id_property);
                RowProps {
                    row_index,
                    identity: identity.map(str::to_string),
                    is_selectable: self.args.is_selectable && identity.is_some(),
                    is_selected: self.state.selection.is_selected(*item, id_property),
                    is_expanded: identity
                        .is_some_and(|id| self.state.expansion.is_row_expanded(id)),
                    expanded_columns: identity
                        .map(|id| self.state.expansion.expanded_columns(id))
                        .unwrap_or_default(),
                }
            })
            .collect();

        let are_all_selected = self.args.is_selectable
            && self
                .state
                .selection
                .are_all_selected(current_page_items.iter().copied(), id_property);

        TableControlProps {
            total_item_count,
            num_rendered_columns: self.args.num_rendered_columns(),
            column_headers: self.column_headers(),
            filter_toolbar: self.filter_toolbar(),
            pagination: self
                .args
                .has_pagination
                .then(|| self.pagination_props(total_item_count)),
            rows,
            variant: self.args.variant,
            is_selectable: self.args.is_selectable,
            expandable_variant: self.args.expandable_variant,
            has_actions_column: self.args.has_actions_column,
            are_all_selected,
            selected_count: self.state.selection.selected_count(),
            is_loading: fetch.is_loading,
            error: fetch.error,
            current_page_items,
        }
    }

    fn column_headers(&self) -> Vec<ColumnHeaderProps<C, S>> {
        self.args
            .column_names
            .iter()
            .enumerate()
            .map(|(column_index, (column_key, label))| {
                let sortable = S::all()
                    .iter()
                    .copied()
                    .find(|sortable| Into::<C>::into(*sortable) == column_key);
                ColumnHeaderProps {
                    column_key,
                    label: label.to_string(),
                    sort: sortable.map(|sort_key| {
                        let direction = self.state.sort.direction_for(sort_key);
                        SortHeaderProps {
                            column_key: sort_key,
                            column_index,
                            is_active: direction.is_some(),
                            direction,
                        }
                    }),
                }
            })
            .collect()
    }

    fn filter_toolbar(&self) -> FilterToolbarProps<F> {
        FilterToolbarProps {
            categories: self
                .args
                .filter_categories
                .iter()
                .map(|category| FilterCategoryProps {
                    key: category.key,
                    title: category.title.clone(),
                    kind: category.kind,
                    placeholder: category.placeholder.clone(),
                    options: category.options.clone(),
                })
                .collect(),
            filter_values: self.state.filter.filter_values().clone(),
            active_filter_count: self.state.filter.active_filter_count(),
        }
    }

    fn pagination_props(&self, total_item_count: usize) -> PaginationProps {
        let pagination = &self.state.pagination;
        PaginationProps {
            item_count: total_item_count,
            page_number: pagination.page_number(),
            items_per_page: pagination.items_per_page(),
            page_count: pagination.page_count(total_item_count),
            per_page_options: self.args.per_page_options.clone(),
            is_first_page: pagination.is_first_page(),
            is_last_page: pagination.is_last_page(total_item_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::sort::{SortValue, compare_by_sort_values};

    crate::table_keys! {
        enum Col {
            Name => "name",
            Kind => "kind",
        }
    }

    crate::table_keys! {
        enum SortCol {
            Name => "name",
        }
    }

    impl From<SortCol> for Col {
        fn from(value: SortCol) -> Self {
            match value {
                SortCol::Name => Self::Name,
            }
        }
    }

    crate::table_keys! {
        enum Cat {
            Kind => "kind",
        }
    }

    #[derive(Debug, PartialEq)]
    struct Item {
        id: String,
        name: String,
        kind: String,
    }

    fn item(id: u32, name: &str, kind: &str) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    fn item_id(item: &Item) -> Option<&str> {
        Some(item.id.as_str())
    }

    fn args() -> TableControlArgs<Item, Col, SortCol, Cat> {
        TableControlArgs::new(
            ColumnNames::from_fn(|c: Col| c.as_str().to_string()),
            item_id,
        )
        .with_filter_category(FilterCategory::select(
            Cat::Kind,
            "Kind",
            Vec::new(),
            |i: &Item| Some(i.kind.clone()),
        ))
        .with_compare(compare_by_sort_values(|i: &Item, col: SortCol| match col {
            SortCol::Name => SortValue::from(i.name.as_str()),
        }))
        .selectable(true)
        .expandable(ExpandableVariant::Single)
        .items_per_page(2, vec![2, 5])
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_page_clamps_after_filter_shrinks_set() {
        let items = vec![
            item(1, "a", "git"),
            item(2, "b", "svn"),
            item(3, "c", "git"),
            item(4, "d", "svn"),
            item(5, "e", "svn"),
        ];
        let mut controls = TableControls::new(args());
        controls.on_page_change(3);
        controls.on_filter_change(Cat::Kind, "git".into());

        let props = controls.local_props(&items, FetchStatus::loaded());
        assert_eq!(props.total_item_count, 2);
        assert_eq!(ids(&props.current_page_items), vec!["1", "3"]);
        assert_eq!(props.pagination.as_ref().map(|p| p.page_number), Some(1));
        assert_eq!(controls.state().pagination.page_number(), 1);
    }

    #[test]
    fn test_header_click_sorts_and_flips() {
        let items = vec![item(1, "b", "git"), item(2, "a", "git")];
        let mut controls = TableControls::new(args());

        controls.on_sort_header_click(SortCol::Name);
        let props = controls.local_props(&items, FetchStatus::loaded());
        assert_eq!(ids(&props.current_page_items), vec!["2", "1"]);
        let header = props.column_headers[0].sort.as_ref().expect("name is sortable");
        assert!(header.is_active);
        assert_eq!(header.direction, Some(SortDirection::Asc));
        assert!(props.column_headers[1].sort.is_none());

        controls.on_sort_header_click(SortCol::Name);
        let props = controls.local_props(&items, FetchStatus::loaded());
        assert_eq!(ids(&props.current_page_items), vec!["1", "2"]);
    }

    #[test]
    fn test_row_props_reflect_selection_and_expansion() {
        let items = vec![item(1, "a", "git"), item(2, "b", "git")];
        let mut controls = TableControls::new(args());
        controls.on_row_select(&items[1], true);
        controls.on_row_toggle_expand(&items[0]);
        controls.on_row_toggle_expand(&items[1]);

        let props = controls.local_props(&items, FetchStatus::loaded());
        let flags: Vec<(bool, bool)> = props
            .rows
            .iter()
            .map(|row| (row.is_selected, row.is_expanded))
            .collect();
        assert_eq!(flags, vec![(false, false), (true, true)]);
        assert!(!props.are_all_selected);
        assert_eq!(props.selected_count, 1);
        // name + kind + checkbox + expand toggle
        assert_eq!(props.num_rendered_columns, 4);
    }

    #[test]
    fn test_select_all_on_page() {
        let items = vec![item(1, "a", "git"), item(2, "b", "git"), item(3, "c", "git")];
        let mut controls = TableControls::new(args());
        let page: Vec<&Item> = controls.derive_local(&items).current_page_items;
        controls.on_select_all(page, true);

        let props = controls.local_props(&items, FetchStatus::loaded());
        assert!(props.are_all_selected);
        assert_eq!(controls.selected_items(&items).len(), 2);
    }

    #[test]
    fn test_remote_mode_does_not_rederive() {
        let page = vec![item(9, "z", "svn"), item(8, "y", "git")];
        let mut controls = TableControls::new(args());
        controls.on_filter_change(Cat::Kind, "git".into());
        controls.on_page_change(2);

        let props = controls.remote_props(&page, 40, FetchStatus::loaded());
        assert_eq!(ids(&props.current_page_items), vec!["9", "8"]);
        assert_eq!(props.total_item_count, 40);
        let pagination = props.pagination.expect("paginated");
        assert_eq!(pagination.page_number, 2);
        assert_eq!(pagination.page_count, 20);
        assert_eq!(pagination.range_label(), "3 - 4 of 40");
    }

    #[test]
    fn test_range_label_with_huge_page_number() {
        let pagination = PaginationProps {
            item_count: 3,
            page_number: usize::MAX,
            items_per_page: 2,
            page_count: 2,
            per_page_options: vec![2],
            is_first_page: false,
            is_last_page: true,
        };
        assert_eq!(pagination.range_label(), format!("{} - 3 of 3", usize::MAX));
    }

    #[test]
    fn test_remote_mode_keeps_page_while_loading() {
        let mut controls = TableControls::new(args());
        controls.on_page_change(5);

        let props = controls.remote_props(&[], 0, FetchStatus::loading());
        assert!(props.is_loading);
        assert!(!props.is_empty());
        assert_eq!(controls.state().pagination.page_number(), 5);

        let props = controls.remote_props(&[], 3, FetchStatus::loaded());
        assert!(props.is_empty());
        assert_eq!(controls.state().pagination.page_number(), 2);
    }

    #[test]
    fn test_fetch_error_is_passed_through() {
        let mut controls = TableControls::new(args());
        let props = controls.local_props(&[], FetchStatus::failed("503 Service Unavailable"));
        assert_eq!(props.error.as_deref(), Some("503 Service Unavailable"));
        assert!(!props.is_empty());
    }

    #[test]
    fn test_per_page_change_resets_page() {
        let mut controls = TableControls::new(args());
        controls.on_page_change(3);
        controls.on_per_page_change(5);
        assert_eq!(controls.state().pagination.page_number(), 1);
        assert_eq!(controls.state().pagination.items_per_page(), 5);
    }

    #[test]
    fn test_non_selectable_table_ignores_selection() {
        let items = vec![item(1, "a", "git")];
        let mut controls = TableControls::new(args().selectable(false));
        controls.on_row_select(&items[0], true);
        assert_eq!(controls.state().selection.selected_count(), 0);
    }

    #[test]
    fn test_without_pagination_shows_everything() {
        let items: Vec<Item> = (1..=5).map(|i| item(i, "n", "git")).collect();
        let mut controls = TableControls::new(args().without_pagination());
        let props = controls.local_props(&items, FetchStatus::loaded());
        assert_eq!(props.current_page_items.len(), 5);
        assert!(props.pagination.is_none());
    }
}

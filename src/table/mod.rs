//! Table state management.
//!
//! Filtering, sorting, pagination, selection and expansion for data tables,
//! each as an independent piece of state, composed by [`TableControls`] into
//! a single props bundle for rendering.
//!
//! Local tables derive the visible page from the full item set:
//!
//! ```text
//! items ──► apply_filters ──► apply_sort ──► apply_pagination ──► page
//! ```
//!
//! Remote tables receive the page from a server and only mirror their state
//! into request parameters ([`to_request_params`], [`TableUrlParams`]).

mod controls;
mod expansion;
mod filter;
mod keys;
mod pagination;
mod selection;
mod sort;
mod url_params;

pub use controls::{
    ColumnHeaderProps, FetchStatus, FilterCategoryProps, FilterToolbarProps, LocalDerivedState,
    PaginationProps, RowProps, SortHeaderProps, TableControlArgs, TableControlProps,
    TableControlState, TableControls, TableVariant,
};
pub use expansion::{ExpandableVariant, ExpansionState};
pub use filter::{
    FilterCategory, FilterKind, FilterSelectOption, FilterState, FilterValue, apply_filters,
};
pub use keys::{ColumnNames, IdProperty, TableKey, identity_of};
pub use pagination::{
    DEFAULT_ITEMS_PER_PAGE, DEFAULT_PER_PAGE_OPTIONS, PaginationState, apply_pagination,
};
pub use selection::SelectionState;
pub use sort::{
    ActiveSort, CompareFn, SortDirection, SortState, SortValue, apply_sort,
    compare_by_sort_values,
};
pub use url_params::{RequestParams, RequestSort, TableUrlParams, UrlParamNames, to_request_params};

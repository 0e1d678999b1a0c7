//! Mirroring table state to and from URL query parameters.
//!
//! Used in remote mode, where the server does the filtering, sorting and
//! paging and the state has to travel in the request or the page URL.
//!
//! ```text
//! filters={"name":["inv"],"kind":["git","svn"]}&sortColumn=name&sortDirection=desc&pageNumber=2&itemsPerPage=20
//! ```
//!
//! Malformed or unknown values fall back to whatever the state already
//! holds, one parameter at a time.

use super::controls::TableControlState;
use super::filter::FilterValue;
use super::keys::TableKey;
use super::sort::{ActiveSort, SortDirection};
use indexmap::IndexMap;
use serde::Serialize;
use url::form_urlencoded;

/// Query parameter names for one table.
///
/// With a prefix, every name becomes `prefix:name`, so several tables can
/// share one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParamNames {
    pub filters: String,
    pub sort_column: String,
    pub sort_direction: String,
    pub page_number: String,
    pub items_per_page: String,
}

impl Default for UrlParamNames {
    fn default() -> Self {
        Self::new(None)
    }
}

impl UrlParamNames {
    #[must_use]
    pub fn new(prefix: Option<&str>) -> Self {
        let name = |base: &str| match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{prefix}:{base}"),
            None => base.to_string(),
        };
        Self {
            filters: name("filters"),
            sort_column: name("sortColumn"),
            sort_direction: name("sortDirection"),
            page_number: name("pageNumber"),
            items_per_page: name("itemsPerPage"),
        }
    }
}

/// Encodes and decodes table state as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableUrlParams {
    names: UrlParamNames,
}

impl TableUrlParams {
    #[must_use]
    pub const fn new(names: UrlParamNames) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self::new(UrlParamNames::new(Some(prefix)))
    }

    #[must_use]
    pub const fn names(&self) -> &UrlParamNames {
        &self.names
    }

    /// Query pairs describing `state`. Empty filters and a missing sort are omitted.
    pub fn to_pairs<C: TableKey, S: TableKey, F: TableKey>(
        &self,
        state: &TableControlState<C, S, F>,
    ) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if state.filter.is_filtered() {
            let filters = filters_to_map(state.filter.filter_values());
            match serde_json::to_string(&filters) {
                Ok(json) => pairs.push((self.names.filters.clone(), json)),
                Err(err) => tracing::debug!(error = %err, "could not encode filters"),
            }
        }
        if let Some(sort) = state.sort.active_sort() {
            pairs.push((
                self.names.sort_column.clone(),
                sort.column_key.as_str().to_string(),
            ));
            pairs.push((
                self.names.sort_direction.clone(),
                sort.direction.as_str().to_string(),
            ));
        }
        pairs.push((
            self.names.page_number.clone(),
            state.pagination.page_number().to_string(),
        ));
        pairs.push((
            self.names.items_per_page.clone(),
            state.pagination.items_per_page().to_string(),
        ));
        pairs
    }

    /// URL-encoded query string for `state`, without the leading `?`.
    pub fn to_query_string<C: TableKey, S: TableKey, F: TableKey>(
        &self,
        state: &TableControlState<C, S, F>,
    ) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_pairs(state))
            .finish()
    }

    /// Restore `state` from a query string (with or without a leading `?`).
    ///
    /// Parameters belonging to other tables are ignored.
    pub fn apply_query_string<C: TableKey, S: TableKey, F: TableKey>(
        &self,
        query: &str,
        state: &mut TableControlState<C, S, F>,
    ) {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params: IndexMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        let get = |name: &String| params.get(name).map(String::as_str);

        if let Some(raw) = get(&self.names.filters) {
            match parse_filters::<F>(raw) {
                Some(filters) => state.filter.set_filter_values(filters),
                None => tracing::debug!(value = raw, "ignoring malformed filters parameter"),
            }
        }

        if let Some(raw) = get(&self.names.sort_column) {
            match S::from_key(raw) {
                Some(column_key) => {
                    let direction = get(&self.names.sort_direction)
                        .and_then(|d| {
                            let parsed = SortDirection::from_name(d);
                            if parsed.is_none() {
                                tracing::debug!(value = d, "ignoring malformed sort direction");
                            }
                            parsed
                        })
                        .unwrap_or_default();
                    state.sort.set_active_sort(Some(ActiveSort {
                        column_key,
                        direction,
                    }));
                }
                None => tracing::debug!(value = raw, "ignoring unknown sort column"),
            }
        }

        // Page size first: changing it resets the page number.
        if let Some(raw) = get(&self.names.items_per_page) {
            match parse_positive(raw) {
                Some(n) => state.pagination.set_items_per_page(n),
                None => tracing::debug!(value = raw, "ignoring malformed items per page"),
            }
        }
        if let Some(raw) = get(&self.names.page_number) {
            match parse_positive(raw) {
                Some(n) => state.pagination.set_page_number(n),
                None => tracing::debug!(value = raw, "ignoring malformed page number"),
            }
        }
    }
}

/// Parameters for a server-side filtered, sorted and paged request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    pub filters: IndexMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<RequestSort>,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSort {
    pub field: String,
    pub direction: SortDirection,
}

/// Server request parameters for the current state.
pub fn to_request_params<C: TableKey, S: TableKey, F: TableKey>(
    state: &TableControlState<C, S, F>,
) -> RequestParams {
    RequestParams {
        filters: filters_to_map(state.filter.filter_values()),
        sort: state.sort.active_sort().map(|sort| RequestSort {
            field: sort.column_key.as_str().to_string(),
            direction: sort.direction,
        }),
        offset: state.pagination.offset(),
        limit: state.pagination.items_per_page(),
    }
}

fn filters_to_map<F: TableKey>(
    filter_values: &IndexMap<F, FilterValue>,
) -> IndexMap<String, Vec<String>> {
    filter_values
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.as_str().to_string(), value.values().to_vec()))
        .collect()
}

fn parse_filters<F: TableKey>(raw: &str) -> Option<IndexMap<F, FilterValue>> {
    let decoded: IndexMap<String, Vec<String>> = serde_json::from_str(raw).ok()?;
    let filters = decoded
        .into_iter()
        .filter_map(|(key, values)| match F::from_key(&key) {
            Some(category) => Some((category, FilterValue::from_values(values))),
            None => {
                tracing::debug!(category = %key, "dropping unknown filter category");
                None
            }
        })
        .collect();
    Some(filters)
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

//! Filter state and client-side filter derivation.
//!
//! Each filter category carries its own predicate. An item is kept when it
//! satisfies every category that has a non-empty value.

use super::keys::TableKey;
use indexmap::IndexMap;
use std::fmt;

/// The active value of one filter category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl FilterValue {
    /// Build a value from a list, dropping empty strings.
    #[must_use]
    pub fn from_values(values: Vec<String>) -> Self {
        let mut values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
        match values.len() {
            0 => Self::None,
            1 => Self::Single(values.remove(0)),
            _ => Self::Multiple(values),
        }
    }

    /// All values as a slice.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::None => &[],
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }

    /// An empty value does not filter anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(String::is_empty)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::from_values(vec![value.to_string()])
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::from_values(values)
    }
}

/// How a filter category is presented in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text, case-insensitive substring match
    Search,
    /// One option out of a list
    Select,
    /// Any number of options out of a list
    MultiSelect,
}

/// A selectable option for select / multi-select categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelectOption {
    pub value: String,
    pub label: String,
}

impl FilterSelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

type Matcher<T> = Box<dyn Fn(&T, &[String]) -> bool>;

/// A filter facet over items of type `T`, keyed by `F`.
pub struct FilterCategory<T, F> {
    pub key: F,
    pub title: String,
    pub kind: FilterKind,
    pub placeholder: Option<String>,
    pub options: Vec<FilterSelectOption>,
    matcher: Matcher<T>,
}

impl<T, F: TableKey> FilterCategory<T, F> {
    /// Free-text category matching any value as a case-insensitive substring.
    pub fn search(
        key: F,
        title: impl Into<String>,
        item_value: impl Fn(&T) -> String + 'static,
    ) -> Self {
        let title = title.into();
        let placeholder = Some(format!("Filter by {}...", title.to_lowercase()));
        Self {
            key,
            title,
            kind: FilterKind::Search,
            placeholder,
            options: Vec::new(),
            matcher: Box::new(move |item: &T, values: &[String]| {
                let haystack = item_value(item).to_lowercase();
                values
                    .iter()
                    .any(|needle| haystack.contains(&needle.to_lowercase()))
            }),
        }
    }

    /// Single-choice category matching the item's value exactly.
    pub fn select(
        key: F,
        title: impl Into<String>,
        options: Vec<FilterSelectOption>,
        item_value: impl Fn(&T) -> Option<String> + 'static,
    ) -> Self {
        Self {
            key,
            title: title.into(),
            kind: FilterKind::Select,
            placeholder: None,
            options,
            matcher: Box::new(move |item: &T, values: &[String]| {
                item_value(item).is_some_and(|value| values.contains(&value))
            }),
        }
    }

    /// Multi-choice category matching when any item value is selected.
    pub fn multi_select(
        key: F,
        title: impl Into<String>,
        options: Vec<FilterSelectOption>,
        item_values: impl Fn(&T) -> Vec<String> + 'static,
    ) -> Self {
        Self {
            key,
            title: title.into(),
            kind: FilterKind::MultiSelect,
            placeholder: None,
            options,
            matcher: Box::new(move |item: &T, values: &[String]| {
                item_values(item).iter().any(|value| values.contains(value))
            }),
        }
    }

    /// Category with an arbitrary predicate over the active values.
    pub fn custom(
        key: F,
        title: impl Into<String>,
        kind: FilterKind,
        predicate: impl Fn(&T, &[String]) -> bool + 'static,
    ) -> Self {
        Self {
            key,
            title: title.into(),
            kind,
            placeholder: None,
            options: Vec::new(),
            matcher: Box::new(predicate),
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Whether `item` passes this category for `value`. Empty values pass everything.
    pub fn matches(&self, item: &T, value: &FilterValue) -> bool {
        value.is_empty() || (self.matcher)(item, value.values())
    }
}

impl<T, F: fmt::Debug> fmt::Debug for FilterCategory<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCategory")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("options", &self.options.len())
            .finish_non_exhaustive()
    }
}

/// Active filter values per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<F: TableKey> {
    filter_values: IndexMap<F, FilterValue>,
}

impl<F: TableKey> Default for FilterState<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TableKey> FilterState<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter_values: IndexMap::new(),
        }
    }

    #[must_use]
    pub const fn filter_values(&self) -> &IndexMap<F, FilterValue> {
        &self.filter_values
    }

    /// Replace the whole mapping. Empty values are dropped.
    pub fn set_filter_values(&mut self, values: IndexMap<F, FilterValue>) {
        self.filter_values = values.into_iter().filter(|(_, v)| !v.is_empty()).collect();
    }

    /// Replace one category's value. An empty value clears the category.
    pub fn set_filter_value(&mut self, key: F, value: FilterValue) {
        if value.is_empty() {
            self.filter_values.shift_remove(&key);
        } else {
            self.filter_values.insert(key, value);
        }
    }

    pub fn clear_filter(&mut self, key: F) {
        self.filter_values.shift_remove(&key);
    }

    pub fn clear_all(&mut self) {
        self.filter_values.clear();
    }

    #[must_use]
    pub fn value(&self, key: F) -> Option<&FilterValue> {
        self.filter_values.get(&key)
    }

    /// Number of categories currently filtering.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.filter_values.values().filter(|v| !v.is_empty()).count()
    }

    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.active_filter_count() > 0
    }
}

/// Keep the items that satisfy every non-empty filter, in original order.
///
/// Values for categories without a registered matcher are ignored.
pub fn apply_filters<'a, T, F: TableKey>(
    items: &'a [T],
    filter_values: &IndexMap<F, FilterValue>,
    categories: &[FilterCategory<T, F>],
) -> Vec<&'a T> {
    let active: Vec<(&FilterCategory<T, F>, &FilterValue)> = filter_values
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(key, value)| {
            categories
                .iter()
                .find(|category| category.key == *key)
                .map(|category| (category, value))
        })
        .collect();

    items
        .iter()
        .filter(|item| active.iter().all(|(category, value)| category.matches(item, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::table_keys! {
        enum Cat {
            Name => "name",
            Kind => "kind",
            Tag => "tag",
        }
    }

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        kind: &'static str,
        tags: Vec<&'static str>,
    }

    fn item(name: &'static str, kind: &'static str, tags: Vec<&'static str>) -> Item {
        Item { name, kind, tags }
    }

    fn items() -> Vec<Item> {
        vec![
            item("Inventory", "git", vec!["java"]),
            item("billing", "svn", vec!["java", "legacy"]),
            item("Portal", "git", vec![]),
        ]
    }

    fn categories() -> Vec<FilterCategory<Item, Cat>> {
        vec![
            FilterCategory::search(Cat::Name, "Name", |i: &Item| i.name.to_string()),
            FilterCategory::select(Cat::Kind, "Kind", Vec::new(), |i: &Item| {
                Some(i.kind.to_string())
            }),
            FilterCategory::multi_select(Cat::Tag, "Tag", Vec::new(), |i: &Item| {
                i.tags.iter().map(ToString::to_string).collect()
            }),
        ]
    }

    #[test]
    fn test_no_filters_passes_everything() {
        let items = items();
        let state = FilterState::<Cat>::new();
        let filtered = apply_filters(&items, state.filter_values(), &categories());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = items();
        let mut state = FilterState::new();
        state.set_filter_value(Cat::Name, "BILL".into());
        let filtered = apply_filters(&items, state.filter_values(), &categories());
        assert_eq!(filtered, vec![&items[1]]);
    }

    #[test]
    fn test_categories_combine_with_and() {
        let items = items();
        let mut state = FilterState::new();
        state.set_filter_value(Cat::Kind, "git".into());
        state.set_filter_value(
            Cat::Tag,
            FilterValue::from_values(vec!["java".into(), "legacy".into()]),
        );
        let filtered = apply_filters(&items, state.filter_values(), &categories());
        assert_eq!(filtered, vec![&items[0]]);
    }

    #[test]
    fn test_empty_value_clears_category() {
        let mut state = FilterState::new();
        state.set_filter_value(Cat::Name, "x".into());
        assert_eq!(state.active_filter_count(), 1);

        state.set_filter_value(Cat::Name, FilterValue::Single(String::new()));
        assert!(!state.is_filtered());
        assert!(state.value(Cat::Name).is_none());
    }

    #[test]
    fn test_value_without_matcher_is_ignored() {
        let items = items();
        let mut values = IndexMap::new();
        values.insert(Cat::Tag, FilterValue::from("nothing-matches"));
        let only_name = vec![FilterCategory::search(Cat::Name, "Name", |i: &Item| {
            i.name.to_string()
        })];
        assert_eq!(apply_filters(&items, &values, &only_name).len(), 3);
    }

    #[test]
    fn test_from_values_normalizes() {
        assert_eq!(FilterValue::from_values(vec![]), FilterValue::None);
        assert_eq!(
            FilterValue::from_values(vec![String::new(), "a".into()]),
            FilterValue::Single("a".into())
        );
        assert!(FilterValue::Multiple(vec![]).is_empty());
    }

    #[test]
    fn test_set_filter_values_replaces_mapping() {
        let mut state = FilterState::new();
        state.set_filter_value(Cat::Name, "a".into());

        let mut replacement = IndexMap::new();
        replacement.insert(Cat::Kind, FilterValue::from("git"));
        replacement.insert(Cat::Tag, FilterValue::None);
        state.set_filter_values(replacement);

        assert!(state.value(Cat::Name).is_none());
        assert_eq!(state.value(Cat::Kind), Some(&FilterValue::from("git")));
        assert_eq!(state.active_filter_count(), 1);
    }
}

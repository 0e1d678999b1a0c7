//! Sort state and stable client-side sorting.

use super::keys::TableKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Arrow glyph for column headers.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// The column currently sorted on and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSort<S> {
    pub column_key: S,
    pub direction: SortDirection,
}

impl<S> ActiveSort<S> {
    pub const fn asc(column_key: S) -> Self {
        Self {
            column_key,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(column_key: S) -> Self {
        Self {
            column_key,
            direction: SortDirection::Desc,
        }
    }
}

/// Active sort, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState<S: TableKey> {
    active_sort: Option<ActiveSort<S>>,
}

impl<S: TableKey> Default for SortState<S> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S: TableKey> SortState<S> {
    #[must_use]
    pub const fn new(initial: Option<ActiveSort<S>>) -> Self {
        Self {
            active_sort: initial,
        }
    }

    #[must_use]
    pub const fn active_sort(&self) -> Option<&ActiveSort<S>> {
        self.active_sort.as_ref()
    }

    pub fn set_active_sort(&mut self, sort: Option<ActiveSort<S>>) {
        self.active_sort = sort;
    }

    /// Header click: flip direction on the same column, otherwise sort ascending.
    pub fn toggle(&mut self, column_key: S) {
        self.active_sort = Some(match self.active_sort {
            Some(active) if active.column_key == column_key => ActiveSort {
                column_key,
                direction: active.direction.toggled(),
            },
            _ => ActiveSort::asc(column_key),
        });
    }

    pub fn clear(&mut self) {
        self.active_sort = None;
    }

    /// Direction for `column_key` if it is the active column.
    #[must_use]
    pub fn direction_for(&self, column_key: S) -> Option<SortDirection> {
        self.active_sort
            .filter(|active| active.column_key == column_key)
            .map(|active| active.direction)
    }
}

/// Per-column comparator used for client-side sorting.
pub type CompareFn<T, S> = Box<dyn Fn(&T, &T, S) -> Ordering>;

/// A sortable cell value.
///
/// Values of the same kind compare naturally (text case-insensitively);
/// `Missing` always sorts after present values.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Missing,
}

impl SortValue {
    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Integer(_) | Self::Float(_) => 1,
            Self::Text(_) => 2,
            Self::Missing => 3,
        }
    }

    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Integer(a), Self::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (Self::Float(a), Self::Integer(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<&str>> for SortValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Build a comparator from a per-column value extractor.
pub fn compare_by_sort_values<T, S: TableKey>(
    sort_value: impl Fn(&T, S) -> SortValue + 'static,
) -> CompareFn<T, S> {
    Box::new(move |a: &T, b: &T, column: S| sort_value(a, column).compare(&sort_value(b, column)))
}

/// Stable sort by the active column. Without an active sort the order is unchanged.
pub fn apply_sort<'a, T, S: TableKey>(
    mut items: Vec<&'a T>,
    active_sort: Option<&ActiveSort<S>>,
    compare: &CompareFn<T, S>,
) -> Vec<&'a T> {
    let Some(active) = active_sort else {
        return items;
    };
    let column = active.column_key;
    match active.direction {
        SortDirection::Asc => items.sort_by(|a, b| compare(*a, *b, column)),
        SortDirection::Desc => items.sort_by(|a, b| compare(*b, *a, column)),
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::table_keys! {
        enum Col {
            Name => "name",
            Size => "size",
        }
    }

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u32,
        name: &'static str,
        size: Option<i64>,
    }

    fn compare() -> CompareFn<Item, Col> {
        compare_by_sort_values(|item: &Item, col| match col {
            Col::Name => item.name.into(),
            Col::Size => item.size.map_or(SortValue::Missing, SortValue::Integer),
        })
    }

    fn item(id: u32, name: &'static str, size: Option<i64>) -> Item {
        Item { id, name, size }
    }

    fn ids(items: &[&Item]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_toggle_cycles_direction() {
        let mut state = SortState::<Col>::default();
        assert!(state.active_sort().is_none());

        state.toggle(Col::Name);
        assert_eq!(state.direction_for(Col::Name), Some(SortDirection::Asc));

        state.toggle(Col::Name);
        assert_eq!(state.direction_for(Col::Name), Some(SortDirection::Desc));

        state.toggle(Col::Name);
        assert_eq!(state.direction_for(Col::Name), Some(SortDirection::Asc));
    }

    #[test]
    fn test_toggle_new_column_starts_ascending() {
        let mut state = SortState::new(Some(ActiveSort::desc(Col::Name)));
        state.toggle(Col::Size);
        assert_eq!(state.active_sort(), Some(&ActiveSort::asc(Col::Size)));
        assert_eq!(state.direction_for(Col::Name), None);
    }

    #[test]
    fn test_sort_by_name_then_reverse() {
        let items = [item(1, "b", None), item(2, "a", None)];
        let refs: Vec<&Item> = items.iter().collect();
        let compare = compare();

        let asc = apply_sort(refs.clone(), Some(&ActiveSort::asc(Col::Name)), &compare);
        assert_eq!(ids(&asc), vec![2, 1]);

        let desc = apply_sort(refs, Some(&ActiveSort::desc(Col::Name)), &compare);
        assert_eq!(ids(&desc), vec![1, 2]);
    }

    #[test]
    fn test_no_active_sort_keeps_order() {
        let items = [item(3, "c", None), item(1, "a", None)];
        let sorted = apply_sort::<Item, Col>(items.iter().collect(), None, &compare());
        assert_eq!(ids(&sorted), vec![3, 1]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let items = [
            item(1, "same", Some(1)),
            item(2, "same", Some(1)),
            item(3, "other", Some(0)),
        ];
        let compare = compare();
        let asc = apply_sort(items.iter().collect(), Some(&ActiveSort::asc(Col::Size)), &compare);
        assert_eq!(ids(&asc), vec![3, 1, 2]);
        let desc = apply_sort(items.iter().collect(), Some(&ActiveSort::desc(Col::Size)), &compare);
        assert_eq!(ids(&desc), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        assert_eq!(SortValue::Missing.compare(&SortValue::Integer(5)), Ordering::Greater);
        assert_eq!(SortValue::from("B").compare(&SortValue::from("a")), Ordering::Greater);
        assert_eq!(SortValue::Integer(2).compare(&SortValue::Float(2.5)), Ordering::Less);
    }

    #[test]
    fn test_direction_names() {
        assert_eq!(SortDirection::from_name("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_name("sideways"), None);
        assert_eq!(SortDirection::Asc.toggled().as_str(), "desc");
    }
}

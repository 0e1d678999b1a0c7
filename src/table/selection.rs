//! Identity-based row selection.
//!
//! Selection survives filtering, sorting and paging because it is keyed by
//! identity. Identities that no longer resolve to an item are simply
//! rendered as unselected.

use super::keys::{IdProperty, identity_of};
use indexmap::IndexSet;

/// Set of selected item identities, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: IndexSet<String>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select one item. Items without an identity are ignored.
    pub fn select<T>(&mut self, item: &T, id_property: IdProperty<T>) {
        if let Some(id) = identity_of(item, id_property) {
            self.selected.insert(id.to_string());
        }
    }

    /// Select by identity, only if that identity exists in `items`.
    ///
    /// Returns `true` when the identity was found.
    pub fn select_identity<T>(
        &mut self,
        identity: &str,
        items: &[T],
        id_property: IdProperty<T>,
    ) -> bool {
        let found = items
            .iter()
            .any(|item| identity_of(item, id_property) == Some(identity));
        if found {
            self.selected.insert(identity.to_string());
        }
        found
    }

    pub fn deselect(&mut self, identity: &str) {
        self.selected.shift_remove(identity);
    }

    pub fn deselect_item<T>(&mut self, item: &T, id_property: IdProperty<T>) {
        if let Some(id) = identity_of(item, id_property) {
            self.deselect(id);
        }
    }

    /// Flip the selection of one item.
    pub fn toggle<T>(&mut self, item: &T, id_property: IdProperty<T>) {
        if self.is_selected(item, id_property) {
            self.deselect_item(item, id_property);
        } else {
            self.select(item, id_property);
        }
    }

    /// Select every item in `items` (a visible page or the whole filtered set).
    pub fn select_all<'a, T: 'a>(
        &mut self,
        items: impl IntoIterator<Item = &'a T>,
        id_property: IdProperty<T>,
    ) {
        for item in items {
            self.select(item, id_property);
        }
    }

    /// Deselect every item in `items`, leaving other selections untouched.
    pub fn deselect_all<'a, T: 'a>(
        &mut self,
        items: impl IntoIterator<Item = &'a T>,
        id_property: IdProperty<T>,
    ) {
        for item in items {
            self.deselect_item(item, id_property);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn is_selected<T>(&self, item: &T, id_property: IdProperty<T>) -> bool {
        identity_of(item, id_property).is_some_and(|id| self.selected.contains(id))
    }

    #[must_use]
    pub fn is_identity_selected(&self, identity: &str) -> bool {
        self.selected.contains(identity)
    }

    /// Whether every item in `items` is selected. False for an empty set.
    pub fn are_all_selected<'a, T: 'a>(
        &self,
        items: impl IntoIterator<Item = &'a T>,
        id_property: IdProperty<T>,
    ) -> bool {
        let mut any = false;
        for item in items {
            any = true;
            if !self.is_selected(item, id_property) {
                return false;
            }
        }
        any
    }

    /// The items of `items` that are selected, in `items` order.
    pub fn selected_items<'a, T>(&self, items: &'a [T], id_property: IdProperty<T>) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.is_selected(*item, id_property))
            .collect()
    }

    /// Number of selected identities, including ones not currently loaded.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

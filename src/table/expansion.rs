//! Row and cell expansion, keyed by item identity.

use super::keys::TableKey;
use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How rows of a table expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpandableVariant {
    /// Whole rows; at most one expanded at a time
    Single,
    /// Individual (row, column) cells, toggled independently
    Compound,
}

/// Current expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionState<C: TableKey> {
    /// Table is not expandable
    None,
    /// The single expanded row, if any
    Single(Option<String>),
    /// Expanded (row identity, column) cells
    Compound(IndexSet<(String, C)>),
}

impl<C: TableKey> Default for ExpansionState<C> {
    fn default() -> Self {
        Self::None
    }
}

impl<C: TableKey> ExpansionState<C> {
    /// Empty expansion for the given variant.
    #[must_use]
    pub fn new(variant: Option<ExpandableVariant>) -> Self {
        match variant {
            None => Self::None,
            Some(ExpandableVariant::Single) => Self::Single(None),
            Some(ExpandableVariant::Compound) => Self::Compound(IndexSet::new()),
        }
    }

    #[must_use]
    pub const fn variant(&self) -> Option<ExpandableVariant> {
        match self {
            Self::None => None,
            Self::Single(_) => Some(ExpandableVariant::Single),
            Self::Compound(_) => Some(ExpandableVariant::Compound),
        }
    }

    /// Toggle a whole row (single mode).
    ///
    /// Expanding a different row collapses the previous one. No-op otherwise.
    pub fn toggle_row(&mut self, identity: &str) {
        if let Self::Single(expanded) = self {
            if expanded.as_deref() == Some(identity) {
                *expanded = None;
            } else {
                *expanded = Some(identity.to_string());
            }
        }
    }

    /// Toggle one (row, column) cell (compound mode). No-op otherwise.
    pub fn toggle_cell(&mut self, identity: &str, column_key: C) {
        if let Self::Compound(cells) = self {
            let cell = (identity.to_string(), column_key);
            if !cells.shift_remove(&cell) {
                cells.insert(cell);
            }
        }
    }

    /// Set a row's expansion explicitly (single mode).
    pub fn set_row_expanded(&mut self, identity: &str, is_expanding: bool) {
        if self.is_row_expanded(identity) != is_expanding {
            self.toggle_row(identity);
        }
    }

    /// Whether a row is expanded; in compound mode, whether any of its cells is.
    #[must_use]
    pub fn is_row_expanded(&self, identity: &str) -> bool {
        match self {
            Self::None => false,
            Self::Single(expanded) => expanded.as_deref() == Some(identity),
            Self::Compound(cells) => cells.iter().any(|(id, _)| id == identity),
        }
    }

    #[must_use]
    pub fn is_cell_expanded(&self, identity: &str, column_key: C) -> bool {
        match self {
            Self::Compound(cells) => cells
                .iter()
                .any(|(id, col)| id == identity && *col == column_key),
            _ => false,
        }
    }

    /// Expanded columns of a row, in expansion order.
    #[must_use]
    pub fn expanded_columns(&self, identity: &str) -> Vec<C> {
        match self {
            Self::Compound(cells) => cells
                .iter()
                .filter(|(id, _)| id == identity)
                .map(|(_, col)| *col)
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn collapse_all(&mut self) {
        match self {
            Self::None => {}
            Self::Single(expanded) => *expanded = None,
            Self::Compound(cells) => cells.clear(),
        }
    }
}

//! Column, sort and filter-category keys and the ordered column-name mapping.

use crate::error::{PlannerError, Result, TableErrorKind};
use indexmap::IndexMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed set of string-identified keys.
///
/// Column keys, sortable column keys and filter category keys all implement
/// this. The string form is what ends up in URL query parameters.
pub trait TableKey: Copy + Eq + Hash + Debug + 'static {
    /// Every key, in display order.
    fn all() -> &'static [Self];

    /// The stable string identifier for this key.
    fn as_str(&self) -> &'static str;

    /// Look a key up by its string identifier.
    #[must_use]
    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.as_str() == key)
    }
}

/// Declare a `TableKey` enum.
///
/// ```
/// migration_planner::table_keys! {
///     pub enum Column {
///         Name => "name",
///         Description => "description",
///     }
/// }
/// use migration_planner::table::TableKey;
/// assert_eq!(Column::from_key("name"), Some(Column::Name));
/// ```
#[macro_export]
macro_rules! table_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::table::TableKey for $name {
            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }
        }
    };
}

/// Accessor for the string property that identifies an item.
///
/// Returning `None` (or an empty string) means the item has no identity and
/// is treated as absent by selection and expansion bookkeeping.
pub type IdProperty<T> = fn(&T) -> Option<&str>;

/// Resolve an item's identity, treating empty strings as missing.
pub fn identity_of<T>(item: &T, id_property: IdProperty<T>) -> Option<&str> {
    id_property(item).filter(|id| !id.is_empty())
}

/// Ordered mapping from every column key to its human-readable label.
///
/// Exhaustive over `C::all()`: a label exists for every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames<C: TableKey> {
    names: IndexMap<C, String>,
}

impl<C: TableKey> ColumnNames<C> {
    /// Build the mapping by labelling every key in `C::all()` order.
    pub fn from_fn(label: impl Fn(C) -> String) -> Self {
        Self {
            names: C::all().iter().map(|&key| (key, label(key))).collect(),
        }
    }

    /// Build the mapping from explicit pairs, in the given order.
    ///
    /// Fails if a key is listed twice or if any key of `C` is left out.
    pub fn try_from_pairs<I, L>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, L)>,
        L: Into<String>,
    {
        let mut names = IndexMap::new();
        for (key, label) in pairs {
            if names.insert(key, label.into()).is_some() {
                return Err(PlannerError::table(
                    "column names",
                    TableErrorKind::DuplicateColumn(key.as_str().to_string()),
                ));
            }
        }
        if let Some(missing) = C::all().iter().find(|key| !names.contains_key(*key)) {
            return Err(PlannerError::table(
                "column names",
                TableErrorKind::MissingColumnName(missing.as_str().to_string()),
            ));
        }
        Ok(Self { names })
    }

    /// Label for a column.
    #[must_use]
    pub fn label(&self, key: C) -> &str {
        self.names.get(&key).map_or("", String::as_str)
    }

    /// Position of a column in display order.
    #[must_use]
    pub fn index_of(&self, key: C) -> Option<usize> {
        self.names.get_index_of(&key)
    }

    /// Iterate columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = (C, &str)> {
        self.names.iter().map(|(key, label)| (*key, label.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

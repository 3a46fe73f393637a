//! Filter primitives shared across all list views.

use serde::{Deserialize, Serialize};

/// A single categorical filter selection.
///
/// `All` is the "no constraint" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterChoice<T> {
    All,
    Only(T),
}

impl<T> Default for FilterChoice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> FilterChoice<T> {
    /// Whether an attribute value passes this selection.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }
}

impl FilterChoice<String> {
    /// Case-insensitive variant for free-form categorical strings.
    pub fn admits_str(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.eq_ignore_ascii_case(value),
        }
    }
}

/// Free-text query plus entity-specific categorical filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState<F> {
    pub query: String,
    pub filters: F,
}

impl<F> FilterState<F> {
    /// Lowercased, trimmed query; `None` when it matches everything.
    pub fn normalized_query(&self) -> Option<String> {
        let q = self.query.trim();
        if q.is_empty() {
            None
        } else {
            Some(q.to_lowercase())
        }
    }
}

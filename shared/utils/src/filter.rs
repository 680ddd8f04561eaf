//! Description / packing filters over flat records and reconciliation rows.
//!
//! Filtering only ever projects: the source slice is borrowed, never changed,
//! so clearing the filter gives back exactly what was there before.

use packtally_models::{FlatRecord, ItemLabels};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RecordFilter {
    /// Case-insensitive substring of the description text.
    #[validate(length(max = 200, message = "Description filter must be at most 200 characters"))]
    pub description: Option<String>,
    /// Case-insensitive substring of the packing text.
    #[validate(length(max = 200, message = "Packing filter must be at most 200 characters"))]
    pub packing: Option<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, needle: impl Into<String>) -> Self {
        self.description = Some(needle.into());
        self
    }

    pub fn with_packing(mut self, needle: impl Into<String>) -> Self {
        self.packing = Some(needle.into());
        self
    }

    /// True when no active criterion is set; blank strings count as unset.
    pub fn is_empty(&self) -> bool {
        active(&self.description).is_none() && active(&self.packing).is_none()
    }

    pub fn matches<T: ItemLabels>(&self, item: &T) -> bool {
        contains_folded(item.description_text(), active(&self.description))
            && contains_folded(item.packing_text(), active(&self.packing))
    }

    pub fn apply<'a, T: ItemLabels>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.trim().is_empty())
}

fn contains_folded(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Sum of quantities over a record set; absent quantities add nothing.
pub fn total_quantity<'a>(records: impl IntoIterator<Item = &'a FlatRecord>) -> f64 {
    records.into_iter().filter_map(|r| r.quantity).sum()
}

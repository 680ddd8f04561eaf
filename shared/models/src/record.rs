//! Groups, items and the flat records produced from them.

use serde::{Deserialize, Serialize};

use crate::role::FieldRoleMap;

/// One line within a group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    pub description: String,
    /// Opaque label such as "25kg"; never parsed as a unit.
    pub packing: String,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
}

impl Item {
    /// True when at least one of the five item fields carries a value.
    pub fn has_data(&self) -> bool {
        !self.description.is_empty()
            || !self.packing.is_empty()
            || self.quantity.is_some()
            || self.rate.is_some()
            || self.amount.is_some()
    }
}

/// One parent record spanning one or more source rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    /// Boundary marker only; may be any non-empty text.
    pub ordinal: String,
    pub date: String,
    pub party: String,
    pub reference: String,
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(
        ordinal: impl Into<String>,
        date: impl Into<String>,
        party: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            ordinal: ordinal.into(),
            date: date.into(),
            party: party.into(),
            reference: reference.into(),
            items: Vec::new(),
        }
    }

    /// Returns the group with `item` appended.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// One record per item, or a single placeholder record when the group has no items.
    pub fn flatten(&self) -> Vec<FlatRecord> {
        if self.items.is_empty() {
            return vec![FlatRecord::from_parts(self, None)];
        }
        self.items
            .iter()
            .map(|item| FlatRecord::from_parts(self, Some(item)))
            .collect()
    }
}

/// A group's parent fields joined with one of its items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatRecord {
    pub ordinal: String,
    pub date: String,
    pub party: String,
    pub reference: String,
    pub description: String,
    pub packing: String,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
}

impl FlatRecord {
    pub fn from_parts(group: &Group, item: Option<&Item>) -> Self {
        let item = item.cloned().unwrap_or_default();
        Self {
            ordinal: group.ordinal.clone(),
            date: group.date.clone(),
            party: group.party.clone(),
            reference: group.reference.clone(),
            description: item.description,
            packing: item.packing,
            quantity: item.quantity,
            rate: item.rate,
            amount: item.amount,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.description.is_empty()
            && self.packing.is_empty()
            && self.quantity.is_none()
            && self.rate.is_none()
            && self.amount.is_none()
    }
}

/// Everything produced by flattening one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenedSheet {
    pub header_row: usize,
    pub roles: FieldRoleMap,
    pub groups: Vec<Group>,
    pub records: Vec<FlatRecord>,
    /// Distinct normalized descriptions, ascending.
    pub descriptions: Vec<String>,
    /// Distinct normalized packing labels, ascending.
    pub packing_sizes: Vec<String>,
}

impl FlattenedSheet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Display text a filter can match on.
pub trait ItemLabels {
    fn description_text(&self) -> &str;
    fn packing_text(&self) -> &str;
}

impl ItemLabels for FlatRecord {
    fn description_text(&self) -> &str {
        &self.description
    }

    fn packing_text(&self) -> &str {
        &self.packing
    }
}

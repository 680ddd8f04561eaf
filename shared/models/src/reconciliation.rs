//! Keys and rows of the purchased-vs-used reconciliation.

use serde::{Deserialize, Serialize};

use crate::record::ItemLabels;
use crate::text::normalize_text;

/// Join key across two independently sourced datasets.
///
/// Both halves are normalized, so "Wheat " and "wheat" land on the same key.
/// No unit normalization happens: "25kg" and "25 kg" stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReconciliationKey {
    pub description: String,
    pub packing: String,
}

impl ReconciliationKey {
    pub fn new(description: &str, packing: &str) -> Self {
        Self {
            description: normalize_text(description),
            packing: normalize_text(packing),
        }
    }
}

/// Per-key totals from both datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRow {
    pub key: ReconciliationKey,
    /// Exemplar surface text, taken from the purchase side when it has the key.
    pub description: String,
    pub packing: String,
    pub purchased: f64,
    pub used: f64,
    /// `purchased - used`; negative means more was used than bought.
    pub leftover: f64,
}

impl ReconciliationRow {
    pub fn new(
        key: ReconciliationKey,
        description: impl Into<String>,
        packing: impl Into<String>,
        purchased: f64,
        used: f64,
    ) -> Self {
        Self {
            key,
            description: description.into(),
            packing: packing.into(),
            purchased,
            used,
            leftover: purchased - used,
        }
    }

    pub fn is_short(&self) -> bool {
        self.leftover < 0.0
    }
}

impl ItemLabels for ReconciliationRow {
    fn description_text(&self) -> &str {
        &self.description
    }

    fn packing_text(&self) -> &str {
        &self.packing
    }
}

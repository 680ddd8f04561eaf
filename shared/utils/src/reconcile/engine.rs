use packtally_models::{CellGrid, FlatRecord, FlattenedSheet, ReconciliationRow};
use serde::Serialize;
use tracing::info;

use super::aggregate::aggregate_quantities;
use crate::config::DEFAULT_HEADER_SCAN_ROWS;
use crate::sheet::{HeaderVocabulary, SheetFlattener};

/// Joins purchased and used records on (description, packing).
///
/// Every key present on either side produces a row; a missing side
/// contributes zero. Rows are ordered by exemplar description with ties left
/// in first-appearance order (purchase keys first, then usage-only keys).
pub fn reconcile(purchased: &[FlatRecord], used: &[FlatRecord]) -> Vec<ReconciliationRow> {
    let bought = aggregate_quantities(purchased);
    let consumed = aggregate_quantities(used);

    let usage_only = consumed.keys().iter().filter(|key| bought.get(key).is_none());

    let mut rows: Vec<ReconciliationRow> = bought
        .keys()
        .iter()
        .chain(usage_only)
        .map(|key| {
            let purchase = bought.get(key);
            let usage = consumed.get(key);
            // Exemplar text comes from the purchase side when it has the key.
            let exemplar = purchase.or(usage);
            ReconciliationRow::new(
                key.clone(),
                exemplar.map(|t| t.description.clone()).unwrap_or_default(),
                exemplar.map(|t| t.packing.clone()).unwrap_or_default(),
                purchase.map_or(0.0, |t| t.quantity),
                usage.map_or(0.0, |t| t.quantity),
            )
        })
        .collect();

    rows.sort_by(|a, b| a.description.cmp(&b.description));
    rows
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeftoverSummary {
    pub keys: usize,
    pub purchased: f64,
    pub used: f64,
    pub leftover: f64,
    /// Keys where more was used than purchased.
    pub short_keys: usize,
}

impl LeftoverSummary {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ReconciliationRow>) -> Self {
        rows.into_iter().fold(Self::default(), |mut summary, row| {
            summary.keys += 1;
            summary.purchased += row.purchased;
            summary.used += row.used;
            summary.leftover += row.leftover;
            if row.is_short() {
                summary.short_keys += 1;
            }
            summary
        })
    }
}

/// Reconciliation rows plus the filter choices shown next to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeftoverReport {
    pub rows: Vec<ReconciliationRow>,
    /// Distinct normalized varieties from the usage sheet.
    pub varieties: Vec<String>,
    /// Distinct normalized packing sizes from the usage sheet.
    pub packing_sizes: Vec<String>,
    pub summary: LeftoverSummary,
}

impl LeftoverReport {
    pub fn from_sheets(purchase: &FlattenedSheet, usage: &FlattenedSheet) -> Self {
        let rows = reconcile(&purchase.records, &usage.records);
        let summary = LeftoverSummary::from_rows(&rows);

        info!(
            keys = summary.keys,
            short_keys = summary.short_keys,
            purchase_records = purchase.records.len(),
            usage_records = usage.records.len(),
            "Reconciled purchase and usage sheets"
        );

        Self {
            rows,
            varieties: usage.descriptions.clone(),
            packing_sizes: usage.packing_sizes.clone(),
            summary,
        }
    }
}

/// Flattens a purchase sheet and a usage sheet, each with its own header
/// vocabulary, and reconciles them.
#[derive(Debug, Clone)]
pub struct LeftoverCalculator {
    purchase: SheetFlattener,
    usage: SheetFlattener,
}

impl Default for LeftoverCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_SCAN_ROWS)
    }
}

impl LeftoverCalculator {
    pub fn new(scan_rows: usize) -> Self {
        Self {
            purchase: SheetFlattener::with_vocabulary(HeaderVocabulary::packing(), scan_rows),
            usage: SheetFlattener::with_vocabulary(HeaderVocabulary::usage(), scan_rows),
        }
    }

    pub fn purchase_flattener(&self) -> &SheetFlattener {
        &self.purchase
    }

    pub fn usage_flattener(&self) -> &SheetFlattener {
        &self.usage
    }

    pub fn calculate(&self, purchase: &CellGrid, usage: &CellGrid) -> LeftoverReport {
        let purchase = self.purchase.flatten(purchase);
        let usage = self.usage.flatten(usage);
        LeftoverReport::from_sheets(&purchase, &usage)
    }
}

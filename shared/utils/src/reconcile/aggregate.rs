use std::collections::HashMap;

use packtally_models::{FlatRecord, ReconciliationKey};

/// Running quantity total for one key within one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTotal {
    /// Surface text of the first record seen with this key.
    pub description: String,
    pub packing: String,
    pub quantity: f64,
    pub record_count: usize,
}

/// Per-key sums of one dataset, remembering the order keys first appeared in.
#[derive(Debug, Clone, Default)]
pub struct KeyedTotals {
    order: Vec<ReconciliationKey>,
    totals: HashMap<ReconciliationKey, KeyTotal>,
}

impl KeyedTotals {
    /// Adds one record. An absent quantity counts as zero here and nowhere earlier.
    pub fn add(mut self, record: &FlatRecord) -> Self {
        let key = ReconciliationKey::new(&record.description, &record.packing);
        let quantity = record.quantity.unwrap_or(0.0);

        match self.totals.get_mut(&key) {
            Some(total) => {
                total.quantity += quantity;
                total.record_count += 1;
            }
            None => {
                self.order.push(key.clone());
                self.totals.insert(
                    key,
                    KeyTotal {
                        description: record.description.clone(),
                        packing: record.packing.clone(),
                        quantity,
                        record_count: 1,
                    },
                );
            }
        }
        self
    }

    pub fn get(&self, key: &ReconciliationKey) -> Option<&KeyTotal> {
        self.totals.get(key)
    }

    /// Keys in first-appearance order.
    pub fn keys(&self) -> &[ReconciliationKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Folds a dataset's records into per-key sums.
pub fn aggregate_quantities(records: &[FlatRecord]) -> KeyedTotals {
    records.iter().fold(KeyedTotals::default(), KeyedTotals::add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(description: &str, packing: &str, quantity: Option<f64>) -> FlatRecord {
        FlatRecord {
            description: description.into(),
            packing: packing.into(),
            quantity,
            ..Default::default()
        }
    }

    #[test]
    fn basic_aggregation() {
        let totals = aggregate_quantities(&[
            record("Wheat", "25kg", Some(10.0)),
            record("wheat ", "25KG", Some(30.0)),
            record("Rice", "50kg", Some(20.0)),
        ]);

        assert_eq!(totals.len(), 2);
        let wheat = totals.get(&ReconciliationKey::new("wheat", "25kg")).unwrap();
        assert_eq!(wheat.quantity, 40.0);
        assert_eq!(wheat.record_count, 2);
        assert_eq!(wheat.description, "Wheat");
    }

    #[test]
    fn absent_quantity_counts_as_zero() {
        let totals = aggregate_quantities(&[
            record("Wheat", "25kg", None),
            record("Wheat", "25kg", Some(4.0)),
        ]);

        assert_eq!(totals.get(&ReconciliationKey::new("Wheat", "25kg")).unwrap().quantity, 4.0);
    }

    #[test]
    fn first_appearance_order_kept() {
        let totals = aggregate_quantities(&[
            record("Rice", "50kg", Some(1.0)),
            record("Barley", "25kg", Some(1.0)),
            record("Rice", "50kg", Some(1.0)),
        ]);

        let names: Vec<_> = totals.keys().iter().map(|k| k.description.as_str()).collect();
        assert_eq!(names, vec!["rice", "barley"]);
    }
}

//! Property-based tests for the Packtally domain models
//!
//! Covers normalization stability, key collisions and the record count and
//! parent-field guarantees of group flattening.

use proptest::prelude::*;

use crate::{normalize_text, FlatRecord, Group, Item, ReconciliationKey};

prop_compose! {
    fn arb_label()(words in prop::collection::vec("[A-Za-z0-9]{1,8}", 1..4)) -> String {
        words.join(" ")
    }
}

prop_compose! {
    fn arb_item()(
        description in arb_label(),
        packing in "[0-9]{1,2}(kg| kg|KG)?",
        quantity in prop::option::of(0.0f64..10_000.0),
        rate in prop::option::of(0.0f64..500.0),
    ) -> Item {
        Item {
            description,
            packing,
            quantity,
            rate,
            amount: None,
        }
    }
}

prop_compose! {
    fn arb_group()(
        ordinal in "[0-9]{1,3}",
        date in "2024-0[1-9]-[12][0-9]",
        party in arb_label(),
        reference in "R[0-9]{1,4}",
        items in prop::collection::vec(arb_item(), 0..6),
    ) -> Group {
        Group { ordinal, date, party, reference, items }
    }
}

/// Same text with random padding, doubled spaces and case changes.
fn noisy(label: &str, upper: bool, pad: usize) -> String {
    let spaced = label.replace(' ', "  \t");
    let cased = if upper { spaced.to_uppercase() } else { spaced };
    format!("{}{}{}", " ".repeat(pad), cased, "\n".repeat(pad))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_normalize_is_idempotent(label in "\\PC{0,30}") {
        let once = normalize_text(&label);
        prop_assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn prop_key_collides_on_surface_noise(
        description in arb_label(),
        packing in arb_label(),
        upper in any::<bool>(),
        pad in 0usize..3,
    ) {
        let clean = ReconciliationKey::new(&description, &packing);
        let dirty = ReconciliationKey::new(&noisy(&description, upper, pad), &noisy(&packing, !upper, pad));
        prop_assert_eq!(clean, dirty);
    }

    #[test]
    fn prop_flatten_preserves_count(group in arb_group()) {
        let records = group.flatten();
        prop_assert_eq!(records.len(), group.items.len().max(1));
    }

    #[test]
    fn prop_parent_fields_propagate(group in arb_group()) {
        let records: Vec<FlatRecord> = group.flatten();
        for record in &records {
            prop_assert_eq!(&record.ordinal, &group.ordinal);
            prop_assert_eq!(&record.date, &group.date);
            prop_assert_eq!(&record.party, &group.party);
            prop_assert_eq!(&record.reference, &group.reference);
        }
    }

    #[test]
    fn prop_absent_quantity_survives_flattening(group in arb_group()) {
        let records = group.flatten();
        for (record, item) in records.iter().zip(group.items.iter()) {
            prop_assert_eq!(record.quantity, item.quantity);
        }
    }
}

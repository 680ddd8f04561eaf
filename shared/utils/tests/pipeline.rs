//! Packtally pipeline tests
//!
//! Grid → header resolution → flattening → reconciliation, end to end, plus
//! property tests for the guarantees the rest of the system relies on.

use packtally_models::{CellGrid, CellValue, FieldRole, FlatRecord, ReconciliationKey};
use packtally_utils::{
    reconcile, total_quantity, HeaderResolver, LeftoverCalculator, RecordFilter, SheetFlattener,
    SheetReader,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn grid(rows: &[&[&str]]) -> CellGrid {
    CellGrid::from_text_rows(rows.iter().map(|r| r.iter().copied()))
}

#[test]
fn test_documented_packing_scenario() {
    let sheet = SheetFlattener::default().flatten(&grid(&[
        &["S.No", "Date", "Party", "Ref", "Desc", "Pack", "Qty"],
        &["1", "2024-01-01", "Acme", "R1", "Wheat", "25kg", "10"],
        &["", "", "", "", "Wheat", "25kg", "5"],
        &["2", "2024-01-02", "Beta", "R2", "Rice", "50kg", "20"],
    ]));

    assert_eq!(sheet.header_row, 0);
    assert_eq!(sheet.records.len(), 3);
    assert_eq!(sheet.groups[0].items.len(), 2);
    assert_eq!(sheet.groups[1].items.len(), 1);
    assert_eq!(
        sheet.records.iter().filter(|r| r.party == "Acme").count(),
        2
    );
    assert_eq!(total_quantity(&sheet.records), 35.0);
}

#[test]
fn test_documented_leftover_scenario() {
    let purchase = SheetFlattener::default().flatten(&grid(&[
        &["S.No", "Company", "Description", "Packing", "Qty"],
        &["1", "Acme", "Wheat", "25kg", "30"],
        &["", "", "Wheat", "25kg", "10"],
        &["2", "Beta", "Rice", "50kg", "20"],
    ]));
    let usage = SheetFlattener::default().flatten(&grid(&[
        &["S.No", "Company", "Description", "Packing", "Qty"],
        &["1", "Farm", "WHEAT", " 25KG", "15"],
    ]));

    let rows = reconcile(&purchase.records, &usage.records);

    let wheat = rows
        .iter()
        .find(|r| r.key == ReconciliationKey::new("wheat", "25kg"))
        .unwrap();
    assert_eq!((wheat.purchased, wheat.used, wheat.leftover), (40.0, 15.0, 25.0));
    let rice = rows
        .iter()
        .find(|r| r.key == ReconciliationKey::new("rice", "50kg"))
        .unwrap();
    assert_eq!((rice.purchased, rice.used, rice.leftover), (20.0, 0.0, 20.0));
}

#[test]
fn test_csv_upload_flattens_like_grid() {
    let csv = "Purchase Register,,,,,,\n\
               S.No,Date,Company Name,Reference,Description of Goods,Packing Size,Quantity\n\
               1,2024-01-01,Acme,PO-1,Wheat,25kg,\"1,000\"\n\
               ,,,,Barley,50kg,₹250\n\
               ,,,,,,1250\n";

    let cells = SheetReader::new().read_bytes("register.csv", csv.as_bytes(), None).unwrap();
    let sheet = SheetFlattener::default().flatten(&cells);

    assert_eq!(sheet.header_row, 1);
    assert_eq!(sheet.records.len(), 3);
    assert_eq!(sheet.records[0].quantity, Some(1000.0));
    assert_eq!(sheet.records[1].quantity, Some(250.0));
    // The trailing total row carries a number in the quantity column, so it is an item.
    assert_eq!(sheet.records[2].description, "");
    assert_eq!(sheet.packing_sizes, vec!["25kg", "50kg"]);
}

#[test]
fn test_leftover_calculator_end_to_end() {
    let purchase = grid(&[
        &["S.No", "Date", "Company", "Reference", "Description", "Packing Size", "Qty"],
        &["1", "2024-01-01", "Acme", "R1", "Wheat", "25kg", "40"],
    ]);
    let usage = grid(&[
        &["S.No", "Variety", "Packing Size", "No of bags used"],
        &["1", "Wheat", "25kg", "50"],
        &["", "Maize", "10kg", "3"],
    ]);

    let report = LeftoverCalculator::default().calculate(&purchase, &usage);

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].description, "Maize");
    assert_eq!(report.rows[0].leftover, -3.0);
    assert_eq!(report.rows[1].leftover, -10.0);
    assert_eq!(report.summary.short_keys, 2);

    let filtered = RecordFilter::new().with_description("whe").apply(&report.rows);
    assert_eq!(filtered.len(), 1);
}

// ===== Property tests =====

prop_compose! {
    fn arb_cell()(kind in 0u8..4, text in "[A-Za-z0-9 .]{0,8}", n in -1000.0f64..1000.0) -> CellValue {
        match kind {
            0 => CellValue::Empty,
            1 => CellValue::Number(n),
            _ => CellValue::from(text),
        }
    }
}

prop_compose! {
    fn arb_grid()(rows in prop::collection::vec(prop::collection::vec(arb_cell(), 0..10), 1..12)) -> CellGrid {
        CellGrid::new(rows)
    }
}

/// One group: a parent row followed by continuation rows.
type GroupLayout = (String, Vec<(String, String, u32)>);

prop_compose! {
    fn arb_groups()(
        groups in prop::collection::vec(
            (
                "[1-9][0-9]{0,2}",
                prop::collection::vec(("(Wheat|Rice|Maize)", "(25kg|50kg)", 1u32..100), 0..4),
            ),
            0..6,
        )
    ) -> Vec<GroupLayout> {
        groups
    }
}

fn grouped_grid(groups: &[GroupLayout]) -> CellGrid {
    let mut rows: Vec<Vec<String>> = vec![["S.No", "Date", "Company", "Reference", "Description", "Packing", "Qty"]
        .iter()
        .map(|s| s.to_string())
        .collect()];
    for (ordinal, items) in groups {
        let parent = vec![ordinal.clone(), "2024-01-01".into(), format!("Party {ordinal}"), format!("R{ordinal}")];
        match items.split_first() {
            Some(((d, p, q), rest)) => {
                let mut row = parent;
                row.extend([d.clone(), p.clone(), q.to_string()]);
                rows.push(row);
                for (d, p, q) in rest {
                    rows.push(vec![String::new(), String::new(), String::new(), String::new(), d.clone(), p.clone(), q.to_string()]);
                }
            }
            None => rows.push(parent),
        }
    }
    CellGrid::from_text_rows(rows)
}

fn key_set(records: &[FlatRecord]) -> BTreeSet<ReconciliationKey> {
    records
        .iter()
        .map(|r| ReconciliationKey::new(&r.description, &r.packing))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_every_role_resolves(cells in arb_grid()) {
        let roles = HeaderResolver::default().resolve(&cells).roles;
        prop_assert_eq!(roles.iter().count(), FieldRole::COUNT);
        for (_, binding) in roles.iter() {
            prop_assert!(!binding.label.is_empty());
        }
    }

    #[test]
    fn prop_arbitrary_grids_never_panic(cells in arb_grid()) {
        let sheet = SheetFlattener::default().flatten(&cells);
        let expected: usize = sheet.groups.iter().map(|g| g.items.len().max(1)).sum();
        prop_assert_eq!(sheet.records.len(), expected);
    }

    #[test]
    fn prop_group_counts_preserved(groups in arb_groups()) {
        let sheet = SheetFlattener::default().flatten(&grouped_grid(&groups));

        prop_assert_eq!(sheet.groups.len(), groups.len());
        for (group, (_, items)) in sheet.groups.iter().zip(groups.iter()) {
            prop_assert_eq!(group.items.len(), items.len());
        }
        let expected: usize = groups.iter().map(|(_, items)| items.len().max(1)).sum();
        prop_assert_eq!(sheet.records.len(), expected);
    }

    #[test]
    fn prop_parent_fields_shared(groups in arb_groups()) {
        let sheet = SheetFlattener::default().flatten(&grouped_grid(&groups));
        let mut offset = 0;
        for group in &sheet.groups {
            let span = group.items.len().max(1);
            for record in &sheet.records[offset..offset + span] {
                prop_assert_eq!(&record.ordinal, &group.ordinal);
                prop_assert_eq!(&record.party, &group.party);
                prop_assert_eq!(&record.reference, &group.reference);
            }
            offset += span;
        }
    }

    #[test]
    fn prop_keys_are_union_and_leftover_exact(a in arb_groups(), b in arb_groups()) {
        let purchase = SheetFlattener::default().flatten(&grouped_grid(&a));
        let usage = SheetFlattener::default().flatten(&grouped_grid(&b));

        let rows = reconcile(&purchase.records, &usage.records);

        let mut expected = key_set(&purchase.records);
        expected.extend(key_set(&usage.records));
        let actual: BTreeSet<ReconciliationKey> = rows.iter().map(|r| r.key.clone()).collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(rows.len(), rows.iter().map(|r| &r.key).collect::<BTreeSet<_>>().len());
        for row in &rows {
            prop_assert_eq!(row.leftover, row.purchased - row.used);
        }
    }
}

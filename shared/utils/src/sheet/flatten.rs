//! Group Flattener
//!
//! Rows with an ordinal open a new group; rows without one continue it. Each
//! group becomes one flat record per item, or one placeholder record when it
//! has no items.

use packtally_models::{
    normalize_text, CellGrid, FieldRole, FieldRoleMap, FlatRecord, FlattenedSheet, Group, Item,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::coerce::coerce_number;
use super::header::{HeaderResolution, HeaderResolver};
use super::vocabulary::HeaderVocabulary;

/// Fields read from one data row through the role bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFields {
    pub ordinal: String,
    pub date: String,
    pub party: String,
    pub reference: String,
    pub item: Item,
}

impl RowFields {
    pub fn read(grid: &CellGrid, row: usize, roles: &FieldRoleMap) -> Self {
        let text = |role: FieldRole| {
            roles
                .column(role)
                .map(|column| grid.text(row, column))
                .unwrap_or_default()
        };
        let number = |role: FieldRole| {
            roles
                .column(role)
                .and_then(|column| grid.cell(row, column))
                .and_then(coerce_number)
        };

        Self {
            ordinal: text(FieldRole::Ordinal),
            date: text(FieldRole::Date),
            party: text(FieldRole::Party),
            reference: text(FieldRole::Reference),
            item: Item {
                description: text(FieldRole::Description),
                packing: text(FieldRole::Packing),
                quantity: number(FieldRole::Quantity),
                rate: number(FieldRole::Rate),
                amount: number(FieldRole::Amount),
            },
        }
    }

    pub fn opens_group(&self) -> bool {
        !self.ordinal.is_empty()
    }
}

/// Fold state: closed groups plus the one still accepting items.
#[derive(Debug, Default)]
pub struct GroupFold {
    closed: Vec<Group>,
    open: Option<Group>,
    orphan_rows: usize,
}

impl GroupFold {
    pub fn step(mut self, row: RowFields) -> Self {
        if row.opens_group() {
            if let Some(previous) = self.open.take() {
                self.closed.push(previous);
            }
            self.open = Some(Group::new(row.ordinal, row.date, row.party, row.reference));
        }

        if !row.item.has_data() {
            return self;
        }

        match self.open.as_mut() {
            Some(group) => group.items.push(row.item),
            None => self.orphan_rows += 1,
        }
        self
    }

    /// Closes the last open group and returns every group with the orphan-row count.
    pub fn finish(mut self) -> (Vec<Group>, usize) {
        if let Some(last) = self.open.take() {
            self.closed.push(last);
        }
        (self.closed, self.orphan_rows)
    }
}

/// Folds row fields into closed groups.
pub fn group_rows(rows: impl IntoIterator<Item = RowFields>) -> (Vec<Group>, usize) {
    rows.into_iter()
        .fold(GroupFold::default(), GroupFold::step)
        .finish()
}

/// Header resolution followed by group flattening, for one sheet.
#[derive(Debug, Clone, Default)]
pub struct SheetFlattener {
    resolver: HeaderResolver,
}

impl SheetFlattener {
    pub fn new(resolver: HeaderResolver) -> Self {
        Self { resolver }
    }

    pub fn with_vocabulary(vocabulary: HeaderVocabulary, scan_rows: usize) -> Self {
        Self::new(HeaderResolver::new(vocabulary).with_scan_rows(scan_rows))
    }

    pub fn flatten(&self, grid: &CellGrid) -> FlattenedSheet {
        let resolution = self.resolver.resolve(grid);
        flatten_with(grid, &resolution)
    }
}

/// Flattens every row below the resolved header.
pub fn flatten_with(grid: &CellGrid, resolution: &HeaderResolution) -> FlattenedSheet {
    let rows = (resolution.header_row + 1..grid.row_count())
        .map(|row| RowFields::read(grid, row, &resolution.roles));
    let (groups, orphan_rows) = group_rows(rows);

    if orphan_rows > 0 {
        debug!(orphan_rows, "Dropped continuation rows that preceded the first group");
    }

    let records: Vec<FlatRecord> = groups.iter().flat_map(Group::flatten).collect();
    let descriptions = distinct_normalized(records.iter().map(|r| r.description.as_str()));
    let packing_sizes = distinct_normalized(records.iter().map(|r| r.packing.as_str()));

    info!(
        header_row = resolution.header_row,
        groups = groups.len(),
        records = records.len(),
        "Flattened sheet"
    );

    FlattenedSheet {
        header_row: resolution.header_row,
        roles: resolution.roles.clone(),
        groups,
        records,
        descriptions,
        packing_sizes,
    }
}

fn distinct_normalized<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(normalize_text)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

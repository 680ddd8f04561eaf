//! Header Resolver
//!
//! Finds the header row near the top of a sheet and binds every field role to
//! a header column. Never fails: ambiguous sheets fall back to row 0 and to
//! fixed column positions.

use packtally_models::{
    normalize_text, BindingSource, CellGrid, CellValue, ColumnBinding, FieldRole, FieldRoleMap,
};
use serde::Serialize;
use tracing::debug;

use super::vocabulary::HeaderVocabulary;
use crate::config::DEFAULT_HEADER_SCAN_ROWS;

/// Detected header row and the role bindings read from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderResolution {
    pub header_row: usize,
    /// False when no row in the scan window matched and row 0 was assumed.
    pub detected: bool,
    pub roles: FieldRoleMap,
}

#[derive(Debug, Clone)]
pub struct HeaderResolver {
    vocabulary: HeaderVocabulary,
    scan_rows: usize,
}

impl Default for HeaderResolver {
    fn default() -> Self {
        Self::new(HeaderVocabulary::default())
    }
}

impl HeaderResolver {
    pub fn new(vocabulary: HeaderVocabulary) -> Self {
        Self {
            vocabulary,
            scan_rows: DEFAULT_HEADER_SCAN_ROWS,
        }
    }

    /// Configure how many leading rows are searched for the header
    pub fn with_scan_rows(mut self, rows: usize) -> Self {
        self.scan_rows = rows.max(1);
        self
    }

    /// Index of the first row in the scan window whose text contains a detection term.
    pub fn locate_header_row(&self, grid: &CellGrid) -> Option<usize> {
        (0..grid.row_count().min(self.scan_rows)).find(|&index| {
            let joined = grid
                .row(index)
                .iter()
                .map(|cell| cell.text())
                .collect::<Vec<_>>()
                .join(" ");
            self.vocabulary.is_header_text(&normalize_text(&joined))
        })
    }

    pub fn resolve(&self, grid: &CellGrid) -> HeaderResolution {
        let located = self.locate_header_row(grid);
        let header_row = located.unwrap_or(0);

        let labels: Vec<String> = grid.row(header_row).iter().map(CellValue::trimmed).collect();
        let normalized: Vec<String> = labels.iter().map(|l| normalize_text(l)).collect();

        let roles = FieldRoleMap::from_fn(|role| self.bind(role, &labels, &normalized));

        debug!(
            header_row,
            detected = located.is_some(),
            positional = roles.positional_count(),
            "Resolved sheet header"
        );

        HeaderResolution {
            header_row,
            detected: located.is_some(),
            roles,
        }
    }

    /// First label in column order matching the role, else the role's fixed position.
    fn bind(&self, role: FieldRole, labels: &[String], normalized: &[String]) -> ColumnBinding {
        if let Some(column) = normalized
            .iter()
            .position(|label| self.vocabulary.label_matches(role, label))
        {
            return ColumnBinding {
                label: display_label(labels, column),
                column: Some(column),
                source: BindingSource::Pattern,
            };
        }

        let position = role.position();
        if position < labels.len() {
            ColumnBinding {
                label: display_label(labels, position),
                column: Some(position),
                source: BindingSource::Positional,
            }
        } else {
            // Past the header width the column can never be read.
            ColumnBinding {
                label: role.as_str().to_string(),
                column: None,
                source: BindingSource::Positional,
            }
        }
    }
}

fn display_label(labels: &[String], column: usize) -> String {
    match labels.get(column) {
        Some(label) if !label.is_empty() => label.clone(),
        _ => format!("col{column}"),
    }
}

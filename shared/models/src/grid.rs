//! Raw cell grid handed over by whatever decoded the spreadsheet.
//!
//! Rows may be ragged. Every accessor is bounds-checked, so a short row simply
//! reads as blank cells past its end.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single raw cell: text, a number, or nothing at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// Cell rendered as text. Numbers use their shortest decimal form, so `25.0` reads `"25"`.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Empty => Cow::Borrowed(""),
        }
    }

    /// Trimmed text of the cell.
    pub fn trimmed(&self) -> String {
        self.text().trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::Empty => true,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Ordered rows of raw cells, as read from the first sheet of a workbook.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellGrid {
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl CellGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Builds a grid from plain text rows. Empty strings become blank cells.
    pub fn from_text_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| CellValue::from(cell.as_ref())).collect())
            .collect();
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row length in the grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Row by index; out-of-range rows read as empty.
    pub fn row(&self, index: usize) -> &[CellValue] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Trimmed text of a cell; missing cells read as an empty string.
    pub fn text(&self, row: usize, column: usize) -> String {
        self.cell(row, column)
            .map(CellValue::trimmed)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_read_blank() {
        let grid = CellGrid::from_text_rows(vec![vec!["a", "b", "c"], vec!["d"]]);

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.text(1, 0), "d");
        assert_eq!(grid.text(1, 2), "");
        assert_eq!(grid.text(9, 9), "");
        assert!(grid.row(5).is_empty());
    }

    #[test]
    fn test_number_cells_render_without_trailing_zero() {
        assert_eq!(CellValue::Number(25.0).text(), "25");
        assert_eq!(CellValue::Number(2.5).text(), "2.5");
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(CellValue::Text("   ".to_string()).is_blank());
    }

    #[test]
    fn test_grid_deserializes_mixed_cells() {
        let grid: CellGrid =
            serde_json::from_str(r#"{"rows": [["S.No", 1, null], ["", 2.5]]}"#).unwrap();

        assert_eq!(grid.cell(0, 0), Some(&CellValue::Text("S.No".to_string())));
        assert_eq!(grid.cell(0, 1), Some(&CellValue::Number(1.0)));
        assert_eq!(grid.cell(0, 2), Some(&CellValue::Empty));
        assert!(grid.cell(1, 0).unwrap().is_blank());
    }
}

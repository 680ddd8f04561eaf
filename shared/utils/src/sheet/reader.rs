//! Sheet Reader
//!
//! Decodes uploaded CSV and Excel (XLSX/XLS) files into a `CellGrid`. Only
//! the first worksheet of a workbook is read.

use anyhow::{Context, Result};
use calamine::{open_workbook_from_rs, DataType, Range, Reader, Xls, Xlsx};
use packtally_models::{CellGrid, CellValue};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{PacktallyError, PacktallyResult};

/// Supported sheet file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SheetFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Detect format from content type header
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "text/csv" | "application/csv" => Some(Self::Csv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            "application/vnd.ms-excel" => Some(Self::Xls),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xlsx => "XLSX",
            Self::Xls => "XLS",
        }
    }
}

/// Reads the first sheet of an uploaded file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetReader;

impl SheetReader {
    pub fn new() -> Self {
        Self
    }

    /// Decodes `data`. The format comes from `format`, then the file extension.
    pub fn read_bytes(
        &self,
        filename: &str,
        data: &[u8],
        format: Option<SheetFormat>,
    ) -> PacktallyResult<CellGrid> {
        let format = format
            .or_else(|| SheetFormat::from_extension(Path::new(filename)))
            .ok_or_else(|| PacktallyError::unsupported_format(filename))?;

        let grid = match format {
            SheetFormat::Csv => self.read_csv(data),
            SheetFormat::Xlsx => self.read_xlsx(data),
            SheetFormat::Xls => self.read_xls(data),
        }
        .map_err(|e| PacktallyError::sheet_decode(format!("{filename}: {e:#}")))?;

        debug!(filename, format = format.as_str(), rows = grid.row_count(), "Decoded sheet");
        Ok(grid)
    }

    /// Every CSV line is a row; no header line is assumed.
    ///
    /// Fields that are not valid UTF-8 (legacy Windows-1252 exports) are
    /// decoded lossily instead of failing the whole file.
    fn read_csv(&self, data: &[u8]) -> Result<CellGrid> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(data);

        let mut rows = Vec::new();
        let mut lossy_fields = 0usize;
        for (idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV line {}", idx + 1))?;
            let cells: Vec<CellValue> = record
                .iter()
                .map(|field| match std::str::from_utf8(field) {
                    Ok(text) => CellValue::from(text),
                    Err(_) => {
                        lossy_fields += 1;
                        CellValue::from(String::from_utf8_lossy(field).into_owned())
                    }
                })
                .collect();
            rows.push(cells);
        }

        if lossy_fields > 0 {
            warn!(lossy_fields, "CSV contained fields that are not valid UTF-8");
        }
        Ok(CellGrid::new(rows))
    }

    fn read_xlsx(&self, data: &[u8]) -> Result<CellGrid> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(data))
            .context("Failed to open Excel workbook")?;

        match workbook.worksheet_range_at(0) {
            Some(range) => Ok(range_to_grid(&range.context("Failed to read worksheet")?)),
            None => {
                warn!("Workbook has no worksheets");
                Ok(CellGrid::default())
            }
        }
    }

    fn read_xls(&self, data: &[u8]) -> Result<CellGrid> {
        let mut workbook: Xls<_> = open_workbook_from_rs(Cursor::new(data))
            .context("Failed to open legacy Excel workbook")?;

        match workbook.worksheet_range_at(0) {
            Some(range) => Ok(range_to_grid(&range.context("Failed to read worksheet")?)),
            None => {
                warn!("Workbook has no worksheets");
                Ok(CellGrid::default())
            }
        }
    }
}

/// Converts a calamine range into a grid anchored at A1.
///
/// calamine trims leading empty rows and columns off the used range; they are
/// padded back so column positions match what the user sees in the sheet.
fn range_to_grid(range: &Range<DataType>) -> CellGrid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; col_offset];
        cells.extend(row.iter().map(to_cell));
        rows.push(cells);
    }
    CellGrid::new(rows)
}

fn to_cell(value: &DataType) -> CellValue {
    match value {
        DataType::Empty => CellValue::Empty,
        DataType::String(s) => CellValue::from(s.as_str()),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        DataType::Error(_) => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

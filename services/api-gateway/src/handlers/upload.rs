//! Helpers shared by the upload handlers: reading multipart files and grid
//! payloads, and flattening them off the async runtime.

use axum::{body::Bytes, extract::multipart::Field};
use packtally_models::{BindingSource, CellGrid, CellValue, FlattenedSheet};
use packtally_utils::{PacktallyError, SheetFlattener, SheetFormat, SheetReader};
use serde::Deserialize;

use crate::error::ApiResult;

/// A sheet file pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub format: Option<SheetFormat>,
    pub data: Bytes,
}

impl UploadedFile {
    pub async fn from_field(field: Field<'_>) -> ApiResult<Self> {
        let filename = field
            .file_name()
            .or_else(|| field.name())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload.csv".to_string());
        let format = field.content_type().and_then(SheetFormat::from_content_type);
        let data = field.bytes().await?;

        Ok(Self {
            filename,
            format,
            data,
        })
    }
}

/// A sheet sent as JSON rows instead of a file.
#[derive(Debug, Clone, Deserialize)]
pub struct GridUpload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl GridUpload {
    pub fn source(&self, fallback: &str) -> String {
        self.name.clone().unwrap_or_else(|| fallback.to_string())
    }

    pub fn into_grid(self) -> CellGrid {
        CellGrid::new(self.rows)
    }
}

/// Decodes and flattens a file on the blocking pool.
pub async fn flatten_file<F>(file: UploadedFile, flatten: F) -> ApiResult<FlattenedSheet>
where
    F: FnOnce(&CellGrid) -> FlattenedSheet + Send + 'static,
{
    let sheet = tokio::task::spawn_blocking(move || {
        let grid = SheetReader::new().read_bytes(&file.filename, &file.data, file.format)?;
        Ok::<_, PacktallyError>(flatten(&grid))
    })
    .await??;
    Ok(sheet)
}

/// Flattens an already-decoded grid on the blocking pool.
pub async fn flatten_grid<F>(grid: CellGrid, flatten: F) -> ApiResult<FlattenedSheet>
where
    F: FnOnce(&CellGrid) -> FlattenedSheet + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || flatten(&grid)).await?)
}

/// Advisory notes about a flattened sheet. None of them stop processing.
pub fn sheet_warnings(label: &str, sheet: &FlattenedSheet) -> Vec<String> {
    let mut warnings = Vec::new();

    if sheet.is_empty() {
        warnings.push(format!("No data found in the {label} sheet."));
    }

    let positional: Vec<&str> = sheet
        .roles
        .iter()
        .filter(|(_, binding)| binding.source == BindingSource::Positional)
        .map(|(role, _)| role.as_str())
        .collect();
    if !positional.is_empty() {
        warnings.push(format!(
            "No matching {label} header for: {}; fixed column positions were used",
            positional.join(", ")
        ));
    }

    warnings
}

/// Keeps a clone of `flattener` so it can move into a blocking task.
pub fn flatten_using(flattener: &SheetFlattener) -> impl FnOnce(&CellGrid) -> FlattenedSheet + Send + 'static {
    let flattener = flattener.clone();
    move |grid| flattener.flatten(grid)
}

//! Packing Sheet Handlers
//!
//! Upload a packing/purchase sheet, flatten it, and browse the flat records
//! with description and packing filters.

use axum::{
    extract::{Multipart, Query, State},
    response::Json,
};
use packtally_models::{FieldRole, FlatRecord, FlattenedSheet};
use packtally_utils::{total_quantity, validate_model, PacktallyError, RecordFilter};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

use super::upload::{flatten_file, flatten_grid, flatten_using, sheet_warnings, GridUpload, UploadedFile};
use crate::error::ApiResult;
use crate::session::StoredSheet;
use crate::AppState;

/// Packing upload response
#[derive(Debug, Serialize)]
pub struct PackingUploadResponse {
    pub upload_id: Uuid,
    pub source: String,
    pub header_row: usize,
    pub columns: BTreeMap<FieldRole, String>,
    pub group_count: usize,
    pub record_count: usize,
    pub total_quantity: f64,
    pub descriptions: Vec<String>,
    pub packing_sizes: Vec<String>,
    pub records: Vec<FlatRecord>,
    pub warnings: Vec<String>,
}

impl PackingUploadResponse {
    fn new(stored: &StoredSheet) -> Self {
        let sheet: &FlattenedSheet = &stored.sheet;
        Self {
            upload_id: stored.upload_id,
            source: stored.source.clone(),
            header_row: sheet.header_row,
            columns: sheet.roles.labels(),
            group_count: sheet.groups.len(),
            record_count: sheet.records.len(),
            total_quantity: total_quantity(&sheet.records),
            descriptions: sheet.descriptions.clone(),
            packing_sizes: sheet.packing_sizes.clone(),
            records: sheet.records.clone(),
            warnings: sheet_warnings("packing", sheet),
        }
    }
}

/// Filtered view over the stored packing records
#[derive(Debug, Serialize)]
pub struct PackingRecordsResponse {
    pub upload_id: Uuid,
    pub source: String,
    pub filter: RecordFilter,
    pub total_records: usize,
    pub matched: usize,
    pub total_quantity: f64,
    pub descriptions: Vec<String>,
    pub packing_sizes: Vec<String>,
    pub records: Vec<FlatRecord>,
}

/// Upload and flatten a packing sheet
///
/// POST /api/v1/packing/upload
pub async fn upload_packing_sheet(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<PackingUploadResponse>> {
    let field = multipart
        .next_field()
        .await?
        .ok_or_else(|| PacktallyError::validation("file", "No file provided"))?;
    let file = UploadedFile::from_field(field).await?;
    let source = file.filename.clone();

    let sheet = flatten_file(file, flatten_using(&state.packing)).await?;
    Ok(Json(store_packing(&state, source, sheet).await))
}

/// Flatten a packing sheet sent as JSON rows
///
/// POST /api/v1/packing/grid
pub async fn submit_packing_grid(
    State(state): State<AppState>,
    Json(upload): Json<GridUpload>,
) -> ApiResult<Json<PackingUploadResponse>> {
    let source = upload.source("grid");
    let sheet = flatten_grid(upload.into_grid(), flatten_using(&state.packing)).await?;
    Ok(Json(store_packing(&state, source, sheet).await))
}

async fn store_packing(state: &AppState, source: String, sheet: FlattenedSheet) -> PackingUploadResponse {
    let stored = StoredSheet::new(source, sheet);
    let response = PackingUploadResponse::new(&stored);

    info!(
        upload_id = %stored.upload_id,
        source = %stored.source,
        records = response.record_count,
        "Stored packing sheet"
    );
    state.workspace.write().await.replace_packing(stored);

    response
}

/// Stored packing records, narrowed by description and packing substrings
///
/// GET /api/v1/packing/records?description=&packing=
pub async fn get_packing_records(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> ApiResult<Json<PackingRecordsResponse>> {
    validate_model(&filter)?;

    let stored = state
        .workspace
        .read()
        .await
        .packing()
        .cloned()
        .ok_or_else(|| PacktallyError::not_found("packing sheet"))?;

    let sheet = &stored.sheet;
    let matched = filter.apply(&sheet.records);

    Ok(Json(PackingRecordsResponse {
        upload_id: stored.upload_id,
        source: stored.source.clone(),
        total_records: sheet.records.len(),
        matched: matched.len(),
        total_quantity: total_quantity(matched.iter().copied()),
        descriptions: sheet.descriptions.clone(),
        packing_sizes: sheet.packing_sizes.clone(),
        records: matched.into_iter().cloned().collect(),
        filter,
    }))
}

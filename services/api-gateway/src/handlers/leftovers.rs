//! Leftover Bags Handlers
//!
//! Takes a purchase sheet and a usage sheet, reconciles them per
//! (description, packing) and serves the filtered leftover table.

use axum::{
    extract::{Multipart, Query, State},
    response::Json,
};
use packtally_models::{FlattenedSheet, ReconciliationRow};
use packtally_utils::{validate_model, LeftoverReport, LeftoverSummary, PacktallyError, RecordFilter};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::upload::{flatten_file, flatten_grid, flatten_using, sheet_warnings, GridUpload, UploadedFile};
use crate::error::ApiResult;
use crate::session::StoredReport;
use crate::AppState;

const PURCHASE_FIELD: &str = "purchase";
const USAGE_FIELD: &str = "usage";

#[derive(Debug, Deserialize)]
pub struct LeftoverGridRequest {
    pub purchase: GridUpload,
    pub usage: GridUpload,
}

#[derive(Debug, Serialize)]
pub struct LeftoverResponse {
    pub upload_id: Uuid,
    pub purchase_source: String,
    pub usage_source: String,
    pub filter: RecordFilter,
    pub rows: Vec<ReconciliationRow>,
    /// Totals over the rows shown, not the whole report.
    pub summary: LeftoverSummary,
    pub varieties: Vec<String>,
    pub packing_sizes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl LeftoverResponse {
    fn new(stored: &StoredReport, filter: RecordFilter, warnings: Vec<String>) -> Self {
        let report = &stored.report;
        let rows: Vec<ReconciliationRow> = filter.apply(&report.rows).into_iter().cloned().collect();
        Self {
            upload_id: stored.upload_id,
            purchase_source: stored.purchase_source.clone(),
            usage_source: stored.usage_source.clone(),
            summary: LeftoverSummary::from_rows(&rows),
            rows,
            varieties: report.varieties.clone(),
            packing_sizes: report.packing_sizes.clone(),
            filter,
            warnings,
        }
    }
}

/// Upload a purchase sheet and a usage sheet
///
/// POST /api/v1/leftovers/upload (multipart fields `purchase` and `usage`)
pub async fn upload_leftover_sheets(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<LeftoverResponse>> {
    let mut purchase = None;
    let mut usage = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(PURCHASE_FIELD) => purchase = Some(UploadedFile::from_field(field).await?),
            Some(USAGE_FIELD) => usage = Some(UploadedFile::from_field(field).await?),
            _ => {}
        }
    }

    let purchase = purchase.ok_or_else(|| PacktallyError::validation(PURCHASE_FIELD, "No purchase sheet provided"))?;
    let usage = usage.ok_or_else(|| PacktallyError::validation(USAGE_FIELD, "No usage sheet provided"))?;
    let sources = (purchase.filename.clone(), usage.filename.clone());

    let calculator = &state.leftovers;
    let (purchase, usage) = tokio::try_join!(
        flatten_file(purchase, flatten_using(calculator.purchase_flattener())),
        flatten_file(usage, flatten_using(calculator.usage_flattener())),
    )?;

    Ok(Json(store_report(&state, sources, &purchase, &usage).await))
}

/// Reconcile purchase and usage sheets sent as JSON rows
///
/// POST /api/v1/leftovers/grid
pub async fn submit_leftover_grids(
    State(state): State<AppState>,
    Json(request): Json<LeftoverGridRequest>,
) -> ApiResult<Json<LeftoverResponse>> {
    let sources = (request.purchase.source(PURCHASE_FIELD), request.usage.source(USAGE_FIELD));

    let calculator = &state.leftovers;
    let (purchase, usage) = tokio::try_join!(
        flatten_grid(request.purchase.into_grid(), flatten_using(calculator.purchase_flattener())),
        flatten_grid(request.usage.into_grid(), flatten_using(calculator.usage_flattener())),
    )?;

    Ok(Json(store_report(&state, sources, &purchase, &usage).await))
}

async fn store_report(
    state: &AppState,
    (purchase_source, usage_source): (String, String),
    purchase: &FlattenedSheet,
    usage: &FlattenedSheet,
) -> LeftoverResponse {
    let mut warnings = sheet_warnings(PURCHASE_FIELD, purchase);
    warnings.extend(sheet_warnings(USAGE_FIELD, usage));

    let stored = StoredReport::new(purchase_source, usage_source, LeftoverReport::from_sheets(purchase, usage));
    let response = LeftoverResponse::new(&stored, RecordFilter::default(), warnings);

    info!(
        upload_id = %stored.upload_id,
        keys = stored.report.summary.keys,
        "Stored leftover report"
    );
    state.workspace.write().await.replace_leftovers(stored);

    response
}

/// Stored leftover rows, narrowed by description and packing substrings
///
/// GET /api/v1/leftovers?description=&packing=
pub async fn get_leftovers(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> ApiResult<Json<LeftoverResponse>> {
    validate_model(&filter)?;

    let stored = state
        .workspace
        .read()
        .await
        .leftovers()
        .cloned()
        .ok_or_else(|| PacktallyError::not_found("leftover report"))?;

    Ok(Json(LeftoverResponse::new(&stored, filter, Vec::new())))
}

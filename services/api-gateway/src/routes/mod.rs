use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/health/detailed", get(detailed_health_check))
        .route("/packing/upload", post(upload_packing_sheet))
        .route("/packing/grid", post(submit_packing_grid))
        .route("/packing/records", get(get_packing_records))
        .route("/leftovers/upload", post(upload_leftover_sheets))
        .route("/leftovers/grid", post(submit_leftover_grids))
        .route("/leftovers", get(get_leftovers))
}

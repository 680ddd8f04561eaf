use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let workspace = state.workspace.read().await;

    let packing = match workspace.packing() {
        Some(stored) => json!({
            "status": "loaded",
            "source": stored.source,
            "records": stored.sheet.records.len(),
            "stored_at": stored.stored_at.to_rfc3339(),
        }),
        None => json!({"status": "empty"}),
    };

    let leftovers = match workspace.leftovers() {
        Some(stored) => json!({
            "status": "loaded",
            "purchase_source": stored.purchase_source,
            "usage_source": stored.usage_source,
            "keys": stored.report.summary.keys,
            "stored_at": stored.stored_at.to_rfc3339(),
        }),
        None => json!({"status": "empty"}),
    };

    Json(json!({
        "status": "healthy",
        "service": "packtally-api-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "config": {
            "header_scan_rows": state.config.sheet.header_scan_rows,
            "max_request_size": state.config.server.max_request_size,
        },
        "workspace": {
            "packing": packing,
            "leftovers": leftovers,
        }
    }))
}

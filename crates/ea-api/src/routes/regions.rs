//! Region table endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /api/v1/regions: canonical regions and alias count.
pub async fn list_regions(State(state): State<AppState>) -> Json<Value> {
    let aliases = state.classifier.aliases();
    Json(json!({
        "regions": aliases.regions(),
        "aliases": aliases.len(),
    }))
}

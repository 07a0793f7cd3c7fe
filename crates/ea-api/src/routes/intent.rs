//! Query resolution endpoints.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use ea_intent::{router, temporal};
use ea_protocol::{IntentEnvelope, TimeWindow};

/// Request body carrying a natural-language query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Query text. Missing or blank resolves to `free_text`.
    #[serde(default)]
    pub query: String,
}

impl QueryRequest {
    fn checked(self, state: &AppState) -> ApiResult<String> {
        let chars = self.query.chars().count();
        if chars > state.max_query_chars {
            return Err(ApiError::BadRequest(format!(
                "query is {chars} characters, limit is {}",
                state.max_query_chars
            )));
        }
        Ok(self.query)
    }
}

/// POST /api/v1/intent: resolve a query into an intent and query plan.
pub async fn resolve_intent(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<IntentEnvelope>> {
    let query = req.checked(&state)?;
    let resolution = state.classifier.resolve(&query).await;
    let plan = router::plan(&resolution.intent, &query);

    tracing::info!(
        action = %resolution.intent.action,
        region = resolution.intent.region.as_deref(),
        source = ?resolution.source,
        plan = plan.kind(),
        "query resolved"
    );

    Ok(Json(IntentEnvelope::new(
        query,
        resolution.intent,
        resolution.source,
        plan,
    )))
}

/// POST /api/v1/extract: date window only.
pub async fn extract_window(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<TimeWindow>> {
    let query = req.checked(&state)?;
    Ok(Json(temporal::extract(&query)))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::ActionKind;
use crate::plan::QueryPlan;
use crate::window::TimeWindow;

/// Structured reading of a natural-language query.
///
/// Serializes flat: `{action, region, year, start_date, end_date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Operation the query asks for.
    #[serde(default)]
    pub action: ActionKind,
    /// Canonical region named in the query.
    #[serde(default)]
    pub region: Option<String>,
    /// Calendar year named in the query (1900-2099).
    #[serde(default)]
    pub year: Option<i32>,
    /// Date filter extracted from the query.
    #[serde(flatten)]
    pub window: TimeWindow,
}

impl Intent {
    /// Intent with no filters: `free_text` and every field null.
    pub fn free_text() -> Self {
        Self {
            action: ActionKind::FreeText,
            region: None,
            year: None,
            window: TimeWindow::none(),
        }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::free_text()
    }
}

/// Which resolution path produced an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    /// Blank query short-circuit.
    Empty,
    /// Ordered keyword rule table.
    Rules,
    /// External language-model classifier.
    Fallback,
}

/// API response wrapping a resolved intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentEnvelope {
    /// Unique resolution ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Original query text.
    pub query: String,
    pub intent: Intent,
    pub source: IntentSource,
    /// Downstream query the intent routes to.
    pub plan: QueryPlan,
    pub resolved_at: DateTime<Utc>,
}

impl IntentEnvelope {
    pub fn new(
        query: impl Into<String>,
        intent: Intent,
        source: IntentSource,
        plan: QueryPlan,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            query: query.into(),
            intent,
            source,
            plan,
            resolved_at: Utc::now(),
        }
    }
}

//! Shared test harness for E2E integration tests.
//!
//! Drives the real Axum router in-process via `tower::oneshot`, with an
//! optional Ollama fallback pointed at a wiremock server.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::MockServer;

use ea_api::routes::build_router;
use ea_api::state::AppState;
use ea_intent::{ActionKind, IntentClassifier, OllamaConfig, OllamaModel, Rule, RuleTable};

/// End-to-end harness wrapping the API router.
pub struct TestHarness {
    pub state: AppState,
    pub router: Router,
}

impl TestHarness {
    /// Default region list (Central, East, North, South, West), rules only.
    pub fn with_sample_regions() -> Self {
        Self::from_state(AppState::with_sample_regions())
    }

    /// Custom region list, rules only.
    pub fn with_regions(regions: &[&str]) -> Self {
        Self::from_state(AppState::new(IntentClassifier::new(regions)))
    }

    /// Standard rule table plus an Ollama fallback at `server`.
    pub fn with_fallback(server: &MockServer) -> Self {
        let classifier = IntentClassifier::new(sample_regions())
            .with_fallback(Arc::new(ollama_for(server)), Duration::from_secs(2));
        Self::from_state(AppState::new(classifier))
    }

    /// Demand-only rule table (no catch-all) plus an Ollama fallback at
    /// `server`, so non-demand queries reach the model.
    pub fn with_partial_rules_and_fallback(server: &MockServer, limit: Duration) -> Self {
        let rules = RuleTable::new(vec![
            Rule::keywords(&["peak", "highest"], ActionKind::PeakDemand),
            Rule::keywords(&["demand"], ActionKind::AllDemands),
        ]);
        let classifier = IntentClassifier::new(sample_regions())
            .with_rules(rules)
            .with_fallback(Arc::new(ollama_for(server)), limit);
        Self::from_state(AppState::new(classifier))
    }

    fn from_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// POST /api/v1/intent.
    pub async fn resolve(&self, query: &str) -> (StatusCode, Value) {
        self.post("/api/v1/intent", json!({ "query": query })).await
    }

    /// POST /api/v1/extract.
    pub async fn extract(&self, query: &str) -> (StatusCode, Value) {
        self.post("/api/v1/extract", json!({ "query": query })).await
    }

    /// GET a path and parse the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read_json(response).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read_json(response).await
    }
}

pub fn sample_regions() -> Vec<&'static str> {
    vec!["Central", "East", "North", "South", "West"]
}

/// Ollama chat response body with `content` as the assistant message.
pub fn ollama_response(content: &str) -> Value {
    json!({
        "model": "phi3:mini",
        "message": {
            "role": "assistant",
            "content": content
        },
        "done": true
    })
}

fn ollama_for(server: &MockServer) -> OllamaModel {
    OllamaModel::new(OllamaConfig {
        host: server.uri(),
        model: "phi3:mini".into(),
        timeout_secs: 5,
        enabled: true,
    })
    .unwrap()
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

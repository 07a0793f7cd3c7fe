//! Shared application state for the Axum server.

use std::sync::Arc;

use ea_intent::{IntentClassifier, OllamaModel};

use crate::config::ApiConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Intent classifier (alias table built once at startup).
    pub classifier: Arc<IntentClassifier>,
    /// Longest accepted query, in characters.
    pub max_query_chars: usize,
}

impl AppState {
    /// Wrap an existing classifier with default limits.
    pub fn new(classifier: IntentClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            max_query_chars: ApiConfig::default().max_query_chars,
        }
    }

    /// Build state from configuration, wiring the fallback model if enabled.
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let mut classifier = IntentClassifier::new(&config.regions);
        if config.fallback.enabled {
            tracing::info!(
                host = %config.fallback.host,
                model = %config.fallback.model,
                "language-model fallback enabled"
            );
            let model = OllamaModel::new(config.fallback.clone())?;
            classifier = classifier.with_fallback(Arc::new(model), config.fallback.timeout());
        }
        Ok(Self {
            classifier: Arc::new(classifier),
            max_query_chars: config.max_query_chars,
        })
    }

    /// State with the default region list (for tests and development).
    pub fn with_sample_regions() -> Self {
        Self::new(IntentClassifier::new(&ApiConfig::default().regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_has_no_fallback() {
        let state = AppState::from_config(&ApiConfig::default()).unwrap();
        assert!(!state.classifier.has_fallback());
        assert_eq!(state.classifier.aliases().regions().len(), 5);
    }

    #[test]
    fn from_config_with_fallback() {
        let mut config = ApiConfig::default();
        config.fallback.enabled = true;
        config.max_query_chars = 10;
        let state = AppState::from_config(&config).unwrap();
        assert!(state.classifier.has_fallback());
        assert_eq!(state.max_query_chars, 10);
    }
}

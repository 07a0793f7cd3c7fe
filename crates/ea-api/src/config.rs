//! API server configuration, loadable from TOML with environment overrides.

use anyhow::Context;
use serde::Deserialize;

use ea_intent::OllamaConfig;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Canonical regions, in alias registration order.
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    /// Longest accepted query, in characters.
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
    /// Language-model fallback settings. Disabled unless configured.
    #[serde(default)]
    pub fallback: OllamaConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_regions() -> Vec<String> {
    ["Central", "East", "North", "South", "West"]
        .map(String::from)
        .to_vec()
}

fn default_max_query_chars() -> usize {
    2000
}

impl ApiConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config: Self = toml::from_str(&contents).with_context(|| format!("parsing {path}"))?;
        Ok(config)
    }

    /// Load from `EA_CONFIG` (if set), then apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var("EA_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `EA_HOST`, `EA_PORT`, `EA_REGIONS` and `EA_FALLBACK_ENABLED`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(host) = lookup("EA_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("EA_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("invalid EA_PORT '{port}'"))?;
        }
        if let Some(regions) = lookup("EA_REGIONS") {
            self.regions = regions
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(enabled) = lookup("EA_FALLBACK_ENABLED") {
            self.fallback.enabled = enabled.eq_ignore_ascii_case("true") || enabled == "1";
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            regions: default_regions(),
            max_query_chars: default_max_query_chars(),
            fallback: OllamaConfig::default(),
        }
    }
}

//! Intent classifier: query text → [`Intent`].
//!
//! Region, year and date window are detected independently; the action
//! comes from the first matching rule in the [`RuleTable`]. With the
//! standard table every query matches a rule (the table ends in a
//! `free_text` catch-all), so the language-model fallback is only consulted
//! when a caller installs a partial table.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use regex::Regex;
use tokio::time::timeout;

use crate::fallback::{LanguageModel, build_prompt, interpret};
use crate::region::RegionAliases;
use crate::rules::RuleTable;
use crate::temporal;
use ea_protocol::{ActionKind, Intent, IntentSource};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

/// An intent plus the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub intent: Intent,
    pub source: IntentSource,
}

struct Fallback {
    model: Arc<dyn LanguageModel>,
    timeout: Duration,
}

/// Rule-based intent classifier with an optional language-model fallback.
///
/// Immutable after construction and safe to share across tasks.
pub struct IntentClassifier {
    aliases: RegionAliases,
    rules: RuleTable,
    fallback: Option<Fallback>,
}

impl IntentClassifier {
    /// Classifier over `regions` with the standard rule table and no fallback.
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            aliases: RegionAliases::new(regions),
            rules: RuleTable::standard(),
            fallback: None,
        }
    }

    /// Replace the rule table.
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Consult `model` when no rule matches, giving up after `limit`.
    pub fn with_fallback(mut self, model: Arc<dyn LanguageModel>, limit: Duration) -> Self {
        self.fallback = Some(Fallback {
            model,
            timeout: limit,
        });
        self
    }

    pub fn aliases(&self) -> &RegionAliases {
        &self.aliases
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Rule-only classification against the local date.
    pub fn parse(&self, query: &str) -> Intent {
        self.parse_at(query, today())
    }

    /// Rule-only classification with relative dates anchored on `today`.
    ///
    /// A query no rule matches resolves to `free_text`, keeping whatever
    /// region, year and window were detected.
    pub fn parse_at(&self, query: &str, today: NaiveDate) -> Intent {
        match self.classify_rules(query, today) {
            Ok(intent) | Err(intent) => intent,
        }
    }

    /// Full classification against the local date, including the fallback.
    pub async fn resolve(&self, query: &str) -> Resolution {
        self.resolve_at(query, today()).await
    }

    /// Full classification with relative dates anchored on `today`.
    pub async fn resolve_at(&self, query: &str, today: NaiveDate) -> Resolution {
        if query.trim().is_empty() {
            return Resolution {
                intent: Intent::free_text(),
                source: IntentSource::Empty,
            };
        }
        match self.classify_rules(query, today) {
            Ok(intent) => Resolution {
                intent,
                source: IntentSource::Rules,
            },
            Err(unmatched) => match &self.fallback {
                Some(fallback) => Resolution {
                    intent: self.ask_model(fallback, query, unmatched).await,
                    source: IntentSource::Fallback,
                },
                None => Resolution {
                    intent: unmatched,
                    source: IntentSource::Rules,
                },
            },
        }
    }

    /// `Ok` when a rule decided the action, `Err` with a `free_text` intent
    /// carrying the detected filters when none did.
    fn classify_rules(&self, query: &str, today: NaiveDate) -> Result<Intent, Intent> {
        if query.trim().is_empty() {
            return Ok(Intent::free_text());
        }

        let mut intent = Intent {
            action: ActionKind::FreeText,
            region: self.aliases.detect(query).map(str::to_string),
            year: detect_year(query),
            window: temporal::extract_at(query, today),
        };

        match self.rules.classify(query) {
            Some(action) => {
                intent.action = action;
                Ok(intent)
            }
            None => {
                tracing::debug!("no action rule matched");
                Err(intent)
            }
        }
    }

    /// One fallback call. Every failure leaves the intent as `free_text`.
    async fn ask_model(&self, fallback: &Fallback, query: &str, mut intent: Intent) -> Intent {
        let prompt = build_prompt(query);
        let response = match timeout(fallback.timeout, fallback.model.complete(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!(model = fallback.model.name(), error = %e, "fallback classification failed");
                return intent;
            }
            Err(_) => {
                tracing::warn!(
                    model = fallback.model.name(),
                    timeout_ms = fallback.timeout.as_millis() as u64,
                    "fallback classification timed out"
                );
                return intent;
            }
        };

        let verdict = match interpret(&response) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(model = fallback.model.name(), error = %e, "unusable fallback output");
                return intent;
            }
        };

        tracing::debug!(
            model = fallback.model.name(),
            action = %verdict.action,
            "fallback classified query"
        );
        intent.action = verdict.action;
        if let Some(region) = verdict
            .region
            .as_deref()
            .and_then(|r| self.aliases.resolve(r))
        {
            intent.region = Some(region.to_string());
        }
        if verdict.year.is_some() {
            intent.year = verdict.year;
        }
        intent
    }
}

/// First standalone year in 1900-2099.
pub fn detect_year(query: &str) -> Option<i32> {
    YEAR.find(query).and_then(|m| m.as_str().parse().ok())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

//! Ordered keyword rules: query text → [`ActionKind`].
//!
//! Rules are evaluated top to bottom and the first rule with a matching
//! keyword decides the action, regardless of where the keywords appear in
//! the text. "average demand and peak usage" is a peak query because the
//! peak rule sits above the average rule.

use ea_protocol::ActionKind;

/// Narrows a rule's action when extra keywords are also present.
#[derive(Debug, Clone, Copy)]
pub struct Refinement {
    pub keywords: &'static [&'static str],
    pub action: ActionKind,
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Substrings that trigger the rule. Empty means "always".
    pub keywords: &'static [&'static str],
    pub action: ActionKind,
    pub refinement: Option<Refinement>,
}

impl Rule {
    /// Fire when any keyword is a substring of the lowercased query.
    pub const fn keywords(keywords: &'static [&'static str], action: ActionKind) -> Self {
        Self {
            keywords,
            action,
            refinement: None,
        }
    }

    /// Fire unconditionally.
    pub const fn catch_all(action: ActionKind) -> Self {
        Self::keywords(&[], action)
    }

    /// Switch to `action` when any of `keywords` is also present.
    pub const fn refined(
        mut self,
        keywords: &'static [&'static str],
        action: ActionKind,
    ) -> Self {
        self.refinement = Some(Refinement { keywords, action });
        self
    }

    pub fn is_catch_all(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Action for an already-lowercased query, or `None` if the rule does not fire.
    pub fn evaluate(&self, lower: &str) -> Option<ActionKind> {
        if !self.is_catch_all() && !contains_any(lower, self.keywords) {
            return None;
        }
        match self.refinement {
            Some(r) if contains_any(lower, r.keywords) => Some(r.action),
            _ => Some(self.action),
        }
    }
}

const STANDARD_RULES: [Rule; 8] = [
    Rule::keywords(
        &["peak", "highest", "max demand", "top load"],
        ActionKind::PeakDemand,
    ),
    Rule::keywords(
        &[
            "total demand",
            "sum of demand",
            "aggregate demand",
            "overall demand",
        ],
        ActionKind::TotalDemand,
    ),
    Rule::keywords(
        &["average demand", "mean demand", "typical demand"],
        ActionKind::AverageDemand,
    ),
    Rule::keywords(&["demand", "demands"], ActionKind::AllDemands),
    Rule::keywords(
        &[
            "average outage",
            "mean outage duration",
            "typical outage",
        ],
        ActionKind::AverageOutageDuration,
    ),
    Rule::keywords(
        &["outage", "blackout", "power cut", "failure report"],
        ActionKind::OutageSummary,
    )
    .refined(
        &[
            "by region",
            "by area",
            "count",
            "total",
            "hours",
            "how many",
            "duration",
        ],
        ActionKind::StructuredOutageSummary,
    ),
    Rule::keywords(
        &["anomaly", "abnormal", "irregular", "unusual"],
        ActionKind::AnomalyDetection,
    ),
    Rule::catch_all(ActionKind::FreeText),
];

/// Priority-ordered sequence of rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Table from an explicit rule list. Without a catch-all at the end the
    /// table can leave queries unmatched.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Demand, outage and anomaly rules, ending in a `free_text` catch-all.
    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }

    /// Action from the first firing rule, or `None` if no rule fires.
    pub fn classify(&self, query: &str) -> Option<ActionKind> {
        let lower = query.to_lowercase();
        self.rules.iter().enumerate().find_map(|(priority, rule)| {
            let action = rule.evaluate(&lower)?;
            tracing::debug!(priority, action = %action, "action rule matched");
            Some(action)
        })
    }

    /// Whether every query is guaranteed a match.
    pub fn is_total(&self) -> bool {
        self.rules.iter().any(Rule::is_catch_all)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Check if the text contains any of the given patterns.
fn contains_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of operations a resolved query can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Single highest demand reading.
    PeakDemand,
    /// Every demand reading matching the filters.
    AllDemands,
    /// Sum of demand per region.
    TotalDemand,
    /// Mean demand per region.
    AverageDemand,
    /// Narrative outage summary (answered from report text).
    OutageSummary,
    /// Outage counts and hours aggregated per region.
    StructuredOutageSummary,
    /// Mean outage duration per region.
    AverageOutageDuration,
    /// Demand anomaly scan.
    AnomalyDetection,
    /// No rule applied; answered by free-text retrieval.
    #[default]
    FreeText,
}

impl ActionKind {
    /// Every action, in declaration order.
    pub const ALL: [ActionKind; 9] = [
        ActionKind::PeakDemand,
        ActionKind::AllDemands,
        ActionKind::TotalDemand,
        ActionKind::AverageDemand,
        ActionKind::OutageSummary,
        ActionKind::StructuredOutageSummary,
        ActionKind::AverageOutageDuration,
        ActionKind::AnomalyDetection,
        ActionKind::FreeText,
    ];

    /// Wire name of the action (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::PeakDemand => "peak_demand",
            ActionKind::AllDemands => "all_demands",
            ActionKind::TotalDemand => "total_demand",
            ActionKind::AverageDemand => "average_demand",
            ActionKind::OutageSummary => "outage_summary",
            ActionKind::StructuredOutageSummary => "structured_outage_summary",
            ActionKind::AverageOutageDuration => "average_outage_duration",
            ActionKind::AnomalyDetection => "anomaly_detection",
            ActionKind::FreeText => "free_text",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not an exact action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

use serde::{Deserialize, Serialize};

use crate::window::TimeWindow;

/// Downstream query an intent dispatches to.
///
/// Execution lives outside the resolver; a plan only names the query and
/// carries its filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryPlan {
    /// Highest single demand reading.
    PeakDemand {
        region: Option<String>,
        window: TimeWindow,
    },
    /// Peak demand and its date for every region.
    RegionalPeakSummary,
    AllDemands {
        region: Option<String>,
        window: TimeWindow,
    },
    TotalDemand {
        region: Option<String>,
        window: TimeWindow,
    },
    AverageDemand {
        region: Option<String>,
        window: TimeWindow,
    },
    /// Mean outage duration per region, optionally for one calendar year.
    AverageOutageDuration {
        region: Option<String>,
        year: Option<i32>,
    },
    /// Outage count and total hours per region.
    OutageSummaryByRegion {
        region: Option<String>,
        year: Option<i32>,
        window: TimeWindow,
    },
    AnomalyScan,
    /// Similarity search over outage report narratives.
    NarrativeSearch {
        query: String,
        region: Option<String>,
        window: TimeWindow,
    },
}

impl QueryPlan {
    /// Short name of the plan variant (matches the serde tag).
    pub fn kind(&self) -> &'static str {
        match self {
            QueryPlan::PeakDemand { .. } => "peak_demand",
            QueryPlan::RegionalPeakSummary => "regional_peak_summary",
            QueryPlan::AllDemands { .. } => "all_demands",
            QueryPlan::TotalDemand { .. } => "total_demand",
            QueryPlan::AverageDemand { .. } => "average_demand",
            QueryPlan::AverageOutageDuration { .. } => "average_outage_duration",
            QueryPlan::OutageSummaryByRegion { .. } => "outage_summary_by_region",
            QueryPlan::AnomalyScan => "anomaly_scan",
            QueryPlan::NarrativeSearch { .. } => "narrative_search",
        }
    }
}

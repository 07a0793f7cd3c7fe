//! Maps a resolved intent to the downstream query it dispatches to.

use ea_protocol::{ActionKind, Intent, QueryPlan};

/// Phrases that turn a peak-demand question into a per-region summary.
const PER_REGION: &[&str] = &["each region", "by region", "all regions"];

/// Downstream plan for `intent`. `query` is the original text, used for
/// per-region peak detection and carried into narrative searches.
pub fn plan(intent: &Intent, query: &str) -> QueryPlan {
    let region = intent.region.clone();
    let window = intent.window;

    match intent.action {
        ActionKind::PeakDemand => {
            let lower = query.to_lowercase();
            if PER_REGION.iter().any(|p| lower.contains(p)) {
                QueryPlan::RegionalPeakSummary
            } else {
                QueryPlan::PeakDemand { region, window }
            }
        }
        ActionKind::AllDemands => QueryPlan::AllDemands { region, window },
        ActionKind::TotalDemand => QueryPlan::TotalDemand { region, window },
        ActionKind::AverageDemand => QueryPlan::AverageDemand { region, window },
        ActionKind::AverageOutageDuration => QueryPlan::AverageOutageDuration {
            region,
            year: intent.year,
        },
        ActionKind::StructuredOutageSummary => QueryPlan::OutageSummaryByRegion {
            region,
            year: intent.year,
            window,
        },
        ActionKind::AnomalyDetection => QueryPlan::AnomalyScan,
        ActionKind::OutageSummary | ActionKind::FreeText => QueryPlan::NarrativeSearch {
            query: query.trim().to_string(),
            region,
            window,
        },
    }
}

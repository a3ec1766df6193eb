//! Batch reducers over the request book. Every reducer is a pure read-only
//! pass over a snapshot slice; results can be recomputed on demand.

pub mod comprehensive;
pub mod operational;
pub mod overview;
pub mod standard;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{InsurerCatalog, InsurerCategory};
use crate::domain::request::QuoteRequest;
use crate::domain::response::InsurerName;

pub use comprehensive::{comprehensive_performance, ComprehensiveRow};
pub use operational::{
    FixedMetricsProvider, OperationalMetrics, OperationalMetricsProvider, SampledMetricsProvider,
};
pub use overview::{overview, InsurerActivity, OverviewStats, TatBucket, WeeklyActivity};
pub use standard::{standard_performance, InsurerPerformance, PerformanceBoard};
pub use summary::{broker_summary, insurer_summary, BrokerSummary, InsurerSummary};

/// Quotes submitted within this many hours meet the service-level agreement.
pub const SLA_HOURS: f64 = 24.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessLine {
    #[default]
    All,
    EmployeeBenefits,
    NonEmployeeBenefits,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategorySelector {
    #[default]
    All,
    Only(InsurerCategory),
}

/// Filter applied before either reducer runs: business line narrows the
/// request set, category narrows the responses inside each request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsFilter {
    pub business_line: BusinessLine,
    pub category: CategorySelector,
}

impl StatsFilter {
    pub fn includes_request(&self, request: &QuoteRequest, catalog: &InsurerCatalog) -> bool {
        match self.business_line {
            BusinessLine::All => true,
            BusinessLine::EmployeeBenefits => catalog.is_eb_product(&request.product),
            BusinessLine::NonEmployeeBenefits => !catalog.is_eb_product(&request.product),
        }
    }

    pub fn includes_insurer(&self, insurer: &InsurerName, catalog: &InsurerCatalog) -> bool {
        match self.category {
            CategorySelector::All => true,
            CategorySelector::Only(category) => catalog.category_of(insurer) == category,
        }
    }
}

/// Elapsed hours between request creation and a submission, floored at zero
/// so clock skew in imported data cannot produce negative turnaround.
pub(crate) fn tat_hours(created_at: DateTime<Utc>, submitted_at: DateTime<Utc>) -> f64 {
    let seconds = (submitted_at - created_at).num_seconds();
    (seconds.max(0) as f64) / 3600.0
}

/// `"{days}d {hours}h"` past a day, `"{hours}h"` under it, `"-"` when there
/// is nothing to report.
pub fn format_tat(hours: f64) -> String {
    if hours <= 0.0 {
        return "-".to_owned();
    }
    let total_hours = hours.floor() as u64;
    let days = total_hours / 24;
    let rem_hours = total_hours % 24;
    if days > 0 {
        format!("{days}d {rem_hours}h")
    } else {
        format!("{rem_hours}h")
    }
}

/// Percentage with a zero-denominator guard: empty populations report 0, not
/// NaN.
pub(crate) fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

pub(crate) fn mean(total: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{format_tat, percentage, tat_hours};

    #[test]
    fn tat_is_floored_at_zero_for_skewed_clocks() {
        let now = Utc::now();
        assert_eq!(tat_hours(now, now - Duration::hours(3)), 0.0);
        assert!((tat_hours(now, now + Duration::hours(36)) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn tat_formatting_matches_the_dashboard() {
        assert_eq!(format_tat(0.0), "-");
        assert_eq!(format_tat(5.7), "5h");
        assert_eq!(format_tat(24.0), "1d 0h");
        assert_eq!(format_tat(61.2), "2d 13h");
    }

    #[test]
    fn percentages_guard_empty_populations() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 4), 75.0);
    }
}

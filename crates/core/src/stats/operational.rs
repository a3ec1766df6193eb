//! Operational service metrics that do not exist in the quote data model
//! (claims handling, underwriting desk speed, market participation). They are
//! supplied through a strategy trait so the comprehensive reducer stays
//! deterministic under test and a real data source can be wired in later.

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::domain::response::InsurerName;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OperationalMetrics {
    /// Underwriting desk response time in hours.
    pub uw_response_hours: f64,
    /// Policy issuance / servicing turnaround in days.
    pub service_tat_days: f64,
    /// Claim settlement turnaround in days.
    pub claim_tat_days: f64,
    /// Claim approval percentage.
    pub claim_approval_rate: f64,
    /// Pricing competitiveness index, 0-10.
    pub competitiveness_index: f64,
    /// Market participation strength, 0-100.
    pub participation_score: f64,
    /// Share of invitations answered with technical deviations.
    pub technical_deviation_rate: f64,
    /// Share of invitations that needed a revised quote.
    pub revision_rate: f64,
    /// Share of invitations where a discount was requested.
    pub discount_request_rate: f64,
    /// Average underwriting margin percentage on submitted quotes.
    pub avg_margin_pct: f64,
}

impl Default for OperationalMetrics {
    fn default() -> Self {
        Self {
            uw_response_hours: 24.0,
            service_tat_days: 3.0,
            claim_tat_days: 15.0,
            claim_approval_rate: 92.0,
            competitiveness_index: 5.0,
            participation_score: 50.0,
            technical_deviation_rate: 0.2,
            revision_rate: 0.1,
            discount_request_rate: 0.1,
            avg_margin_pct: 10.0,
        }
    }
}

pub trait OperationalMetricsProvider {
    fn metrics_for(&self, insurer: &InsurerName) -> OperationalMetrics;
}

/// Samples every metric from its documented range. The seed makes a whole
/// report reproducible; values still differ per insurer row.
pub struct SampledMetricsProvider {
    rng: RefCell<StdRng>,
}

impl SampledMetricsProvider {
    pub fn new(seed: u64) -> Self {
        Self { rng: RefCell::new(StdRng::seed_from_u64(seed)) }
    }
}

impl OperationalMetricsProvider for SampledMetricsProvider {
    fn metrics_for(&self, _insurer: &InsurerName) -> OperationalMetrics {
        let mut rng = self.rng.borrow_mut();
        OperationalMetrics {
            uw_response_hours: rng.gen_range(4.0..48.0),
            service_tat_days: rng.gen_range(1.0..5.0),
            claim_tat_days: rng.gen_range(7.0..30.0),
            claim_approval_rate: rng.gen_range(85.0..99.0),
            competitiveness_index: rng.gen_range(0.0..10.0),
            participation_score: rng.gen_range(0.0..100.0),
            technical_deviation_rate: rng.gen_range(0.1..0.3),
            revision_rate: rng.gen_range(0.05..0.15),
            discount_request_rate: rng.gen_range(0.05..0.15),
            avg_margin_pct: rng.gen_range(5.0..15.0),
        }
    }
}

/// Returns the same metrics for every insurer; the test fixture.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedMetricsProvider(pub OperationalMetrics);

impl OperationalMetricsProvider for FixedMetricsProvider {
    fn metrics_for(&self, _insurer: &InsurerName) -> OperationalMetrics {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FixedMetricsProvider, OperationalMetrics, OperationalMetricsProvider,
        SampledMetricsProvider,
    };
    use crate::domain::response::InsurerName;

    #[test]
    fn sampled_metrics_stay_within_their_ranges() {
        let provider = SampledMetricsProvider::new(7);
        for index in 0..50 {
            let metrics = provider.metrics_for(&InsurerName(format!("Insurer {index}")));
            assert!((4.0..48.0).contains(&metrics.uw_response_hours));
            assert!((1.0..5.0).contains(&metrics.service_tat_days));
            assert!((7.0..30.0).contains(&metrics.claim_tat_days));
            assert!((85.0..99.0).contains(&metrics.claim_approval_rate));
            assert!((0.0..10.0).contains(&metrics.competitiveness_index));
            assert!((0.0..100.0).contains(&metrics.participation_score));
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_sequence() {
        let first = SampledMetricsProvider::new(42);
        let second = SampledMetricsProvider::new(42);
        let insurer = InsurerName::from("New India Assurance");

        for _ in 0..10 {
            assert_eq!(first.metrics_for(&insurer), second.metrics_for(&insurer));
        }
    }

    #[test]
    fn fixed_provider_returns_its_fixture_unchanged() {
        let fixture = OperationalMetrics { claim_approval_rate: 97.5, ..Default::default() };
        let provider = FixedMetricsProvider(fixture);
        assert_eq!(
            provider.metrics_for(&InsurerName::from("Care Health Insurance")),
            fixture
        );
    }
}

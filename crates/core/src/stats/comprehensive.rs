//! The multi-parameter insurer scorecard: everything the standard reducer
//! reports plus timeliness, conversion, commercial, and operational service
//! metrics folded into one composite score.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{InsurerCatalog, InsurerCategory};
use crate::domain::request::{QuoteRequest, RequestStatus};
use crate::domain::response::{InsurerName, ResponseStatus};
use crate::stats::operational::{OperationalMetrics, OperationalMetricsProvider};
use crate::stats::{format_tat, mean, percentage, tat_hours, StatsFilter, SLA_HOURS};

/// Composite score weights; they sum to 100 and the total is scaled to 0-10.
///
/// | factor                    | weight |
/// |---------------------------|--------|
/// | quote submission rate     | 15     |
/// | turnaround time           | 10     |
/// | L1 win rate               | 15     |
/// | conversion rate           | 20     |
/// | claim approval            | 20     |
/// | servicing speed           | 10     |
/// | appetite (low rejection)  | 10     |
const SUBMISSION_WEIGHT: f64 = 15.0;
const TAT_WEIGHT: f64 = 10.0;
const L1_WEIGHT: f64 = 15.0;
const CONVERSION_WEIGHT: f64 = 20.0;
const CLAIM_APPROVAL_WEIGHT: f64 = 20.0;
const SERVICE_SPEED_WEIGHT: f64 = 10.0;
const APPETITE_WEIGHT: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComprehensiveRow {
    pub insurer: InsurerName,
    pub category: InsurerCategory,
    pub requested: u64,
    pub quotes_submitted: u64,
    pub submission_rate: f64,
    pub avg_tat_hours: f64,
    pub avg_tat: String,
    pub sla_compliance: f64,
    pub delayed_quotes: u64,
    pub rejection_count: u64,
    pub rejection_rate: f64,
    pub l1_count: u64,
    pub l1_win_rate: f64,
    pub conversion_count: u64,
    pub conversion_rate: f64,
    pub premium_won: Decimal,
    pub avg_commission: Decimal,
    pub queries_raised: u64,
    pub queries_per_case: f64,
    pub pending_cases: u64,
    pub technical_deviations: u64,
    pub revised_requests: u64,
    pub discount_requests: u64,
    pub operational: OperationalMetrics,
    pub score: f64,
}

#[derive(Default)]
struct Accumulator {
    requested: u64,
    quotes_submitted: u64,
    total_tat_hours: f64,
    tat_count: u64,
    sla_compliant: u64,
    delayed: u64,
    rejections: u64,
    l1_count: u64,
    conversions: u64,
    premium_won: Decimal,
    total_commission: Decimal,
    queries: u64,
    pending: u64,
}

/// Same accumulation walk as the standard reducer, widened to the full metric
/// set, then a derivation pass that folds in operational metrics from the
/// provider and computes the composite score. Rows come back sorted by score,
/// best first.
pub fn comprehensive_performance<P: OperationalMetricsProvider>(
    requests: &[QuoteRequest],
    catalog: &InsurerCatalog,
    filter: &StatsFilter,
    provider: &P,
) -> Vec<ComprehensiveRow> {
    let mut stats: BTreeMap<InsurerName, Accumulator> = BTreeMap::new();

    for request in requests.iter().filter(|request| filter.includes_request(request, catalog)) {
        let l1_premium = request.l1_premium();
        let won = request.status == RequestStatus::Accepted;

        for response in &request.insurers {
            if !filter.includes_insurer(&response.insurer, catalog) {
                continue;
            }
            let entry = stats.entry(response.insurer.clone()).or_default();
            entry.requested += 1;
            if response.query.is_some() {
                entry.queries += 1;
            }

            match response.status {
                ResponseStatus::Quoted => {
                    entry.quotes_submitted += 1;
                    let quote = response.quote.as_ref();
                    if let Some(quote) = quote {
                        entry.total_commission += quote.commission;
                    }
                    if let Some(submitted_at) = response.submitted_at {
                        let hours = tat_hours(request.created_at, submitted_at);
                        entry.total_tat_hours += hours;
                        entry.tat_count += 1;
                        if hours <= SLA_HOURS {
                            entry.sla_compliant += 1;
                        }
                        if hours > 48.0 {
                            entry.delayed += 1;
                        }
                    }
                    let premium = quote.map(|quote| quote.premium);
                    if premium.is_some() && premium == l1_premium {
                        entry.l1_count += 1;
                        if won {
                            entry.conversions += 1;
                            entry.premium_won += premium.unwrap_or_default();
                        }
                    }
                }
                ResponseStatus::Rejected => entry.rejections += 1,
                ResponseStatus::Pending
                | ResponseStatus::Accepted
                | ResponseStatus::QueryRaised => entry.pending += 1,
            }
        }
    }

    let mut rows: Vec<ComprehensiveRow> = stats
        .into_iter()
        .map(|(insurer, acc)| {
            let operational = provider.metrics_for(&insurer);

            let submission_rate = percentage(acc.quotes_submitted, acc.requested);
            let avg_tat_hours = mean(acc.total_tat_hours, acc.tat_count);
            let sla_compliance = percentage(acc.sla_compliant, acc.quotes_submitted);
            let rejection_rate = percentage(acc.rejections, acc.requested);
            let l1_win_rate = percentage(acc.l1_count, acc.quotes_submitted);
            let conversion_rate = percentage(acc.conversions, acc.quotes_submitted);
            let avg_commission = if acc.quotes_submitted == 0 {
                Decimal::ZERO
            } else {
                acc.total_commission / Decimal::from(acc.quotes_submitted)
            };
            let queries_per_case = if acc.requested == 0 {
                0.0
            } else {
                acc.queries as f64 / acc.requested as f64
            };

            let score = composite_score(
                submission_rate,
                avg_tat_hours,
                l1_win_rate,
                conversion_rate,
                rejection_rate,
                &operational,
            );

            ComprehensiveRow {
                category: catalog.category_of(&insurer),
                insurer,
                requested: acc.requested,
                quotes_submitted: acc.quotes_submitted,
                submission_rate,
                avg_tat_hours,
                avg_tat: format_tat(avg_tat_hours),
                sla_compliance,
                delayed_quotes: acc.delayed,
                rejection_count: acc.rejections,
                rejection_rate,
                l1_count: acc.l1_count,
                l1_win_rate,
                conversion_count: acc.conversions,
                conversion_rate,
                premium_won: acc.premium_won,
                avg_commission,
                queries_raised: acc.queries,
                queries_per_case,
                pending_cases: acc.pending,
                technical_deviations: incidence(operational.technical_deviation_rate, acc.requested),
                revised_requests: incidence(operational.revision_rate, acc.requested),
                discount_requests: incidence(operational.discount_request_rate, acc.requested),
                operational,
                score,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal).then_with(|| {
            a.insurer.cmp(&b.insurer)
        })
    });
    rows
}

fn composite_score(
    submission_rate: f64,
    avg_tat_hours: f64,
    l1_win_rate: f64,
    conversion_rate: f64,
    rejection_rate: f64,
    operational: &OperationalMetrics,
) -> f64 {
    let mut score = 0.0;
    score += submission_rate / 100.0 * SUBMISSION_WEIGHT;
    score += (100.0 - avg_tat_hours).max(0.0) / 100.0 * TAT_WEIGHT;
    score += l1_win_rate / 100.0 * L1_WEIGHT;
    score += conversion_rate / 100.0 * CONVERSION_WEIGHT;
    score += operational.claim_approval_rate / 100.0 * CLAIM_APPROVAL_WEIGHT;
    score += (1.0 - operational.service_tat_days / 10.0) * SERVICE_SPEED_WEIGHT;
    score += (100.0 - rejection_rate) / 100.0 * APPETITE_WEIGHT;

    (score / 10.0).clamp(0.0, 10.0)
}

fn incidence(rate: f64, population: u64) -> u64 {
    (rate.clamp(0.0, 1.0) * population as f64).round() as u64
}

//! The standard insurer-performance reducer behind the broker and insurer
//! analytics tables.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{InsurerCatalog, InsurerCategory};
use crate::domain::request::QuoteRequest;
use crate::domain::response::{InsurerName, ResponseStatus};
use crate::stats::{format_tat, mean, percentage, tat_hours, StatsFilter};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InsurerPerformance {
    pub insurer: InsurerName,
    pub category: InsurerCategory,
    pub preferred: bool,
    pub requests_received: u64,
    pub quotes_shared: u64,
    pub response_rate: f64,
    pub l1_count: u64,
    pub l1_rate: f64,
    pub pending: u64,
    pub rejected: u64,
    pub avg_tat_hours: f64,
    pub avg_tat: String,
    pub rating: f64,
}

/// Broker-facing split of the performance rows. Insurer-facing views select
/// their own row instead via [`PerformanceBoard::own_row`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PerformanceBoard {
    pub preferred: Vec<InsurerPerformance>,
    pub others: Vec<InsurerPerformance>,
}

impl PerformanceBoard {
    pub fn from_rows(rows: Vec<InsurerPerformance>) -> Self {
        let (preferred, others) = rows.into_iter().partition(|row| row.preferred);
        Self { preferred, others }
    }

    pub fn own_row<'a>(
        rows: &'a [InsurerPerformance],
        insurer: &InsurerName,
    ) -> Option<&'a InsurerPerformance> {
        rows.iter().find(|row| &row.insurer == insurer)
    }
}

#[derive(Default)]
struct Accumulator {
    requests_received: u64,
    quotes_shared: u64,
    l1_count: u64,
    pending: u64,
    rejected: u64,
    total_tat_hours: f64,
    tat_count: u64,
}

/// One pass over the filtered requests accumulating per-insurer counters,
/// then a derivation pass computing rates and the 0-10 rating. Rows come
/// back sorted by rating, best first.
pub fn standard_performance(
    requests: &[QuoteRequest],
    catalog: &InsurerCatalog,
    filter: &StatsFilter,
) -> Vec<InsurerPerformance> {
    let mut stats: BTreeMap<InsurerName, Accumulator> = BTreeMap::new();

    for request in requests.iter().filter(|request| filter.includes_request(request, catalog)) {
        let l1_premium = request.l1_premium();

        for response in &request.insurers {
            if !filter.includes_insurer(&response.insurer, catalog) {
                continue;
            }
            let entry = stats.entry(response.insurer.clone()).or_default();
            entry.requests_received += 1;

            match response.status {
                ResponseStatus::Quoted => {
                    entry.quotes_shared += 1;
                    if let Some(submitted_at) = response.submitted_at {
                        entry.total_tat_hours += tat_hours(request.created_at, submitted_at);
                        entry.tat_count += 1;
                    }
                    let premium = response.quote.as_ref().map(|quote| quote.premium);
                    if premium.is_some() && premium == l1_premium {
                        entry.l1_count += 1;
                    }
                }
                ResponseStatus::Rejected => entry.rejected += 1,
                ResponseStatus::Pending
                | ResponseStatus::Accepted
                | ResponseStatus::QueryRaised => entry.pending += 1,
            }
        }
    }

    let mut rows: Vec<InsurerPerformance> = stats
        .into_iter()
        .map(|(insurer, acc)| {
            let avg_tat_hours = mean(acc.total_tat_hours, acc.tat_count);
            let response_rate = percentage(acc.quotes_shared, acc.requests_received);
            let l1_rate = percentage(acc.l1_count, acc.quotes_shared);
            let rating = (response_rate * 0.04 + l1_rate * 0.04 + tat_score(avg_tat_hours) * 0.2)
                .clamp(0.0, 10.0);

            InsurerPerformance {
                category: catalog.category_of(&insurer),
                preferred: catalog.is_preferred(&insurer),
                insurer,
                requests_received: acc.requests_received,
                quotes_shared: acc.quotes_shared,
                response_rate,
                l1_count: acc.l1_count,
                l1_rate,
                pending: acc.pending,
                rejected: acc.rejected,
                avg_tat_hours,
                avg_tat: format_tat(avg_tat_hours),
                rating,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal).then_with(|| {
            a.insurer.cmp(&b.insurer)
        })
    });
    rows
}

/// Piecewise-linear timeliness score: 10 at a day or less, 0 at four days or
/// more, linear in between. No quotes at all scores 0.
fn tat_score(avg_tat_hours: f64) -> f64 {
    if avg_tat_hours <= 0.0 {
        0.0
    } else if avg_tat_hours <= 24.0 {
        10.0
    } else if avg_tat_hours >= 96.0 {
        0.0
    } else {
        10.0 - (avg_tat_hours - 24.0) / (96.0 - 24.0) * 10.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use super::{standard_performance, tat_score, PerformanceBoard};
    use crate::catalog::InsurerCatalog;
    use crate::domain::request::{QuoteRequest, RequestDetails, RequestId, RequestStatus};
    use crate::domain::response::{InsurerName, InsurerResponse, QuoteTerms, ResponseStatus};
    use crate::stats::StatsFilter;

    fn quoted(name: &str, premium: i64, tat_hours: i64, created: chrono::DateTime<Utc>) -> InsurerResponse {
        let mut response = InsurerResponse::pending(InsurerName::from(name));
        response.status = ResponseStatus::Quoted;
        response.quote = Some(QuoteTerms::new(Decimal::from(premium), Decimal::from(10)));
        response.submitted_at = Some(created + Duration::hours(tat_hours));
        response
    }

    fn rejected(name: &str) -> InsurerResponse {
        let mut response = InsurerResponse::pending(InsurerName::from(name));
        response.status = ResponseStatus::Rejected;
        response.reason = Some("Risk out of appetite".to_owned());
        response
    }

    fn request(id: u32, product: &str, insurers: Vec<InsurerResponse>) -> QuoteRequest {
        QuoteRequest {
            id: RequestId(format!("OTE-{id:03}")),
            client_name: "Zenith Holdings".to_owned(),
            product: product.to_owned(),
            status: RequestStatus::QuotesReceived,
            created_by: "Ravi Kumar".to_owned(),
            creator_id: "broker-sales-rm".to_owned(),
            zone: "North".to_owned(),
            created_at: Utc::now() - Duration::days(10),
            details: RequestDetails::default(),
            documents: Vec::new(),
            insurers,
            awarded_to: None,
        }
    }

    #[test]
    fn l1_goes_to_the_lowest_premium_only() {
        let catalog = InsurerCatalog::default();
        let created = Utc::now() - Duration::days(10);
        let requests = vec![request(
            1,
            "Fire Insurance",
            vec![
                quoted("HDFC ERGO General Insurance", 100_000, 12, created),
                quoted("ICICI Lombard General Insurance", 90_000, 12, created),
                rejected("New India Assurance"),
            ],
        )];

        let rows = standard_performance(&requests, &catalog, &StatsFilter::default());
        let row = |name: &str| {
            rows.iter().find(|row| row.insurer == InsurerName::from(name)).expect("row")
        };

        assert_eq!(row("ICICI Lombard General Insurance").l1_count, 1);
        assert_eq!(row("HDFC ERGO General Insurance").l1_count, 0);
        assert_eq!(row("New India Assurance").rejected, 1);
        assert_eq!(row("New India Assurance").avg_tat, "-");
    }

    #[test]
    fn exact_premium_ties_share_l1() {
        let catalog = InsurerCatalog::default();
        let created = Utc::now() - Duration::days(5);
        let requests = vec![request(
            1,
            "Fire Insurance",
            vec![
                quoted("HDFC ERGO General Insurance", 90_000, 12, created),
                quoted("ICICI Lombard General Insurance", 90_000, 30, created),
            ],
        )];

        let rows = standard_performance(&requests, &catalog, &StatsFilter::default());
        assert!(rows.iter().all(|row| row.l1_count == 1));
        assert!(rows.iter().all(|row| (row.l1_rate - 100.0).abs() < 1e-9));
    }

    #[test]
    fn rates_and_rating_stay_in_range() {
        let catalog = InsurerCatalog::default();
        let created = Utc::now() - Duration::days(5);
        let mut requests = Vec::new();
        for id in 0..4u32 {
            requests.push(request(
                id,
                "Fire Insurance",
                vec![
                    quoted("HDFC ERGO General Insurance", 100_000 + i64::from(id), 20, created),
                    rejected("New India Assurance"),
                ],
            ));
        }

        for row in standard_performance(&requests, &catalog, &StatsFilter::default()) {
            assert!((0.0..=100.0).contains(&row.response_rate));
            assert!((0.0..=100.0).contains(&row.l1_rate));
            assert!((0.0..=10.0).contains(&row.rating));
        }
    }

    #[test]
    fn tat_score_is_piecewise_linear() {
        assert_eq!(tat_score(0.0), 0.0);
        assert_eq!(tat_score(12.0), 10.0);
        assert_eq!(tat_score(24.0), 10.0);
        assert!((tat_score(60.0) - 5.0).abs() < 1e-9);
        assert_eq!(tat_score(96.0), 0.0);
        assert_eq!(tat_score(200.0), 0.0);
    }

    #[test]
    fn preferred_partition_follows_the_catalog() {
        let catalog = InsurerCatalog::default();
        let created = Utc::now() - Duration::days(5);
        let requests = vec![request(
            1,
            "Fire Insurance",
            vec![
                quoted("Tata AIG General Insurance", 80_000, 10, created),
                quoted("New India Assurance", 95_000, 10, created),
            ],
        )];

        let rows = standard_performance(&requests, &catalog, &StatsFilter::default());
        let board = PerformanceBoard::from_rows(rows.clone());
        assert_eq!(board.preferred.len(), 1);
        assert_eq!(board.preferred[0].insurer, InsurerName::from("Tata AIG General Insurance"));
        assert_eq!(board.others.len(), 1);

        let own = PerformanceBoard::own_row(&rows, &InsurerName::from("New India Assurance"))
            .expect("own row");
        assert_eq!(own.quotes_shared, 1);
    }

    #[test]
    fn rows_are_sorted_by_rating_descending() {
        let catalog = InsurerCatalog::default();
        let created = Utc::now() - Duration::days(5);
        // fast quoter vs slow quoter
        let requests = vec![request(
            1,
            "Fire Insurance",
            vec![
                quoted("HDFC ERGO General Insurance", 90_000, 90, created),
                quoted("ICICI Lombard General Insurance", 90_000, 6, created),
            ],
        )];

        let rows = standard_performance(&requests, &catalog, &StatsFilter::default());
        assert_eq!(rows[0].insurer, InsurerName::from("ICICI Lombard General Insurance"));
        assert!(rows[0].rating >= rows[1].rating);
    }

    #[test]
    fn empty_book_yields_no_rows() {
        let catalog = InsurerCatalog::default();
        assert!(standard_performance(&[], &catalog, &StatsFilter::default()).is_empty());
    }
}

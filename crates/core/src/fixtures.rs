//! Deterministic demo book used by the CLI and the integration-style tests.
//! Requests are spread across the catalog categories round-robin and every
//! overall status is derived through the real aggregator.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::aggregate::derive_status;
use crate::catalog::{InsurerCatalog, InsurerCategory};
use crate::domain::request::{
    DocumentRef, QuoteRequest, RequestDetails, RequestId, RequestStatus,
};
use crate::domain::response::{InsurerName, InsurerResponse, QuoteTerms, ResponseStatus};

const CLIENTS: &[&str] = &[
    "TechNova", "GreenField", "BlueSky", "Alpha Corp", "Omega Ltd", "Zenith", "Pioneer", "Summit",
    "Apex", "Vertex", "Matrix", "Nexus", "Flux", "Spark", "Core", "Prime", "Elite", "Grand",
    "Noble", "Royal", "Regal", "Sovereign", "Majestic", "Imperial", "Titan",
];
const CLIENT_SUFFIXES: &[&str] =
    &["Solutions", "Industries", "Technologies", "Logistics", "Holdings", "Ventures"];
const CREATORS: &[&str] = &["Ravi Kumar", "Priya Singh", "Amit Patel", "Sara Ali"];
const ZONES: &[&str] = &["North", "South", "East", "West"];
const CITIES: &[&str] = &["Mumbai", "Delhi", "Bangalore", "Chennai", "Pune"];
const GENERAL_PRODUCTS: &[&str] =
    &["Fire Insurance", "Marine Insurance", "Commercial General Liability"];

const PANEL_SIZE: usize = 5;
const MIN_TAT_HOURS: i64 = 2;
const MAX_TAT_HOURS: i64 = 120;

#[derive(Clone, Copy, Debug)]
pub struct DemoOptions {
    pub count: usize,
    pub seed: u64,
    /// Anchor for the request timeline; creation dates fall in the ninety
    /// days before it.
    pub now: DateTime<Utc>,
}

impl DemoOptions {
    pub fn new(count: usize, seed: u64, now: DateTime<Utc>) -> Self {
        Self { count, seed, now }
    }
}

pub fn demo_book(catalog: &InsurerCatalog, options: &DemoOptions) -> Vec<QuoteRequest> {
    let mut rng = StdRng::seed_from_u64(options.seed);

    let general = catalog.insurers_in(InsurerCategory::General);
    let health = catalog.insurers_in(InsurerCategory::Health);
    let life = catalog.insurers_in(InsurerCategory::Life);
    let total_weight = catalog.len().max(1);

    let mut general_cursor = 0usize;
    let mut health_cursor = 0usize;
    let mut life_cursor = 0usize;

    (0..options.count)
        .map(|index| {
            let id = RequestId(format!("OTE-{:03}", index + 1));
            let client_name = format!(
                "{} {}",
                CLIENTS[index % CLIENTS.len()],
                CLIENT_SUFFIXES[index % CLIENT_SUFFIXES.len()]
            );

            // category share mirrors the catalog's weight per category
            let position = index % total_weight;
            let (product, panel) = if position < general.len() || general.len() == catalog.len() {
                let product = GENERAL_PRODUCTS[rng.gen_range(0..GENERAL_PRODUCTS.len())];
                (product, take_panel(general, &mut general_cursor))
            } else if position < general.len() + health.len() {
                ("Group Health Insurance / Group Mediclaim", take_panel(health, &mut health_cursor))
            } else {
                ("Group Term Life Insurance", take_panel(life, &mut life_cursor))
            };

            let created_at = options.now - Duration::minutes(rng.gen_range(0..90 * 24 * 60));
            let insurers: Vec<InsurerResponse> =
                panel.into_iter().map(|name| roll_response(name, created_at, &mut rng)).collect();

            let mut status = derive_status(&insurers);
            let mut awarded_to = None;
            let any_quoted = insurers.iter().any(|r| r.status == ResponseStatus::Quoted);
            if any_quoted && rng.gen_range(0.0..1.0) > 0.8 {
                status = RequestStatus::Accepted;
                // award the price leader so conversion stats line up
                let l1 = insurers
                    .iter()
                    .filter_map(|r| r.quote.as_ref().map(|q| (q.premium, r.insurer.clone())))
                    .min_by_key(|(premium, _)| *premium);
                awarded_to = l1.map(|(_, insurer)| insurer);
            }

            QuoteRequest {
                id,
                client_name,
                product: product.to_owned(),
                status,
                created_by: CREATORS[rng.gen_range(0..CREATORS.len())].to_owned(),
                creator_id: "broker-sales-rm".to_owned(),
                zone: ZONES[rng.gen_range(0..ZONES.len())].to_owned(),
                created_at,
                details: RequestDetails {
                    policy_type: (if rng.gen_bool(0.5) { "Renewal" } else { "New" }).to_owned(),
                    sum_insured: Decimal::from(rng.gen_range(1_000_000..101_000_000i64)),
                    city: CITIES[rng.gen_range(0..CITIES.len())].to_owned(),
                    ..RequestDetails::default()
                },
                documents: vec![DocumentRef {
                    name: "proposal.pdf".to_owned(),
                    doc_type: "Proposal".to_owned(),
                }],
                insurers,
                awarded_to,
            }
        })
        .collect()
}

/// Next `PANEL_SIZE` distinct insurers from the category, wrapping around the
/// list so invitations spread evenly across the book.
fn take_panel(insurers: &[InsurerName], cursor: &mut usize) -> Vec<InsurerName> {
    let panel_size = PANEL_SIZE.min(insurers.len());
    let panel = (0..panel_size)
        .map(|offset| insurers[(*cursor + offset) % insurers.len()].clone())
        .collect();
    *cursor += panel_size;
    panel
}

fn roll_response(
    insurer: InsurerName,
    created_at: DateTime<Utc>,
    rng: &mut StdRng,
) -> InsurerResponse {
    let mut response = InsurerResponse::pending(insurer);
    let roll: f64 = rng.gen_range(0.0..1.0);
    let tat = Duration::minutes(rng.gen_range(MIN_TAT_HOURS * 60..MAX_TAT_HOURS * 60));

    if roll > 0.4 {
        response.status = ResponseStatus::Quoted;
        response.quote = Some(QuoteTerms {
            premium: Decimal::from(rng.gen_range(50_000..5_050_000i64)),
            commission: Decimal::from(rng.gen_range(5..20i64)),
            terms: None,
            quote_document: Some(format!("quote_{}.pdf", response.insurer.0.replace(' ', "_"))),
        });
        response.submitted_at = Some(created_at + tat);
    } else if roll > 0.25 {
        response.status = ResponseStatus::Rejected;
        response.reason = Some("Risk out of appetite".to_owned());
        response.submitted_at = Some(created_at + tat / 2);
    } else if roll > 0.15 {
        response.status = ResponseStatus::QueryRaised;
        response.query = Some("Please provide last 3 years claim dump.".to_owned());
    }
    response
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use std::collections::HashSet;

    use super::{demo_book, DemoOptions};
    use crate::aggregate::derive_status;
    use crate::catalog::InsurerCatalog;
    use crate::domain::request::RequestStatus;

    fn options(count: usize, seed: u64) -> DemoOptions {
        DemoOptions::new(count, seed, Utc::now())
    }

    #[test]
    fn same_seed_produces_the_same_book() {
        let catalog = InsurerCatalog::default();
        let now = Utc::now();
        let first = demo_book(&catalog, &DemoOptions::new(50, 11, now));
        let second = demo_book(&catalog, &DemoOptions::new(50, 11, now));
        assert_eq!(first, second);
    }

    #[test]
    fn every_request_has_a_unique_panel_of_invited_insurers() {
        let catalog = InsurerCatalog::default();
        for request in demo_book(&catalog, &options(120, 3)) {
            let names: HashSet<_> =
                request.insurers.iter().map(|response| &response.insurer).collect();
            assert_eq!(names.len(), request.insurers.len(), "{}", request.id);
            assert!(!request.insurers.is_empty());
        }
    }

    #[test]
    fn statuses_agree_with_the_aggregator_or_are_pinned_wins() {
        let catalog = InsurerCatalog::default();
        for request in demo_book(&catalog, &options(200, 5)) {
            let derived = derive_status(&request.insurers);
            if request.status == RequestStatus::Accepted {
                assert!(request.awarded_to.is_some(), "{}", request.id);
            } else {
                assert_eq!(request.status, derived, "{}", request.id);
                assert!(request.awarded_to.is_none());
            }
        }
    }

    #[test]
    fn quoted_responses_carry_terms_and_a_submission_stamp() {
        let catalog = InsurerCatalog::default();
        for request in demo_book(&catalog, &options(100, 9)) {
            for response in &request.insurers {
                match response.status {
                    crate::domain::response::ResponseStatus::Quoted => {
                        let quote = response.quote.as_ref().expect("quoted carries terms");
                        assert!(quote.premium > rust_decimal::Decimal::ZERO);
                        assert!(response.submitted_at.expect("stamped") > request.created_at);
                    }
                    crate::domain::response::ResponseStatus::Rejected => {
                        assert!(response.reason.is_some());
                        assert!(response.quote.is_none());
                    }
                    _ => assert!(response.quote.is_none()),
                }
            }
        }
    }

    #[test]
    fn the_book_spreads_across_all_three_categories() {
        let catalog = InsurerCatalog::default();
        let book = demo_book(&catalog, &options(130, 1));
        let eb = book.iter().filter(|request| catalog.is_eb_product(&request.product)).count();
        assert!(eb > 0, "expected some employee-benefits requests");
        assert!(eb < book.len(), "expected some general business too");
    }
}

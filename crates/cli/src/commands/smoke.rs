use std::time::Instant;

use insureflow_core::config::{AppConfig, LoadOptions};
use insureflow_core::domain::request::RequestStatus;
use insureflow_core::domain::response::{InsurerName, QuoteTerms};
use insureflow_core::errors::DomainError;
use insureflow_core::stats::{standard_performance, StatsFilter};
use insureflow_core::store::{NewRequest, RequestStore};
use insureflow_core::InsurerCatalog;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum SmokeStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct SmokeCheck {
    name: &'static str,
    status: SmokeStatus,
    elapsed_ms: u64,
    message: String,
}

#[derive(Debug, Serialize)]
struct SmokeReport {
    command: &'static str,
    status: SmokeStatus,
    summary: String,
    total_elapsed_ms: u64,
    checks: Vec<SmokeCheck>,
}

/// Drives one request end-to-end through the store (create -> accept ->
/// quote/reject -> award) and verifies every derived status hop plus the L1
/// attribution in the standard reducer.
pub fn run() -> CommandResult {
    let started = Instant::now();
    let mut checks = Vec::new();

    checks.push(check("config_validation", || {
        AppConfig::load(LoadOptions::default())
            .map(|_| "configuration loaded and validated".to_string())
            .map_err(|error| error.to_string())
    }));

    let mut store = RequestStore::new();
    let insurer_a = InsurerName::from("HDFC ERGO General Insurance");
    let insurer_b = InsurerName::from("ICICI Lombard General Insurance");
    let insurer_c = InsurerName::from("New India Assurance");

    let request_id = match store.create_request(NewRequest {
        client_name: "TechNova Solutions".to_owned(),
        product: "Fire Insurance".to_owned(),
        created_by: "Ravi Kumar".to_owned(),
        creator_id: "broker-sales-rm".to_owned(),
        zone: "North".to_owned(),
        details: Default::default(),
        documents: Vec::new(),
        insurers: vec![insurer_a.clone(), insurer_b.clone(), insurer_c.clone()],
    }) {
        Ok(id) => id,
        Err(error) => {
            checks.push(SmokeCheck {
                name: "request_creation",
                status: SmokeStatus::Fail,
                elapsed_ms: 0,
                message: error.to_string(),
            });
            return finalize_report(checks, started.elapsed().as_millis() as u64);
        }
    };

    checks.push(check("request_creation", || {
        let request = store.find(&request_id).ok_or("created request not in store")?;
        if request.status != RequestStatus::RequestSent {
            return Err(format!("expected Request Sent, got {}", request.status));
        }
        Ok(format!("request {request_id} created with 3 pending insurers"))
    }));

    checks.push(check("accept_and_quote", || {
        for (insurer, premium) in [(&insurer_a, 100_000i64), (&insurer_b, 90_000i64)] {
            store.accept_invitation(&request_id, insurer).map_err(|error| error.to_string())?;
            store
                .submit_quote(
                    &request_id,
                    insurer,
                    QuoteTerms::new(Decimal::from(premium), Decimal::from(10)),
                )
                .map_err(|error| error.to_string())?;
        }
        let status = store.find(&request_id).ok_or("request lost")?.status;
        if status != RequestStatus::AwaitingQuotes {
            return Err(format!("expected Awaiting Quotes, got {status}"));
        }
        Ok("two insurers accepted and quoted; one still pending".to_string())
    }));

    checks.push(check("rejection_settles_book", || {
        store
            .reject_quote(&request_id, &insurer_c, "Risk out of appetite")
            .map_err(|error| error.to_string())?;
        let status = store.find(&request_id).ok_or("request lost")?.status;
        if status != RequestStatus::QuotesReceived {
            return Err(format!("expected Quotes Received, got {status}"));
        }
        Ok("final rejection settled the request as Quotes Received".to_string())
    }));

    checks.push(check("l1_attribution", || {
        let catalog = InsurerCatalog::default();
        let rows = standard_performance(store.requests(), &catalog, &StatsFilter::default());
        let l1_of = |insurer: &InsurerName| {
            rows.iter()
                .find(|row| &row.insurer == insurer)
                .map(|row| row.l1_count)
                .ok_or_else(|| format!("no stats row for {insurer}"))
        };
        if l1_of(&insurer_b)? != 1 {
            return Err("the lower premium should hold L1".to_string());
        }
        if l1_of(&insurer_a)? != 0 {
            return Err("the higher premium must not hold L1".to_string());
        }
        Ok("L1 attributed to the lowest premium only".to_string())
    }));

    checks.push(check("invalid_mutation_guard", || {
        let before = store.requests().to_vec();
        match store.submit_quote(
            &request_id,
            &insurer_c,
            QuoteTerms::new(Decimal::ZERO, Decimal::from(10)),
        ) {
            Err(DomainError::InvalidTransition { .. }) => {}
            other => return Err(format!("expected invalid transition, got {other:?}")),
        }
        if store.requests() != &before[..] {
            return Err("failed mutation must not change the book".to_string());
        }
        Ok("rejected insurer cannot quote and the book is untouched".to_string())
    }));

    checks.push(check("award_pins_status", || {
        store.accept_quote(&request_id, &insurer_b).map_err(|error| error.to_string())?;
        let request = store.find(&request_id).ok_or("request lost")?;
        if request.status != RequestStatus::Accepted {
            return Err(format!("expected Accepted, got {}", request.status));
        }
        if request.awarded_to.as_ref() != Some(&insurer_b) {
            return Err("award must record the winning insurer".to_string());
        }
        Ok("broker award pinned the request as Accepted".to_string())
    }));

    finalize_report(checks, started.elapsed().as_millis() as u64)
}

fn check<F>(name: &'static str, run: F) -> SmokeCheck
where
    F: FnOnce() -> Result<String, String>,
{
    let started = Instant::now();
    let (status, message) = match run() {
        Ok(message) => (SmokeStatus::Pass, message),
        Err(message) => (SmokeStatus::Fail, message),
    };
    SmokeCheck { name, status, elapsed_ms: started.elapsed().as_millis() as u64, message }
}

fn finalize_report(checks: Vec<SmokeCheck>, total_elapsed_ms: u64) -> CommandResult {
    let passed = checks.iter().filter(|check| check.status == SmokeStatus::Pass).count();
    let total = checks.len();
    let failed = checks.iter().any(|check| check.status == SmokeStatus::Fail);

    let report = SmokeReport {
        command: "smoke",
        status: if failed { SmokeStatus::Fail } else { SmokeStatus::Pass },
        summary: format!("smoke: {passed}/{total} checks passed in {total_elapsed_ms}ms"),
        total_elapsed_ms,
        checks,
    };

    let human = report.summary.clone();
    let machine = serde_json::to_string(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"smoke\",\"status\":\"fail\",\"summary\":\"serialization failed\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult { exit_code: if failed { 6 } else { 0 }, output: format!("{human}\n{machine}") }
}

//! Portfolio-level overview: headline KPIs, the weekly activity trend, the
//! product mix, and the turnaround distribution shown on the dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use crate::catalog::{InsurerCatalog, InsurerCategory};
use crate::domain::request::{QuoteRequest, RequestStatus};
use crate::domain::response::{InsurerName, ResponseStatus};
use crate::stats::{format_tat, mean, percentage, tat_hours};

const TREND_WEEKS: usize = 12;
const TOP_INSURER_ROWS: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeeklyActivity {
    /// Day/month label of the week's end, as rendered on the trend axis.
    pub label: String,
    pub requests: u64,
    pub quotes: u64,
    pub won: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TatBucket {
    pub label: &'static str,
    pub quotes: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InsurerActivity {
    pub insurer: InsurerName,
    pub quoted: u64,
    pub rejected: u64,
    pub pending: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_requests: u64,
    pub quotes_won: u64,
    pub conversion_rate: f64,
    pub avg_first_quote_tat_hours: f64,
    pub avg_first_quote_tat: String,
    pub weekly_trend: Vec<WeeklyActivity>,
    pub product_mix: Vec<(InsurerCategory, u64)>,
    pub tat_distribution: Vec<TatBucket>,
    pub top_insurers: Vec<InsurerActivity>,
}

/// Single pass over the whole book. `now` anchors the trailing twelve-week
/// trend so the reducer itself never reads a clock.
pub fn overview(
    requests: &[QuoteRequest],
    catalog: &InsurerCatalog,
    now: DateTime<Utc>,
) -> OverviewStats {
    let week = Duration::days(7);
    let mut trend: Vec<(DateTime<Utc>, DateTime<Utc>, WeeklyActivity)> = (0..TREND_WEEKS)
        .rev()
        .map(|offset| {
            let end = now - week * offset as i32;
            let start = end - week;
            let activity = WeeklyActivity {
                label: format!("{}/{}", end.day(), end.month()),
                requests: 0,
                quotes: 0,
                won: 0,
            };
            (start, end, activity)
        })
        .collect();

    let mut mix: BTreeMap<&'static str, u64> =
        [("General", 0), ("Health", 0), ("Life", 0)].into_iter().collect();
    let mut tat_buckets = [0u64; 4];
    let mut activity: BTreeMap<InsurerName, InsurerActivity> = BTreeMap::new();

    let mut won = 0u64;
    let mut first_quote_total_hours = 0.0;
    let mut first_quote_count = 0u64;

    for request in requests {
        if request.status == RequestStatus::Accepted {
            won += 1;
        }

        if let Some((_, _, bucket)) = trend
            .iter_mut()
            .find(|(start, end, _)| request.created_at >= *start && request.created_at < *end)
        {
            bucket.requests += 1;
            if request.status == RequestStatus::Accepted {
                bucket.won += 1;
            }
            bucket.quotes += request
                .insurers
                .iter()
                .filter(|response| response.status == ResponseStatus::Quoted)
                .count() as u64;
        }

        let label = if catalog.is_eb_product(&request.product) {
            if request.product.contains("Life") {
                "Life"
            } else {
                "Health"
            }
        } else {
            "General"
        };
        *mix.entry(label).or_insert(0) += 1;

        let mut first_quote_hours: Option<f64> = None;
        for response in &request.insurers {
            let entry = activity.entry(response.insurer.clone()).or_insert_with(|| {
                InsurerActivity {
                    insurer: response.insurer.clone(),
                    quoted: 0,
                    rejected: 0,
                    pending: 0,
                }
            });
            match response.status {
                ResponseStatus::Quoted => {
                    entry.quoted += 1;
                    if let Some(submitted_at) = response.submitted_at {
                        let hours = tat_hours(request.created_at, submitted_at);
                        let bucket = match hours {
                            h if h < 24.0 => 0,
                            h if h < 48.0 => 1,
                            h if h < 72.0 => 2,
                            _ => 3,
                        };
                        tat_buckets[bucket] += 1;
                        if first_quote_hours.is_none() {
                            first_quote_hours = Some(hours);
                        }
                    }
                }
                ResponseStatus::Rejected => entry.rejected += 1,
                ResponseStatus::Pending
                | ResponseStatus::Accepted
                | ResponseStatus::QueryRaised => entry.pending += 1,
            }
        }
        if let Some(hours) = first_quote_hours {
            first_quote_total_hours += hours;
            first_quote_count += 1;
        }
    }

    let mut top_insurers: Vec<InsurerActivity> = activity.into_values().collect();
    top_insurers.sort_by(|a, b| {
        (b.quoted + b.rejected).cmp(&(a.quoted + a.rejected)).then_with(|| a.insurer.cmp(&b.insurer))
    });
    top_insurers.truncate(TOP_INSURER_ROWS);

    let avg_first_quote_tat_hours = mean(first_quote_total_hours, first_quote_count);
    let category_for = |label: &str| match label {
        "General" => InsurerCategory::General,
        "Health" => InsurerCategory::Health,
        _ => InsurerCategory::Life,
    };

    OverviewStats {
        total_requests: requests.len() as u64,
        quotes_won: won,
        conversion_rate: percentage(won, requests.len() as u64),
        avg_first_quote_tat_hours,
        avg_first_quote_tat: format_tat(avg_first_quote_tat_hours),
        weekly_trend: trend.into_iter().map(|(_, _, bucket)| bucket).collect(),
        product_mix: mix.into_iter().map(|(label, count)| (category_for(label), count)).collect(),
        tat_distribution: vec![
            TatBucket { label: "< 24h", quotes: tat_buckets[0] },
            TatBucket { label: "24h-48h", quotes: tat_buckets[1] },
            TatBucket { label: "48h-72h", quotes: tat_buckets[2] },
            TatBucket { label: "> 72h", quotes: tat_buckets[3] },
        ],
        top_insurers,
    }
}

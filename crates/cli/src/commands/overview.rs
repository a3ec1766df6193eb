use chrono::Utc;
use insureflow_core::config::{AppConfig, LoadOptions};
use insureflow_core::fixtures::{demo_book, DemoOptions};
use insureflow_core::stats::overview;

use crate::commands::CommandResult;

pub fn run(count: usize, seed: u64, json: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "overview",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "overview",
                "catalog_load",
                format!("catalog issue: {error}"),
                2,
            );
        }
    };

    let book = demo_book(&catalog, &DemoOptions::new(count, seed, Utc::now()));
    let stats = overview(&book, &catalog, Utc::now());

    if json {
        return match serde_json::to_string_pretty(&stats) {
            Ok(output) => CommandResult::plain(output),
            Err(error) => CommandResult::failure("overview", "serialization", error.to_string(), 3),
        };
    }

    let mut lines = Vec::new();
    lines.push(format!(
        "portfolio: {} requests, {} won ({:.1}% conversion), first quote in {}",
        stats.total_requests, stats.quotes_won, stats.conversion_rate, stats.avg_first_quote_tat
    ));

    lines.push("weekly trend (requests/quotes/won):".to_owned());
    for week in &stats.weekly_trend {
        lines.push(format!(
            "  {:<6} {:>4} {:>4} {:>4}",
            week.label, week.requests, week.quotes, week.won
        ));
    }

    lines.push("product mix:".to_owned());
    for (category, count) in &stats.product_mix {
        lines.push(format!("  {category:<8} {count:>5}"));
    }

    lines.push("turnaround distribution:".to_owned());
    for bucket in &stats.tat_distribution {
        lines.push(format!("  {:<8} {:>5}", bucket.label, bucket.quotes));
    }

    lines.push("most active insurers:".to_owned());
    for activity in &stats.top_insurers {
        lines.push(format!(
            "  {:<44} quoted {:>4}  rejected {:>4}  pending {:>4}",
            activity.insurer, activity.quoted, activity.rejected, activity.pending
        ));
    }

    CommandResult::plain(lines.join("\n"))
}

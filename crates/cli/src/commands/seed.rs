use chrono::Utc;
use insureflow_core::config::{AppConfig, LoadOptions};
use insureflow_core::fixtures::{demo_book, DemoOptions};
use insureflow_core::stats::broker_summary;

use crate::commands::CommandResult;

pub fn run(count: usize, seed: u64, json: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
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
                "seed",
                "catalog_load",
                format!("catalog issue: {error}"),
                2,
            );
        }
    };

    let book = demo_book(&catalog, &DemoOptions::new(count, seed, Utc::now()));
    tracing::info!(requests = book.len(), seed, "demo book generated");

    if json {
        return match serde_json::to_string_pretty(&book) {
            Ok(output) => CommandResult::plain(output),
            Err(error) => CommandResult::failure("seed", "serialization", error.to_string(), 3),
        };
    }

    let summary = broker_summary(&book);
    CommandResult::success(
        "seed",
        format!(
            "generated {} demo requests (seed {seed}): {} awaiting, {} with quotes, {} won",
            summary.total, summary.awaiting, summary.received, summary.closed
        ),
    )
}

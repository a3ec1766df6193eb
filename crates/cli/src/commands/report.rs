use chrono::Utc;
use insureflow_core::config::{AppConfig, LoadOptions};
use insureflow_core::fixtures::{demo_book, DemoOptions};
use insureflow_core::stats::{
    comprehensive_performance, standard_performance, ComprehensiveRow, InsurerPerformance,
    PerformanceBoard, SampledMetricsProvider, StatsFilter,
};

use crate::commands::CommandResult;

pub struct ReportOptions {
    pub filter: StatsFilter,
    pub comprehensive: bool,
    pub count: usize,
    pub seed: u64,
    pub json: bool,
}

pub fn run(options: ReportOptions) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "report",
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
                "report",
                "catalog_load",
                format!("catalog issue: {error}"),
                2,
            );
        }
    };

    let book = demo_book(&catalog, &DemoOptions::new(options.count, options.seed, Utc::now()));
    tracing::info!(
        requests = book.len(),
        comprehensive = options.comprehensive,
        "running performance report"
    );

    if options.comprehensive {
        let provider = SampledMetricsProvider::new(options.seed);
        let rows = comprehensive_performance(&book, &catalog, &options.filter, &provider);
        if options.json {
            return json_result(&rows);
        }
        return CommandResult::plain(render_comprehensive(&rows));
    }

    let rows = standard_performance(&book, &catalog, &options.filter);
    if options.json {
        return json_result(&rows);
    }
    let board = PerformanceBoard::from_rows(rows);
    let mut output = String::new();
    output.push_str(&render_standard("Preferred Insurers", &board.preferred));
    output.push('\n');
    output.push_str(&render_standard("Other Insurers", &board.others));
    CommandResult::plain(output)
}

fn json_result<T: serde::Serialize>(rows: &T) -> CommandResult {
    match serde_json::to_string_pretty(rows) {
        Ok(output) => CommandResult::plain(output),
        Err(error) => CommandResult::failure("report", "serialization", error.to_string(), 3),
    }
}

fn render_standard(title: &str, rows: &[InsurerPerformance]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{title} ({} insurers)", rows.len()));
    lines.push(format!(
        "{:<44} {:>9} {:>7} {:>7} {:>9} {:>6} {:>8} {:>9} {:>9} {:>7}",
        "Insurer", "Requested", "Shared", "Resp %", "L1 Count", "L1 %", "Pending", "Rejected",
        "Avg TAT", "Rating"
    ));
    for row in rows {
        lines.push(format!(
            "{:<44} {:>9} {:>7} {:>6.1}% {:>9} {:>5.1}% {:>8} {:>9} {:>9} {:>7.1}",
            row.insurer,
            row.requests_received,
            row.quotes_shared,
            row.response_rate,
            row.l1_count,
            row.l1_rate,
            row.pending,
            row.rejected,
            row.avg_tat,
            row.rating,
        ));
    }
    lines.join("\n")
}

fn render_comprehensive(rows: &[ComprehensiveRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("Comprehensive Insurer Performance ({} insurers)", rows.len()));
    lines.push(format!(
        "{:<44} {:>9} {:>7} {:>9} {:>8} {:>6} {:>7} {:>7} {:>10} {:>8} {:>7} {:>6}",
        "Insurer", "Requested", "Sub %", "Avg TAT", "SLA %", "Rej %", "L1 %", "Conv %",
        "Prem Won", "Comm %", "Q/Case", "Score"
    ));
    for row in rows {
        lines.push(format!(
            "{:<44} {:>9} {:>6.1}% {:>9} {:>7.1}% {:>5.1}% {:>6.1}% {:>6.1}% {:>10} {:>7.1} {:>7.2} {:>6.1}",
            row.insurer,
            row.requested,
            row.submission_rate,
            row.avg_tat,
            row.sla_compliance,
            row.rejection_rate,
            row.l1_win_rate,
            row.conversion_rate,
            row.premium_won.round(),
            row.avg_commission,
            row.queries_per_case,
            row.score,
        ));
    }
    lines.join("\n")
}

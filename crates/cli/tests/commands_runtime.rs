use insureflow_cli::commands::{config, overview, report, seed, smoke};
use insureflow_core::stats::StatsFilter;
use serde_json::Value;

#[test]
fn seed_reports_the_generated_book() {
    let result = seed::run(50, 7, false);
    assert_eq!(result.exit_code, 0, "expected successful seed run");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "seed");
    assert_eq!(payload["status"], "ok");
    assert!(payload["message"].as_str().expect("message").contains("50 demo requests"));
}

#[test]
fn seed_json_emits_the_full_book() {
    let result = seed::run(10, 7, true);
    assert_eq!(result.exit_code, 0);

    let book: Value = serde_json::from_str(&result.output).expect("book should be valid JSON");
    let requests = book.as_array().expect("array of requests");
    assert_eq!(requests.len(), 10);
    assert_eq!(requests[0]["id"], "OTE-001");
    assert!(requests[0]["insurers"].as_array().expect("insurers").len() > 0);
}

#[test]
fn report_renders_both_performance_tables() {
    let result = report::run(report::ReportOptions {
        filter: StatsFilter::default(),
        comprehensive: false,
        count: 80,
        seed: 7,
        json: false,
    });
    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("Preferred Insurers"));
    assert!(result.output.contains("Other Insurers"));
    assert!(result.output.contains("Rating"));
}

#[test]
fn comprehensive_report_is_sorted_by_score() {
    let result = report::run(report::ReportOptions {
        filter: StatsFilter::default(),
        comprehensive: true,
        count: 80,
        seed: 7,
        json: true,
    });
    assert_eq!(result.exit_code, 0);

    let rows: Value = serde_json::from_str(&result.output).expect("rows should be valid JSON");
    let scores: Vec<f64> = rows
        .as_array()
        .expect("array of rows")
        .iter()
        .map(|row| row["score"].as_f64().expect("score"))
        .collect();
    assert!(!scores.is_empty());
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "rows must be sorted by score");
    assert!(scores.iter().all(|score| (0.0..=10.0).contains(score)));
}

#[test]
fn overview_summarizes_the_portfolio() {
    let result = overview::run(60, 7, false);
    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("portfolio: 60 requests"));
    assert!(result.output.contains("weekly trend"));
    assert!(result.output.contains("turnaround distribution"));
}

#[test]
fn config_lists_effective_values_with_sources() {
    let output = config::run();
    assert!(output.contains("catalog.path"));
    assert!(output.contains("logging.level"));
    assert!(output.contains("43 insurers loaded"));
}

#[test]
fn smoke_passes_end_to_end() {
    let result = smoke::run();
    assert_eq!(result.exit_code, 0, "smoke should pass: {}", result.output);

    let json_line = result.output.lines().last().expect("machine-readable line");
    let report: Value = serde_json::from_str(json_line).expect("smoke report JSON");
    assert_eq!(report["status"], "pass");
    let checks = report["checks"].as_array().expect("checks");
    assert!(checks.iter().all(|check| check["status"] == "pass"), "{report}");
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

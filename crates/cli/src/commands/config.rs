use std::env;
use std::path::PathBuf;

use insureflow_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let catalog_value = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in market book>".to_string());
    lines.push(render_line("catalog.path", &catalog_value, source("INSUREFLOW_CATALOG")));
    lines.push(render_line("logging.level", &config.logging.level, source("INSUREFLOW_LOG_LEVEL")));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        source("INSUREFLOW_LOG_FORMAT"),
    ));

    match config.load_catalog() {
        Ok(catalog) => lines.push(format!("catalog: {} insurers loaded", catalog.len())),
        Err(error) => lines.push(format!("catalog: failed to load ({error})")),
    }

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: &'static str) -> String {
    format!("  {key:<16} = {value}  [{source}]")
}

fn source(env_key: &str) -> &'static str {
    if env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
        "env"
    } else if config_file_present() {
        "file|default"
    } else {
        "default"
    }
}

fn config_file_present() -> bool {
    [PathBuf::from("insureflow.toml"), PathBuf::from("config/insureflow.toml")]
        .iter()
        .any(|path| path.exists())
}

//! Logging initialization.
//!
//! Uses `tracing-subscriber` with either human-readable or JSON output.
//! Logs go to stderr; stdout carries only completion output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for our own crates at `level`, keeping HTTP internals quiet.
fn default_directive(level: &str) -> String {
    format!("databricks_llm={level},databricks_llm_core={level},reqwest=warn,hyper=warn")
}

/// Pick the effective level from config and the `--verbose` flag.
fn effective_level(configured: &str, verbose: bool) -> &str {
    match configured {
        "trace" => "trace",
        _ if verbose => "debug",
        "error" | "warn" | "info" | "debug" => configured,
        _ => "info",
    }
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG`, when set, replaces the computed filter entirely.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` config section plus CLI overrides.
pub fn init_from_config(
    config: &databricks_llm_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let level = effective_level(&config.logging.level, verbose_override);
    let json_format = json_logs_override || config.logging.format == "json";
    init(level, json_format);
}

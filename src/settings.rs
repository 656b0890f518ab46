//! Environment-driven settings shared across binaries.
//!
//! Centralizes the variables the CLIs honor so they resolve output format and
//! log filtering the same way. Command-line flags take precedence over the
//! environment.

use anyhow::{Result, bail};
use std::env;
use tracing_subscriber::EnvFilter;

/// Tracing filter directive (e.g. `debug`, `capadapt=trace`).
pub const LOG_ENV: &str = "CAPADAPT_LOG";
/// Default report format: `text` or `json`.
pub const FORMAT_ENV: &str = "CAPADAPT_FORMAT";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => bail!("unknown report format '{other}' (expected text or json)"),
        }
    }
}

/// Format requested through `CAPADAPT_FORMAT`, if any.
///
/// An empty value counts as unset; an unrecognized value is an error so typos
/// do not silently fall back to text.
pub fn report_format_from_env() -> Result<Option<ReportFormat>> {
    match env::var(FORMAT_ENV) {
        Ok(value) if !value.trim().is_empty() => ReportFormat::parse(&value).map(Some),
        _ => Ok(None),
    }
}

/// Install the stderr fmt subscriber, filtered by `CAPADAPT_LOG`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

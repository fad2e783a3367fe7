//! Tracing/logging initialization.
//!
//! Settings come from the environment:
//!
//! - `RUST_LOG`: filter directives, default `info`
//! - `INVOICING_LOG_FORMAT`: `json` (default) or `pretty`
//! - `INVOICING_LOG_TARGET`: include event targets, default `false`

use tracing_subscriber::EnvFilter;

pub const FORMAT_VAR: &str = "INVOICING_LOG_FORMAT";
pub const TARGET_VAR: &str = "INVOICING_LOG_TARGET";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Unknown values fall back to JSON.
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub filter: String,
    pub format: LogFormat,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Json,
            with_target: false,
        }
    }
}

impl TracingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = lookup(EnvFilter::DEFAULT_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let format = lookup(FORMAT_VAR)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        let with_target = lookup(TARGET_VAR)
            .and_then(|v| v.trim().parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            filter,
            format,
            with_target,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize tracing/logging for the process from the environment.
pub fn init() {
    init_with(&TracingConfig::from_env());
}

/// Initialize tracing/logging with an explicit configuration.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_with(config: &TracingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(config.with_target);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Pretty => builder.pretty().try_init().is_ok(),
    };
    if installed {
        ::tracing::debug!(filter = %config.filter, format = ?config.format, "tracing initialized");
    }
    installed
}

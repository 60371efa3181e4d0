//! Log filter and format selection for the binary
//!
//! `RUST_LOG` wins when it holds a valid filter. Otherwise the crate logs at
//! `info`, or `debug` with `-v`; per-record skips are only visible at debug.
//! `LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::EnvFilter;

/// Target prefix of every event emitted by this crate
pub const LOG_TARGET: &str = "channel_harvester";

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Format named by the `LOG_FORMAT` value, `Text` unless it is `json`
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Filter directive used when `RUST_LOG` is absent
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{LOG_TARGET}={level}")
}

/// Build the event filter from the `-v` flag and the `RUST_LOG` value
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber from the process environment
pub fn init_tracing(verbose: bool) {
    let filter = log_filter(verbose, std::env::var("RUST_LOG").ok().as_deref());
    let format = LogFormat::from_env_value(std::env::var(LOG_FORMAT_ENV_VAR).ok().as_deref());

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

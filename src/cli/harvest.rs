//! Harvest command implementation

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::harvester::config::{
    resolve_api_key, API_KEY_ENV_VAR, DEFAULT_API_BASE_URL, RATE_LIMIT_WINDOW,
};
use crate::harvester::{HarvestConfig, HarvestExecutor};
use crate::output::sink_for_path;

use super::CliError;

/// Parse and validate a requests-per-minute value
fn parse_rate(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("requests per minute must be at least 1".to_string());
    }
    Ok(value)
}

/// Parse a timeout in whole seconds
fn parse_timeout(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(value)
}

/// CLI structure
#[derive(Parser, Debug)]
#[command(name = "channel-harvester")]
#[command(about = "Harvest video metadata and comments from a YouTube channel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Channel handle (@name) or channel URL
    pub channel: String,

    /// Output workbook path (.xlsx); a .csv path writes one CSV file per sheet instead
    #[arg(short, long, default_value = "youtube_data.xlsx")]
    pub output: PathBuf,

    /// Maximum number of comments (including replies) to collect across all videos
    #[arg(short = 'c', long, default_value_t = 100)]
    pub max_comments: usize,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// API key (falls back to the YOUTUBE_API_KEY environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Maximum number of retries for transient failures
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", value_parser = parse_timeout)]
    pub timeout_secs: u64,

    /// Maximum API calls per minute
    #[arg(long, default_value = "60", value_parser = parse_rate)]
    pub requests_per_minute: usize,

    /// API base URL, for testing against a mock server
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,
}

impl Cli {
    /// Build the run configuration
    ///
    /// `env_api_key` is the value of the API key environment variable, if any.
    /// The `--api-key` flag takes precedence over it.
    ///
    /// # Errors
    /// `ConfigurationError` if no API key is available.
    pub fn to_config(&self, env_api_key: Option<String>) -> Result<HarvestConfig, CliError> {
        let api_key = resolve_api_key(self.api_key.clone(), env_api_key).ok_or_else(|| {
            CliError::ConfigurationError(format!(
                "no API key provided; pass --api-key or set {API_KEY_ENV_VAR}"
            ))
        })?;

        Ok(HarvestConfig::new(api_key)
            .with_max_comments(self.max_comments)
            .with_output(self.output.clone())
            .with_api_base_url(self.api_base_url.clone())
            .with_max_retries(self.max_retries)
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
            .with_rate_limit(self.requests_per_minute, RATE_LIMIT_WINDOW))
    }

    /// Execute the harvest and export the results
    ///
    /// The API key is checked before anything touches the network.
    pub async fn execute(&self) -> Result<(), CliError> {
        let config = self.to_config(std::env::var(API_KEY_ENV_VAR).ok())?;

        info!(
            "Harvesting channel {} (comment budget {}, output {})",
            self.channel,
            config.max_comments,
            config.output.display()
        );

        let executor = HarvestExecutor::from_config(&config)?;
        let report = executor.run(&self.channel).await?;

        let mut sink = sink_for_path(&config.output);
        report.export(sink.as_mut())?;

        info!(
            "Export complete: {} videos, {} comments -> {}",
            report.videos.len(),
            report.comments.len(),
            config.output.display()
        );
        Ok(())
    }
}

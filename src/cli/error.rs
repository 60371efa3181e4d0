//! CLI error types and conversions

use crate::harvester::HarvestError;
use crate::output::OutputError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Harvest failed
    #[error("harvest failed: {0}")]
    HarvestError(#[from] HarvestError),

    /// Export failed
    #[error("output error: {0}")]
    OutputError(#[from] OutputError),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

//! CLI command implementations

pub mod error;
pub mod harvest;
pub mod logging;

pub use error::CliError;
pub use harvest::Cli;
pub use logging::{init_tracing, log_filter};

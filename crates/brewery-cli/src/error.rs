//! Error types for the `brewery-events` binary.
//!
//! [`CliError`] wraps every failure a subcommand can hit so `run` can
//! propagate with `?` and `main` reports it once.

use brewery_events::{ConfigError, LoadError, WriteError};

/// Top-level error for the command-line tool.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The events file could not be loaded or saved.
    #[error("events error: {source}")]
    Events {
        /// The underlying load error.
        #[from]
        source: LoadError,
    },

    /// Canonical output could not be written.
    #[error("output error: {source}")]
    Output {
        /// The underlying write error.
        #[from]
        source: WriteError,
    },
}

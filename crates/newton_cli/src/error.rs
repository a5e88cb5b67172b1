//! CLI error types.

use newton_core::types::SolverError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `newton` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `--x0` could not be parsed.
    #[error("Invalid initial guess '{input}': {reason}")]
    InvalidGuess {
        /// Raw argument
        input: String,
        /// What went wrong
        reason: String,
    },

    /// The solver returned a failure.
    #[error("Solver failed: {0}")]
    Solver(#[from] SolverError),
}

impl CliError {
    /// Create an invalid guess error.
    pub fn invalid_guess(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGuess {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; the dispatcher in
//! [`crate::run`] turns the variant into an exit code.

use std::fmt;

use hupoker_ai::AiError;
use hupoker_engine::errors::GameError;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(GameError),

    /// Operation was interrupted (e.g., by the user quitting)
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

// unknown AI names are a user mistake, not an engine failure
impl From<AiError> for CliError {
    fn from(error: AiError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

//! CLI error types.

use std::fmt;

/// Errors surfaced to the terminal by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// The aircraft index could not be built.
    Index(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Index(msg) => write!(f, "Index error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::Index("no content roots".to_string());
        assert!(err.to_string().contains("Index error"));
        assert!(err.to_string().contains("no content roots"));
    }
}

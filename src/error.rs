//! Error types for flag inspection and command dispatch

use crate::probe::ProbeError;
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;
/// Exit code for runtime failures (probe, I/O, configuration)
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for usage errors (unknown command, unknown flag, bad parameter)
pub const EXIT_USAGE: i32 = 2;

/// Errors that can occur while building the registries or running a command
#[derive(Error, Debug)]
pub enum Error {
    /// First token did not resolve to a command, even after default fallback
    #[error("No such command: {0}")]
    UnknownCommand(String),

    /// Flag name or alias not present in the flag registry
    #[error("No such flag: {0}")]
    UnknownFlag(String),

    /// Missing required positional, nonexistent path or malformed option
    #[error("Invalid parameter: {0}")]
    Parameter(String),

    /// A second command was registered as the default
    #[error("Default command already set to '{existing}', cannot also make '{name}' the default")]
    DuplicateDefault {
        /// Command already holding the default slot
        existing: String,
        /// Command that tried to take it
        name: String,
    },

    /// The same alias was declared by two different owners
    #[error("Alias '{alias}' is declared by both '{first}' and '{second}'")]
    DuplicateAlias {
        /// Conflicting alias
        alias: String,
        /// Owner registered first
        first: String,
        /// Owner registered second
        second: String,
    },

    /// Flag table entry that cannot be registered
    #[error("Invalid flag definition: {0}")]
    InvalidFlag(String),

    /// External probe failed
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a parameter error with context
    pub fn parameter<S: Into<String>>(msg: S) -> Self {
        Self::Parameter(msg.into())
    }

    /// Create a configuration error with context
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Process exit code this error maps to
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownCommand(_) | Error::UnknownFlag(_) | Error::Parameter(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether the usage text should accompany the message
    pub fn shows_usage(&self) -> bool {
        matches!(self, Error::UnknownCommand(_) | Error::Parameter(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Config(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::UnknownCommand("x".into()).exit_code(), EXIT_USAGE);
        assert_eq!(Error::UnknownFlag("bogus".into()).exit_code(), EXIT_USAGE);
        assert_eq!(Error::parameter("missing").exit_code(), EXIT_USAGE);
        assert_eq!(Error::config("bad").exit_code(), EXIT_FAILURE);
        assert_eq!(
            Error::Probe(ProbeError::UnexpectedOutput("".into())).exit_code(),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_messages() {
        let err = Error::DuplicateDefault {
            existing: "file".into(),
            name: "other".into(),
        };
        assert!(err.to_string().contains("'file'"));
        assert!(err.to_string().contains("'other'"));
        assert_eq!(Error::UnknownFlag("bogus".into()).to_string(), "No such flag: bogus");
    }

    #[test]
    fn test_anyhow_becomes_config() {
        let err: Error = anyhow::anyhow!("unreadable").context("loading settings").into();
        match err {
            Error::Config(msg) => {
                assert!(msg.contains("loading settings"));
                assert!(msg.contains("unreadable"));
            }
            other => panic!("Expected config error, got {:?}", other),
        }
    }
}

//! Flag probe - asks the operating system which flags are set on a file
//!
//! The probe is the boundary to the outside world. [`LsProbe`] shells out
//! to the system listing utility; tests substitute their own
//! [`FlagProbe`] implementations.

pub mod listing;
pub mod ls;

pub use listing::parse_listing;
pub use ls::LsProbe;

use crate::flags::Flag;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while querying a file's flags
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The listing utility could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The listing utility exited unsuccessfully
    #[error("Probe failed with status {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// Output did not contain a flags column
    #[error("Unexpected probe output: {0:?}")]
    UnexpectedOutput(String),

    /// Target path does not exist
    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),
}

/// Source of truth for the flags currently set on a file.
///
/// Implementations must not cache results across paths; every call is a
/// fresh inspection.
pub trait FlagProbe: Send + Sync {
    /// Canonical names of the flags set on `path`, in the order reported
    fn flags_set(&self, path: &Path) -> Result<Vec<&'static str>, ProbeError>;

    /// Whether `flag` is set on `path`
    fn has(&self, path: &Path, flag: &Flag) -> Result<bool, ProbeError> {
        Ok(self.flags_set(path)?.contains(&flag.canonical_id()))
    }
}

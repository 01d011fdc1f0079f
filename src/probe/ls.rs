//! Probe backed by the system `ls` utility

use super::listing::parse_listing;
use super::{FlagProbe, ProbeError};
use crate::config::ProbeSettings;
use crate::flags::FlagRegistry;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::debug;

/// Runs `<program> <args...> -- <path>` and reads the flags column.
#[derive(Debug, Clone)]
pub struct LsProbe {
    program: String,
    args: Vec<String>,
    flags_column: usize,
    registry: Arc<FlagRegistry>,
}

impl LsProbe {
    /// Initialize the probe.
    ///
    /// # Arguments
    /// * `settings` - Listing program, its arguments and the flags column.
    /// * `registry` - Used to normalise reported names to canonical ones.
    pub fn new(settings: &ProbeSettings, registry: Arc<FlagRegistry>) -> Self {
        Self {
            program: settings.program.clone(),
            args: settings.args.clone(),
            flags_column: settings.flags_column,
            registry,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl FlagProbe for LsProbe {
    fn flags_set(&self, path: &Path) -> Result<Vec<&'static str>, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::NotFound(path.to_path_buf()));
        }

        debug!(program = %self.program, args = ?self.args, path = %path.display(), "probing flags");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("--")
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let flags = parse_listing(&stdout, self.flags_column, &self.registry)?;
        debug!(?flags, "probe result");
        Ok(flags)
    }
}

//! Environment variable overrides.

use super::settings::Settings;
use std::env;
use std::path::PathBuf;

/// Settings file location
pub const CONFIG_VAR: &str = "GETFLAGS_CONFIG";
/// Listing program used by the probe
pub const LS_VAR: &str = "GETFLAGS_LS";
/// https://no-color.org
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Snapshot of the environment variables the tool cares about.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentLoader {
    pub config_path: Option<PathBuf>,
    pub ls_program: Option<String>,
    pub no_color: bool,
}

impl EnvironmentLoader {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self {
            config_path: non_empty(CONFIG_VAR).map(PathBuf::from),
            ls_program: non_empty(LS_VAR),
            no_color: env::var_os(NO_COLOR_VAR).is_some_and(|v| !v.is_empty()),
        }
    }

    /// Apply the overrides on top of file or default settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(program) = &self.ls_program {
            settings.probe.program = program.clone();
        }
        if self.no_color {
            settings.output.color = false;
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

//! TOML settings parsing and management.

use super::environment::EnvironmentLoader;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Main settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub probe: ProbeSettings,
    pub output: OutputSettings,
}

/// How the flag probe invokes the listing utility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Listing program, `/bin/ls` by default
    pub program: String,
    /// Arguments placed before the path
    pub args: Vec<String>,
    /// Zero-based whitespace column holding the flags
    pub flags_column: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            program: "/bin/ls".to_string(),
            args: vec![default_ls_flags().to_string()],
            flags_column: 4,
        }
    }
}

/// FreeBSD spells the flags option `-o`, macOS `-O`.
fn default_ls_flags() -> &'static str {
    if cfg!(any(target_os = "freebsd", target_os = "dragonfly")) {
        "-ldo"
    } else {
        "-ldO"
    }
}

/// Output rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when neither `--long` nor `--short` is given
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Short,
            color: true,
        }
    }
}

/// Flag listing format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space separated names of the flags that are on
    #[default]
    Short,
    /// One `name on|off` line per flag
    Long,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Short => "short",
            OutputFormat::Long => "long",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "short" => Ok(OutputFormat::Short),
            "long" => Ok(OutputFormat::Long),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Loads [`Settings`] and remembers where they came from.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    /// File the settings were read from, `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub settings: Settings,
}

impl SettingsLoader {
    /// Load settings from an explicit path, or use defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Settings file not found: {}", path.display());
                }
                Ok(Self {
                    source: Some(path.to_path_buf()),
                    settings: Self::load(path)?,
                })
            }
            None => Ok(Self {
                source: None,
                settings: Settings::default(),
            }),
        }
    }

    /// Locate settings the way the binary does and apply environment overrides.
    ///
    /// Order: `GETFLAGS_CONFIG`, then `<config dir>/getflags/config.toml`
    /// when present, then defaults.
    pub fn discover(env: &EnvironmentLoader) -> Result<Self> {
        let mut loader = match &env.config_path {
            Some(path) => Self::new(Some(path.as_path()))?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::new(Some(path.as_path()))?,
                None => Self::new(None)?,
            },
        };

        env.apply(&mut loader.settings);
        debug!(source = ?loader.source, "settings loaded");
        Ok(loader)
    }

    /// `<config dir>/getflags/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("getflags").join("config.toml"))
    }

    fn load(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }
}

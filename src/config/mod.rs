//! Configuration for the flag viewer.
//!
//! Settings come from an optional TOML file and are then adjusted by a
//! handful of environment variables.
//!
//! # Example
//!
//! ```no_run
//! use bsdflags::config::{EnvironmentLoader, SettingsLoader};
//!
//! let env = EnvironmentLoader::from_env();
//! let loader = SettingsLoader::discover(&env).unwrap();
//! println!("probe program: {}", loader.settings.probe.program);
//! ```

pub mod environment;
pub mod settings;

// Re-export main types for convenience
pub use self::environment::EnvironmentLoader;
pub use self::settings::{OutputFormat, OutputSettings, ProbeSettings, Settings, SettingsLoader};

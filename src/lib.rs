//! bsdflags - inspect BSD file flags
//!
//! A small library behind the `getflags` tool:
//!
//! - **`flags`** - the fixed `chflags(1)` flag table and a name/alias registry
//! - **`probe`** - asks the system which flags are set on a file
//! - **`file`** - a file under inspection, with memoized probe results
//! - **`config`** - TOML settings and environment overrides
//! - **`cli`** - a reusable command framework (aliases, default command,
//!   synthesized help) and the `getflags` commands
//! - **`observability`** - tracing-subscriber setup
//!
//! # Features
//!
//! The `cli` feature (on by default) enables the command framework, the
//! binary and their rendering dependencies. Without it only the flag,
//! probe, file and config layers are built.
//!
//! # Example
//!
//! ```
//! use bsdflags::flags::FlagRegistry;
//!
//! let registry = FlagRegistry::builtin().unwrap();
//! assert!(std::ptr::eq(
//!     registry.lookup("uchange").unwrap(),
//!     registry.lookup("uchg").unwrap(),
//! ));
//! ```

/// Crate-wide error type and exit codes
pub mod error;

/// Flag descriptors and registry
pub mod flags;

/// Flag probes
pub mod probe;

/// Files under inspection
pub mod file;

/// Settings
pub mod config;

/// Command framework and commands (enabled with the `cli` feature)
#[cfg(feature = "cli")]
pub mod cli;

/// Logging setup (enabled with the `cli` feature)
#[cfg(feature = "cli")]
pub mod observability;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{OutputFormat, Settings, SettingsLoader};
    pub use crate::error::{Error, Result};
    pub use crate::file::InspectedFile;
    pub use crate::flags::{Flag, FlagRegistry, Privilege};
    pub use crate::probe::{FlagProbe, LsProbe, ProbeError};

    #[cfg(feature = "cli")]
    pub use crate::cli::{
        AppContext, Command, CommandRegistry, Dispatcher, Invocation, Parameter,
    };
}

//! Logging setup.
//!
//! Diagnostics go through `tracing` to stderr. `RUST_LOG` takes
//! precedence; otherwise `--debug` selects debug output for this crate
//! and warnings are shown for everything else.
//!
//! # Example
//!
//! ```no_run
//! use bsdflags::observability::init_logging;
//!
//! init_logging(true);
//! tracing::debug!("visible with --debug");
//! ```

pub mod logger;

// Re-export main functions for convenience
pub use logger::{default_directive, init_logging};

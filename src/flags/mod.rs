//! BSD file flags
//!
//! A fixed table of the `chflags(1)` attribute bits and a lookup
//! registry over every name and alias they answer to.
//!
//! # Example
//!
//! ```
//! use bsdflags::flags::FlagRegistry;
//!
//! let registry = FlagRegistry::builtin().unwrap();
//! let flag = registry.lookup("uimmutable").unwrap();
//! assert_eq!(flag.canonical_id(), "uchg");
//! ```

pub mod flag;
pub mod registry;
pub mod table;

// Re-export main types for convenience
pub use flag::{Flag, Privilege};
pub use registry::FlagRegistry;
pub use table::BSD_FLAGS;

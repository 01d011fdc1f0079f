//! Command framework and the `getflags` commands built on it
//!
//! The framework is generic over an application context `C`:
//!
//! - [`Command`] / [`Parameter`] - plain descriptors plus a callback
//! - [`CommandRegistry`] - names and aliases, default-command fallback
//! - [`ArgumentFormatter`] - metavars, usage lines, help pages
//! - [`Dispatcher`] - argv in, exit code out
//!
//! # Example
//!
//! ```
//! use bsdflags::cli::{Command, CommandRegistry, Dispatcher, Invocation, Parameter};
//! use std::io::Write;
//!
//! let registry = CommandRegistry::new()
//!     .with(
//!         Command::new("greet", |inv: &mut Invocation<'_, ()>| {
//!             writeln!(inv.out, "hello {}", inv.args.get_one("name").unwrap_or("you"))?;
//!             Ok(())
//!         })
//!         .default_command()
//!         .arg(Parameter::positional("name").required(false)),
//!     )
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new("tool", registry, ());
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = dispatcher.run_with(&["world".to_string()], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert_eq!(out, b"hello world\n");
//! ```

pub mod command;
pub mod commands;
pub mod dispatcher;
pub mod formatter;
pub mod parser;
pub mod registry;
pub mod runner;
pub mod utils;

pub use command::{Arity, Command, Invocation, Parameter, ParameterKind, ParsedArgs};
pub use dispatcher::{Dispatcher, GlobalOptions};
pub use formatter::ArgumentFormatter;
pub use registry::{CommandRegistry, Resolution};
pub use runner::{build_dispatcher, build_registry, AppContext};

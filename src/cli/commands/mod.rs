//! Commands of the `getflags` tool
//!
//! - file: print the flags set on a file (default command)
//! - list: print every known flag

pub mod file;
pub mod list;

pub use file::file_command;
pub use list::list_command;

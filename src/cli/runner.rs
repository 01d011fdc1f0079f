//! Assembly of the `getflags` tool from the command framework
//!
//! [`AppContext`] carries the read-only state every command needs; it is
//! built once in `main` and handed to the [`Dispatcher`] by value.

use super::commands::{file_command, list_command};
use super::dispatcher::Dispatcher;
use super::registry::CommandRegistry;
use crate::config::Settings;
use crate::error::Result;
use crate::flags::FlagRegistry;
use crate::probe::FlagProbe;
use std::sync::Arc;

/// Program name used in usage lines and messages
pub const PROGRAM: &str = "getflags";

/// One-line description shown in the group help
pub const ABOUT: &str = "getflags -- BSD flag viewer";

/// Shared state for command callbacks
#[derive(Clone)]
pub struct AppContext {
    pub flags: Arc<FlagRegistry>,
    pub probe: Arc<dyn FlagProbe>,
    pub settings: Settings,
}

impl AppContext {
    pub fn new(flags: Arc<FlagRegistry>, probe: Arc<dyn FlagProbe>, settings: Settings) -> Self {
        Self {
            flags,
            probe,
            settings,
        }
    }
}

/// Register the tool's commands; fails only on a conflicting command table
pub fn build_registry() -> Result<CommandRegistry<AppContext>> {
    CommandRegistry::new()
        .with(file_command())?
        .with(list_command())
}

/// The complete `getflags` dispatcher over `ctx`
pub fn build_dispatcher(ctx: AppContext) -> Result<Dispatcher<AppContext>> {
    let registry = build_registry()?;
    Ok(Dispatcher::new(PROGRAM, registry, ctx)
        .about(ABOUT)
        .version(env!("CARGO_PKG_VERSION")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeError;
    use std::path::Path;

    struct NoFlags;

    impl FlagProbe for NoFlags {
        fn flags_set(&self, _path: &Path) -> std::result::Result<Vec<&'static str>, ProbeError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_registry_contents() {
        let registry = build_registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_command().unwrap().name(), "file");
        assert!(std::ptr::eq(registry.get("f").unwrap(), registry.get("file").unwrap()));
        assert!(std::ptr::eq(registry.get("ls").unwrap(), registry.get("list").unwrap()));
    }

    #[test]
    fn test_usage_lines() {
        let ctx = AppContext::new(
            Arc::new(FlagRegistry::builtin().unwrap()),
            Arc::new(NoFlags),
            Settings::default(),
        );
        let dispatcher = build_dispatcher(ctx).unwrap();
        let usage = dispatcher.formatter().group_usage(dispatcher.registry());
        assert_eq!(
            usage,
            "Usage: getflags [file] [-v] [-a] [-l|-s] <filename> [<flag>]\n       getflags list\n"
        );
    }
}

use bsdflags::cli::utils::display_error;
use bsdflags::cli::{build_dispatcher, AppContext};
use bsdflags::config::{EnvironmentLoader, SettingsLoader};
use bsdflags::error::{Error, EXIT_FAILURE};
use bsdflags::flags::FlagRegistry;
use bsdflags::probe::LsProbe;
use std::io;
use std::process;
use std::sync::Arc;

fn main() {
    let env = EnvironmentLoader::from_env();
    let settings = match SettingsLoader::discover(&env) {
        Ok(loader) => loader.settings,
        Err(e) => fail(&Error::from(e)),
    };

    if !settings.output.color {
        colored::control::set_override(false);
    }

    let flags = match FlagRegistry::builtin() {
        Ok(flags) => Arc::new(flags),
        Err(e) => fail(&e),
    };
    let probe = Arc::new(LsProbe::new(&settings.probe, Arc::clone(&flags)));
    let ctx = AppContext::new(flags, probe, settings);

    let dispatcher = match build_dispatcher(ctx) {
        Ok(dispatcher) => dispatcher.with_logging(true),
        Err(e) => fail(&e),
    };

    process::exit(dispatcher.run(std::env::args_os().skip(1)));
}

fn fail(error: &Error) -> ! {
    display_error(&mut io::stderr(), error, "getflags");
    process::exit(EXIT_FAILURE);
}

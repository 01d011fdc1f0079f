//! Dispatcher - the entry point that turns an argument vector into an exit code
//!
//! Steps, in order:
//! 1. consume leading global options (`--debug`, `--help`, `--version`)
//! 2. resolve the command through the registry, falling back to the default
//! 3. bind the remaining arguments to the command's parameters
//! 4. run the callback
//!
//! Every error surfaces here and nowhere else is it mapped to an exit code.

use super::command::{Invocation, Parameter};
use super::formatter::ArgumentFormatter;
use super::parser::parse_parameters;
use super::registry::CommandRegistry;
use super::utils::display_error;
use crate::error::{Error, Result, EXIT_FAILURE, EXIT_OK};
use std::ffi::OsString;
use std::io::{self, Write};
use tracing::debug;

/// Options recognised before the command token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub debug: bool,
    pub help: bool,
    pub version: bool,
}

/// Composes a command registry, a formatter and the application context
pub struct Dispatcher<C> {
    registry: CommandRegistry<C>,
    context: C,
    formatter: ArgumentFormatter,
    about: Option<String>,
    version: Option<String>,
    init_logging: bool,
}

impl<C> Dispatcher<C> {
    pub fn new(program: impl Into<String>, registry: CommandRegistry<C>, context: C) -> Self {
        Self {
            registry,
            context,
            formatter: ArgumentFormatter::new(program),
            about: None,
            version: None,
            init_logging: false,
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Install the tracing subscriber once global options are known
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.init_logging = enabled;
        self
    }

    pub fn registry(&self) -> &CommandRegistry<C> {
        &self.registry
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn formatter(&self) -> &ArgumentFormatter {
        &self.formatter
    }

    /// Global options as parameters, for help rendering
    pub fn global_options() -> Vec<Parameter> {
        vec![
            Parameter::switch("debug", Some('d'), "debug").help("Print debugging information"),
            Parameter::switch("help", Some('h'), "help").help("Show this message and exit"),
            Parameter::switch("version", Some('V'), "version").help("Print version and exit"),
        ]
    }

    /// Split leading global options off `argv`
    pub fn split_globals(argv: &[String]) -> (GlobalOptions, &[String]) {
        let mut globals = GlobalOptions::default();
        let mut consumed = 0;

        for token in argv {
            match token.as_str() {
                "-d" | "--debug" => globals.debug = true,
                "-h" | "--help" => globals.help = true,
                "-V" | "--version" => globals.version = true,
                _ => break,
            }
            consumed += 1;
        }

        (globals, &argv[consumed..])
    }

    /// Full help page
    pub fn group_help(&self) -> String {
        self.formatter
            .group_help(self.about.as_deref(), &Self::global_options(), &self.registry)
    }

    /// Run against the process's stdout and stderr.
    ///
    /// Accepts raw `args_os()` entries; one that is not valid UTF-8 is a
    /// parameter error.
    pub fn run<I, S>(&self, argv: I) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run_os_with(argv, &mut stdout.lock(), &mut stderr.lock())
    }

    /// [`run_with`](Self::run_with) over raw OS arguments
    pub fn run_os_with<I, S>(&self, argv: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        match utf8_args(argv) {
            Ok(argv) => self.run_with(&argv, out, err),
            Err(e) => {
                let usage = self.formatter.group_usage(&self.registry);
                self.fail(err, &e, Some(usage))
            }
        }
    }

    /// Run with explicit output streams; returns the process exit code
    pub fn run_with(&self, argv: &[String], out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        let (globals, rest) = Self::split_globals(argv);
        if self.init_logging {
            crate::observability::init_logging(globals.debug);
        }
        debug!(?globals, args = ?rest, "dispatching");

        if globals.help {
            return emit(out, &self.group_help());
        }
        if globals.version {
            let line = format!(
                "{} {}\n",
                self.formatter.program(),
                self.version.as_deref().unwrap_or("unknown")
            );
            return emit(out, &line);
        }

        let resolution = match self.registry.resolve(rest) {
            Ok(resolution) => resolution,
            Err(e) => {
                let usage = self.formatter.group_usage(&self.registry);
                return self.fail(err, &e, Some(usage));
            }
        };
        let command = resolution.command;

        if wants_help(command.parameters(), &resolution.args) {
            return emit(out, &self.formatter.command_help(command));
        }

        let usage = || format!("Usage: {}\n", self.formatter.usage_line(command));
        let parsed = match parse_parameters(command, &resolution.args) {
            Ok(parsed) => parsed,
            Err(e) => return self.fail(err, &e, Some(usage())),
        };

        let command_path = self.formatter.command_path(command);
        let result = {
            let mut invocation = Invocation {
                context: &self.context,
                args: &parsed,
                debug: globals.debug,
                command_path: &command_path,
                out: &mut *out,
            };
            command.invoke(&mut invocation)
        };

        match result.and_then(|()| out.flush().map_err(Error::from)) {
            Ok(()) => EXIT_OK,
            Err(e) => self.fail(err, &e, Some(usage())),
        }
    }

    fn fail(&self, err: &mut dyn Write, error: &Error, usage: Option<String>) -> i32 {
        debug!(error = ?error, "command failed");
        display_error(err, error, self.formatter.program());
        if error.shows_usage() {
            if let Some(usage) = usage {
                let _ = write!(err, "\n{}", usage);
            }
        }
        let _ = err.flush();
        error.exit_code()
    }
}

/// Convert OS arguments to strings, rejecting any that are not UTF-8
pub fn utf8_args<I, S>(argv: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    argv.into_iter()
        .map(|arg| {
            arg.into().into_string().map_err(|raw| {
                Error::parameter(format!("argument {:?} is not valid UTF-8", raw))
            })
        })
        .collect()
}

/// `-h`/`--help` before any `--`, unless the command claims the token itself
fn wants_help(parameters: &[Parameter], args: &[String]) -> bool {
    args.iter()
        .take_while(|a| a.as_str() != "--")
        .filter(|a| a.as_str() == "-h" || a.as_str() == "--help")
        .any(|a| !parameters.iter().any(|p| p.matches_opt(a)))
}

fn emit(out: &mut dyn Write, text: &str) -> i32 {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => EXIT_OK,
        Err(_) => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::Command;
    use crate::error::EXIT_USAGE;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        calls: AtomicUsize,
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn greet(inv: &mut Invocation<'_, Counter>) -> Result<()> {
        inv.context.calls.fetch_add(1, Ordering::SeqCst);
        let name = inv.args.get_one("name").unwrap_or("world");
        if name == "fail" {
            return Err(Error::parameter("refusing to greet 'fail'"));
        }
        writeln!(inv.out, "hello {}{}", name, if inv.debug { " (debug)" } else { "" })?;
        Ok(())
    }

    fn dispatcher() -> Dispatcher<Counter> {
        let registry = CommandRegistry::new()
            .with(
                Command::new("greet", greet)
                    .alias("g")
                    .default_command()
                    .about("Say hello")
                    .arg(Parameter::positional("name").required(false)),
            )
            .unwrap()
            .with(Command::new("quiet", |_: &mut Invocation<'_, Counter>| Ok(())).about("Do nothing"))
            .unwrap();
        Dispatcher::new("tool", registry, Counter::default())
            .about("tool -- test dispatcher")
            .version("1.2.3")
    }

    fn run(d: &Dispatcher<Counter>, tokens: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = d.run_with(&argv(tokens), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_default_fallback() {
        let d = dispatcher();
        assert_eq!(run(&d, &["alice"]), (0, "hello alice\n".to_string(), String::new()));
        assert_eq!(run(&d, &[]).1, "hello world\n");
        assert_eq!(d.context().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_explicit_command_and_alias() {
        let d = dispatcher();
        assert_eq!(run(&d, &["g", "bob"]).1, "hello bob\n");
        assert_eq!(run(&d, &["quiet"]), (0, String::new(), String::new()));
    }

    #[test]
    fn test_global_debug() {
        let d = dispatcher();
        assert_eq!(run(&d, &["--debug", "carol"]).1, "hello carol (debug)\n");
        assert_eq!(run(&d, &["-d"]).1, "hello world (debug)\n");
    }

    #[test]
    fn test_group_help() {
        let d = dispatcher();
        let (code, out, _) = run(&d, &["--help"]);
        assert_eq!(code, 0);
        assert!(out.starts_with("Usage: tool [greet] [<name>]\n       tool quiet\n"));
        assert!(out.contains("tool -- test dispatcher"));
        assert!(out.contains("-d, --debug"));
        assert!(out.contains("[greet]  Say hello"));
    }

    #[test]
    fn test_command_help() {
        let d = dispatcher();
        let (code, out, _) = run(&d, &["quiet", "--help"]);
        assert_eq!(code, 0);
        assert!(out.starts_with("Usage: tool quiet"));
        assert_eq!(d.context().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_version() {
        let d = dispatcher();
        assert_eq!(run(&d, &["-V"]).1, "tool 1.2.3\n");
    }

    #[test]
    fn test_unknown_command_without_default() {
        let registry = CommandRegistry::new()
            .with(Command::new("quiet", |_: &mut Invocation<'_, ()>| Ok(())))
            .unwrap();
        let d = Dispatcher::new("tool", registry, ());

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = d.run_with(&argv(&["nope"]), &mut out, &mut err);
        let err = String::from_utf8(err).unwrap();

        assert_eq!(code, EXIT_USAGE);
        assert!(err.contains("No such command: nope"));
        assert!(err.contains("Usage: tool quiet"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_parameter_error_shows_command_usage() {
        let d = dispatcher();
        let (code, _, err) = run(&d, &["greet", "a", "b"]);
        assert_eq!(code, EXIT_USAGE);
        assert!(err.contains("Usage: tool [greet] [<name>]"));
        assert_eq!(d.context().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_callback_error() {
        let d = dispatcher();
        let (code, out, err) = run(&d, &["fail"]);
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert!(err.contains("refusing to greet"));
    }

    #[test]
    fn test_split_globals_stops_at_first_other_token() {
        let args = argv(&["-d", "greet", "-d"]);
        let (globals, rest) = Dispatcher::<()>::split_globals(&args);
        assert!(globals.debug);
        assert!(!globals.help);
        assert_eq!(rest, &args[1..]);
    }

    #[test]
    fn test_utf8_args() {
        assert_eq!(utf8_args(["a", "-l"]).unwrap(), argv(&["a", "-l"]));
        assert!(utf8_args(Vec::<OsString>::new()).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_is_parameter_error() {
        use std::os::unix::ffi::OsStringExt;

        let d = dispatcher();
        let raw = OsString::from_vec(vec![b'n', b'o', 0xff, b'.', b't', b'x', b't']);
        assert!(matches!(
            utf8_args([OsString::from("-l"), raw.clone()]),
            Err(Error::Parameter(_))
        ));

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = d.run_os_with([raw], &mut out, &mut err);
        let err = String::from_utf8(err).unwrap();

        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert!(err.contains("not valid UTF-8"), "{}", err);
        assert!(err.contains("Usage: tool [greet]"));
        assert_eq!(d.context().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_run_os_with_valid_arguments() {
        let d = dispatcher();
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert_eq!(d.run_os_with(["dave"], &mut out, &mut err), 0);
        assert_eq!(out, b"hello dave\n");
    }

    #[test]
    fn test_wants_help() {
        assert!(wants_help(&[], &argv(&["x", "--help"])));
        assert!(!wants_help(&[], &argv(&["--", "--help"])));
        let claims = [Parameter::switch("human", Some('h'), "human")];
        assert!(!wants_help(&claims, &argv(&["-h"])));
    }
}

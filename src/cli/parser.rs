//! Parameter parser - binds a command's remaining arguments to its parameters
//!
//! A throwaway clap command is built from the declared parameters, the
//! arguments are matched against it, and the matches are flattened into
//! [`ParsedArgs`]. Resolution of the command itself happens before this,
//! in the registry; clap only ever sees one command's arguments.

use super::command::{Arity, Command, Parameter, ParameterKind, ParsedArgs};
use crate::error::{Error, Result};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};

/// Parse `args` against the parameters `command` declares
pub fn parse_parameters<C>(command: &Command<C>, args: &[String]) -> Result<ParsedArgs> {
    let app = build_parser(command);
    let matches = app
        .try_get_matches_from(args)
        .map_err(|e| Error::parameter(clap_message(&e)))?;

    let mut parsed = ParsedArgs::new();
    let mut done: Vec<&str> = Vec::new();

    for param in command.parameters() {
        match param.kind() {
            ParameterKind::Positional => bind_positional(&matches, param, &mut parsed),
            ParameterKind::Switch { .. } => {
                if done.contains(&param.name()) {
                    continue;
                }
                done.push(param.name());
                bind_switch_group(&matches, command.parameters(), param.name(), &mut parsed);
            }
        }
    }

    Ok(parsed)
}

/// Build the clap command for one [`Command`]
fn build_parser<C>(command: &Command<C>) -> clap::Command {
    let mut app = clap::Command::new(command.name().to_string())
        .no_binary_name(true)
        .args_override_self(true)
        .disable_help_flag(true)
        .disable_version_flag(true);

    let mut position = 1;
    for param in command.parameters() {
        let arg = match param.kind() {
            ParameterKind::Positional => {
                let mut arg = Arg::new(param.name().to_string())
                    .index(position)
                    .required(param.is_required());
                arg = match param.arity() {
                    Arity::One => arg.action(ArgAction::Set),
                    Arity::Many => arg.action(ArgAction::Append).num_args(1..),
                };
                position += 1;
                arg
            }
            ParameterKind::Switch { short, long, .. } => {
                let mut arg = Arg::new(switch_id(long))
                    .long(long.clone())
                    .action(ArgAction::SetTrue);
                if let Some(short) = short {
                    arg = arg.short(*short);
                }
                arg
            }
        };
        app = app.arg(arg);
    }

    app
}

fn bind_positional(matches: &ArgMatches, param: &Parameter, parsed: &mut ParsedArgs) {
    let values: Vec<String> = matches
        .get_many::<String>(param.name())
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    if values.is_empty() {
        if let Some(default) = param.get_default() {
            parsed.insert(param.name(), default);
        }
    } else {
        parsed.insert_many(param.name(), values);
    }
}

/// The switch given last among those sharing `name` decides the value.
fn bind_switch_group(
    matches: &ArgMatches,
    parameters: &[Parameter],
    name: &str,
    parsed: &mut ParsedArgs,
) {
    let group = parameters.iter().filter(|p| p.name() == name);

    let mut winner: Option<(usize, &Parameter)> = None;
    for param in group.clone() {
        let ParameterKind::Switch { long, .. } = param.kind() else {
            continue;
        };
        let id = switch_id(long);
        if matches.value_source(&id) != Some(ValueSource::CommandLine) {
            continue;
        }
        let position = matches.index_of(&id).unwrap_or(0);
        if winner.map_or(true, |(best, _)| position >= best) {
            winner = Some((position, param));
        }
    }

    match winner {
        Some((_, param)) => {
            let value = match param.kind() {
                ParameterKind::Switch { value: Some(v), .. } => v.as_str(),
                _ => "true",
            };
            parsed.insert(name, value);
        }
        None => {
            if let Some(default) = group.clone().find_map(Parameter::get_default) {
                parsed.insert(name, default);
            }
        }
    }
}

fn switch_id(long: &str) -> String {
    format!("switch:{}", long)
}

/// First paragraph of a clap error on one line, without its `error: ` prefix
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let paragraph: Vec<&str> = rendered
        .lines()
        .take_while(|l| !l.trim().is_empty())
        .map(str::trim)
        .collect();
    let joined = paragraph.join(" ");
    joined.strip_prefix("error: ").unwrap_or(&joined).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::Invocation;

    fn noop(_: &mut Invocation<'_, ()>) -> Result<()> {
        Ok(())
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn file_command() -> Command<()> {
        Command::new("file", noop)
            .arg(Parameter::positional("filename"))
            .arg(Parameter::positional("flag").required(false))
            .arg(Parameter::switch("verbose", Some('v'), "verbose"))
            .arg(Parameter::switch("filter", Some('a'), "all").flag_value("all"))
            .arg(Parameter::switch("fmt", Some('l'), "long").flag_value("long"))
            .arg(
                Parameter::switch("fmt", Some('s'), "short")
                    .flag_value("short")
                    .default_value("short"),
            )
    }

    #[test]
    fn test_positionals() {
        let parsed = parse_parameters(&file_command(), &argv(&["a.txt", "hidden"])).unwrap();
        assert_eq!(parsed.get_one("filename"), Some("a.txt"));
        assert_eq!(parsed.get_one("flag"), Some("hidden"));
        assert!(!parsed.flag("verbose"));
        assert!(!parsed.contains("filter"));
    }

    #[test]
    fn test_group_default() {
        let parsed = parse_parameters(&file_command(), &argv(&["a.txt"])).unwrap();
        assert_eq!(parsed.get_one("fmt"), Some("short"));
        assert_eq!(parsed.get_one("flag"), None);
    }

    #[test]
    fn test_switch_values() {
        let parsed = parse_parameters(&file_command(), &argv(&["-a", "--long", "-v", "a.txt"])).unwrap();
        assert_eq!(parsed.get_one("filter"), Some("all"));
        assert_eq!(parsed.get_one("fmt"), Some("long"));
        assert!(parsed.flag("verbose"));
    }

    #[test]
    fn test_last_switch_in_group_wins() {
        let parsed = parse_parameters(&file_command(), &argv(&["-l", "-s", "a.txt"])).unwrap();
        assert_eq!(parsed.get_one("fmt"), Some("short"));

        let parsed = parse_parameters(&file_command(), &argv(&["-s", "a.txt", "-l"])).unwrap();
        assert_eq!(parsed.get_one("fmt"), Some("long"));
    }

    #[test]
    fn test_repeated_switch_is_accepted() {
        let parsed = parse_parameters(&file_command(), &argv(&["-l", "-l", "-v", "-v", "a.txt"])).unwrap();
        assert_eq!(parsed.get_one("fmt"), Some("long"));
        assert!(parsed.flag("verbose"));

        let parsed = parse_parameters(&file_command(), &argv(&["-l", "-s", "-l", "a.txt"])).unwrap();
        assert_eq!(parsed.get_one("fmt"), Some("long"));
    }

    #[test]
    fn test_separator() {
        let parsed = parse_parameters(&file_command(), &argv(&["--", "-weird-name"])).unwrap();
        assert_eq!(parsed.get_one("filename"), Some("-weird-name"));
    }

    #[test]
    fn test_missing_required_positional() {
        let err = parse_parameters(&file_command(), &[]).unwrap_err();
        match err {
            Error::Parameter(msg) => assert!(msg.contains("filename"), "{}", msg),
            other => panic!("Expected Parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_option() {
        let err = parse_parameters(&file_command(), &argv(&["--bogus", "a.txt"])).unwrap_err();
        assert!(matches!(err, Error::Parameter(ref msg) if msg.contains("--bogus")));
    }

    #[test]
    fn test_too_many_positionals() {
        let err = parse_parameters(&file_command(), &argv(&["a", "b", "c"])).unwrap_err();
        assert!(matches!(err, Error::Parameter(_)));
    }

    #[test]
    fn test_repeated_positional() {
        let cmd = Command::new("many", noop).arg(Parameter::positional("files").many());
        let parsed = parse_parameters(&cmd, &argv(&["a", "b", "c"])).unwrap();
        assert_eq!(parsed.get_many("files").len(), 3);
    }
}

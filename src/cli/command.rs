//! Command and parameter descriptors
//!
//! A [`Command`] is plain data plus a callback. Parsing, resolution and
//! help rendering live elsewhere and only read these descriptors.

use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// How many values a positional parameter takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one value
    One,
    /// One or more values
    Many,
}

/// Shape of a parameter on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    /// Bare argument bound by position
    Positional,
    /// `-x` / `--name` switch.
    ///
    /// Switches sharing a parameter name form one option group; the
    /// switch given last wins and stores its `value` (or `"true"`).
    Switch {
        short: Option<char>,
        long: String,
        value: Option<String>,
    },
}

/// A declared command parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    kind: ParameterKind,
    required: bool,
    arity: Arity,
    metavar: Option<String>,
    help: Option<String>,
    default: Option<String>,
}

impl Parameter {
    /// Required single-value positional
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Positional,
            required: true,
            arity: Arity::One,
            metavar: None,
            help: None,
            default: None,
        }
    }

    /// Optional boolean switch storing into `name`
    pub fn switch(name: impl Into<String>, short: Option<char>, long: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Switch {
                short,
                long: long.into(),
                value: None,
            },
            required: false,
            arity: Arity::One,
            metavar: None,
            help: None,
            default: None,
        }
    }

    /// Value stored when this switch is given (switches only)
    pub fn flag_value(mut self, value: impl Into<String>) -> Self {
        if let ParameterKind::Switch { value: slot, .. } = &mut self.kind {
            *slot = Some(value.into());
        }
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Accept one or more values
    pub fn many(mut self) -> Self {
        self.arity = Arity::Many;
        self
    }

    /// Override the synthesized metavar
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Value used when nothing on the command line sets this parameter
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn is_positional(&self) -> bool {
        matches!(self.kind, ParameterKind::Positional)
    }

    pub fn has_explicit_metavar(&self) -> bool {
        self.metavar.is_some()
    }

    pub fn explicit_metavar(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn get_default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Option strings of a switch, short form first: `["-l", "--long"]`
    pub fn opts(&self) -> Vec<String> {
        match &self.kind {
            ParameterKind::Positional => Vec::new(),
            ParameterKind::Switch { short, long, .. } => short
                .map(|c| format!("-{}", c))
                .into_iter()
                .chain(std::iter::once(format!("--{}", long)))
                .collect(),
        }
    }

    /// Whether `token` spells this switch
    pub fn matches_opt(&self, token: &str) -> bool {
        self.opts().iter().any(|o| o == token)
    }
}

/// Values bound to a command's declared parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: HashMap<String, Vec<String>>,
}

impl ParsedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    pub fn insert_many<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.values.entry(name.into()).or_default();
        entry.extend(values.into_iter().map(Into::into));
    }

    /// Last value bound to `name`
    pub fn get_one(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.last()).map(String::as_str)
    }

    pub fn get_many(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Boolean switch state
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get_one(name), Some(v) if v != "false")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Everything a command callback gets to work with
pub struct Invocation<'a, C> {
    /// Application state shared by all commands
    pub context: &'a C,
    pub args: &'a ParsedArgs,
    /// `--debug` was given
    pub debug: bool,
    /// e.g. `getflags list`
    pub command_path: &'a str,
    pub out: &'a mut dyn Write,
}

/// Command callback
pub type Callback<C> = Arc<dyn Fn(&mut Invocation<'_, C>) -> Result<()> + Send + Sync>;

/// A named subcommand with aliases, parameters and a callback
pub struct Command<C> {
    name: String,
    aliases: Vec<String>,
    is_default: bool,
    hidden: bool,
    about: Option<String>,
    parameters: Vec<Parameter>,
    callback: Callback<C>,
}

impl<C> Command<C> {
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut Invocation<'_, C>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            is_default: false,
            hidden: false,
            about: None,
            parameters: Vec::new(),
            callback: Arc::new(callback),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Invoke this command when the first token names no command
    pub fn default_command(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Leave out of command listings
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn arg(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Canonical name followed by aliases
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn about_text(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// First line of the about text
    pub fn short_help(&self) -> &str {
        self.about
            .as_deref()
            .and_then(|a| a.lines().next())
            .unwrap_or_default()
            .trim()
    }

    /// Name as shown in listings; the default command is bracketed
    pub fn display_name(&self) -> String {
        if self.is_default {
            format!("[{}]", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn invoke(&self, invocation: &mut Invocation<'_, C>) -> Result<()> {
        (self.callback)(invocation)
    }
}

impl<C> Clone for Command<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            is_default: self.is_default,
            hidden: self.hidden,
            about: self.about.clone(),
            parameters: self.parameters.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<C> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("is_default", &self.is_default)
            .field("hidden", &self.hidden)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

//! Command registry - resolves command names and aliases, with default fallback
//!
//! Resolution is two-phase. The first token of the argument vector is
//! matched against every registered name and alias; if that fails (no
//! tokens, an option token, or an unknown word) the default command's
//! name is prepended and resolution is attempted once more. An explicit
//! match therefore always wins over the default.

use super::command::Command;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// A resolved command and the arguments left for it
#[derive(Debug)]
pub struct Resolution<'r, C> {
    pub command: &'r Command<C>,
    pub args: Vec<String>,
    /// Reached through the default-command fallback
    pub via_default: bool,
}

/// Registry of commands keyed by name and alias
pub struct CommandRegistry<C> {
    /// Commands in registration order
    commands: Vec<Command<C>>,
    /// Name or alias -> index into `commands`
    index: HashMap<String, usize>,
    /// Name of the default command, looked up through `index`
    default_command: Option<String>,
}

impl<C> CommandRegistry<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            index: HashMap::new(),
            default_command: None,
        }
    }

    /// Register a command under its name and every alias.
    ///
    /// Nothing is inserted when the command conflicts with an existing one.
    pub fn register(&mut self, command: Command<C>) -> Result<()> {
        if command.is_default() {
            if let Some(existing) = &self.default_command {
                return Err(Error::DuplicateDefault {
                    existing: existing.clone(),
                    name: command.name().to_string(),
                });
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for key in command.all_names() {
            if let Some(&owner) = self.index.get(key) {
                return Err(Error::DuplicateAlias {
                    alias: key.to_string(),
                    first: self.commands[owner].name().to_string(),
                    second: command.name().to_string(),
                });
            }
            if seen.contains(&key) {
                return Err(Error::DuplicateAlias {
                    alias: key.to_string(),
                    first: command.name().to_string(),
                    second: command.name().to_string(),
                });
            }
            seen.push(key);
        }

        let position = self.commands.len();
        for key in command.all_names() {
            self.index.insert(key.to_string(), position);
        }
        if command.is_default() {
            self.default_command = Some(command.name().to_string());
        }
        self.commands.push(command);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, command: Command<C>) -> Result<Self> {
        self.register(command)?;
        Ok(self)
    }

    /// Look up a command by name or alias
    pub fn get(&self, name: &str) -> Option<&Command<C>> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    pub fn default_command(&self) -> Option<&Command<C>> {
        self.default_command.as_deref().and_then(|name| self.get(name))
    }

    /// Resolve `argv` to a command and its remaining arguments.
    ///
    /// Fails with [`Error::UnknownCommand`] when neither the first token
    /// nor the default command resolves.
    pub fn resolve(&self, argv: &[String]) -> Result<Resolution<'_, C>> {
        if let Some(resolution) = self.match_first(argv) {
            debug!(command = resolution.command.name(), "resolved explicit command");
            return Ok(resolution);
        }

        if let Some(default) = &self.default_command {
            let mut retry = Vec::with_capacity(argv.len() + 1);
            retry.push(default.clone());
            retry.extend_from_slice(argv);

            if let Some(mut resolution) = self.match_first(&retry) {
                debug!(command = resolution.command.name(), "fell back to default command");
                resolution.via_default = true;
                return Ok(resolution);
            }
        }

        Err(Error::UnknownCommand(
            argv.first().cloned().unwrap_or_else(|| "(none)".to_string()),
        ))
    }

    fn match_first(&self, argv: &[String]) -> Option<Resolution<'_, C>> {
        let (token, rest) = argv.split_first()?;
        if is_option_token(token) {
            return None;
        }
        self.get(token).map(|command| Resolution {
            command,
            args: rest.to_vec(),
            via_default: false,
        })
    }

    /// `(display name, short help)` for every visible command, in
    /// registration order
    pub fn list_visible(&self) -> Vec<(String, String)> {
        self.commands
            .iter()
            .filter(|c| !c.is_hidden())
            .map(|c| (c.display_name(), c.short_help().to_string()))
            .collect()
    }

    /// All commands in registration order
    pub fn commands(&self) -> &[Command<C>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens starting with `-` (other than a lone `-`) are options, never
/// command names. This includes the `--` separator.
pub fn is_option_token(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

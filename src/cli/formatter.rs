//! Usage and help text synthesized from parameter metadata
//!
//! Everything here is a pure function of the command descriptors.
//!
//! | Parameter              | Metavar         |
//! |------------------------|-----------------|
//! | required positional    | `<name>`        |
//! | optional positional    | `[<name>]`      |
//! | repeated positional    | `<name>...`     |
//! | explicit metavar       | used verbatim   |
//!
//! Switches sharing a parameter name are summarised as one group,
//! `-l|-s`, bracketed unless required.

use super::command::{Arity, Command, Parameter};
use super::registry::CommandRegistry;
use std::fmt::Write as _;

/// Indent for the second and later usage lines, aligned under the first
const USAGE_PREFIX: &str = "Usage: ";
const USAGE_INDENT: &str = "       ";

/// Renders usage lines and help pages for one program
#[derive(Debug, Clone)]
pub struct ArgumentFormatter {
    program: String,
    width: usize,
}

impl ArgumentFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            width: 80,
        }
    }

    /// Wrap width for help descriptions
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Metavar for a single positional parameter
    pub fn metavar(&self, param: &Parameter) -> String {
        if let Some(explicit) = param.explicit_metavar() {
            return explicit.to_string();
        }

        let mut meta = format!("<{}>", param.name());
        if param.arity() == Arity::Many {
            meta.push_str("...");
        }
        if !param.is_required() {
            meta = format!("[{}]", meta);
        }
        meta
    }

    /// Metavars of all positionals, in declaration order
    pub fn positional_metavars<C>(&self, command: &Command<C>) -> Vec<String> {
        command
            .parameters()
            .iter()
            .filter(|p| p.is_positional())
            .map(|p| self.metavar(p))
            .collect()
    }

    /// One token per option group, in order of first appearance
    pub fn options_metavar<C>(&self, command: &Command<C>) -> String {
        option_groups(command.parameters())
            .iter()
            .map(|group| {
                let joined = group
                    .iter()
                    .filter_map(|p| p.opts().into_iter().next())
                    .collect::<Vec<_>>()
                    .join("|");
                if group[0].is_required() {
                    joined
                } else {
                    format!("[{}]", joined)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `program name`, with the default command bracketed: `program [file]`
    pub fn command_path<C>(&self, command: &Command<C>) -> String {
        format!("{} {}", self.program, command.display_name())
    }

    /// `<command-path> <options-summary> <positional-metavars>`
    pub fn usage_line<C>(&self, command: &Command<C>) -> String {
        let mut pieces = vec![self.command_path(command)];
        let options = self.options_metavar(command);
        if !options.is_empty() {
            pieces.push(options);
        }
        pieces.extend(self.positional_metavars(command));
        pieces.join(" ")
    }

    /// Usage lines for every visible command
    pub fn group_usage<C>(&self, registry: &CommandRegistry<C>) -> String {
        let mut out = String::new();
        let visible = registry.commands().iter().filter(|c| !c.is_hidden());
        for (i, command) in visible.enumerate() {
            let prefix = if i == 0 { USAGE_PREFIX } else { USAGE_INDENT };
            let _ = writeln!(out, "{}{}", prefix, self.usage_line(command));
        }
        out
    }

    /// Help page for a single command
    pub fn command_help<C>(&self, command: &Command<C>) -> String {
        let mut out = format!("{}{}\n", USAGE_PREFIX, self.usage_line(command));

        if let Some(about) = command.about_text() {
            out.push('\n');
            for line in about.lines() {
                let _ = writeln!(out, "  {}", line);
            }
        }

        if !command.aliases().is_empty() {
            let _ = writeln!(out, "\nAliases: {}", command.aliases().join(", "));
        }

        let arguments: Vec<(String, String)> = command
            .parameters()
            .iter()
            .filter(|p| p.is_positional())
            .map(|p| (self.metavar(p), p.help_text().unwrap_or_default().to_string()))
            .collect();
        self.write_section(&mut out, "Arguments", &arguments);

        let options = self.option_rows(command.parameters());
        self.write_section(&mut out, "Options", &options);
        out
    }

    /// Help page for the whole program
    pub fn group_help<C>(
        &self,
        about: Option<&str>,
        global_options: &[Parameter],
        registry: &CommandRegistry<C>,
    ) -> String {
        let mut out = self.group_usage(registry);

        if let Some(about) = about {
            let _ = writeln!(out, "\n  {}", about);
        }

        let options = self.option_rows(global_options);
        self.write_section(&mut out, "Options", &options);

        let commands = registry.list_visible();
        self.write_section(&mut out, "Commands", &commands);
        out
    }

    /// `-l, --long` / help rows for switches
    fn option_rows(&self, parameters: &[Parameter]) -> Vec<(String, String)> {
        parameters
            .iter()
            .filter(|p| !p.is_positional())
            .map(|p| (p.opts().join(", "), p.help_text().unwrap_or_default().to_string()))
            .collect()
    }

    fn write_section(&self, out: &mut String, title: &str, rows: &[(String, String)]) {
        if rows.is_empty() {
            return;
        }

        let term_width = rows.iter().map(|(t, _)| t.len()).max().unwrap_or(0);
        let limit = self.width.saturating_sub(term_width + 6).max(10);

        let _ = writeln!(out, "\n{}:", title);
        for (term, help) in rows {
            let help = truncate(help, limit);
            let line = format!("  {:<width$}  {}", term, help, width = term_width);
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
}

/// Group switches by parameter name, keeping first-appearance order
fn option_groups(parameters: &[Parameter]) -> Vec<Vec<&Parameter>> {
    let mut groups: Vec<Vec<&Parameter>> = Vec::new();
    for param in parameters.iter().filter(|p| !p.is_positional()) {
        match groups.iter_mut().find(|g| g[0].name() == param.name()) {
            Some(group) => group.push(param),
            None => groups.push(vec![param]),
        }
    }
    groups
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! Shared utility functions for CLI commands

use crate::error::Error;
use crate::probe::ProbeError;
use colored::*;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Write a user-facing error message with suggestions to `out`
pub fn display_error(out: &mut dyn Write, error: &Error, program: &str) {
    let _ = writeln!(out, "{} {}", "Error:".red().bold(), error);

    let suggestions = suggestions_for(error, program);
    if !suggestions.is_empty() {
        let _ = writeln!(out, "{}", "Suggestions:".blue());
        for suggestion in suggestions {
            let _ = writeln!(out, "   • {}", suggestion);
        }
    }
}

/// Contextual hints for an error, based on its kind and message
pub fn suggestions_for(error: &Error, program: &str) -> Vec<String> {
    match error {
        Error::UnknownFlag(_) => vec![format!("Run '{} list' to see every known flag", program)],
        Error::UnknownCommand(_) => vec![
            format!("Run '{} --help' to see available commands", program),
            format!("Use '{} -- <file>' to inspect a file named like a command", program),
        ],
        Error::Probe(ProbeError::Spawn { .. }) => vec![
            "Set GETFLAGS_LS or [probe] program to a listing utility that exists".to_string(),
        ],
        Error::Probe(ProbeError::Failed { stderr, .. }) if stderr.contains("illegal option")
            || stderr.contains("invalid option") =>
        {
            vec!["The listing utility does not support the flags option; check [probe] args".to_string()]
        }
        other => {
            let message = other.to_string().to_lowercase();
            if message.contains("permission denied") {
                vec!["Check the permissions of the file and its parent directories".to_string()]
            } else if message.contains("no such file") || message.contains("does not exist") {
                vec!["Check that the file or directory path is correct".to_string()]
            } else {
                Vec::new()
            }
        }
    }
}

/// Yellow `DEBUG>` prefixed line
pub fn debug_line(out: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(out, "{} {}", "DEBUG>".yellow(), message)
}

/// Display width of a string in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Rule of `-` characters
pub fn rule(width: usize) -> String {
    "-".repeat(width)
}

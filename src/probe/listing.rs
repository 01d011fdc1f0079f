//! Parser for long-format `ls` output with a flags column

use super::ProbeError;
use crate::flags::FlagRegistry;
use tracing::warn;

/// Marker printed in the flags column when no flags are set
const NO_FLAGS: &str = "-";

/// Extract canonical flag names from a `ls -ldO` style listing.
///
/// `column` is the zero-based whitespace-separated field holding the
/// comma-separated flag list. Names are normalised through the registry;
/// names it does not know are skipped.
pub fn parse_listing(
    output: &str,
    column: usize,
    registry: &FlagRegistry,
) -> Result<Vec<&'static str>, ProbeError> {
    let line = output
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| ProbeError::UnexpectedOutput(output.to_string()))?;

    let field = line
        .split_whitespace()
        .nth(column)
        .ok_or_else(|| ProbeError::UnexpectedOutput(line.to_string()))?;

    let mut flags = Vec::new();
    if field == NO_FLAGS {
        return Ok(flags);
    }

    for name in field.split(',').filter(|n| !n.is_empty()) {
        match registry.canonical_name(name) {
            Some(canonical) if !flags.contains(&canonical) => flags.push(canonical),
            Some(_) => {}
            None => warn!(flag = name, "ignoring flag not in the flag table"),
        }
    }

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FlagRegistry {
        FlagRegistry::builtin().unwrap()
    }

    #[test]
    fn test_parse_no_flags() {
        let out = "-rw-r--r--  1 alice  staff  - 0 Jan  1 12:00 notes.txt\n";
        assert!(parse_listing(out, 4, &registry()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_multiple_flags_in_reported_order() {
        let out = "-rw-r--r--  1 alice  staff  hidden,uchg 0 Jan  1 12:00 notes.txt\n";
        assert_eq!(parse_listing(out, 4, &registry()).unwrap(), vec!["hidden", "uchg"]);
    }

    #[test]
    fn test_parse_normalises_aliases() {
        let out = "-rw-r--r--  1 root  wheel  sappnd,schg 0 Jan  1 12:00 log\n";
        assert_eq!(parse_listing(out, 4, &registry()).unwrap(), vec!["sappend", "schg"]);
    }

    #[test]
    fn test_parse_skips_unknown_and_duplicates() {
        let out = "drwxr-xr-x  2 alice  staff  restricted,hidden,hidden 64 Jan  1 12:00 dir\n";
        assert_eq!(parse_listing(out, 4, &registry()).unwrap(), vec!["hidden"]);
    }

    #[test]
    fn test_parse_path_with_spaces() {
        let out = "-rw-r--r--  1 alice  staff  uchg 0 Jan  1 12:00 my file.txt\n";
        assert_eq!(parse_listing(out, 4, &registry()).unwrap(), vec!["uchg"]);
    }

    #[test]
    fn test_parse_short_line_is_error() {
        let err = parse_listing("-rw-r--r-- 1 alice\n", 4, &registry()).unwrap_err();
        assert!(matches!(err, ProbeError::UnexpectedOutput(_)));

        let err = parse_listing("\n\n", 4, &registry()).unwrap_err();
        assert!(matches!(err, ProbeError::UnexpectedOutput(_)));
    }
}

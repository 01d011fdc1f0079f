//! `file` command - print the flags set on a file
//!
//! This is the default command, so `getflags notes.txt` and
//! `getflags file notes.txt` are the same invocation.

use crate::cli::command::{Command, Invocation, Parameter};
use crate::cli::runner::AppContext;
use crate::cli::utils::{debug_line, display_width, rule};
use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::file::InspectedFile;
use crate::flags::FlagRegistry;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// One listed flag and whether it is set
pub type ListingEntry = (&'static str, bool);

pub fn file_command() -> Command<AppContext> {
    Command::new("file", run)
        .alias("f")
        .default_command()
        .about("Print the flags for a file")
        .arg(Parameter::positional("filename").help("file or directory to inspect"))
        .arg(
            Parameter::positional("flag")
                .required(false)
                .help("only report this flag, by name or alias"),
        )
        .arg(Parameter::switch("verbose", Some('v'), "verbose").help("print file info"))
        .arg(
            Parameter::switch("filter", Some('a'), "all")
                .flag_value("all")
                .help("print all flags (valid with --long)"),
        )
        .arg(
            Parameter::switch("fmt", Some('l'), "long")
                .flag_value("long")
                .help("print one flag per name followed by on/off"),
        )
        .arg(
            Parameter::switch("fmt", Some('s'), "short")
                .flag_value("short")
                .help("space separated list of names"),
        )
}

fn run(inv: &mut Invocation<'_, AppContext>) -> Result<()> {
    let ctx = inv.context;
    let filename = inv
        .args
        .get_one("filename")
        .ok_or_else(|| Error::parameter("missing argument 'filename'"))?;

    // Unknown flag names are rejected before the file is looked at.
    let flag = inv
        .args
        .get_one("flag")
        .map(|name| ctx.flags.resolve(name))
        .transpose()?;

    let format = match inv.args.get_one("fmt") {
        Some(value) => value.parse::<OutputFormat>().map_err(Error::parameter)?,
        None => ctx.settings.output.format,
    };
    let all = inv.args.get_one("filter") == Some("all");
    let verbose = inv.args.flag("verbose");

    if inv.debug {
        debug_line(
            inv.out,
            &format!(
                "filename={:?}, flag={:?}, fmt={:?}, filter={:?}",
                filename,
                flag.map(|f| f.canonical_id()),
                format.as_str(),
                inv.args.get_one("filter"),
            ),
        )?;
    }

    let path = Path::new(filename);
    let file = InspectedFile::new(path, ctx.probe.as_ref());
    if !file.exists() {
        return Err(Error::parameter(format!("path '{}' does not exist", filename)));
    }

    let listing = match flag {
        Some(flag) => vec![(flag.canonical_id(), file.has_flag(flag)?)],
        None => build_listing(&ctx.flags, file.flags()?, all),
    };
    debug!(path = %path.display(), entries = listing.len(), "built flag listing");

    let header = if verbose { Some(file.pretty()) } else { None };
    render(inv.out, &listing, format, header)?;
    Ok(())
}

/// Flags to report for a file.
///
/// With `all`, every known flag is listed in registry order and starts
/// out off; the flags found set are then switched on, and any the seed
/// lacks are appended in the order the probe reported them.
pub fn build_listing(
    registry: &FlagRegistry,
    set: &[&'static str],
    all: bool,
) -> Vec<ListingEntry> {
    let mut listing: Vec<ListingEntry> = if all {
        registry.canonical_names().map(|name| (name, false)).collect()
    } else {
        Vec::new()
    };

    for &name in set {
        match listing.iter_mut().find(|(listed, _)| *listed == name) {
            Some(entry) => entry.1 = true,
            None => listing.push((name, true)),
        }
    }
    listing
}

/// Write a listing in `format`, optionally under a path header
pub fn render(
    out: &mut dyn Write,
    listing: &[ListingEntry],
    format: OutputFormat,
    header: Option<&str>,
) -> std::io::Result<()> {
    let width = listing
        .iter()
        .map(|(name, _)| display_width(name))
        .max()
        .unwrap_or(0);

    if let Some(header) = header {
        writeln!(out, "{}", header)?;
        writeln!(out, "{}", rule((width + 4).max(display_width(header))))?;
    }

    match format {
        OutputFormat::Short => {
            let on: Vec<&str> = listing
                .iter()
                .filter(|(_, on)| *on)
                .map(|(name, _)| *name)
                .collect();
            writeln!(out, "{}", on.join(" "))
        }
        OutputFormat::Long => {
            for (name, on) in listing {
                writeln!(out, "{:<width$} {}", name, if *on { "on" } else { "off" }, width = width)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(listing: &[ListingEntry], format: OutputFormat, header: Option<&str>) -> String {
        let mut out = Vec::new();
        render(&mut out, listing, format, header).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_listing_without_all_keeps_probe_order() {
        let registry = FlagRegistry::builtin().unwrap();
        let listing = build_listing(&registry, &["hidden", "uchg"], false);
        assert_eq!(listing, vec![("hidden", true), ("uchg", true)]);
    }

    #[test]
    fn test_listing_with_all_follows_registry_order() {
        let registry = FlagRegistry::builtin().unwrap();
        let listing = build_listing(&registry, &["hidden"], true);
        assert_eq!(listing.len(), registry.len());
        assert_eq!(listing[0], ("arch", false));
        assert_eq!(listing.last(), Some(&("hidden", true)));
        assert_eq!(listing.iter().filter(|(_, on)| *on).count(), 1);
    }

    #[test]
    fn test_short_output() {
        let listing = [("hidden", true), ("uchg", true), ("nodump", false)];
        assert_eq!(rendered(&listing, OutputFormat::Short, None), "hidden uchg\n");
        assert_eq!(rendered(&[], OutputFormat::Short, None), "\n");
    }

    #[test]
    fn test_long_output_pads_to_widest_name() {
        let listing = [("arch", false), ("sappend", false), ("hidden", true)];
        assert_eq!(
            rendered(&listing, OutputFormat::Long, None),
            "arch    off\nsappend off\nhidden  on\n"
        );
    }

    #[test]
    fn test_verbose_header_rule() {
        let listing = [("hidden", true)];
        let text = rendered(&listing, OutputFormat::Short, Some("./a"));
        assert_eq!(text, "./a\n----------\nhidden\n");

        let text = rendered(&listing, OutputFormat::Short, Some("~/some/long/path.txt"));
        assert!(text.starts_with("~/some/long/path.txt\n--------------------\n"));
    }
}

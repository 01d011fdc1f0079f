//! `list` command - print every known flag with its aliases

use crate::cli::command::{Command, Invocation};
use crate::cli::runner::AppContext;
use crate::error::Result;
use crate::flags::FlagRegistry;
use comfy_table::presets::NOTHING;
use comfy_table::Table;
use std::io::Write;

pub fn list_command() -> Command<AppContext> {
    Command::new("list", run).alias("ls").about("list all BSD flags")
}

fn run(inv: &mut Invocation<'_, AppContext>) -> Result<()> {
    let table = flag_table(&inv.context.flags);
    writeln!(inv.out, "{}", table)?;
    Ok(())
}

/// Name, alternate names and description of each flag, in registry order
pub fn flag_table(registry: &FlagRegistry) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(vec!["Name", "Aliases", "Description"]);

    for flag in registry.all_flags() {
        table.add_row(vec![
            flag.canonical_id().to_string(),
            flag.alternate_names().join(", "),
            flag.description().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_follow_registry_order() {
        let registry = FlagRegistry::builtin().unwrap();
        let rendered = flag_table(&registry).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].contains("Name"));
        assert!(lines[0].contains("Description"));
        assert!(lines[1].trim_start().starts_with("arch"));
        assert!(lines[1].contains("archived"));
        assert!(lines.last().unwrap().trim_start().starts_with("hidden"));
        assert!(rendered.contains("uchange, uimmutable"));
    }
}

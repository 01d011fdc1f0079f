//! Flag registry - lookup by canonical name or any alias

use super::flag::Flag;
use super::table::BSD_FLAGS;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Immutable mapping from every flag name and alias to its descriptor.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    /// Flags in declaration order
    flags: Vec<Flag>,
    /// Alias -> index into `flags`
    index: HashMap<&'static str, usize>,
}

impl FlagRegistry {
    /// Build a registry from a flag table.
    ///
    /// Fails if a flag has no names or if two flags share an alias.
    pub fn new(table: &[Flag]) -> Result<Self> {
        let mut index = HashMap::new();

        for (position, flag) in table.iter().enumerate() {
            if flag.aliases().is_empty() {
                return Err(Error::InvalidFlag(format!(
                    "{} declares no names",
                    flag.cflag()
                )));
            }

            for alias in flag.aliases() {
                if let Some(previous) = index.insert(*alias, position) {
                    return Err(Error::DuplicateAlias {
                        alias: alias.to_string(),
                        first: table[previous].canonical_id().to_string(),
                        second: flag.canonical_id().to_string(),
                    });
                }
            }
        }

        Ok(Self {
            flags: table.to_vec(),
            index,
        })
    }

    /// Registry over the built-in BSD flag table
    pub fn builtin() -> Result<Self> {
        Self::new(BSD_FLAGS)
    }

    /// Find a flag by canonical name or alias
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.index.get(name).map(|&i| &self.flags[i])
    }

    /// Like [`lookup`](Self::lookup) but unknown names are an error
    pub fn resolve(&self, name: &str) -> Result<&Flag> {
        self.lookup(name)
            .ok_or_else(|| Error::UnknownFlag(name.to_string()))
    }

    /// Canonical name for a name or alias
    pub fn canonical_name(&self, name: &str) -> Option<&'static str> {
        self.lookup(name).map(|f| f.canonical_id())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All flags in declaration order
    pub fn all_flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Every accepted name, canonical names and aliases, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flags.iter().flat_map(|f| f.aliases().iter().copied())
    }

    /// Canonical names in declaration order
    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flags.iter().map(Flag::canonical_id)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

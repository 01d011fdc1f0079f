//! Flag descriptor

use std::fmt;

/// Who may change a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Privilege {
    /// The super-user
    Root,
    /// The owner of the file
    Owner,
    /// Only while the system runs in single-user mode
    SingleUserMode,
}

impl Privilege {
    /// Display name as used in `chflags(1)` documentation
    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::Root => "root",
            Privilege::Owner => "owner",
            Privilege::SingleUserMode => "single-user-mode",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Super-user flags (`SF_*`) live at or above this bit
const SUPERUSER_MASK: u32 = 0x0001_0000;

/// A named boolean file attribute bit.
///
/// The first entry of `aliases` is the canonical name; the remaining
/// entries are alternate spellings accepted on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    cflag: &'static str,
    mask: u32,
    aliases: &'static [&'static str],
    privileges: &'static [Privilege],
    description: &'static str,
}

impl Flag {
    /// Build a flag descriptor
    pub const fn new(
        cflag: &'static str,
        mask: u32,
        aliases: &'static [&'static str],
        privileges: &'static [Privilege],
        description: &'static str,
    ) -> Self {
        Self {
            cflag,
            mask,
            aliases,
            privileges,
            description,
        }
    }

    /// Canonical name, always `aliases()[0]`
    pub fn canonical_id(&self) -> &'static str {
        self.aliases.first().copied().unwrap_or_default()
    }

    /// Every name this flag answers to, canonical first
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// Names other than the canonical one
    pub fn alternate_names(&self) -> &'static [&'static str] {
        self.aliases.get(1..).unwrap_or_default()
    }

    /// BSD constant name, e.g. `UF_HIDDEN`
    pub fn cflag(&self) -> &'static str {
        self.cflag
    }

    /// Bit in `st_flags`
    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Privileges allowed to change the flag
    pub fn required_privilege(&self) -> &'static [Privilege] {
        self.privileges
    }

    /// Whether the owner of a file may toggle this flag without sudo
    pub fn owner_settable(&self) -> bool {
        self.privileges.contains(&Privilege::Owner)
    }

    /// Super-user (`SF_*`) flag
    pub fn is_system(&self) -> bool {
        self.mask >= SUPERUSER_MASK
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {:#x})", self.canonical_id(), self.cflag, self.mask)
    }
}

//! The built-in BSD flag table
//!
//! Order here is the order of `list` output and of `--all` listings.

use super::flag::{Flag, Privilege};

use Privilege::{Owner, Root, SingleUserMode};

/// Flags understood by `chflags(1)` on macOS and the BSDs
pub const BSD_FLAGS: &[Flag] = &[
    Flag::new(
        "SF_ARCHIVED",
        0x10000,
        &["arch", "archived"],
        &[Root],
        "File is archived",
    ),
    Flag::new(
        "UF_OPAQUE",
        0x8,
        &["opaque"],
        &[Root, Owner],
        "Directory is opaque when viewed through a union mount",
    ),
    Flag::new(
        "UF_NODUMP",
        0x1,
        &["nodump"],
        &[Root, Owner],
        "Do not back up the file when using the UNIX dump command",
    ),
    Flag::new(
        "SF_APPEND",
        0x40000,
        &["sappend", "sappnd"],
        &[Root],
        "Software can only append to the file, not modify the existing data",
    ),
    Flag::new(
        "SF_IMMUTABLE",
        0x20000,
        &["schg", "schange", "simmutable"],
        &[Root, SingleUserMode],
        "File cannot be moved, renamed, or deleted",
    ),
    Flag::new(
        "UF_APPEND",
        0x4,
        &["uappnd", "uappend"],
        &[Root, Owner],
        "Software can only append to the file, not modify the existing data",
    ),
    Flag::new(
        "UF_IMMUTABLE",
        0x2,
        &["uchg", "uchange", "uimmutable"],
        &[Root, Owner],
        "File cannot be moved, renamed, or deleted",
    ),
    Flag::new(
        "UF_HIDDEN",
        0x8000,
        &["hidden"],
        &[Root, Owner],
        "Hide item from GUI",
    ),
];

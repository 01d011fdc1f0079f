//! A file under inspection.
//!
//! Derived properties (probed flags, display path) are computed on first
//! use and kept for the lifetime of one `InspectedFile`, which is one
//! logical inspection. Nothing is shared between files.

use crate::flags::Flag;
use crate::probe::{FlagProbe, ProbeError};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

pub struct InspectedFile<'p> {
    filename: PathBuf,
    probe: &'p dyn FlagProbe,
    flags: OnceCell<Vec<&'static str>>,
    pretty: OnceCell<String>,
}

impl<'p> InspectedFile<'p> {
    pub fn new(filename: impl Into<PathBuf>, probe: &'p dyn FlagProbe) -> Self {
        Self {
            filename: filename.into(),
            probe,
            flags: OnceCell::new(),
            pretty: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.filename
    }

    pub fn exists(&self) -> bool {
        self.filename.exists()
    }

    /// Flags set on the file; probes on first call only
    pub fn flags(&self) -> Result<&[&'static str], ProbeError> {
        if let Some(flags) = self.flags.get() {
            return Ok(flags);
        }
        let probed = self.probe.flags_set(&self.filename)?;
        Ok(self.flags.get_or_init(|| probed))
    }

    pub fn has_flag(&self, flag: &Flag) -> Result<bool, ProbeError> {
        Ok(self.flags()?.contains(&flag.canonical_id()))
    }

    /// Path with the working directory shown as `.` and home as `~`
    pub fn pretty(&self) -> &str {
        self.pretty.get_or_init(|| {
            pretty_path(
                &self.filename,
                std::env::current_dir().ok().as_deref(),
                dirs::home_dir().as_deref(),
            )
        })
    }
}

/// Abbreviate `path` relative to `cwd` (`.`) or `home` (`~`), cwd first.
pub fn pretty_path(path: &Path, cwd: Option<&Path>, home: Option<&Path>) -> String {
    let abbreviations = [(cwd, "."), (home, "~")];

    for (base, marker) in abbreviations {
        let Some(base) = base else { continue };
        if let Ok(rest) = path.strip_prefix(base) {
            return if rest.as_os_str().is_empty() {
                marker.to_string()
            } else {
                format!("{}/{}", marker, rest.display())
            };
        }
    }

    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FlagRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
    }

    impl FlagProbe for Counting {
        fn flags_set(&self, _path: &Path) -> Result<Vec<&'static str>, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["hidden", "uchg"])
        }
    }

    #[test]
    fn test_flags_probed_once_per_file() {
        let probe = Counting { calls: AtomicUsize::new(0) };
        let registry = FlagRegistry::builtin().unwrap();

        let file = InspectedFile::new("a.txt", &probe);
        assert_eq!(file.flags().unwrap(), &["hidden", "uchg"]);
        assert!(file.has_flag(registry.lookup("uchange").unwrap()).unwrap());
        assert!(!file.has_flag(registry.lookup("schg").unwrap()).unwrap());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);

        let other = InspectedFile::new("b.txt", &probe);
        other.flags().unwrap();
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_pretty_path_cwd_wins() {
        let cwd = Path::new("/Users/alice/src");
        let home = Path::new("/Users/alice");

        assert_eq!(
            pretty_path(Path::new("/Users/alice/src/notes.txt"), Some(cwd), Some(home)),
            "./notes.txt"
        );
        assert_eq!(
            pretty_path(Path::new("/Users/alice/Desktop/x"), Some(cwd), Some(home)),
            "~/Desktop/x"
        );
        assert_eq!(pretty_path(Path::new("/Users/alice"), Some(cwd), Some(home)), "~");
    }

    #[test]
    fn test_pretty_path_untouched() {
        assert_eq!(pretty_path(Path::new("/etc/hosts"), Some(Path::new("/tmp")), None), "/etc/hosts");
        assert_eq!(pretty_path(Path::new("notes.txt"), None, None), "notes.txt");
    }
}

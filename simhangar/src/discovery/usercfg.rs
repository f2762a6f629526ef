//! UserCfg.opt scanning.
//!
//! The simulator records its configured content root in UserCfg.opt as an
//! `InstalledPackagesPath "C:\..."` line. The file is otherwise an opaque
//! option dump; a line scan for that one quoted value is all that is
//! needed here.

use std::path::Path;

use tracing::debug;

/// Key whose quoted value names the installed-packages root.
const INSTALLED_PACKAGES_KEY: &str = "InstalledPackagesPath";

/// Extract the installed-packages root from a UserCfg.opt file.
///
/// Returns `None` when the file is unreadable or carries no parseable
/// `InstalledPackagesPath` line.
pub fn installed_packages_path(path: &Path) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not read UserCfg.opt");
            return None;
        }
    };
    parse_installed_packages_path(&String::from_utf8_lossy(&bytes))
}

/// Extract the installed-packages root from UserCfg.opt text.
///
/// Scans line by line for `InstalledPackagesPath` and returns the value
/// between the following pair of double quotes. A line that carries the
/// key but no complete quoted value is skipped, not an error.
pub fn parse_installed_packages_path(raw: &str) -> Option<String> {
    for line in raw.lines() {
        let Some(pos) = line.find(INSTALLED_PACKAGES_KEY) else {
            continue;
        };

        let after = &line[pos + INSTALLED_PACKAGES_KEY.len()..];
        if let Some(start) = after.find('"') {
            if let Some(len) = after[start + 1..].find('"') {
                return Some(after[start + 1..start + 1 + len].to_string());
            }
        }
    }
    None
}

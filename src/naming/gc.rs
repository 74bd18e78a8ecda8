//! Removal of configuration files left by older naming schemes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use super::conf_name_salted;

/// Fixed names used by releases that did not key files per launch.
pub const LEGACY_CONF_NAMES: &[&str] = &["steam_dos_audio.conf", "steam_dos_auto.conf"];

/// Prefix and salts of retired per-launch naming schemes.
const LEGACY_PREFIX: &str = "steam_dos";
const LEGACY_SALTS: &[&str] = &["", "v1"];

/// Remove superseded configuration files for `identity` and `args` in `dir`.
///
/// Returns the paths that were removed. Missing files are not an error.
pub fn cleanup_old_conf_files<S: AsRef<str>>(
    dir: &Path,
    identity: &str,
    args: &[S],
) -> io::Result<Vec<PathBuf>> {
    let mut names: Vec<String> = LEGACY_CONF_NAMES.iter().map(|n| n.to_string()).collect();
    names.extend(
        LEGACY_SALTS
            .iter()
            .map(|salt| conf_name_salted(LEGACY_PREFIX, identity, args, salt)),
    );

    let mut removed = Vec::new();
    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        fs::remove_file(&path)?;
        info!("Removed stale configuration {}", path.display());
        removed.push(path);
    }
    Ok(removed)
}

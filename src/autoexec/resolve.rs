//! Collaborators used while rewriting autoexec paths.
//!
//! Finding the on-disk spelling of a path and repairing `.cue` sheets are
//! provided by the embedding launcher. The implementations here only cover
//! what can be done without touching the filesystem.

use std::io;

use crate::winpath::to_posix_path;

/// Maps a path written for a case-insensitive filesystem to the real path.
pub trait PathResolver {
    /// Return the case-correct path for `path`.
    ///
    /// A path that is already correct must come back unchanged.
    fn resolve(&self, path: &str) -> String;
}

/// Repairs `.cue` sheets whose track references have the wrong case.
pub trait CueRepair {
    /// True if `path` is a cue sheet with case-mismatched track references.
    fn needs_repair(&self, path: &str) -> bool;

    /// Write a corrected copy of the sheet and return its path.
    fn write_fixed_copy(&self, path: &str) -> io::Result<String>;
}

/// Resolver that only rewrites Windows spelling into POSIX spelling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixPathResolver;

impl PathResolver for PosixPathResolver {
    fn resolve(&self, path: &str) -> String {
        to_posix_path(path)
    }
}

/// Cue repair that never finds anything to fix.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCueRepair;

impl CueRepair for NoCueRepair {
    fn needs_repair(&self, _path: &str) -> bool {
        false
    }

    fn write_fixed_copy(&self, path: &str) -> io::Result<String> {
        Ok(path.to_string())
    }
}

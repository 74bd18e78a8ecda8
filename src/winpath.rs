//! Windows path spelling.
//!
//! DOSBox command lines written for Windows use `\` separators and may start
//! with a drive designator. These helpers only rewrite the spelling; they never
//! touch the filesystem.

/// Convert a Windows-style path into its POSIX spelling.
///
/// Backslashes become `/`. A leading drive designator (`C:`) and the
/// separators following it are dropped, leaving a path relative to the
/// directory the game was started from.
pub fn to_posix_path(path: &str) -> String {
    let converted = path.replace('\\', "/");
    let bytes = converted.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let rest = converted[2..].trim_start_matches('/');
        return rest.to_string();
    }
    converted
}

/// Split a POSIX path into its directory and file name.
///
/// The directory is empty when the path has no separator.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

//! Autoexec Rewriter
//!
//! Rewrites `mount`, `imgmount` and drive-change lines so that paths written
//! for a case-insensitive filesystem point at real files on a case-sensitive
//! one. Every input line produces exactly one output line; lines that are
//! not recognised are passed through untouched.

mod command;
mod resolve;

pub use command::{AutoexecCommand, MountKind};
pub use resolve::{CueRepair, NoCueRepair, PathResolver, PosixPathResolver};

use log::{debug, warn};

/// Rewrites autoexec lines using the given collaborators.
pub struct AutoexecRewriter<'a> {
    resolver: &'a dyn PathResolver,
    cue: &'a dyn CueRepair,
}

impl<'a> AutoexecRewriter<'a> {
    /// Create a rewriter.
    pub fn new(resolver: &'a dyn PathResolver, cue: &'a dyn CueRepair) -> Self {
        Self { resolver, cue }
    }

    /// Rewrite a whole autoexec sequence into a new one of the same length.
    pub fn rewrite<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines.iter().map(|l| self.rewrite_line(l.as_ref())).collect()
    }

    /// Rewrite a single line.
    pub fn rewrite_line(&self, line: &str) -> String {
        match AutoexecCommand::parse(line) {
            AutoexecCommand::Mount {
                kind,
                drive,
                path,
                trailing,
            } => {
                let mut resolved = self.resolver.resolve(path);
                if kind == MountKind::ImgMount {
                    resolved = self.repair_cue(resolved);
                }
                let rewritten = format!(
                    "{} {} \"{}\"{}",
                    kind,
                    drive,
                    resolved,
                    trailing.unwrap_or("")
                );
                debug!("autoexec: {:?} -> {:?}", line, rewritten);
                rewritten
            }
            AutoexecCommand::ChangeDrive { drive } => format!("{}:", drive),
            AutoexecCommand::Raw(text) => text.to_string(),
        }
    }

    fn repair_cue(&self, path: String) -> String {
        if !self.cue.needs_repair(&path) {
            return path;
        }
        match self.cue.write_fixed_copy(&path) {
            Ok(fixed) => {
                debug!("Using repaired cue sheet {} for {}", fixed, path);
                fixed
            }
            Err(e) => {
                warn!("Failed to repair cue sheet {}: {}", path, e);
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    /// Resolver backed by a fixed table of known real paths.
    struct TableResolver {
        known: HashMap<String, String>,
    }

    impl TableResolver {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                known: entries
                    .iter()
                    .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                    .collect(),
            }
        }
    }

    impl PathResolver for TableResolver {
        fn resolve(&self, path: &str) -> String {
            let posix = path.replace('\\', "/");
            self.known
                .get(&posix.to_lowercase())
                .cloned()
                .unwrap_or(posix)
        }
    }

    struct FakeCue {
        broken: Vec<String>,
        fail: bool,
        written: RefCell<Vec<String>>,
    }

    impl FakeCue {
        fn new(broken: &[&str]) -> Self {
            Self {
                broken: broken.iter().map(|s| s.to_string()).collect(),
                fail: false,
                written: RefCell::new(Vec::new()),
            }
        }
    }

    impl CueRepair for FakeCue {
        fn needs_repair(&self, path: &str) -> bool {
            self.broken.iter().any(|b| b == path)
        }

        fn write_fixed_copy(&self, path: &str) -> io::Result<String> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.written.borrow_mut().push(path.to_string());
            Ok("boxtron.cue".to_string())
        }
    }

    #[test]
    fn test_quoted_mount_is_resolved() {
        let resolver = TableResolver::new(&[("Games/MyGame", "games/mygame")]);
        let rewriter = AutoexecRewriter::new(&resolver, &NoCueRepair);
        assert_eq!(
            rewriter.rewrite_line(r#"MOUNT C "Games\MyGame""#),
            r#"mount C "games/mygame""#
        );
    }

    #[test]
    fn test_unquoted_mount_is_requoted_with_trailing() {
        let resolver = TableResolver::new(&[("CD", "cd")]);
        let rewriter = AutoexecRewriter::new(&resolver, &NoCueRepair);
        assert_eq!(
            rewriter.rewrite_line("@mount d: CD -t cdrom -label GAME"),
            r#"mount D "cd" -t cdrom -label GAME"#
        );
    }

    #[test]
    fn test_imgmount_uses_repaired_cue() {
        let resolver = TableResolver::new(&[("CD/GAME.CUE", "cd/game.cue")]);
        let cue = FakeCue::new(&["cd/game.cue"]);
        let rewriter = AutoexecRewriter::new(&resolver, &cue);

        assert_eq!(
            rewriter.rewrite_line(r"imgmount d CD\GAME.CUE -t iso"),
            r#"imgmount D "boxtron.cue" -t iso"#
        );
        assert_eq!(*cue.written.borrow(), vec!["cd/game.cue"]);
    }

    #[test]
    fn test_mount_never_consults_cue_repair() {
        let resolver = PosixPathResolver;
        let cue = FakeCue::new(&["game.cue"]);
        let rewriter = AutoexecRewriter::new(&resolver, &cue);

        assert_eq!(rewriter.rewrite_line("mount d game.cue"), r#"mount D "game.cue""#);
        assert!(cue.written.borrow().is_empty());
    }

    #[test]
    fn test_failed_cue_repair_keeps_resolved_path() {
        let resolver = PosixPathResolver;
        let mut cue = FakeCue::new(&["game.cue"]);
        cue.fail = true;
        let rewriter = AutoexecRewriter::new(&resolver, &cue);

        assert_eq!(
            rewriter.rewrite_line("imgmount d game.cue -t iso"),
            r#"imgmount D "game.cue" -t iso"#
        );
    }

    #[test]
    fn test_change_drive_is_uppercased() {
        let rewriter = AutoexecRewriter::new(&PosixPathResolver, &NoCueRepair);
        assert_eq!(rewriter.rewrite_line("c:"), "C:");
        assert_eq!(rewriter.rewrite_line(r"@d:\ "), "D:");
    }

    #[test]
    fn test_unknown_lines_pass_through() {
        let rewriter = AutoexecRewriter::new(&PosixPathResolver, &NoCueRepair);
        for line in ["@echo off", "  cd GAME  ", "mount -u c", "", "\tGAME.EXE /s"] {
            assert_eq!(rewriter.rewrite_line(line), line);
        }
    }

    #[test]
    fn test_correct_path_is_stable() {
        let rewriter = AutoexecRewriter::new(&PosixPathResolver, &NoCueRepair);
        let once = rewriter.rewrite_line(r#"mount c "games/mygame""#);
        assert_eq!(once, r#"mount C "games/mygame""#);
        assert_eq!(rewriter.rewrite_line(&once), once);
    }

    #[test]
    fn test_rewrite_preserves_length_and_order() {
        let rewriter = AutoexecRewriter::new(&PosixPathResolver, &NoCueRepair);
        let input = vec![
            "@echo off".to_string(),
            "mount c .".to_string(),
            "c:".to_string(),
            "call game.bat".to_string(),
        ];
        let output = rewriter.rewrite(&input);
        assert_eq!(
            output,
            vec!["@echo off", r#"mount C ".""#, "C:", "call game.bat"]
        );
        // Input is left untouched.
        assert_eq!(input[1], "mount c .");
    }
}

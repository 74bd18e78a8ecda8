//! Autoexec line grammar.
//!
//! Recognised forms, tried in this order (keywords are case-insensitive and
//! may be prefixed with `@`):
//! 1. `mount|imgmount <d>[:] "<path>" [trailing]`
//! 2. `mount|imgmount <d>[:] <path> [trailing]`
//! 3. `<d>:[\]` alone on the line
//!
//! The quoted form must be tried first, otherwise a quoted path containing
//! spaces would be split by the unquoted form. Anything else is kept raw.

use std::fmt;
use std::sync::OnceLock;

use regex_lite::{Captures, Regex};

fn quoted_mount() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)^@? *(mount|imgmount) +([a-z]):? +"([^"]+)"( +(.*))?"#)
            .expect("valid quoted mount pattern")
    })
}

fn unquoted_mount() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^@? *(mount|imgmount) +([a-z]):? +([^ ]+)( +(.*))?")
            .expect("valid unquoted mount pattern")
    })
}

fn change_drive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^@? *([a-z]):\\? *$").expect("valid change drive pattern")
    })
}

/// Mount command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    /// Bind a host directory.
    Mount,
    /// Bind a disk image.
    ImgMount,
}

impl MountKind {
    fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("imgmount") {
            MountKind::ImgMount
        } else {
            MountKind::Mount
        }
    }
}

impl fmt::Display for MountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountKind::Mount => write!(f, "mount"),
            MountKind::ImgMount => write!(f, "imgmount"),
        }
    }
}

/// View over a single autoexec line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoexecCommand<'a> {
    /// `mount`/`imgmount` with a host path.
    Mount {
        kind: MountKind,
        /// Drive letter, uppercased.
        drive: char,
        /// Path as written, without quotes.
        path: &'a str,
        /// Text after the path including its leading spaces.
        trailing: Option<&'a str>,
    },
    /// Bare drive change such as `c:`.
    ChangeDrive {
        /// Drive letter, uppercased.
        drive: char,
    },
    /// Anything else.
    Raw(&'a str),
}

impl<'a> AutoexecCommand<'a> {
    /// Classify one line.
    pub fn parse(line: &'a str) -> Self {
        if let Some(caps) = quoted_mount()
            .captures(line)
            .or_else(|| unquoted_mount().captures(line))
        {
            if let Some(cmd) = Self::mount_from(&caps) {
                return cmd;
            }
        }

        if let Some(drive) = change_drive()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| drive_letter(m.as_str()))
        {
            return AutoexecCommand::ChangeDrive { drive };
        }

        AutoexecCommand::Raw(line)
    }

    fn mount_from(caps: &Captures<'a>) -> Option<Self> {
        let kind = MountKind::from_keyword(caps.get(1)?.as_str());
        let drive = drive_letter(caps.get(2)?.as_str())?;
        let path = caps.get(3)?.as_str();
        let trailing = caps.get(4).map(|m| m.as_str());
        Some(AutoexecCommand::Mount {
            kind,
            drive,
            path,
            trailing,
        })
    }
}

fn drive_letter(s: &str) -> Option<char> {
    s.chars().next().map(|c| c.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_mount() {
        let cmd = AutoexecCommand::parse(r#"MOUNT C "Games\My Game" -freesize 100"#);
        assert_eq!(
            cmd,
            AutoexecCommand::Mount {
                kind: MountKind::Mount,
                drive: 'C',
                path: r"Games\My Game",
                trailing: Some(" -freesize 100"),
            }
        );
    }

    #[test]
    fn test_unquoted_mount() {
        let cmd = AutoexecCommand::parse("@imgmount d: cd/game.cue  -t iso");
        assert_eq!(
            cmd,
            AutoexecCommand::Mount {
                kind: MountKind::ImgMount,
                drive: 'D',
                path: "cd/game.cue",
                trailing: Some("  -t iso"),
            }
        );
    }

    #[test]
    fn test_mount_without_trailing() {
        let cmd = AutoexecCommand::parse("mount c .");
        assert_eq!(
            cmd,
            AutoexecCommand::Mount {
                kind: MountKind::Mount,
                drive: 'C',
                path: ".",
                trailing: None,
            }
        );
    }

    #[test]
    fn test_keyword_case_and_at_prefix() {
        for line in ["mount c x", "MOUNT C x", "MoUnT c: x", "@mount c x", "@  mount c x"] {
            assert!(
                matches!(AutoexecCommand::parse(line), AutoexecCommand::Mount { drive: 'C', .. }),
                "{line}"
            );
        }
    }

    #[test]
    fn test_change_drive() {
        assert_eq!(
            AutoexecCommand::parse("c:"),
            AutoexecCommand::ChangeDrive { drive: 'C' }
        );
        assert_eq!(
            AutoexecCommand::parse(r"@D:\  "),
            AutoexecCommand::ChangeDrive { drive: 'D' }
        );
    }

    #[test]
    fn test_change_drive_rejects_extra_tokens() {
        assert_eq!(AutoexecCommand::parse("c: dir"), AutoexecCommand::Raw("c: dir"));
        assert_eq!(AutoexecCommand::parse(r"c:\game"), AutoexecCommand::Raw(r"c:\game"));
    }

    #[test]
    fn test_raw_lines() {
        for line in [
            "",
            "@echo off",
            "mount -u c",
            "mount c",
            "mountc c .",
            "cd GAME",
            "# mount c .",
        ] {
            assert_eq!(AutoexecCommand::parse(line), AutoexecCommand::Raw(line));
        }
    }

    #[test]
    fn test_unterminated_quote_falls_back_to_unquoted() {
        let cmd = AutoexecCommand::parse(r#"mount c "games"#);
        assert!(matches!(cmd, AutoexecCommand::Mount { path: "\"games", .. }));
    }

    #[test]
    fn test_mount_kind_display() {
        assert_eq!(MountKind::Mount.to_string(), "mount");
        assert_eq!(MountKind::ImgMount.to_string(), "imgmount");
    }
}

//! Source Reader: one on-disk DOSBox configuration file.
//!
//! Files are INI-like: `[section]` headers followed by `key=value` options.
//! Keys keep their case. The `[autoexec]` section is a script, so its lines
//! are captured verbatim instead of being parsed as options.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Name of the section holding the startup script.
pub const AUTOEXEC_SECTION: &str = "autoexec";

/// Options of one section, keyed by case-preserved option name.
pub type Section = BTreeMap<String, String>;

/// Sections keyed by section name.
pub type Sections = BTreeMap<String, Section>;

/// Text encodings a configuration file may be stored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    /// Legacy single-byte code page used by many GOG-era `.conf` files.
    Windows1250,
}

impl Encoding {
    /// Label as written in diagnostics and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Windows1250 => "cp1250",
        }
    }

    /// Byte values with no character in the code page.
    fn unassigned_bytes(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[],
            Encoding::Windows1250 => &[0x81, 0x83, 0x88, 0x90, 0x98],
        }
    }

    fn codec(&self) -> &'static encoding_rs::Encoding {
        match self {
            Encoding::Utf8 => encoding_rs::UTF_8,
            Encoding::Windows1250 => encoding_rs::WINDOWS_1250,
        }
    }

    /// Decode `bytes`, failing on any malformed sequence.
    ///
    /// Bytes the code page leaves unassigned are malformed too, even though
    /// the WHATWG tables pass them through as C1 controls.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        if self.unassigned_bytes().iter().any(|b| bytes.contains(b)) {
            return None;
        }
        self.codec()
            .decode_without_bom_handling_and_without_replacement(bytes)
    }

    /// Encode `text`, failing if any character has no mapping.
    pub fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        let unassigned = self.unassigned_bytes();
        if text
            .chars()
            .any(|c| u8::try_from(c).map_or(false, |b| unassigned.contains(&b)))
        {
            return None;
        }
        let (bytes, _, unmappable) = self.codec().encode(text);
        if unmappable {
            None
        } else {
            Some(bytes)
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Errors reading a configuration source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {} as utf-8 or {encoding}", path.display())]
    Decode { path: PathBuf, encoding: Encoding },
}

/// One parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSource {
    /// Encoding that decoded the file.
    pub encoding: Encoding,

    /// Key/value sections, excluding `autoexec`.
    pub sections: Sections,

    /// Raw lines of the `autoexec` section, in file order.
    pub autoexec_lines: Vec<String>,
}

impl ParsedSource {
    /// Parse already-decoded configuration text.
    pub fn parse(text: &str, encoding: Encoding) -> Self {
        let mut parsed = ParsedSource {
            encoding,
            ..Default::default()
        };
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;

        for raw in text.lines() {
            let trimmed = raw.trim();

            if let Some(name) = section_header(trimmed) {
                if name != AUTOEXEC_SECTION {
                    parsed.sections.entry(name.to_string()).or_default();
                }
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section) = current.as_deref() else {
                if !trimmed.is_empty() && !is_comment(trimmed) {
                    warn!("Ignoring line outside of any section: {}", trimmed);
                }
                continue;
            };

            if section == AUTOEXEC_SECTION {
                parsed.autoexec_lines.push(raw.to_string());
                continue;
            }

            if trimmed.is_empty() || is_comment(trimmed) {
                last_key = None;
                continue;
            }

            let options = parsed.sections.entry(section.to_string()).or_default();

            // Indented line right after an option continues its value.
            if raw.starts_with([' ', '\t']) {
                if let Some(key) = &last_key {
                    if let Some(value) = options.get_mut(key) {
                        value.push('\n');
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            let (key, value) = match trimmed.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (trimmed, ""),
            };
            options.insert(key.to_string(), value.to_string());
            last_key = Some(key.to_string());
        }

        parsed
    }

    /// Read and parse a configuration file.
    ///
    /// UTF-8 is tried first. If the bytes are not valid UTF-8 the whole file
    /// is decoded again as Windows-1250; if that fails too the error is
    /// returned.
    pub fn read(path: &Path) -> Result<Self, SourceError> {
        let bytes = read_bytes(path)?;
        Self::from_bytes(path, &bytes)
    }

    /// Decode and parse the raw bytes of `path`.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, SourceError> {
        let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

        if let Some(text) = Encoding::Utf8.decode(body) {
            return Ok(Self::parse(&text, Encoding::Utf8));
        }

        let fallback = Encoding::Windows1250;
        warn!(
            "{} is not valid utf-8, retrying as {}",
            path.display(),
            fallback
        );
        match fallback.decode(body) {
            Some(text) => Ok(Self::parse(&text, fallback)),
            None => Err(SourceError::Decode {
                path: path.to_path_buf(),
                encoding: fallback,
            }),
        }
    }
}

/// Read a file, separating "not there" from other I/O failures.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, SourceError> {
    debug!("Reading configuration {}", path.display());
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// SHA-256 of raw file bytes, hex encoded.
pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn section_header(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.split_once(']'))
        .map(|(name, _)| name)
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with(';')
}

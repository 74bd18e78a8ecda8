//! Resolved configuration with provenance
//!
//! The resolved configuration is the merge of every contributing layer:
//! configuration files, tweaks, `-c` commands and the launch sequence for
//! the program being run.

use std::path::{Path, PathBuf};

use dosbox_argv::DosboxArgs;
use log::{debug, info};
use serde::Serialize;

use super::merge::merge_sections;
use super::source::{digest, read_bytes, Encoding, ParsedSource, Section, Sections, SourceError};
use crate::winpath::{split_path, to_posix_path};

/// File picked up when no `-conf` argument is given.
pub const DEFAULT_CONF_NAME: &str = "dosbox.conf";

/// Kind of a contributing layer
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrigin {
    File,
    Tweak,
    Command,
    Launch,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize)]
pub struct LayerSource {
    /// Kind of this layer
    pub origin: LayerOrigin,

    /// File path (file layers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (file layers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Encoding that decoded the file (file layers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,

    /// Autoexec lines this layer appended
    pub autoexec_lines: usize,
}

/// Inputs to a configuration merge.
#[derive(Debug, Clone, Default)]
pub struct LayerRequest {
    /// Configuration files, merged in order. Windows spelling is accepted.
    pub conf_files: Vec<String>,

    /// Commands appended to autoexec after all file layers.
    pub commands: Vec<String>,

    /// Program to mount, change to and run last.
    pub exe: Option<String>,

    /// Skip the autoexec content of file layers.
    pub noautoexec: bool,

    /// Append `exit` after running `exe`.
    pub exit_after_exe: bool,

    /// Options applied over all file layers.
    pub tweaks: Sections,

    /// Directory relative paths are resolved against. Defaults to `.`.
    pub working_dir: Option<PathBuf>,
}

impl LayerRequest {
    /// Build a request from a parsed DOSBox command line.
    pub fn from_args(args: &DosboxArgs, tweaks: Sections) -> Self {
        Self {
            conf_files: args.conf.clone(),
            commands: args.commands.clone(),
            exe: args.file.clone(),
            noautoexec: args.noautoexec,
            exit_after_exe: args.exit,
            tweaks,
            working_dir: None,
        }
    }

    /// Resolve relative paths against `dir`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// True when there is at least one file, command or program.
    pub fn is_meaningful(&self) -> bool {
        !self.conf_files.is_empty() || !self.commands.is_empty() || self.exe.is_some()
    }

    fn working_dir(&self) -> &Path {
        self.working_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    fn file_layers(&self) -> Vec<PathBuf> {
        let dir = self.working_dir();
        if self.conf_files.is_empty() {
            let default = dir.join(DEFAULT_CONF_NAME);
            return if default.is_file() {
                vec![default]
            } else {
                Vec::new()
            };
        }
        self.conf_files
            .iter()
            .map(|p| dir.join(to_posix_path(p)))
            .collect()
    }
}

/// DOSBox configuration after merging every layer.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Last non-utf-8 encoding seen across file layers
    pub encoding: Encoding,

    sections: Sections,

    autoexec: Vec<String>,

    /// Contributing layers in processing order
    sources: Vec<LayerSource>,
}

impl ResolvedConfig {
    /// Merge all layers of `request`.
    ///
    /// File layers are read strictly in order; any read failure aborts the
    /// whole merge.
    pub fn build(request: &LayerRequest) -> Result<Self, ConfigError> {
        if !request.is_meaningful() {
            return Err(ConfigError::Usage);
        }

        let mut config = Self {
            encoding: Encoding::Utf8,
            sections: Sections::new(),
            autoexec: Vec::new(),
            sources: Vec::new(),
        };

        // Layers 1..n: configuration files
        for path in request.file_layers() {
            let bytes = read_bytes(&path)?;
            let parsed = ParsedSource::from_bytes(&path, &bytes)?;
            debug!(
                "Merging {} ({}, {} section(s))",
                path.display(),
                parsed.encoding,
                parsed.sections.len()
            );
            if parsed.encoding != Encoding::Utf8 {
                config.encoding = parsed.encoding;
            }
            merge_sections(&mut config.sections, parsed.sections);

            let appended = if request.noautoexec {
                0
            } else {
                let n = parsed.autoexec_lines.len();
                config.autoexec.extend(parsed.autoexec_lines);
                n
            };
            config.sources.push(LayerSource {
                origin: LayerOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest(&bytes)),
                encoding: Some(parsed.encoding),
                autoexec_lines: appended,
            });
        }

        // Tweaks: sections only, never autoexec
        if !request.tweaks.is_empty() {
            merge_sections(&mut config.sections, request.tweaks.clone());
            config.push_source(LayerOrigin::Tweak, 0);
        }

        // -c commands
        if !request.commands.is_empty() {
            config.autoexec.extend(request.commands.iter().cloned());
            config.push_source(LayerOrigin::Command, request.commands.len());
        }

        // Launch sequence
        if let Some(exe) = &request.exe {
            let lines = launch_sequence(exe, request.exit_after_exe);
            info!("Launching {} via: {}", exe, lines.join(" / "));
            let n = lines.len();
            config.autoexec.extend(lines);
            config.push_source(LayerOrigin::Launch, n);
        }

        Ok(config)
    }

    /// Merge the layers named by a parsed DOSBox command line, relative to `dir`.
    pub fn from_args(args: &DosboxArgs, tweaks: Sections, dir: &Path) -> Result<Self, ConfigError> {
        Self::build(&LayerRequest::from_args(args, tweaks).in_dir(dir))
    }

    fn push_source(&mut self, origin: LayerOrigin, autoexec_lines: usize) {
        self.sources.push(LayerSource {
            origin,
            path: None,
            digest: None,
            encoding: None,
            autoexec_lines,
        });
    }

    /// Names of all merged sections.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(|s| s.as_str()).collect()
    }

    /// Whether `name` was merged in from any layer.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Options of a section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Merged value of `section.option`, or `default` when absent.
    pub fn get_or<'a>(&'a self, section: &str, option: &str, default: &'a str) -> &'a str {
        self.sections
            .get(section)
            .and_then(|s| s.get(option))
            .map(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Set an option in an existing section.
    ///
    /// Setting into a section no layer contributed is a caller error.
    pub fn set(&mut self, section: &str, option: &str, value: &str) -> Result<(), ConfigError> {
        let options = self
            .sections
            .get_mut(section)
            .ok_or_else(|| ConfigError::NoSection(section.to_string()))?;
        options.insert(option.to_string(), value.to_string());
        Ok(())
    }

    /// Autoexec lines in layer order.
    pub fn autoexec(&self) -> &[String] {
        &self.autoexec
    }

    /// Contributing layers in processing order.
    pub fn sources(&self) -> &[LayerSource] {
        &self.sources
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Commands that mount the program's directory as `C:` and run it.
pub fn launch_sequence(exe: &str, exit_after_exe: bool) -> Vec<String> {
    let posix = to_posix_path(exe);
    let (dir, file) = split_path(&posix);
    let dir = if dir.is_empty() { "." } else { dir };

    let mut lines = Vec::with_capacity(4);
    if dir.contains(char::is_whitespace) {
        lines.push(format!("mount C \"{}\"", dir));
    } else {
        lines.push(format!("mount C {}", dir));
    }
    lines.push("C:".to_string());
    if file.to_lowercase().ends_with(".bat") {
        lines.push(format!("call {}", file));
    } else {
        lines.push(file.to_string());
    }
    if exit_after_exe {
        lines.push("exit".to_string());
    }
    lines
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("these are not DOSBox command line arguments (need -conf, -c or a program)")]
    Usage,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("No section: '{0}'")]
    NoSection(String),
}

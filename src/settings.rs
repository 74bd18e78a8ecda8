//! Host settings
//!
//! Display and audio preferences of the machine running the game, loaded from
//! `~/.config/boxtron/settings.toml`. Every field is optional; a missing file
//! means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Sections;
use crate::midi::{MidiPort, StaticMidi};

/// Host settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostSettings {
    /// Display preferences
    #[serde(default)]
    pub display: DisplaySettings,

    /// MIDI preferences
    #[serde(default)]
    pub midi: MidiSettings,

    /// Option overrides applied over every configuration file
    #[serde(default)]
    pub tweaks: Sections,
}

/// Display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Whether the fullscreen resolution below has been settled
    #[serde(default)]
    pub finalized: bool,

    /// `[sdl] fullresolution`
    #[serde(default = "default_fullresolution")]
    pub fullresolution: String,

    /// `[render] scaler`
    #[serde(default = "default_scaler")]
    pub scaler: String,
}

fn default_fullresolution() -> String {
    "desktop".to_string()
}

fn default_scaler() -> String {
    "normal3x".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            finalized: false,
            fullresolution: default_fullresolution(),
            scaler: default_scaler(),
        }
    }
}

/// MIDI preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MidiSettings {
    /// Port address such as `128:0`
    pub port: Option<String>,

    /// Device name shown in diagnostics
    pub name: Option<String>,
}

impl MidiSettings {
    /// MIDI lookup backed by these settings.
    pub fn lookup(&self) -> StaticMidi {
        let port = self.port.as_ref().map(|addr| MidiPort {
            name: self.name.clone().unwrap_or_else(|| "MIDI synthesiser".to_string()),
            addr: addr.clone(),
        });
        StaticMidi::new(port)
    }
}

/// Errors that can occur when loading host settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid tweak '{0}', expected section.option=value")]
    InvalidTweak(String),
}

impl HostSettings {
    /// Get the default settings file path
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let home = std::env::var("HOME").map_err(|_| {
            SettingsError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "HOME environment variable not set",
            ))
        })?;
        Ok(PathBuf::from(home).join(".config/boxtron/settings.toml"))
    }

    /// Load settings from `path`, or defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML string
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Tweak layer: settings tweaks overlaid with `section.option=value` overrides.
    pub fn tweak_layer<S: AsRef<str>>(&self, overrides: &[S]) -> Result<Sections, SettingsError> {
        let mut layer = self.tweaks.clone();
        for spec in overrides {
            let spec = spec.as_ref();
            let (section, option, value) = parse_tweak(spec)
                .ok_or_else(|| SettingsError::InvalidTweak(spec.to_string()))?;
            layer
                .entry(section.to_string())
                .or_default()
                .insert(option.to_string(), value.to_string());
        }
        Ok(layer)
    }
}

fn parse_tweak(spec: &str) -> Option<(&str, &str, &str)> {
    let (path, value) = spec.split_once('=')?;
    let (section, option) = path.split_once('.')?;
    if section.is_empty() || option.is_empty() {
        return None;
    }
    Some((section, option, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::MidiLookup;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = HostSettings::parse("").unwrap();
        assert!(!settings.display.finalized);
        assert_eq!(settings.display.fullresolution, "desktop");
        assert_eq!(settings.display.scaler, "normal3x");
        assert!(settings.tweaks.is_empty());
        assert_eq!(settings.midi.lookup().find_midi_port(), None);
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
[display]
finalized = true
fullresolution = "1920x1080"
scaler = "none"

[midi]
port = "128:0"
name = "TiMidity"

[tweaks.sblaster]
force_irq = "5"
"#;
        let settings = HostSettings::parse(toml).unwrap();
        assert!(settings.display.finalized);
        assert_eq!(settings.display.fullresolution, "1920x1080");
        assert_eq!(settings.tweaks["sblaster"]["force_irq"], "5");

        let port = settings.midi.lookup().find_midi_port().unwrap();
        assert_eq!(port.addr, "128:0");
        assert_eq!(port.name, "TiMidity");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = HostSettings::load(&dir.path().join("settings.toml")).unwrap();
        assert!(!settings.display.finalized);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[display").unwrap();
        assert!(matches!(
            HostSettings::load(temp.path()),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_cli_tweaks_override_settings_tweaks() {
        let settings = HostSettings::parse("[tweaks.render]\nforce_aspect = \"false\"\n").unwrap();
        let layer = settings
            .tweak_layer(&["render.force_aspect=true", "dos.ems=false"])
            .unwrap();
        assert_eq!(layer["render"]["force_aspect"], "true");
        assert_eq!(layer["dos"]["ems"], "false");
    }

    #[test]
    fn test_invalid_tweak() {
        let settings = HostSettings::default();
        for bad in ["noequals", "nosection=1", ".opt=1", "sec.=1"] {
            assert!(
                matches!(settings.tweak_layer(&[bad]), Err(SettingsError::InvalidTweak(_))),
                "{bad}"
            );
        }
    }
}

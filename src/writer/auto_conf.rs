//! Auxiliary configuration derived from the host environment.

use std::path::{Path, PathBuf};

use log::info;

use super::templates::{
    render, AUTO_HEADER, CPU_SECTION, DOS_SECTION, MIDI_INFO, MIDI_INFO_NA, MIDI_SECTION,
    RENDER_SECTION_ACTIVE, SBLASTER_INFO, SBLASTER_SECTION, SDL_SECTION_ACTIVE,
};
use super::{persist, WriteError};
use crate::config::{Encoding, ResolvedConfig};
use crate::midi::MidiLookup;
use crate::naming::AUTO_CONF_NAME;
use crate::settings::DisplaySettings;

// DOSBox Sound Blaster defaults
const SB_BASE: &str = "220";
const SB_IRQ: &str = "7";
const SB_DMA: &str = "1";
const SB_HDMA: &str = "5";

/// Rendered auto file plus notices for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoConf {
    /// File contents
    pub text: String,
    /// Human-readable sound setup summary
    pub notices: Vec<String>,
}

/// Render the auto file.
///
/// `force_aspect` and `force_irq` replace the built-in defaults wholesale;
/// the plain `aspect`/`irq` values from configuration files are not read.
pub fn render_auto_conf(
    conf: &ResolvedConfig,
    display: &DisplaySettings,
    midi: &dyn MidiLookup,
) -> AutoConf {
    let mut text = AUTO_HEADER.to_string();
    let mut notices = Vec::new();

    if display.finalized {
        text.push_str(&render(
            SDL_SECTION_ACTIVE,
            &[("resolution", display.fullresolution.as_str())],
        ));
    }

    let aspect = conf.get_or("render", "force_aspect", "true");
    text.push_str(&render(
        RENDER_SECTION_ACTIVE,
        &[("aspect", aspect), ("scaler", display.scaler.as_str())],
    ));

    text.push_str(CPU_SECTION);

    if let Some(mixer) = conf.section("mixer") {
        text.push_str("[mixer]\n");
        for (key, value) in mixer {
            text.push_str(&format!("{}={}\n", key, value));
        }
        text.push('\n');
    }

    let irq = conf.get_or("sblaster", "force_irq", SB_IRQ);
    let sb = [("base", SB_BASE), ("irq", irq), ("dma", SB_DMA), ("hdma", SB_HDMA)];
    info!("Setting up DOSBox audio:");
    notices.push(render(SBLASTER_INFO, &sb));
    text.push_str(&render(SBLASTER_SECTION, &sb));

    match midi.find_midi_port() {
        Some(port) => {
            info!("Detected {} on {}", port.name, port.addr);
            notices.push(MIDI_INFO.to_string());
            text.push_str(&render(MIDI_SECTION, &[("port", port.addr.as_str())]));
        }
        None => notices.push(MIDI_INFO_NA.to_string()),
    }

    if conf.has_section("dos") {
        let dos = [
            ("xms", conf.get_or("dos", "xms", "true")),
            ("ems", conf.get_or("dos", "ems", "true")),
            ("umb", conf.get_or("dos", "umb", "true")),
        ];
        text.push_str(&render(DOS_SECTION, &dos));
    }

    AutoConf { text, notices }
}

/// Render the auto file and write it into `dir`.
pub fn write_auto_conf(
    dir: &Path,
    conf: &ResolvedConfig,
    display: &DisplaySettings,
    midi: &dyn MidiLookup,
) -> Result<(PathBuf, AutoConf), WriteError> {
    let auto = render_auto_conf(conf, display, midi);
    let path = dir.join(AUTO_CONF_NAME);
    persist(&path, &auto.text, Encoding::Utf8)?;
    Ok((path, auto))
}

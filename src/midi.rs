//! MIDI port lookup.
//!
//! Enumerating synthesizers is left to the host; the writer only needs to
//! know whether one is available and where.

use serde::{Deserialize, Serialize};

/// A MIDI output port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiPort {
    /// Human-readable device name.
    pub name: String,
    /// Address passed to DOSBox as `midiconfig` (e.g. `128:0`).
    pub addr: String,
}

/// Finds a MIDI port to route DOSBox music to.
pub trait MidiLookup {
    /// The port to use, or `None` when no synthesizer is available.
    fn find_midi_port(&self) -> Option<MidiPort>;
}

/// Lookup that never finds a port.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMidi;

impl MidiLookup for NoMidi {
    fn find_midi_port(&self) -> Option<MidiPort> {
        None
    }
}

/// Lookup returning a port named in the host settings.
#[derive(Debug, Clone, Default)]
pub struct StaticMidi {
    port: Option<MidiPort>,
}

impl StaticMidi {
    /// Use `port`, if any.
    pub fn new(port: Option<MidiPort>) -> Self {
        Self { port }
    }
}

impl MidiLookup for StaticMidi {
    fn find_midi_port(&self) -> Option<MidiPort> {
        self.port.clone()
    }
}

//! Boxtron configuration resolver
//!
//! Builds the DOSBox configuration for a game launched with Windows DOSBox
//! arguments: merges every configuration layer in DOSBox precedence order
//! and rewrites autoexec mount paths so that games authored for a
//! case-insensitive filesystem run on a case-sensitive one.

pub mod autoexec;
pub mod config;
pub mod midi;
pub mod naming;
pub mod pipeline;
pub mod settings;
pub mod winpath;
pub mod writer;

pub use autoexec::{AutoexecCommand, AutoexecRewriter, CueRepair, PathResolver};
pub use config::{ConfigError, Encoding, LayerRequest, ParsedSource, ResolvedConfig};
pub use midi::{MidiLookup, MidiPort};
pub use naming::{cache_key, uniq_conf_name};
pub use pipeline::{generate, resolve, GenerateOptions, GenerateOutput, PipelineError};
pub use settings::HostSettings;

//! Configuration layering
//!
//! Merges the layers of a DOSBox invocation, in order:
//! 1. Configuration files (`-conf`, or `dosbox.conf` when none is given)
//! 2. Tweaks supplied by the launcher
//! 3. Commands injected with `-c`
//! 4. The mount/run sequence for the program being launched

mod merge;
mod resolved;
mod source;

pub use merge::{merge_layers, merge_sections};
pub use resolved::{
    launch_sequence, ConfigError, LayerOrigin, LayerRequest, LayerSource, ResolvedConfig,
    DEFAULT_CONF_NAME,
};
pub use source::{
    digest, Encoding, ParsedSource, Section, Sections, SourceError, AUTOEXEC_SECTION,
};

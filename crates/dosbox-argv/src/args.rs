//! Parsed DOSBox arguments.

use serde::{Deserialize, Serialize};

/// Accepted subset of a DOSBox command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosboxArgs {
    /// `-conf` paths in the order given.
    pub conf: Vec<String>,

    /// `-c` commands in the order given; blank or missing values are dropped.
    pub commands: Vec<String>,

    /// `-noautoexec`
    pub noautoexec: bool,

    /// `-noconsole`
    pub noconsole: bool,

    /// `-fullscreen`
    pub fullscreen: bool,

    /// `-exit`
    pub exit: bool,

    /// Program to launch.
    pub file: Option<String>,
}

impl DosboxArgs {
    /// True when the arguments name something to configure or run.
    ///
    /// A command line with no `-conf`, no `-c` and no program is not a
    /// DOSBox invocation worth wrapping.
    pub fn is_meaningful(&self) -> bool {
        !self.conf.is_empty() || !self.commands.is_empty() || self.file.is_some()
    }
}

//! Parser for the DOSBox command line that game launchers pass to `dosbox.exe`.
//!
//! Only the subset that matters for building a configuration is accepted:
//! repeatable `-conf <path>` and `-c <command>`, the `-noautoexec`,
//! `-noconsole`, `-fullscreen` and `-exit` switches, and an optional
//! program path. Anything else is rejected so that a wrapper can tell a
//! DOSBox invocation apart from an unrelated one.

mod args;
mod error;
mod parser;

pub use args::DosboxArgs;
pub use error::ArgvError;
pub use parser::parse_argv;

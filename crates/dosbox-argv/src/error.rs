//! Argument parse errors.

use thiserror::Error;

/// Reasons an argument list is not an accepted DOSBox command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgvError {
    /// Flag outside the accepted subset.
    #[error("unrecognized argument: {0}")]
    UnknownFlag(String),

    /// Abbreviation matching more than one flag (`-no`).
    #[error("ambiguous option: {arg} could match {candidates}")]
    AmbiguousFlag { arg: String, candidates: String },

    /// Flag that needs a value was last or followed by another flag.
    #[error("argument {0}: expected one argument")]
    MissingValue(String),

    /// Boolean switch written with an inline value (`-exit=1`).
    #[error("argument {0}: ignored explicit argument")]
    UnexpectedValue(String),

    /// More than one program path.
    #[error("unrecognized arguments: {0}")]
    ExtraPositional(String),
}

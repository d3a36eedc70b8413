//! I/O-boundary error kinds: malformed lines and unrecognised
//! extensions surface to the caller, unlike the core engine's
//! boolean/`Option` precondition queries.
use thiserror::Error;

/// Failures from parsing or saving the line-oriented IS text format.
#[derive(Error, Debug)]
pub enum ConceptsIoError {
    /// A rule line (not the first, ground-set line) had no `->` token.
    #[error("malformed rule on line {line}: {text:?}")]
    MalformedLine {
        /// 1-based line number within the file.
        line: usize,
        /// The offending line, verbatim.
        text: String,
    },
    /// `save`/`parse` was asked for an extension no reader/writer is
    /// registered for in the [`crate::registry::IoFactory`].
    #[error("no reader/writer registered for extension {0:?}")]
    UnknownExtension(String),
    /// The path passed to `save`/`parse` had no extension at all.
    #[error("path has no file extension")]
    NoExtension,
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

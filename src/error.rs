//! Error taxonomy for assembly and permutation runs.
//!
//! Every failure here is fatal for the invocation: the caller (typically an
//! array-job scheduler) re-runs the whole permutation as an atomic unit, so
//! there is no retry or recovery logic anywhere in the crate.

use std::io;
use std::path::PathBuf;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the assembler, the permutation engine, and artifact IO.
#[derive(Debug)]
pub enum Error {
    /// Matrix sizes, coordinate lengths, or label counts disagree.
    ///
    /// These are contract violations (heterogeneous k across the input,
    /// a coordinate whose length does not match its array extent), reported
    /// as typed errors so callers can tell them apart from IO failures.
    ShapeMismatch(String),

    /// A condition group ended up with zero members after the shuffle.
    ///
    /// Unreachable when both input conditions carry at least one repetition,
    /// since the shuffle conserves tag counts; validated anyway so a broken
    /// input can never produce NaN distances silently.
    EmptyGroup(String),

    /// An input artifact path is absent or unreadable.
    MissingInput {
        /// Path we attempted to read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// An artifact was read but could not be decoded.
    MalformedInput {
        /// Path of the offending artifact.
        path: PathBuf,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// An output artifact could not be written.
    OutputIo {
        /// Path we attempted to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ShapeMismatch(detail) => write!(f, "shape mismatch: {detail}"),
            Error::EmptyGroup(tag) => {
                write!(f, "condition group {tag:?} has no members after shuffle")
            }
            Error::MissingInput { path, source } => {
                write!(f, "cannot read input {}: {source}", path.display())
            }
            Error::MalformedInput { path, source } => {
                write!(f, "cannot decode {}: {source}", path.display())
            }
            Error::OutputIo { path, source } => {
                write!(f, "cannot write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingInput { source, .. } | Error::OutputIo { source, .. } => Some(source),
            Error::MalformedInput { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path() {
        let err = Error::MissingInput {
            path: PathBuf::from("/data/combined.nc"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/combined.nc"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn shape_mismatch_is_sourceless() {
        let err = Error::ShapeMismatch("3x3 vs 4x4".into());
        assert!(std::error::Error::source(&err).is_none());
    }
}

//! Failure taxonomy for a benchmark run
//!
//! Every fatal condition maps to a distinct exit code so scripted callers can
//! tell an unreadable corpus apart from a misbehaving engine.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal benchmark errors
#[derive(Error, Debug)]
pub enum Error {
    /// Input corpus missing or unreadable
    #[error("cannot open input corpus {path}: {source}")]
    InputOpen {
        /// Path that failed to open
        path: PathBuf,
        source: std::io::Error,
    },

    /// Detail output destination not writable
    #[error("cannot create output file {path}: {source}")]
    OutputOpen {
        /// Path that failed to open
        path: PathBuf,
        source: std::io::Error,
    },

    /// Language set configuration is unusable
    #[error("invalid language set: {reason}")]
    InvalidLanguageSet {
        reason: String,
    },

    /// Truth or predicted language code outside the configured set
    #[error("language code '{code}' is not in the configured language set")]
    UnknownLabel {
        /// The offending code
        code: String,
    },

    /// An engine failed mid-detection; the run cannot continue
    #[error("detector '{name}' failed: {reason}")]
    Detector {
        /// Adapter name as reported by `LangDetector::name`
        name: &'static str,
        reason: String,
    },

    /// Other I/O error on an already-open handle
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InputOpen { .. } => 2,
            Error::OutputOpen { .. } => 3,
            Error::UnknownLabel { .. } => 4,
            Error::Detector { .. } => 5,
            Error::InvalidLanguageSet { .. } | Error::Io(_) => 1,
        }
    }
}

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

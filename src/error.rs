//! Error types for gapsend
//!
//! Errors fall into two tiers: the expected operational condition (no gap
//! files matched the glob) and fatal failures (configuration, I/O, or
//! transport launch problems). [`Error::exit_code`] maps each variant to
//! the process exit code contract; a transport that ran and exited nonzero
//! propagates its own code so callers can tell "transport rejected" apart
//! from "gapsend crashed".

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gapsend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for the expected "no matching gap files" condition
pub const NO_MATCH_EXIT_CODE: i32 = 1;

/// Exit code for fatal configuration, I/O, and launch failures
pub const FATAL_EXIT_CODE: i32 = 2;

/// Main error type for gapsend
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be resolved (e.g. unusable hostname)
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the parameter that failed to resolve
        message: String,
    },

    /// The gap file glob itself is malformed
    #[error("invalid gap file glob {glob:?}: {source}")]
    BadGlob {
        /// The offending pattern
        glob: String,
        /// Underlying pattern parse error
        source: glob::PatternError,
    },

    /// No files in the gap directory matched the glob.
    ///
    /// An empty monitoring window is a legitimate operating condition, so
    /// this is reported as a plain message rather than a crash.
    #[error("couldn't find any .gap files in {} matching {glob:?}, aborting", dir.display())]
    NoGapFiles {
        /// Directory that was scanned
        dir: PathBuf,
        /// Glob the scan filtered with
        glob: String,
    },

    /// I/O failure in any pipeline stage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The mail transport binary could not be found on PATH
    #[error("mail transport {command:?} not found: {source}")]
    TransportNotFound {
        /// Transport name or path that failed to resolve
        command: String,
        /// Underlying lookup error
        source: which::Error,
    },

    /// The mail transport ran and exited nonzero
    #[error("mail transport exited with status {code}")]
    TransportFailed {
        /// The transport's own exit code, propagated as ours
        code: i32,
    },
}

impl Error {
    /// Map this error onto the exit code contract: 1 for the expected
    /// no-matches condition, the transport's own code when the transport
    /// ran and failed, 2 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NoGapFiles { .. } => NO_MATCH_EXIT_CODE,
            Error::TransportFailed { code } => *code,
            _ => FATAL_EXIT_CODE,
        }
    }
}

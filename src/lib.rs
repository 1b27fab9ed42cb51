//! # gapsend
//!
//! Compresses the most recently modified gap file in a directory and mails
//! it, together with the trailing lines of the gap count file, via an
//! external mail transport.
//!
//! The pipeline runs once per invocation, in strict sequence:
//!
//! 1. Resolve - merge operator flags with computed defaults
//! 2. Locate - newest file matching the gap file glob
//! 3. Compress - gzip at maximum ratio into a scoped temporary file
//! 4. Summarize - constant-memory tail of the gap count file
//! 5. Dispatch - size-gated attachment, mail body on the transport's stdin
//!
//! There is no scheduler, no retry logic, and no state between runs; each
//! invocation either completes the whole pipeline or aborts. The one
//! expected failure mode is an empty monitoring window (no gap files
//! matched), reported with exit code 1.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Gap file compression
pub mod compress;
/// Configuration resolution
pub mod config;
/// Mail dispatch
pub mod dispatch;
/// Error types
pub mod error;
/// Gap file discovery
pub mod locator;
/// Recent gap message extraction
pub mod summary;

// Re-export commonly used types
pub use compress::CompressedArtifact;
pub use config::{Cli, Config, MAX_COMPRESSED_SIZE};
pub use error::{Error, Result};
pub use summary::TailBuffer;

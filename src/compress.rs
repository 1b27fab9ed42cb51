//! Gap file compression
//!
//! Streams the located gap file through gzip at maximum ratio into a
//! scoped temporary file. The temporary file lives in the system
//! temporary area (honoring `TMPDIR`) and is removed on every exit path
//! when the owning [`CompressedArtifact`] is dropped.

use crate::error::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A gzip-compressed copy of the gap file.
///
/// Holds the temporary file open so the dispatcher can attach it by path;
/// dropping the artifact deletes the file, whether the run completed or
/// aborted partway.
#[derive(Debug)]
pub struct CompressedArtifact {
    file: NamedTempFile,
    size: u64,
}

impl CompressedArtifact {
    /// Path to the compressed temporary file, valid until the artifact is
    /// dropped
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Compressed size in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Compress `gap_file` into a temporary file at maximum gzip ratio.
///
/// The source is streamed through the encoder in full, flushed, and
/// durably synced before the size is measured. There is no partial
/// success: any I/O failure (open, copy, flush, sync, stat) aborts the
/// run, and the half-written temporary file is cleaned up by drop.
pub fn compress_gap_file(gap_file: &Path) -> Result<CompressedArtifact> {
    info!(path = %gap_file.display(), "compressing gap file attachment");

    let mut tmp = NamedTempFile::with_prefix("gap")?;
    let mut source = File::open(gap_file)?;

    let mut encoder = GzEncoder::new(tmp.as_file_mut(), Compression::best());
    io::copy(&mut source, &mut encoder)?;
    encoder.finish()?;

    tmp.as_file().sync_all()?;
    let size = tmp.as_file().metadata()?.len();

    debug!(path = %tmp.path().display(), size, "wrote compressed artifact");
    Ok(CompressedArtifact { file: tmp, size })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use std::path::PathBuf;

    #[test]
    fn round_trip_reproduces_the_original_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let gap_file = dir.path().join("host_a.gap");
        let original: Vec<u8> = (0..2048u32).flat_map(u32::to_le_bytes).collect();
        std::fs::write(&gap_file, &original).unwrap();

        let artifact = compress_gap_file(&gap_file).unwrap();
        assert!(artifact.size() > 0);
        assert_eq!(artifact.size(), std::fs::metadata(artifact.path()).unwrap().len());

        let mut decoder = GzDecoder::new(File::open(artifact.path()).unwrap());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn repetitive_input_actually_shrinks() {
        let dir = tempfile::tempdir().unwrap();
        let gap_file = dir.path().join("host_a.gap");
        std::fs::write(&gap_file, "gap in sequence\n".repeat(10_000)).unwrap();

        let artifact = compress_gap_file(&gap_file).unwrap();
        assert!(artifact.size() < 160_000 / 10);
    }

    #[test]
    fn temporary_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let gap_file = dir.path().join("host_a.gap");
        std::fs::write(&gap_file, b"gap data").unwrap();

        let artifact = compress_gap_file(&gap_file).unwrap();
        let tmp_path = PathBuf::from(artifact.path());
        assert!(tmp_path.exists());

        drop(artifact);
        assert!(!tmp_path.exists());
    }

    #[test]
    fn missing_gap_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = compress_gap_file(&dir.path().join("absent.gap")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

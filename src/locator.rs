//! Gap file discovery
//!
//! Scans the configured directory for entries whose names match the gap
//! file glob and selects the most recently modified match.

use crate::config::Config;
use crate::error::{Error, Result};
use glob::Pattern;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, info};

/// Locate the most recently modified gap file in the configured directory.
///
/// Matching is on file names only, not full paths. Ties on modification
/// time are broken by file name, ascending, so the selection is
/// deterministic regardless of directory listing order.
///
/// Zero matches is the expected operational failure
/// ([`Error::NoGapFiles`], exit code 1); a malformed glob or unreadable
/// directory is fatal.
pub fn newest_gap_file(config: &Config) -> Result<PathBuf> {
    info!(
        dir = %config.gap_dir.display(),
        glob = %config.gap_file_glob,
        "reading gap files"
    );

    let pattern = Pattern::new(&config.gap_file_glob).map_err(|source| Error::BadGlob {
        glob: config.gap_file_glob.clone(),
        source,
    })?;

    let mut matched: Vec<(SystemTime, String)> = Vec::new();
    for entry in fs::read_dir(&config.gap_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            // Non-UTF-8 names cannot match a UTF-8 glob
            continue;
        };
        if !pattern.matches(name) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        matched.push((modified, name.to_string()));
    }

    if matched.is_empty() {
        return Err(Error::NoGapFiles {
            dir: config.gap_dir.clone(),
            glob: config.gap_file_glob.clone(),
        });
    }

    // Most recently modified first; mtime ties resolve by name so the
    // pick is stable.
    matched.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    let path = config.gap_dir.join(&matched[0].1);

    debug!(
        path = %path.display(),
        candidates = matched.len(),
        "selected newest gap file"
    );
    Ok(path)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_COMPRESSED_SIZE;
    use filetime::FileTime;
    use std::path::Path;

    fn test_config(dir: &Path, glob: &str) -> Config {
        Config {
            recipients: "ops@example.com".to_string(),
            gap_dir: dir.to_path_buf(),
            hostname: "host".to_string(),
            gap_count_name: "host_gapcount".to_string(),
            gap_file_glob: glob.to_string(),
            subject: "Gap-in-sequence messages from host".to_string(),
            debug: false,
            max_transfer_size: MAX_COMPRESSED_SIZE,
            mail_command: "mailx".to_string(),
        }
    }

    fn write_with_mtime(dir: &Path, name: &str, mtime_secs: i64) {
        let path = dir.join(name);
        std::fs::write(&path, b"gap data").unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
    }

    #[test]
    fn picks_the_most_recently_modified_match() {
        let dir = tempfile::tempdir().unwrap();
        write_with_mtime(dir.path(), "host_a.gap", 1_000);
        write_with_mtime(dir.path(), "host_b.gap", 3_000);
        write_with_mtime(dir.path(), "host_c.gap", 2_000);

        let config = test_config(dir.path(), "host_*.gap");
        let selected = newest_gap_file(&config).unwrap();
        assert_eq!(selected, dir.path().join("host_b.gap"));
    }

    #[test]
    fn non_matching_names_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_with_mtime(dir.path(), "host_a.gap", 1_000);
        write_with_mtime(dir.path(), "other_b.gap", 9_000);
        write_with_mtime(dir.path(), "host_gapcount", 9_000);

        let config = test_config(dir.path(), "host_*.gap");
        let selected = newest_gap_file(&config).unwrap();
        assert_eq!(selected, dir.path().join("host_a.gap"));
    }

    #[test]
    fn mtime_ties_resolve_by_name_ascending() {
        let dir = tempfile::tempdir().unwrap();
        write_with_mtime(dir.path(), "host_z.gap", 5_000);
        write_with_mtime(dir.path(), "host_a.gap", 5_000);
        write_with_mtime(dir.path(), "host_m.gap", 5_000);

        let config = test_config(dir.path(), "host_*.gap");
        let selected = newest_gap_file(&config).unwrap();
        assert_eq!(selected, dir.path().join("host_a.gap"));
    }

    #[test]
    fn zero_matches_is_the_expected_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_with_mtime(dir.path(), "unrelated.log", 1_000);

        let config = test_config(dir.path(), "host_*.gap");
        let err = newest_gap_file(&config).unwrap_err();
        assert!(matches!(err, Error::NoGapFiles { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn malformed_glob_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path(), "host_[*.gap");
        let err = newest_gap_file(&config).unwrap_err();
        assert!(matches!(err, Error::BadGlob { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unreadable_directory_is_fatal() {
        let config = test_config(Path::new("/nonexistent/gap/logs"), "host_*.gap");
        let err = newest_gap_file(&config).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

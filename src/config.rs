//! Configuration resolution for gapsend
//!
//! Every parameter can be supplied on the command line; anything left
//! unset is computed from defaults keyed off the local host name. The
//! resolved [`Config`] is immutable for the rest of the run and is passed
//! into each pipeline stage explicitly.

use crate::error::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// Hard ceiling on the compressed attachment size in bytes.
///
/// The operator may lower the effective limit with `--max-xfer-allowed`
/// but can never raise it past this.
pub const MAX_COMPRESSED_SIZE: u64 = 10 * 1024 * 1024;

/// Default mail transport executable, resolved from PATH at dispatch time
const DEFAULT_MAIL_COMMAND: &str = "mailx";

/// Default directory scanned for gap files
const DEFAULT_GAP_DIR: &str = "/usr/local/ldm/logs";

/// Default notification recipients
const DEFAULT_RECIPIENTS: &str = "ldm@localhost";

/// Command-line arguments for gapsend
#[derive(Debug, Parser)]
#[command(
    name = "gapsend",
    version,
    about = "Compress the most recent gap file and mail it with recent gap counts"
)]
pub struct Cli {
    /// Where to send the email to
    #[arg(long, default_value = DEFAULT_RECIPIENTS)]
    pub recipients: String,

    /// Directory to search for .gap files
    #[arg(long, default_value = DEFAULT_GAP_DIR)]
    pub gap_directory: PathBuf,

    /// Hostname of this machine (default will be computed)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Name of the .gap count file (default <hostname>_gapcount)
    #[arg(long)]
    pub gap_count_name: Option<String>,

    /// Glob to search .gap files with (default <hostname>_*.gap)
    #[arg(long)]
    pub gap_file_glob: Option<String>,

    /// Subject of the email being sent out (default includes the machine's hostname)
    #[arg(long)]
    pub subject: Option<String>,

    /// Shows debug output when set
    #[arg(long)]
    pub debug_mode: bool,

    /// Maximum transfer size allowed in bytes (capped at 10 MiB)
    #[arg(long, default_value_t = MAX_COMPRESSED_SIZE)]
    pub max_xfer_allowed: u64,

    /// Mail transport executable, resolved from PATH
    #[arg(long, default_value = DEFAULT_MAIL_COMMAND)]
    pub mail_command: String,
}

/// Resolved, immutable run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Notification recipients, passed through to the transport verbatim
    pub recipients: String,
    /// Directory scanned for gap files and the gap count file
    pub gap_dir: PathBuf,
    /// Short host name, domain suffix stripped at the first `.`
    pub hostname: String,
    /// File name of the gap count file inside `gap_dir`
    pub gap_count_name: String,
    /// Glob that gap file names are matched against
    pub gap_file_glob: String,
    /// Notification subject line
    pub subject: String,
    /// Debug logging enabled
    pub debug: bool,
    /// Effective attachment ceiling in bytes, already clamped to
    /// [`MAX_COMPRESSED_SIZE`]
    pub max_transfer_size: u64,
    /// Mail transport executable name or path
    pub mail_command: String,
}

impl Config {
    /// Resolve the run configuration, computing defaults for anything the
    /// operator left unset.
    ///
    /// Failure to resolve the local host name is fatal; no other parameter
    /// can fail to resolve.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let hostname = match cli.hostname {
            Some(name) => name,
            None => short_hostname()?,
        };

        let gap_count_name = cli
            .gap_count_name
            .unwrap_or_else(|| format!("{hostname}_gapcount"));
        let gap_file_glob = cli
            .gap_file_glob
            .unwrap_or_else(|| format!("{hostname}_*.gap"));
        let subject = cli
            .subject
            .unwrap_or_else(|| format!("Gap-in-sequence messages from {hostname}"));

        // The operator may lower the ceiling, never raise it.
        let max_transfer_size = cli.max_xfer_allowed.min(MAX_COMPRESSED_SIZE);

        Ok(Self {
            recipients: cli.recipients,
            gap_dir: cli.gap_directory,
            hostname,
            gap_count_name,
            gap_file_glob,
            subject,
            debug: cli.debug_mode,
            max_transfer_size,
            mail_command: cli.mail_command,
        })
    }
}

/// Local host name with any domain suffix stripped
fn short_hostname() -> Result<String> {
    let raw = gethostname::gethostname();
    let full = raw.into_string().map_err(|raw| Error::Config {
        message: format!("hostname {raw:?} is not valid UTF-8"),
    })?;
    if full.is_empty() {
        return Err(Error::Config {
            message: "could not determine the local hostname".to_string(),
        });
    }
    Ok(strip_domain(&full).to_string())
}

/// Everything before the first `.`, unless the name starts with one
fn strip_domain(full: &str) -> &str {
    match full.split_once('.') {
        Some((short, _)) if !short.is_empty() => short,
        _ => full,
    }
}

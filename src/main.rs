//! gapsend — compress and mail the most recent gap file
//!
//! One-shot driver for the pipeline: resolve configuration, locate the
//! newest gap file, compress it, capture the tail of the gap count file,
//! and hand everything to the external mail transport.

use clap::Parser;
use gapsend::config::{Cli, Config};
use gapsend::error::Result;
use gapsend::{compress, dispatch, locator, summary};
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug_mode);

    if let Err(err) = run(cli) {
        error!("{err}");
        std::process::exit(err.exit_code());
    }
}

/// The pipeline in strict sequence; the first failing stage aborts the
/// run, and the compressed artifact's drop glue removes its temporary
/// file on every path out of here.
fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli)?;
    debug!(?config, "program start");

    let gap_file = locator::newest_gap_file(&config)?;
    let artifact = compress::compress_gap_file(&gap_file)?;
    let tail = summary::recent_gap_messages(&config)?;
    let args = dispatch::build_mail_args(&config, &artifact);
    dispatch::send_mail(&config, &args, &tail)
}

/// Install the stderr logger. `--debug-mode` widens the filter to debug;
/// an explicit `RUST_LOG` still takes precedence.
fn init_tracing(debug: bool) {
    let default_filter = if debug { "gapsend=debug" } else { "gapsend=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! Mail dispatch
//!
//! Builds the transport argument list, applies the attachment size gate,
//! and runs the external mail transport with the notification body on its
//! standard input. The transport's own stdout and stderr pass straight
//! through to ours.

use crate::compress::CompressedArtifact;
use crate::config::Config;
use crate::error::{Error, FATAL_EXIT_CODE, Result};
use crate::summary::TailBuffer;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Subject suffix applied when the compressed gap file is too large to attach
const NO_ATTACHMENT_SUFFIX: &str = " without gap file attachment";

/// Build the transport argument list:
/// `[-s, subject, (-a, attachment-path)?, recipients]`.
///
/// The attachment is dropped and the subject suffixed when the compressed
/// size exceeds the ceiling. The ceiling consulted here is the effective,
/// possibly operator-lowered one; configuration resolution already
/// clamped it to the hard maximum.
#[must_use]
pub fn build_mail_args(config: &Config, artifact: &CompressedArtifact) -> Vec<String> {
    info!("creating mail arguments");
    debug!(
        size = artifact.size(),
        ceiling = config.max_transfer_size,
        "compressed size"
    );

    let mut args = vec!["-s".to_string()];
    if artifact.size() > config.max_transfer_size {
        warn!("size is over the transfer limit; compressed gap file (.gz) will not be attached");
        args.push(format!("{}{NO_ATTACHMENT_SUFFIX}", config.subject));
    } else {
        args.push(config.subject.clone());
        args.push("-a".to_string());
        args.push(artifact.path().display().to_string());
    }
    args.push(config.recipients.clone());
    args
}

/// Run the mail transport with `args`, feeding the notification body from
/// `tail` on its standard input.
///
/// The transport executable is resolved from PATH; a missing binary is
/// fatal. A transport that runs and exits nonzero propagates its own exit
/// code via [`Error::TransportFailed`].
pub fn send_mail(config: &Config, args: &[String], tail: &TailBuffer) -> Result<()> {
    info!(command = %config.mail_command, "sending mail");
    debug!(?args, "presend mail arguments");

    let transport =
        which::which(&config.mail_command).map_err(|source| Error::TransportNotFound {
            command: config.mail_command.clone(),
            source,
        })?;

    let mut child = Command::new(transport)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()?;

    // The handle is present: stdin was requested piped above. Dropping it
    // closes the pipe so the transport sees end-of-input.
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(tail.message_body().as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        // Signal terminations carry no code; map those to the generic
        // fatal code.
        return Err(Error::TransportFailed {
            code: status.code().unwrap_or(FATAL_EXIT_CODE),
        });
    }
    Ok(())
}

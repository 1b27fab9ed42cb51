//! Recent gap message extraction
//!
//! Reads the gap count file and keeps only its trailing lines in a
//! fixed-capacity rotating buffer, so memory use stays constant no matter
//! how large the file grows between runs.

use crate::config::Config;
use crate::error::Result;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{debug, info};

/// Number of trailing gap count lines retained for the notification
const TAIL_LINES: usize = 3;

/// Fixed-capacity buffer over the tail of the gap count file.
///
/// Pushing beyond capacity evicts the oldest retained line, so the buffer
/// holds at most [`TAIL_LINES`] lines, oldest first. Lines keep their
/// trailing terminators.
#[derive(Debug, Default)]
pub struct TailBuffer {
    lines: VecDeque<String>,
}

impl TailBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(TAIL_LINES),
        }
    }

    /// Retain `line`, evicting the oldest retained line when full
    pub fn push(&mut self, line: String) {
        if self.lines.len() == TAIL_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Retained lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of retained lines (at most [`TAIL_LINES`])
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no lines have been retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The notification body: the two most recent retained lines,
    /// concatenated in order.
    ///
    /// The oldest of the three retained lines is kept for context but
    /// never mailed; a buffer with fewer than two lines contributes
    /// whatever it has.
    #[must_use]
    pub fn message_body(&self) -> String {
        let skip = self.lines.len().saturating_sub(2);
        self.lines.iter().skip(skip).map(String::as_str).collect()
    }
}

/// Read the gap count file and retain its trailing lines.
///
/// The file is scanned line by line to end-of-file. A line is
/// terminator-delimited; trailing bytes without a terminator are ignored,
/// and end-of-file is the normal loop exit, not an error. A gap count
/// file that cannot be opened is fatal; a short file simply leaves the
/// buffer partly filled.
pub fn recent_gap_messages(config: &Config) -> Result<TailBuffer> {
    info!("gathering the previous gap messages for mail body");

    let path = config.gap_dir.join(&config.gap_count_name);
    let file = File::open(&path)?;
    let tail = read_tail(BufReader::new(file))?;

    debug!(path = %path.display(), retained = tail.len(), "gap count tail captured");
    Ok(tail)
}

fn read_tail<R: BufRead>(mut reader: R) -> std::io::Result<TailBuffer> {
    let mut tail = TailBuffer::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || !line.ends_with('\n') {
            break;
        }
        tail.push(line);
    }
    Ok(tail)
}

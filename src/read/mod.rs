//! Character-stream reading: one line per call, visible or raw.
//!
//! Visible reads use line-buffered semantics. Raw reads consume one
//! byte at a time and must run with the terminal already switched to
//! raw mode (see [`raw::RawModeGuard`]); they handle the in-band
//! cancel byte and masked echo themselves.

use std::io::{ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;

use crate::error::PromptError;
use crate::options::Visibility;
use crate::source::PromptSource;

pub mod raw;

/// Ctrl-C typed directly into a raw-mode stream.
const CANCEL_BYTE: u8 = 0x03;

/// Outcome of one read attempt. Exactly one variant is produced per
/// attempt; no partial result is observable outside this module.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A full line, terminator stripped.
    Line(String),
    /// The stream ended before any terminator with nothing read.
    Eof,
    /// The user cancelled the read.
    Cancelled,
    /// The read failed outright.
    Failed(PromptError),
}

/// Read one line with line-buffered semantics.
///
/// A bare terminator yields `Line("")`, which is what lets the prompt
/// loop substitute a default. Zero bytes read is reported as `Eof`,
/// distinct from an empty line.
pub(crate) fn visible_line(source: &mut dyn PromptSource) -> ReadOutcome {
    let mut line = String::new();
    match source.read_line(&mut line) {
        Ok(0) => ReadOutcome::Eof,
        Ok(_) => {
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            ReadOutcome::Line(line)
        }
        Err(err) => ReadOutcome::Failed(PromptError::Read(err)),
    }
}

/// Read one line byte-at-a-time from a raw-mode source.
///
/// `\n` and `\r` terminate the line without being included. The cancel
/// byte cancels immediately, discarding any partial buffer. In masked
/// visibility every accepted byte echoes exactly one mask character to
/// `sink`, flushed per byte so the user sees feedback per keystroke.
/// `cancelled` is the wind-down flag for a read whose session has
/// already been interrupted: once set, the reader stops echoing and
/// consuming.
pub(crate) fn raw_line<W: Write>(
    source: &mut dyn PromptSource,
    sink: &Mutex<W>,
    visibility: Visibility,
    cancelled: &AtomicBool,
) -> ReadOutcome {
    let mut buf = Vec::new();
    let mut saw_terminator = false;

    loop {
        if cancelled.load(Ordering::SeqCst) {
            debug!("raw read winding down after cancellation");
            return ReadOutcome::Cancelled;
        }

        let byte = {
            let chunk = match source.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return ReadOutcome::Failed(PromptError::Read(err)),
            };
            if chunk.is_empty() {
                break;
            }
            let byte = chunk[0];
            source.consume(1);
            byte
        };

        match byte {
            b'\n' | b'\r' => {
                saw_terminator = true;
                break;
            }
            CANCEL_BYTE => {
                debug!("cancel byte received in raw read");
                return ReadOutcome::Cancelled;
            }
            byte => {
                if let Visibility::Masked(mask) = visibility {
                    if let Err(err) = echo_mask(sink, mask) {
                        return ReadOutcome::Failed(PromptError::Read(err));
                    }
                }
                buf.push(byte);
            }
        }
    }

    if buf.is_empty() && !saw_terminator {
        return ReadOutcome::Eof;
    }
    ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned())
}

fn echo_mask<W: Write>(sink: &Mutex<W>, mask: char) -> std::io::Result<()> {
    let mut sink = match sink.lock() {
        Ok(sink) => sink,
        Err(poisoned) => poisoned.into_inner(),
    };
    write!(sink, "{mask}")?;
    sink.flush()
}

//! One cancellable read racing the user-interrupt signal.
//!
//! This is the only concurrent piece of the crate: a single blocking
//! reader task and a single interrupt watcher, joined by a first-wins
//! rendezvous. Re-prompting is not handled here; cancellation is
//! terminal for the call.

use std::future::Future;
use std::io;

use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::task;
use tracing::debug;

use crate::error::PromptError;
use crate::read::ReadOutcome;

/// Armed watch for the process's user-interrupt signal (SIGINT).
///
/// Arm it before the read starts so a signal landing between setup and
/// the first byte is not lost. One watch serves all attempts of a
/// single prompt call; dropping it disarms delivery.
pub(crate) struct InterruptWatch {
    signal: Signal,
}

impl InterruptWatch {
    pub(crate) fn arm() -> Result<Self, PromptError> {
        let signal = signal(SignalKind::interrupt()).map_err(PromptError::Os)?;
        Ok(InterruptWatch { signal })
    }

    /// Resolves when the interrupt signal arrives.
    pub(crate) async fn notified(&mut self) {
        self.signal.recv().await;
    }
}

/// Race one blocking read against an interrupt notification.
///
/// Exactly one outcome wins. The interrupt arm is polled first, so a
/// signal that is already pending beats a read that is already
/// complete. When the interrupt wins, the in-flight read is abandoned
/// and its eventual result discarded.
pub(crate) async fn race<I, F>(interrupt: I, read_fn: F) -> ReadOutcome
where
    I: Future<Output = ()>,
    F: FnOnce() -> ReadOutcome + Send + 'static,
{
    let read = task::spawn_blocking(read_fn);
    tokio::pin!(interrupt);

    tokio::select! {
        biased;

        _ = &mut interrupt => {
            debug!("read session interrupted");
            ReadOutcome::Cancelled
        }
        joined = read => match joined {
            Ok(outcome) => outcome,
            Err(err) => ReadOutcome::Failed(PromptError::Os(io::Error::new(
                io::ErrorKind::Other,
                err,
            ))),
        },
    }
}

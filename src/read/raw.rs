use std::io;
use std::os::unix::io::RawFd;

use tracing::trace;

use crate::error::PromptError;

/// Capture of a terminal's attributes while a raw read is in flight.
///
/// Acquiring the guard switches the terminal behind `fd` into raw mode
/// (no line buffering, no echo). [`release`](RawModeGuard::release)
/// restores the captured attributes and is safe to call more than
/// once; `Drop` releases as a backstop so the terminal is restored on
/// every exit path, including cancellation.
pub struct RawModeGuard {
    fd: RawFd,
    saved: libc::termios,
    restored: bool,
}

impl RawModeGuard {
    /// Put the terminal behind `fd` into raw mode, capturing its
    /// previous attributes.
    pub fn acquire(fd: RawFd) -> Result<Self, PromptError> {
        if unsafe { libc::isatty(fd) } == 0 {
            return Err(PromptError::NotATerminal);
        }

        let mut saved = unsafe { std::mem::zeroed::<libc::termios>() };
        if unsafe { libc::tcgetattr(fd, &mut saved) } != 0 {
            return Err(PromptError::Os(io::Error::last_os_error()));
        }

        let mut raw = saved;
        unsafe { libc::cfmakeraw(&mut raw) };
        // Keep output post-processing so echoed mask characters and the
        // trailing newline still render with normal line discipline.
        raw.c_oflag |= libc::OPOST;
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(PromptError::Os(io::Error::last_os_error()));
        }

        trace!(fd, "terminal switched to raw mode");
        Ok(RawModeGuard {
            fd,
            saved,
            restored: false,
        })
    }

    /// Restore the captured attributes. Idempotent.
    pub fn release(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.saved) };
        trace!(fd = self.fd, "terminal attributes restored");
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.release();
    }
}

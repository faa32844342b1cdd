use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::os::unix::io::{AsRawFd, RawFd};

/// Byte stream a prompt reads answers from.
///
/// Visible-mode prompting works against any buffered source. Hidden
/// and masked modes additionally need the file descriptor of the
/// backing terminal so its attributes can be switched; a source that
/// reports no descriptor makes those modes fail with
/// [`NotATerminal`](crate::error::PromptError::NotATerminal).
pub trait PromptSource: BufRead + Send {
    /// File descriptor of the backing terminal, when there is one.
    fn terminal_fd(&self) -> Option<RawFd> {
        None
    }
}

/// In-memory sources can drive a prompt, which is how the test suites
/// script multi-line conversations.
impl<T: AsRef<[u8]> + Send> PromptSource for Cursor<T> {}

/// Standard input as a prompt source.
///
/// Buffering lives here, not per read attempt, so bytes past the first
/// line terminator stay available to later attempts of the same
/// prompt loop.
pub struct StdinSource {
    inner: BufReader<io::Stdin>,
}

impl StdinSource {
    pub fn new() -> Self {
        StdinSource {
            inner: BufReader::new(io::stdin()),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for StdinSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for StdinSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

impl PromptSource for StdinSource {
    fn terminal_fd(&self) -> Option<RawFd> {
        if atty::is(atty::Stream::Stdin) {
            Some(self.inner.get_ref().as_raw_fd())
        } else {
            None
        }
    }
}

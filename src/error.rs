use std::io;

use thiserror::Error;

/// Everything a prompt call can fail with.
///
/// Callers matching on specific variants can rely on the split between
/// recoverable input mistakes (re-prompted when
/// [`loop_on_invalid`](crate::options::PromptOptions::loop_on_invalid)
/// is set) and terminal failures, which always end the call.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user cancelled the prompt, either via SIGINT or by typing
    /// Ctrl-C directly into a raw-mode read.
    #[error("interrupted")]
    Interrupted,

    /// Empty answer with no default to fall back on.
    #[error("default value is not provided but input is empty")]
    Empty,

    /// A choice answer that is not a base-10 number.
    #[error("input must be number")]
    NotNumber,

    /// A choice number outside the presented list.
    #[error("input is out of range")]
    OutOfRange,

    /// The caller-supplied validator rejected the answer.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Hidden or masked input was requested but the source is not
    /// backed by a terminal.
    #[error("input source is not backed by a terminal")]
    NotATerminal,

    /// An OS facility (terminal attributes, signal registration)
    /// failed.
    #[error("os failure: {0}")]
    Os(#[source] io::Error),

    /// The prompt was set up inconsistently, e.g. a select default
    /// that is not in the choice list.
    #[error("invalid prompt configuration: {0}")]
    Configuration(String),

    /// The input stream ended before a line terminator.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The input stream failed outright.
    #[error("failed to read the input: {0}")]
    Read(#[from] io::Error),
}

impl PromptError {
    /// Whether a re-prompt can recover from this error. Only these
    /// variants participate in loop-on-invalid; everything else ends
    /// the call no matter what the options say.
    pub(crate) fn recoverable(&self) -> bool {
        matches!(
            self,
            PromptError::Empty
                | PromptError::NotNumber
                | PromptError::OutOfRange
                | PromptError::Validation(_)
        )
    }
}

use crate::error::PromptError;

/// Mask character used when none is configured.
pub const DEFAULT_MASK: char = '*';

/// How typed characters are reflected back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Line-buffered input with normal terminal echo.
    #[default]
    Visible,
    /// Raw input, nothing echoed.
    Hidden,
    /// Raw input, one mask character echoed per typed character.
    Masked(char),
}

impl Visibility {
    /// Masked input with the conventional asterisk.
    pub fn masked() -> Self {
        Visibility::Masked(DEFAULT_MASK)
    }

    /// Raw visibilities read byte-at-a-time and need a real terminal.
    pub(crate) fn is_raw(self) -> bool {
        !matches!(self, Visibility::Visible)
    }
}

/// Extra validation applied to a submitted answer. The rejection
/// message is shown to the user when re-prompting.
pub type ValidateFn = dyn Fn(&str) -> Result<(), String> + Send + Sync;

/// Behaviour of a single `ask` or `select` call.
///
/// Immutable for the duration of one prompt invocation. The zero value
/// (`PromptOptions::default()`) accepts any line, including an empty
/// one, with normal echo.
#[derive(Default)]
pub struct PromptOptions {
    /// Substituted when the user answers with an empty line. A default
    /// is never run through the validator.
    pub default: Option<String>,

    /// Re-prompt on empty/invalid answers instead of returning the
    /// error to the caller. Cancellation and I/O failures end the call
    /// regardless.
    pub loop_on_invalid: bool,

    /// Reject an empty answer when no default applies.
    pub required: bool,

    /// Echo behaviour; `Hidden` and `Masked` require the input source
    /// to be backed by a terminal.
    pub visibility: Visibility,

    /// Extra validation of the submitted answer.
    pub validate: Option<Box<ValidateFn>>,
}

impl PromptOptions {
    /// Run the configured validator, if any.
    pub(crate) fn check(&self, line: &str) -> Result<(), PromptError> {
        match &self.validate {
            Some(validate) => validate(line).map_err(PromptError::Validation),
            None => Ok(()),
        }
    }
}

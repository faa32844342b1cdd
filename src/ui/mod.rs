//! Prompt entry points: ask a query, hand back one validated answer.

mod choice;

pub use choice::resolve_choice;

use std::io::Write;
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use colored::Colorize;
use tracing::debug;

use crate::error::PromptError;
use crate::options::{PromptOptions, Visibility};
use crate::read::raw::RawModeGuard;
use crate::read::{self, ReadOutcome};
use crate::session::{self, InterruptWatch};
use crate::source::{PromptSource, StdinSource};

type SharedSource = Arc<Mutex<Box<dyn PromptSource>>>;
type SharedSink = Arc<Mutex<Box<dyn Write + Send>>>;

/// An interactive prompt bound to an input source and an output sink.
///
/// The bindings are fixed at construction; prompts run one at a time,
/// and a call reads its answer to completion before the next begins.
///
/// ```no_run
/// use askline::{PromptOptions, Ui};
///
/// # async fn demo() -> Result<(), askline::PromptError> {
/// let ui = Ui::from_terminal();
/// let name = ui
///     .ask(
///         "What is your name?",
///         &PromptOptions {
///             default: Some("guest".to_string()),
///             ..Default::default()
///         },
///     )
///     .await?;
/// # let _ = name;
/// # Ok(())
/// # }
/// ```
pub struct Ui {
    source: SharedSource,
    sink: SharedSink,
}

impl Ui {
    /// Bind a prompt to an explicit source and sink.
    pub fn new<S, W>(source: S, sink: W) -> Self
    where
        S: PromptSource + 'static,
        W: Write + Send + 'static,
    {
        Ui {
            source: Arc::new(Mutex::new(Box::new(source))),
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    /// Prompt on standard input and standard output.
    pub fn from_terminal() -> Self {
        Ui::new(StdinSource::new(), std::io::stdout())
    }

    /// Show `query` and read one answer, applying the default,
    /// required and validation policy from `opts`.
    ///
    /// Returns [`PromptError::Interrupted`] as soon as the user
    /// cancels, no matter what the loop policy says.
    pub async fn ask(&self, query: &str, opts: &PromptOptions) -> Result<String, PromptError> {
        // Hidden and masked input need a terminal behind the source;
        // surface that configuration error before writing anything.
        let raw_fd = if opts.visibility.is_raw() {
            Some(self.terminal_fd()?)
        } else {
            None
        };

        // Armed before the first read so an early interrupt is not
        // lost; one watch serves every attempt of this call.
        let mut watch = InterruptWatch::arm()?;
        debug!(query, "asking");
        self.emit(&format!("{query}\n"))?;

        let result = self.ask_loop(opts, raw_fd, &mut watch).await;
        self.finish(result)
    }

    /// Ask for a value that must not be echoed back, such as a
    /// password. The answer is required and the source must be backed
    /// by a terminal.
    pub async fn ask_secret(&self, query: &str) -> Result<String, PromptError> {
        let opts = PromptOptions {
            required: true,
            visibility: Visibility::Hidden,
            ..Default::default()
        };
        self.ask(query, &opts).await
    }

    /// Show `query` and a numbered `list`, and read the 1-based number
    /// of the chosen entry.
    ///
    /// A configured default must match one of the entries exactly; a
    /// default that matches nothing is a [`PromptError::Configuration`]
    /// error raised before any interaction.
    pub async fn select(
        &self,
        query: &str,
        list: &[String],
        opts: &PromptOptions,
    ) -> Result<String, PromptError> {
        if list.is_empty() {
            return Err(PromptError::Configuration(
                "choice list must not be empty".to_string(),
            ));
        }
        let default_index = match &opts.default {
            Some(default) => {
                Some(list.iter().position(|item| item == default).ok_or_else(|| {
                    PromptError::Configuration(format!(
                        "default {default:?} is not in the choice list"
                    ))
                })?)
            }
            None => None,
        };
        let raw_fd = if opts.visibility.is_raw() {
            Some(self.terminal_fd()?)
        } else {
            None
        };

        let mut watch = InterruptWatch::arm()?;
        debug!(query, entries = list.len(), "selecting");

        let mut menu = format!("{query}\n\n");
        for (i, item) in list.iter().enumerate() {
            menu.push_str(&format!("{}. {}\n", i + 1, item));
        }
        menu.push('\n');
        self.emit(&menu)?;

        let result = self
            .select_loop(list, opts, default_index, raw_fd, &mut watch)
            .await;
        self.finish(result)
    }

    /// End the prompt line on every exit path, without letting a sink
    /// failure shadow the call's own error.
    fn finish(&self, result: Result<String, PromptError>) -> Result<String, PromptError> {
        match result {
            Ok(answer) => {
                self.emit("\n")?;
                Ok(answer)
            }
            Err(err) => {
                let _ = self.emit("\n");
                Err(err)
            }
        }
    }

    async fn ask_loop(
        &self,
        opts: &PromptOptions,
        raw_fd: Option<RawFd>,
        watch: &mut InterruptWatch,
    ) -> Result<String, PromptError> {
        loop {
            self.emit(&ask_instruction(opts))?;

            let line = match self.read_attempt(opts.visibility, raw_fd, watch).await {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof => return Err(PromptError::UnexpectedEof),
                ReadOutcome::Cancelled => return Err(PromptError::Interrupted),
                ReadOutcome::Failed(err) => return Err(err),
            };

            if line.is_empty() {
                // A default is substituted as-is, never validated.
                if let Some(default) = &opts.default {
                    return Ok(default.clone());
                }
                if opts.required {
                    self.reprompt_or_fail(opts, PromptError::Empty, ask_corrective)?;
                    continue;
                }
            }

            if let Err(err) = opts.check(&line) {
                self.reprompt_or_fail(opts, err, ask_corrective)?;
                continue;
            }

            return Ok(line);
        }
    }

    async fn select_loop(
        &self,
        list: &[String],
        opts: &PromptOptions,
        default_index: Option<usize>,
        raw_fd: Option<RawFd>,
        watch: &mut InterruptWatch,
    ) -> Result<String, PromptError> {
        loop {
            self.emit(&select_instruction(default_index))?;

            let line = match self.read_attempt(opts.visibility, raw_fd, watch).await {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof => return Err(PromptError::UnexpectedEof),
                ReadOutcome::Cancelled => return Err(PromptError::Interrupted),
                ReadOutcome::Failed(err) => return Err(err),
            };

            match resolve_choice(list, &line, default_index) {
                Ok(item) => return Ok(item),
                Err(err) => {
                    self.reprompt_or_fail(opts, err, |err| select_corrective(err, list.len()))?;
                }
            }
        }
    }

    /// Run one read attempt, switching the terminal to raw mode around
    /// it when the visibility calls for that.
    ///
    /// The mode guard lives on this task rather than in the blocking
    /// read, so an abandoned (cancelled) read cannot delay restoring
    /// the terminal attributes.
    async fn read_attempt(
        &self,
        visibility: Visibility,
        raw_fd: Option<RawFd>,
        watch: &mut InterruptWatch,
    ) -> ReadOutcome {
        let mut guard = match raw_fd {
            Some(fd) => match RawModeGuard::acquire(fd) {
                Ok(guard) => Some(guard),
                Err(err) => return ReadOutcome::Failed(err),
            },
            None => None,
        };

        let cancelled = Arc::new(AtomicBool::new(false));
        let source = Arc::clone(&self.source);
        let sink = Arc::clone(&self.sink);
        let wind_down = Arc::clone(&cancelled);

        let outcome = session::race(watch.notified(), move || {
            let mut source = lock(&source);
            match visibility {
                Visibility::Visible => read::visible_line(source.as_mut()),
                Visibility::Hidden | Visibility::Masked(_) => {
                    read::raw_line(source.as_mut(), &sink, visibility, &wind_down)
                }
            }
        })
        .await;

        if matches!(outcome, ReadOutcome::Cancelled) {
            // Tell a still-blocked reader to stop echoing and consuming
            // once its pending read returns.
            cancelled.store(true, Ordering::SeqCst);
        }
        if let Some(guard) = guard.as_mut() {
            guard.release();
        }
        outcome
    }

    fn reprompt_or_fail(
        &self,
        opts: &PromptOptions,
        err: PromptError,
        corrective: impl Fn(&PromptError) -> String,
    ) -> Result<(), PromptError> {
        if opts.loop_on_invalid && err.recoverable() {
            debug!(%err, "re-prompting");
            let message = corrective(&err);
            self.emit(&format!("{}\n\n", message.as_str().yellow()))?;
            Ok(())
        } else {
            Err(err)
        }
    }

    fn terminal_fd(&self) -> Result<RawFd, PromptError> {
        lock(&self.source)
            .terminal_fd()
            .ok_or(PromptError::NotATerminal)
    }

    fn emit(&self, text: &str) -> Result<(), PromptError> {
        let mut sink = lock(&self.sink);
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

impl Default for Ui {
    fn default() -> Self {
        Ui::from_terminal()
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<Box<T>>) -> MutexGuard<'_, Box<T>> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn ask_instruction(opts: &PromptOptions) -> String {
    match &opts.default {
        Some(default) => format!("Enter a value (Default is {default}): "),
        None => "Enter a value: ".to_string(),
    }
}

fn select_instruction(default_index: Option<usize>) -> String {
    match default_index {
        Some(index) => format!("Enter a number (Default is {}): ", index + 1),
        None => "Enter a number: ".to_string(),
    }
}

fn ask_corrective(err: &PromptError) -> String {
    match err {
        PromptError::Empty => "Input must not be empty.".to_string(),
        PromptError::Validation(detail) => format!("Failed to validate the input: {detail}"),
        other => other.to_string(),
    }
}

fn select_corrective(err: &PromptError, entries: usize) -> String {
    match err {
        PromptError::Empty => "Input must not be empty. Answer with a number.".to_string(),
        PromptError::NotNumber => "Input must be a number.".to_string(),
        PromptError::OutOfRange => format!("Input must be a number between 1 and {entries}."),
        other => other.to_string(),
    }
}

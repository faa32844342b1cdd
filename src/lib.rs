//! askline is a small library for interacting with user input on the
//! command line: show a query, read one line back, with optional
//! default substitution, required-ness, custom validation, and
//! hidden or masked (password-style) input.
//!
//! ```no_run
//! use askline::{PromptOptions, Ui};
//!
//! # async fn demo() -> Result<(), askline::PromptError> {
//! let ui = Ui::from_terminal();
//!
//! let name = ui
//!     .ask(
//!         "What is your name?",
//!         &PromptOptions {
//!             default: Some("guest".to_string()),
//!             required: true,
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//!
//! let lang = ui
//!     .select(
//!         "Which language do you prefer to use?",
//!         &["go".to_string(), "rust".to_string()],
//!         &PromptOptions {
//!             loop_on_invalid: true,
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! # let _ = (name, lang);
//! # Ok(())
//! # }
//! ```
//!
//! Reads race the process's interrupt signal: Ctrl-C cancels the
//! in-flight prompt and the call returns
//! [`PromptError::Interrupted`]. Hidden and masked modes switch the
//! terminal into raw mode for the duration of one read and always
//! restore it, including on cancellation.

pub mod error;
pub mod options;
pub mod read;
pub mod source;
pub mod ui;

mod session;

// Re-export commonly used items
pub use error::PromptError;
pub use options::{PromptOptions, ValidateFn, Visibility, DEFAULT_MASK};
pub use read::ReadOutcome;
pub use source::{PromptSource, StdinSource};
pub use ui::{resolve_choice, Ui};

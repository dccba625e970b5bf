//! Input validator state machine.
//!
//! Turns one line of keyboard input into a [`PasswordRequest`], a help turn,
//! or the quit signal. Every check is its own [`ValidatorState`] and any
//! rejection returns to [`ValidatorState::Prompt`]: a bad field is never fixed
//! up or retried on its own, the whole cycle restarts.
//!
//! ```text
//! Prompt -> ReadLine -> HelpCheck -> QuitCheck -> FormatCheck -> Parse
//!    ^                     |            |             |            |
//!    |                   Help          Quit           |            v
//!    |                                             Rejected <- TypeCheck
//!    +-------------------------------------------- Rejected <- RangeCheck -> Valid
//! ```
//!
//! The validator performs no I/O. It returns [`ValidatorAction`]s that the
//! session executes against the terminal and the network.

use passgen_proto::{PasswordKind, PasswordRequest};
use thiserror::Error;

/// Longest accepted line, excluding the line terminator.
pub const MAX_INPUT_CHARS: usize = 4;

/// Command that requests the help text.
pub const HELP_TAG: char = 'h';

/// Command that ends the session.
pub const QUIT_TOKEN: &str = "q";

/// Menu shown at the start of every cycle.
pub const PROMPT: &str = "\
Enter a password type and length (for example: n 8)
  n  numeric      a  alphabetic    m  mixed
  s  secure       u  unambiguous
  h  help         q  quit
> ";

/// Text shown for the help command.
pub const HELP: &str = "\
Commands:
  <type> <length>  generate a password, for example: s 12
  h                show this help
  q                quit

Types:
  n  numeric      digits 0-9
  a  alphabetic   lowercase letters a-z
  m  mixed        lowercase letters and digits
  s  secure       upper and lowercase letters, digits and !@#$%^&*()_+-=,./<>?
  u  unambiguous  secure without the look-alikes 0 O o 1 I i l 2 Z z 5 S s 8 B

Length must be between 6 and 32.
";

/// Reasons a line is rejected.
///
/// All of them are local: the user is told and prompted again, nothing is
/// sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// More than [`MAX_INPUT_CHARS`] characters before the terminator
    #[error("input too long: at most {max} characters", max = MAX_INPUT_CHARS)]
    LineTooLong,

    /// No space between type and length
    #[error("missing space between type and length")]
    MissingSeparator,

    /// Not of the form `<type> <length>`
    #[error("invalid input: expected <type> <length>")]
    InvalidInput,

    /// Type is not one of the generation tags
    #[error("unknown password type '{0}'")]
    UnknownType(char),

    /// Length outside the accepted range
    #[error(
        "length {0} out of range: must be between {min} and {max}",
        min = PasswordRequest::MIN_LENGTH,
        max = PasswordRequest::MAX_LENGTH
    )]
    LengthOutOfRange(i64),
}

/// One line read from the terminal, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    text: String,
    truncated: bool,
}

impl RawLine {
    /// Strip the line terminator (`\n` or `\r\n`) and record whether the
    /// line exceeds [`MAX_INPUT_CHARS`].
    ///
    /// Only the terminator is removed; other surrounding whitespace is part
    /// of the input.
    pub fn new(line: &str) -> Self {
        let text = line.strip_suffix('\n').unwrap_or(line);
        let text = text.strip_suffix('\r').unwrap_or(text);

        Self { text: text.to_string(), truncated: text.chars().count() > MAX_INPUT_CHARS }
    }

    /// Build a line from the first bytes read off the terminal.
    ///
    /// `overflowed` is set when the rest of the line was discarded unread;
    /// such a line is always truncated, whatever the kept prefix holds.
    pub fn from_prefix(bytes: &[u8], overflowed: bool) -> Self {
        let mut line = Self::new(&String::from_utf8_lossy(bytes));
        line.truncated |= overflowed;
        line
    }

    /// Line contents without the terminator.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the line was longer than the input limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }
}

/// Input fed to the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorEvent {
    /// A full line was read
    Line(RawLine),
    /// The input stream is closed
    EndOfInput,
}

/// Actions produced by the validator for the session to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorAction {
    /// Display [`PROMPT`]
    ShowPrompt,
    /// Display [`HELP`]
    ShowHelp,
    /// Report a rejected line
    ShowError(InputError),
    /// Send a validated request
    Submit(PasswordRequest),
    /// End the session
    Quit,
}

/// States of one validation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorState {
    /// Show the menu
    Prompt,
    /// Waiting for a line
    ReadLine,
    /// Help is checked before the length limit
    HelpCheck(RawLine),
    /// Exact match on the quit token
    QuitCheck(RawLine),
    /// Line must contain a space
    FormatCheck(RawLine),
    /// Split into tag and integer
    Parse(RawLine),
    /// Tag must be a generation tag
    TypeCheck {
        /// Tag character as typed
        tag: char,
        /// Length as typed, not yet range-checked
        length: i64,
    },
    /// Length must be within bounds
    RangeCheck {
        /// Resolved password kind
        kind: PasswordKind,
        /// Length as typed, not yet range-checked
        length: i64,
    },
    /// A check failed; the cycle restarts
    Rejected(InputError),
    /// Help was shown; the cycle restarts
    Help,
    /// Terminal: the session ends
    Quit,
    /// Terminal: a request is ready
    Valid(PasswordRequest),
}

impl ValidatorState {
    /// Perform one transition.
    ///
    /// Returns the next state and the action emitted on entering it, if any.
    /// [`Self::ReadLine`] and the terminal states do not move on their own.
    pub fn advance(self) -> (Self, Option<ValidatorAction>) {
        match self {
            Self::Prompt => (Self::ReadLine, Some(ValidatorAction::ShowPrompt)),
            Self::ReadLine | Self::Quit | Self::Valid(_) => (self, None),
            Self::HelpCheck(line) => {
                if line.first_char() == Some(HELP_TAG) {
                    (Self::Help, Some(ValidatorAction::ShowHelp))
                } else if line.is_truncated() {
                    Self::reject(InputError::LineTooLong)
                } else {
                    (Self::QuitCheck(line), None)
                }
            },
            Self::QuitCheck(line) => {
                if line.text() == QUIT_TOKEN {
                    (Self::Quit, Some(ValidatorAction::Quit))
                } else {
                    (Self::FormatCheck(line), None)
                }
            },
            Self::FormatCheck(line) => {
                if line.text().contains(' ') {
                    (Self::Parse(line), None)
                } else {
                    Self::reject(InputError::MissingSeparator)
                }
            },
            Self::Parse(line) => match parse_command(line.text()) {
                Some((tag, length)) => (Self::TypeCheck { tag, length }, None),
                None => Self::reject(InputError::InvalidInput),
            },
            Self::TypeCheck { tag, length } => {
                let kind = u8::try_from(tag).ok().and_then(PasswordKind::from_tag);
                match kind {
                    Some(kind) => (Self::RangeCheck { kind, length }, None),
                    None => Self::reject(InputError::UnknownType(tag)),
                }
            },
            Self::RangeCheck { kind, length } => match u32::try_from(length) {
                Ok(length) if PasswordRequest::is_valid_length(length) => {
                    let request = PasswordRequest::new(kind, length);
                    (Self::Valid(request), Some(ValidatorAction::Submit(request)))
                },
                _ => Self::reject(InputError::LengthOutOfRange(length)),
            },
            Self::Rejected(err) => (Self::Prompt, Some(ValidatorAction::ShowError(err))),
            Self::Help => (Self::Prompt, None),
        }
    }

    /// Whether the state needs a line before it can advance.
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::ReadLine)
    }

    /// Whether the cycle has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Quit | Self::Valid(_))
    }

    fn reject(err: InputError) -> (Self, Option<ValidatorAction>) {
        (Self::Rejected(err), None)
    }
}

/// Exactly two whitespace-separated tokens: a single character and an
/// integer.
fn parse_command(text: &str) -> Option<(char, i64)> {
    let mut tokens = text.split_whitespace();
    let (tag, length) = (tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }

    let mut chars = tag.chars();
    let tag = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    Some((tag, length.parse().ok()?))
}

/// Input validator.
///
/// Call [`Self::start`] at the beginning of every turn, then feed lines with
/// [`Self::handle`] until a [`ValidatorAction::Submit`] or
/// [`ValidatorAction::Quit`] comes back.
#[derive(Debug, Clone)]
pub struct Validator {
    state: ValidatorState,
}

impl Validator {
    /// Create a validator that has not shown its prompt yet.
    pub fn new() -> Self {
        Self { state: ValidatorState::Prompt }
    }

    /// Begin a new cycle.
    pub fn start(&mut self) -> Vec<ValidatorAction> {
        self.state = ValidatorState::Prompt;
        self.run()
    }

    /// Process an input event and return actions.
    ///
    /// Lines arriving while the validator is not waiting for one are ignored.
    pub fn handle(&mut self, event: ValidatorEvent) -> Vec<ValidatorAction> {
        match event {
            ValidatorEvent::EndOfInput => {
                tracing::debug!("end of input, quitting");
                self.state = ValidatorState::Quit;
                vec![ValidatorAction::Quit]
            },
            ValidatorEvent::Line(line) => {
                if !self.state.is_waiting() {
                    tracing::debug!(state = ?self.state, "line ignored, not waiting for input");
                    return Vec::new();
                }
                self.state = ValidatorState::HelpCheck(line);
                self.run()
            },
        }
    }

    /// Current state.
    pub fn state(&self) -> &ValidatorState {
        &self.state
    }

    /// Advance until input is needed or the cycle has ended.
    fn run(&mut self) -> Vec<ValidatorAction> {
        let mut actions = Vec::new();

        while !self.state.is_waiting() && !self.state.is_terminal() {
            let state = std::mem::replace(&mut self.state, ValidatorState::ReadLine);
            let (next, action) = state.advance();
            tracing::trace!(state = ?next, "validator transition");
            self.state = next;
            actions.extend(action);
        }

        actions
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

use std::fmt;

/// The error type for tokenizing and parsing a command line.
///
/// It is boxed to keep `Result<Command>` small.
pub struct Error(Box<Inner>);

#[derive(Debug)]
struct Inner {
    kind: ErrorKind,
    /// The offending input, if any.
    input: Option<String>,
    /// Byte offset of the offending input in the raw line. Only set by the tokenizer.
    offset: Option<usize>,
    /// Description of the related argument, eg. `<KEY>` or `--is-true`.
    arg_desc: Option<&'static str>,
    /// The command being parsed.
    command: Option<&'static str>,
    /// A similar known name for unknown inputs.
    suggestion: Option<&'static str>,
    /// Rendered help text attached by the parser.
    help: Option<String>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("trailing escape character")]
    DanglingEscape,

    #[error("missing command")]
    MissingCommand,
    #[error("unknown command")]
    UnknownCommand,
    #[error("unknown argument")]
    UnknownArgument,
    #[error("unexpected argument")]
    ExtraArgument,
    #[error("missing required argument")]
    MissingRequiredArgument,
    #[error("duplicated argument")]
    DuplicatedArgument,
    #[error("unexpected value for flag")]
    UnexpectedInlineValue,

    #[error("help requested")]
    Help,
}

impl ErrorKind {
    /// Whether the line itself is malformed, as opposed to a well-quoted line
    /// that does not form a valid command.
    #[must_use]
    pub fn is_quoting(self) -> bool {
        matches!(self, Self::UnterminatedQuote | Self::DanglingEscape)
    }
}

impl From<ErrorKind> for Error {
    #[cold]
    fn from(kind: ErrorKind) -> Self {
        Self(Box::new(Inner {
            kind,
            input: None,
            offset: None,
            arg_desc: None,
            command: None,
            suggestion: None,
            help: None,
        }))
    }
}

impl ErrorKind {
    #[cold]
    pub(crate) fn with_input(self, input: impl Into<String>) -> Error {
        Error::from(self).with_input(input)
    }

    #[cold]
    pub(crate) fn with_arg_desc(self, desc: &'static str) -> Error {
        Error::from(self).with_arg_desc(desc)
    }
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.0.kind
    }

    /// The offending token or character, if any.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.0.input.as_deref()
    }

    /// The name of the command being parsed when the error occurred.
    #[must_use]
    pub fn command(&self) -> Option<&'static str> {
        self.0.command
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        self.0.suggestion
    }

    /// Take the rendered help out of an [`ErrorKind::Help`] error.
    ///
    /// Return `Err(self)` for other kinds, or if help is not rendered.
    pub fn try_into_help(mut self) -> Result<String, Self> {
        match self.0.help.take() {
            Some(help) if self.0.kind == ErrorKind::Help => Ok(help),
            help => {
                self.0.help = help;
                Err(self)
            }
        }
    }

    /// The rendered help attached to this error, if any.
    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.0.help.as_deref()
    }

    pub(crate) fn with_input(mut self, input: impl Into<String>) -> Self {
        self.0.input = Some(input.into());
        self
    }

    pub(crate) fn with_offset(mut self, offset: usize) -> Self {
        self.0.offset = Some(offset);
        self
    }

    pub(crate) fn with_arg_desc(mut self, desc: &'static str) -> Self {
        self.0.arg_desc = Some(desc);
        self
    }

    pub(crate) fn with_command(mut self, name: &'static str) -> Self {
        self.0.command.get_or_insert(name);
        self
    }

    pub(crate) fn with_suggestion(mut self, suggestion: Option<&'static str>) -> Self {
        self.0.suggestion = suggestion;
        self
    }

    #[cfg(feature = "help")]
    pub(crate) fn with_help(mut self, help: String) -> Self {
        self.0.help = Some(help);
        self
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Inner { kind, input, offset, arg_desc, command, suggestion, help: _ } = &*self.0;
        let input = input.as_deref().unwrap_or("");
        let arg = arg_desc.unwrap_or("");

        match kind {
            ErrorKind::UnterminatedQuote => {
                write!(f, "unterminated quote {input}")?;
                if let Some(offset) = offset {
                    write!(f, " starting at offset {offset}")?;
                }
            }
            ErrorKind::DanglingEscape => f.write_str("trailing backslash at the end of line")?,
            ErrorKind::MissingCommand => f.write_str("a command is required but none was given")?,
            ErrorKind::UnknownCommand => write!(f, "unknown command '{input}'")?,
            ErrorKind::UnknownArgument => write!(f, "unknown argument '{input}'")?,
            ErrorKind::ExtraArgument => write!(f, "unexpected argument '{input}'")?,
            ErrorKind::MissingRequiredArgument => {
                write!(f, "the argument '{arg}' is required but not provided")?
            }
            ErrorKind::DuplicatedArgument => {
                write!(f, "the argument '{arg}' cannot be used multiple times")?
            }
            ErrorKind::UnexpectedInlineValue => {
                write!(f, "unexpected value '{input}' for '{arg}' which takes no value")?
            }
            ErrorKind::Help => f.write_str("help requested")?,
        }

        if let Some(cmd) = command {
            write!(f, " (while parsing '{cmd}')")?;
        }
        if let Some(similar) = suggestion {
            write!(f, "\n\n  tip: a similar name exists: '{similar}'")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

#[test]
fn error_size() {
    assert_eq!(size_of::<Error>(), size_of::<usize>());
}

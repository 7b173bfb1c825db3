use std::fmt;

use crate::refl::{ArgInfo, CommandInfo};
use crate::runtime::{self, Matches, Tokens};
use crate::{Result, lex};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Look up the value stored under a key.
    Get { key: String },
    /// Store a value under a key.
    Set { key: String, value: String, is_true: bool },
    /// Show the list of commands.
    Help,
}

/// Descriptions of all known commands, in the order shown in help.
pub static COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "get",
        about: "Print the value stored under a key.",
        args: &[ArgInfo::required("key", "<KEY>", "The key to look up.")],
        build: build_get,
    },
    CommandInfo {
        name: "set",
        about: "Store a value under a key.",
        args: &[
            ArgInfo::required("key", "<KEY>", "The key to store the value under."),
            ArgInfo::required("value", "<VALUE>", "The value to store."),
            ArgInfo::flag("is-true", "--is-true", "Mark the stored entry as true."),
        ],
        build: build_set,
    },
    CommandInfo {
        name: "help",
        about: "Print the list of commands.",
        args: &[],
        build: build_help,
    },
];

fn build_get(m: &mut Matches) -> Result<Command> {
    Ok(Command::Get { key: m.take_required(0)? })
}

fn build_set(m: &mut Matches) -> Result<Command> {
    Ok(Command::Set {
        key: m.take_required(0)?,
        value: m.take_required(1)?,
        is_true: m.take_flag(2),
    })
}

fn build_help(_: &mut Matches) -> Result<Command> {
    Ok(Command::Help)
}

impl Command {
    /// Parse a raw line: split it into tokens, then parse the tokens.
    pub fn parse_line(line: &str) -> Result<Self> {
        let tokens = lex::split(line)?;
        Self::parse_tokens(Tokens::new(&tokens))
    }

    /// Parse an already tokenized command line.
    ///
    /// The first token is the command name.
    pub fn parse_tokens(tokens: &Tokens) -> Result<Self> {
        runtime::parse_tokens(COMMANDS, tokens)
    }

    pub fn try_parse_from<I, T>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens = iter.into_iter().map(Into::into).collect::<Vec<String>>();
        Self::parse_tokens(Tokens::new(&tokens))
    }

    /// The name of this variant, as typed on the command line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    #[must_use]
    pub fn info(&self) -> &'static CommandInfo {
        let idx = match self {
            Self::Get { .. } => 0,
            Self::Set { .. } => 1,
            Self::Help => 2,
        };
        &COMMANDS[idx]
    }

    /// Render back into canonical tokens which parse into an equal command.
    ///
    /// Flags come right after the name. A `--` is inserted before positionals
    /// if any of them would otherwise be taken as a flag.
    #[must_use]
    pub fn to_tokens(&self) -> Vec<String> {
        let mut out = vec![self.name().to_owned()];
        let positionals: Vec<&str> = match self {
            Self::Get { key } => vec![key.as_str()],
            Self::Set { key, value, is_true } => {
                if *is_true {
                    out.push("--is-true".to_owned());
                }
                vec![key.as_str(), value.as_str()]
            }
            Self::Help => Vec::new(),
        };

        if positionals.iter().any(|s| s.starts_with("--")) {
            out.push("--".to_owned());
        }
        out.extend(positionals.into_iter().map(str::to_owned));
        out
    }
}

/// Formats as a line that [`Command::parse_line`] accepts.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&lex::join(self.to_tokens()))
    }
}

impl std::str::FromStr for Command {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_line(s)
    }
}

#[test]
fn table_matches_variants() {
    let cmds = [
        Command::Get { key: String::new() },
        Command::Set { key: String::new(), value: String::new(), is_true: false },
        Command::Help,
    ];
    assert_eq!(cmds.len(), COMMANDS.len());
    for (cmd, info) in cmds.iter().zip(COMMANDS) {
        assert_eq!(cmd.name(), info.name);
    }
}

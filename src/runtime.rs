use std::ops::Deref;

use ref_cast::RefCast;

use crate::command::Command;
use crate::error::ErrorKind;
use crate::refl::CommandInfo;
use crate::{Result, suggest};

/// A borrowed token sequence of one command line.
///
/// This is a transparent wrapper of `[String]`, so it can be borrowed from
/// any slice or `Vec` of tokens without copying.
#[derive(Debug, PartialEq, Eq, Hash, RefCast)]
#[repr(transparent)]
pub struct Tokens([String]);

impl Tokens {
    pub fn new(tokens: &[String]) -> &Self {
        Self::ref_cast(tokens)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Split out the command name.
    #[must_use]
    pub fn split_command(&self) -> Option<(&str, &[String])> {
        let (first, rest) = self.0.split_first()?;
        Some((first, rest))
    }
}

impl Deref for Tokens {
    type Target = [String];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> From<&'a [String]> for &'a Tokens {
    fn from(tokens: &'a [String]) -> Self {
        Tokens::new(tokens)
    }
}

#[derive(Debug, PartialEq)]
enum Arg<'a> {
    /// "--"
    DashDash,
    /// Arg name without leading "--", and an inlined value (excluding `=`).
    ///
    /// - "--long" => ("long", None)
    /// - "--long=value" => ("long", Some("value"))
    Named(&'a str, Option<&'a str>),
    /// Everything else, including "-" and "-s".
    Unnamed(&'a str),
}

fn classify(tok: &str) -> Arg<'_> {
    if tok == "--" {
        return Arg::DashDash;
    }
    match tok.strip_prefix("--") {
        Some(rest) => match rest.split_once('=') {
            Some((name, value)) => Arg::Named(name, Some(value)),
            None => Arg::Named(rest, None),
        },
        None => Arg::Unnamed(tok),
    }
}

/// Values collected for each argument of a command, indexed like `CommandInfo::args`.
///
/// A present flag is stored as an empty string.
pub(crate) struct Matches {
    info: &'static CommandInfo,
    values: Vec<Option<String>>,
}

impl Matches {
    fn new(info: &'static CommandInfo) -> Self {
        Self { info, values: vec![None; info.args.len()] }
    }

    fn feed_named(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        let Some((idx, arg)) = self.info.find_flag(name) else {
            #[cfg(feature = "help")]
            if name == "help" {
                let help = crate::help::render_command_help(self.info);
                return Err(crate::Error::from(ErrorKind::Help).with_help(help));
            }
            let input = format!("--{name}");
            let similar = suggest::closest(self.info.flags().map(|(_, a)| a.description), &input);
            return Err(ErrorKind::UnknownArgument.with_input(input).with_suggestion(similar));
        };

        if let Some(v) = value {
            return Err(
                ErrorKind::UnexpectedInlineValue.with_input(v).with_arg_desc(arg.description)
            );
        }
        let place = &mut self.values[idx];
        if place.is_some() {
            return Err(ErrorKind::DuplicatedArgument.with_arg_desc(arg.description));
        }
        *place = Some(String::new());
        Ok(())
    }

    /// `idx` is the index among positional arguments.
    fn feed_unnamed(&mut self, arg: &str, idx: usize) -> Result<()> {
        let Some((place_idx, _)) = self.info.positionals().nth(idx) else {
            return Err(ErrorKind::ExtraArgument.with_input(arg));
        };
        self.values[place_idx] = Some(arg.to_owned());
        Ok(())
    }

    pub(crate) fn take_required(&mut self, idx: usize) -> Result<String> {
        self.values[idx].take().ok_or_else(|| {
            ErrorKind::MissingRequiredArgument.with_arg_desc(self.info.args[idx].description)
        })
    }

    pub(crate) fn take_flag(&mut self, idx: usize) -> bool {
        self.values[idx].take().is_some()
    }
}

/// Look up the command named by the first token, then parse the rest.
pub(crate) fn parse_tokens(commands: &'static [CommandInfo], tokens: &Tokens) -> Result<Command> {
    let Some((name, rest)) = tokens.split_command() else {
        return Err(ErrorKind::MissingCommand.into());
    };
    let Some(info) = commands.iter().find(|info| info.name == name) else {
        let similar = suggest::closest(commands.iter().map(|info| info.name), name);
        return Err(ErrorKind::UnknownCommand.with_input(name).with_suggestion(similar));
    };

    let cmd = try_parse_command(info, rest).map_err(|err| err.with_command(info.name))?;
    tracing::debug!(command = ?cmd, "parsed command");
    Ok(cmd)
}

/// The outlined main logic of parser.
#[inline(never)]
fn try_parse_command(info: &'static CommandInfo, args: &[String]) -> Result<Command> {
    let mut matches = Matches::new(info);
    let mut unnamed_idx = 0usize;
    let mut iter = args.iter();

    while let Some(tok) = iter.next() {
        match classify(tok) {
            Arg::Named(name, value) => matches.feed_named(name, value)?,
            Arg::Unnamed(arg) => {
                matches.feed_unnamed(arg, unnamed_idx)?;
                unnamed_idx += 1;
            }
            Arg::DashDash => {
                for arg in iter.by_ref() {
                    matches.feed_unnamed(arg, unnamed_idx)?;
                    unnamed_idx += 1;
                }
            }
        }
    }

    (info.build)(&mut matches)
}

#[test]
fn classify_tokens() {
    assert_eq!(classify("--"), Arg::DashDash);
    assert_eq!(classify("--is-true"), Arg::Named("is-true", None));
    assert_eq!(classify("--is-true="), Arg::Named("is-true", Some("")));
    assert_eq!(classify("--k=a=b"), Arg::Named("k", Some("a=b")));
    assert_eq!(classify("-"), Arg::Unnamed("-"));
    assert_eq!(classify("-x"), Arg::Unnamed("-x"));
    assert_eq!(classify("---"), Arg::Named("-", None));
    assert_eq!(classify("key"), Arg::Unnamed("key"));
}

#[test]
fn tokens_borrow() {
    let owned = vec!["get".to_owned(), "foo".to_owned()];
    let tokens: &Tokens = owned.as_slice().into();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.split_command(), Some(("get", &owned[1..])));
    assert_eq!(Tokens::new(&[]).split_command(), None);
}

//! *Tokenize, parse and dispatch line-oriented commands.*
//!
//! A line goes through four stages:
//!
//! 1. [`lex::split`] breaks it into shell-like tokens.
//! 2. [`Command::parse_tokens`] matches the tokens against the static
//!    [`COMMANDS`] table and builds a typed [`Command`].
//! 3. [`dispatch`] calls the [`Handler`] method bound to the variant.
//! 4. [`Repl`] repeats the above for every line of an input stream until it
//!    ends.
//!
//! ```
//! use cmdloop::{Command, Handler, LoopConfig, Reply, Repl};
//!
//! struct Echo;
//!
//! impl Handler for Echo {
//!     type Error = std::convert::Infallible;
//!
//!     fn get(&mut self, key: &str) -> Result<Reply, Self::Error> {
//!         Ok(Reply::Text(format!("get {key}")))
//!     }
//!     fn set(&mut self, key: &str, value: &str, is_true: bool) -> Result<Reply, Self::Error> {
//!         Ok(Reply::Text(format!("set {key}={value} ({is_true})")))
//!     }
//!     fn help(&mut self) -> Result<Reply, Self::Error> {
//!         Ok(Reply::Silent)
//!     }
//! }
//!
//! assert_eq!(
//!     "set a b --is-true".parse::<Command>().unwrap(),
//!     Command::Set { key: "a".into(), value: "b".into(), is_true: true },
//! );
//!
//! let mut out = Vec::new();
//! let mut repl = Repl::new(LoopConfig::new(""), Echo);
//! repl.run(&b"get foo\nset a 'b c'\n"[..], &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "get foo\nset a=b c (false)\n");
//! ```
#![forbid(unsafe_code)]

mod command;
mod dispatch;
mod error;
mod refl;
mod repl;
mod runtime;
mod suggest;

pub mod lex;

#[cfg(feature = "help")]
mod help;

pub use crate::command::{COMMANDS, Command};
pub use crate::dispatch::{Handler, Reply, dispatch};
pub use crate::error::{Error, ErrorKind};
pub use crate::refl::{ArgInfo, ArgKind, CommandInfo};
pub use crate::repl::{LoopConfig, LoopState, LoopStats, Repl};
pub use crate::runtime::Tokens;

#[cfg(feature = "help")]
pub use crate::help::{render_command_help, render_help};

pub type Result<T, E = Error> = std::result::Result<T, E>;

mod store;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cmdloop::{Command, LoopConfig, Reply, Repl, dispatch};
use store::KvStore;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// An in-memory key/value shell.
///
/// Without COMMAND, read commands from stdin until it ends.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Prompt printed before each line in interactive mode.
    #[arg(long, env = "CMDLOOP_PROMPT", default_value = concat!(env!("CARGO_PKG_NAME"), "> "))]
    prompt: String,

    /// Print each parsed command before running it.
    #[arg(long)]
    echo: bool,

    /// Do not print command help after a parse error.
    #[arg(long)]
    no_help_on_error: bool,

    /// Report blank lines as errors instead of skipping them.
    #[arg(long)]
    keep_blank_lines: bool,

    /// Format of diagnostics written to stderr. Level is taken from RUST_LOG.
    #[arg(long, env = "CMDLOOP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Run a single command and exit, eg. `-- set key value --is-true`.
    #[arg(last = true)]
    command: Vec<String>,
}

impl Cli {
    fn loop_config(&self) -> LoopConfig {
        LoopConfig::new(self.prompt.clone())
            .with_echo(self.echo)
            .with_help_on_error(!self.no_help_on_error)
            .with_skip_blank_lines(!self.keep_blank_lines)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer().with_writer(io::stderr)).init()
        }
        LogFormat::Json => {
            registry.with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr)).init()
        }
    }
}

fn run_once(tokens: Vec<String>, mut output: impl Write) -> Result<()> {
    let cmd = match Command::try_parse_from(tokens) {
        Ok(cmd) => cmd,
        Err(err) => match err.try_into_help() {
            Ok(help) => {
                output.write_all(help.as_bytes())?;
                return Ok(());
            }
            Err(err) => return Err(err).context("invalid command"),
        },
    };

    let mut store = KvStore::default();
    match dispatch(&mut store, cmd)? {
        Reply::Text(text) => writeln!(output, "{text}")?,
        Reply::Silent | Reply::Exit => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);
    tracing::debug!(?cli, "starting");

    if !cli.command.is_empty() {
        return run_once(cli.command, io::stdout().lock());
    }

    let mut repl = Repl::new(cli.loop_config(), KvStore::default());
    let stats = repl.run(io::stdin().lock(), io::stdout().lock()).context("I/O failure")?;
    tracing::debug!(entries = repl.handler().len(), ?stats, "exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use store::StoreError;

    fn one_shot(tokens: &[&str]) -> (Result<()>, String) {
        let mut out = Vec::new();
        let ret = run_once(tokens.iter().map(|s| s.to_string()).collect(), &mut out);
        (ret, String::from_utf8(out).unwrap())
    }

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn trailing_command_and_flags() {
        let cli = Cli::try_parse_from([
            "cmdloop-kv",
            "--prompt",
            "> ",
            "--echo",
            "--no-help-on-error",
            "--keep-blank-lines",
            "--log-format",
            "json",
            "--",
            "set",
            "k",
            "--is-true",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.command, ["set", "k", "--is-true"]);
        assert_eq!(
            cli.loop_config(),
            LoopConfig {
                prompt: "> ".into(),
                echo: true,
                help_on_error: false,
                skip_blank_lines: false,
            }
        );
    }

    #[test]
    fn one_shot_success() {
        let (ret, out) = one_shot(&["set", "k", "v"]);
        ret.unwrap();
        assert_eq!(out, "");

        let (ret, out) = one_shot(&["help"]);
        ret.unwrap();
        assert_eq!(out, cmdloop::render_help());
    }

    #[test]
    fn one_shot_parse_error() {
        let (ret, out) = one_shot(&["set", "k"]);
        let err = ret.unwrap_err();
        assert_eq!(err.to_string(), "invalid command");
        assert_eq!(
            err.downcast_ref::<cmdloop::Error>().map(cmdloop::Error::kind),
            Some(cmdloop::ErrorKind::MissingRequiredArgument)
        );
        assert_eq!(out, "");
    }

    #[test]
    fn one_shot_handler_error() {
        let (ret, out) = one_shot(&["get", "k"]);
        let err = ret.unwrap_err();
        assert_eq!(err.downcast_ref::<StoreError>(), Some(&StoreError::KeyNotFound("k".into())));
        assert_eq!(out, "");
    }

    #[test]
    fn one_shot_help() {
        let (ret, out) = one_shot(&["set", "--help"]);
        ret.unwrap();
        assert_eq!(out, cmdloop::render_command_help(&cmdloop::COMMANDS[1]));
    }
}

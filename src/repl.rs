//! The interactive read-parse-dispatch loop.
use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::command::Command;
use crate::dispatch::{Handler, Reply, dispatch};
use crate::error::{Error, ErrorKind};

/// Configuration of a [`Repl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Written before reading each line. May be empty.
    pub prompt: String,
    /// Write the debug form of each parsed command before dispatching it.
    pub echo: bool,
    /// Write the command help after a parse error.
    pub help_on_error: bool,
    /// Silently skip lines without any token, instead of reporting a missing command.
    pub skip_blank_lines: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            prompt: concat!(env!("CARGO_PKG_NAME"), "> ").to_owned(),
            echo: false,
            help_on_error: true,
            skip_blank_lines: true,
        }
    }
}

impl LoopConfig {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    #[must_use]
    pub fn with_help_on_error(mut self, help_on_error: bool) -> Self {
        self.help_on_error = help_on_error;
        self
    }

    #[must_use]
    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Reading,
    /// Absorbing: no more input is read and no handler is called.
    Terminated,
}

/// Counters collected over the lifetime of a [`Repl`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub lines: u64,
    pub dispatched: u64,
    pub parse_errors: u64,
    pub handler_errors: u64,
}

/// Drives a [`Handler`] with lines read from an input stream.
pub struct Repl<H> {
    config: LoopConfig,
    handler: H,
    state: LoopState,
    stats: LoopStats,
    buf: Vec<u8>,
}

impl<H> Repl<H>
where
    H: Handler,
    H::Error: Display,
{
    pub fn new(config: LoopConfig, handler: H) -> Self {
        Self {
            config,
            handler,
            state: LoopState::Reading,
            stats: LoopStats::default(),
            buf: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Run until the input ends or a handler asks to exit.
    ///
    /// Only I/O errors of `input` or `output` are returned. Parse and handler
    /// errors are written to `output` and the loop goes on.
    pub fn run(
        &mut self,
        mut input: impl BufRead,
        mut output: impl Write,
    ) -> io::Result<LoopStats> {
        while self.step(&mut input, &mut output)? == LoopState::Reading {}
        output.flush()?;
        tracing::info!(stats = ?self.stats, "loop terminated");
        Ok(self.stats)
    }

    /// Read and process a single line.
    pub fn step(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> io::Result<LoopState> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        if !self.config.prompt.is_empty() {
            output.write_all(self.config.prompt.as_bytes())?;
            output.flush()?;
        }

        let mut raw = std::mem::take(&mut self.buf);
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            tracing::debug!("end of input");
            if !self.config.prompt.is_empty() {
                writeln!(output)?;
            }
            self.state = LoopState::Terminated;
            return Ok(self.state);
        }

        let ret = match String::from_utf8(raw) {
            Ok(line) => {
                let ret = self.process_line(line.trim_end_matches(['\n', '\r']), output);
                raw = line.into_bytes();
                ret
            }
            Err(err) => {
                let ret = self.report_invalid_utf8(err.utf8_error().valid_up_to(), output);
                raw = err.into_bytes();
                ret
            }
        };
        self.buf = raw;
        ret?;
        Ok(self.state)
    }

    /// Tokenize, parse and dispatch a line which is already read.
    pub fn process_line(&mut self, line: &str, output: &mut impl Write) -> io::Result<()> {
        self.stats.lines += 1;

        let cmd = match Command::parse_line(line) {
            Ok(cmd) => cmd,
            Err(err) if err.kind() == ErrorKind::MissingCommand && self.config.skip_blank_lines => {
                return Ok(());
            }
            Err(err) => return self.report_parse_error(err, output),
        };

        if self.config.echo {
            writeln!(output, "{cmd:?}")?;
        }

        self.stats.dispatched += 1;
        match dispatch(&mut self.handler, cmd) {
            Ok(Reply::Silent) => {}
            Ok(Reply::Text(text)) => writeln!(output, "{text}")?,
            Ok(Reply::Exit) => {
                tracing::debug!("handler requested exit");
                self.state = LoopState::Terminated;
            }
            Err(err) => {
                self.stats.handler_errors += 1;
                tracing::debug!(error = %err, "handler failed");
                writeln!(output, "error: {err}")?;
            }
        }
        Ok(())
    }

    #[cold]
    fn report_invalid_utf8(
        &mut self,
        valid_up_to: usize,
        output: &mut impl Write,
    ) -> io::Result<()> {
        self.stats.lines += 1;
        self.stats.parse_errors += 1;
        tracing::debug!(valid_up_to, "rejected non UTF-8 line");
        writeln!(output, "error: line is not valid UTF-8 after byte {valid_up_to}")
    }

    #[cold]
    fn report_parse_error(&mut self, err: Error, output: &mut impl Write) -> io::Result<()> {
        let err = match err.try_into_help() {
            Ok(help) => return output.write_all(help.as_bytes()),
            Err(err) => err,
        };

        self.stats.parse_errors += 1;
        tracing::debug!(kind = %err.kind(), "rejected line");
        writeln!(output, "error: {err}")?;

        #[cfg(feature = "help")]
        if self.config.help_on_error && !err.kind().is_quoting() {
            let help = match err.command().and_then(find_command) {
                Some(info) => crate::help::render_command_help(info),
                None => crate::help::render_help(),
            };
            writeln!(output)?;
            output.write_all(help.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(feature = "help")]
fn find_command(name: &str) -> Option<&'static crate::refl::CommandInfo> {
    crate::command::COMMANDS.iter().find(|info| info.name == name)
}

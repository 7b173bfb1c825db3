use crate::command::COMMANDS;
use crate::refl::CommandInfo;

#[inline(never)]
fn push_str(out: &mut String, s: &str) {
    out.push_str(s);
}

macro_rules! w {
    ($out:expr; $($e:expr),*) => {{
        $(push_str($out, $e);)*
    }};
}

const PAD: &str = "                        ";

/// Render the summary of all commands.
#[must_use]
pub fn render_help() -> String {
    let mut out = String::new();
    render_help_into(&mut out, COMMANDS);
    out
}

/// Render the detailed help of a single command.
#[must_use]
pub fn render_command_help(info: &CommandInfo) -> String {
    let mut out = String::new();
    render_command_help_into(&mut out, info);
    out
}

#[cold]
pub(crate) fn render_help_into(out: &mut String, commands: &[CommandInfo]) {
    w!(out; "Usage: <COMMAND> [ARGS]...\n");

    w!(out; "\nCommands:\n");
    let max_len = commands.iter().map(|info| info.name.len()).max().unwrap_or(0);
    for info in commands {
        let pad_len = max_len.saturating_sub(info.name.len()) + 2;
        w!(out; "    ", info.name, &PAD[..PAD.len().min(pad_len)], info.about, "\n");
    }

    w!(out; "\nSee '<COMMAND> --help' for more information on a command.\n");
}

#[cold]
pub(crate) fn render_command_help_into(out: &mut String, info: &CommandInfo) {
    w!(out; info.about, "\n\n");

    w!(out; "Usage: ", info.name);
    let has_flags = info.flags().next().is_some();
    if has_flags {
        w!(out; " [OPTIONS]");
    }
    for (_, arg) in info.positionals() {
        w!(out; " ", arg.description);
    }
    w!(out; "\n");

    if info.positionals().next().is_some() {
        w!(out; "\nArguments:\n");
        for (_, arg) in info.positionals() {
            w!(out; "  ", arg.description, "\n");
            for line in arg.help.split_terminator('\n') {
                w!(out; "          ", line, "\n");
            }
        }
    }

    if has_flags {
        w!(out; "\nOptions:\n");
        for (_, arg) in info.flags() {
            w!(out; "      ", arg.description, "\n");
            for line in arg.help.split_terminator('\n') {
                w!(out; "          ", line, "\n");
            }
        }
    }
}

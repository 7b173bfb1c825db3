#![cfg(feature = "help")]
use cmdloop::{COMMANDS, Command, ErrorKind, render_command_help, render_help};
use expect_test::{Expect, expect};

#[track_caller]
fn assert_help(line: &str, expect: Expect) {
    let err = Command::parse_line(line).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Help);
    expect.assert_eq(&err.try_into_help().unwrap());
}

#[test]
fn top_level() {
    expect![[r#"
        Usage: <COMMAND> [ARGS]...

        Commands:
            get   Print the value stored under a key.
            set   Store a value under a key.
            help  Print the list of commands.

        See '<COMMAND> --help' for more information on a command.
    "#]]
    .assert_eq(&render_help());
}

#[test]
fn set() {
    assert_help(
        "set --help",
        expect![[r#"
            Store a value under a key.

            Usage: set [OPTIONS] <KEY> <VALUE>

            Arguments:
              <KEY>
                      The key to store the value under.
              <VALUE>
                      The value to store.

            Options:
                  --is-true
                      Mark the stored entry as true.
        "#]],
    );
}

#[test]
fn get() {
    assert_help(
        "get --help",
        expect![[r#"
            Print the value stored under a key.

            Usage: get <KEY>

            Arguments:
              <KEY>
                      The key to look up.
        "#]],
    );
}

#[test]
fn help() {
    assert_help(
        "help --help",
        expect![[r#"
            Print the list of commands.

            Usage: help
        "#]],
    );
}

#[test]
fn help_anywhere_after_name() {
    let set_help = render_command_help(&COMMANDS[1]);
    for line in ["set --help", "set a --help", "set a b --help", "set --is-true --help"] {
        let help = Command::parse_line(line).unwrap_err().try_into_help().unwrap();
        assert_eq!(help, set_help, "{line:?}");
    }

    // Errors before `--help` win.
    let err = Command::parse_line("set a b c --help").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtraArgument);
    // After `--` it is a plain value.
    assert_eq!(
        Command::parse_line("get -- --help").unwrap(),
        Command::Get { key: "--help".into() }
    );
}

#[test]
fn not_help() {
    let err = Command::parse_line("get").unwrap_err();
    assert!(err.help().is_none());
    let err = err.try_into_help().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

//! The same command surface declared with clap must accept and reject the
//! same token sequences, with the same results.
use clap::{Parser, Subcommand};
use cmdloop::{Command, lex};

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Get {
        key: String,
    },
    Set {
        key: String,
        value: String,
        #[arg(long)]
        is_true: bool,
    },
}

fn from_clap(cmd: Commands) -> Command {
    match cmd {
        Commands::Get { key } => Command::Get { key },
        Commands::Set { key, value, is_true } => Command::Set { key, value, is_true },
    }
}

#[test]
fn same_results() {
    let lines = [
        "get foo",
        "get",
        "get a b",
        "get foo --is-true",
        "get -- --x",
        "set a b",
        "set a",
        "set",
        "set a b c",
        "set a b --is-true",
        "set --is-true a b",
        "set a --is-true b",
        "set a b --nope",
        "set 'a b' \"c d\"",
        "set a -- --is-true",
        "del x",
        "",
    ];

    for line in lines {
        let tokens = lex::split(line).unwrap();
        let ours = Command::try_parse_from(tokens.iter().cloned()).ok();
        let theirs = Cli::try_parse_from(&tokens).ok().map(|cli| from_clap(cli.command));
        assert_eq!(ours, theirs, "{line:?}");
    }
}

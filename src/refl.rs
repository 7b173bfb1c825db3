//! Runtime reflection of commands and their arguments.
//!
//! Each command is described by a static [`CommandInfo`]: a name, a short
//! about text, the argument descriptors, and a function that validates the
//! collected [`Matches`] and builds the typed command. The parser, help
//! renderer and error messages are all driven by this table.
use crate::Result;
use crate::command::Command;
use crate::runtime::Matches;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A required positional value.
    Required,
    /// A boolean `--long` flag without value. Absence means `false`.
    Flag,
}

/// Runtime information of a single argument.
#[derive(Debug)]
pub struct ArgInfo {
    /// Field name in kebab-case.
    pub name: &'static str,
    /// Display form: `<KEY>` for positionals, `--is-true` for flags.
    pub description: &'static str,
    pub kind: ArgKind,
    pub help: &'static str,
}

impl ArgInfo {
    pub const fn required(
        name: &'static str,
        description: &'static str,
        help: &'static str,
    ) -> Self {
        Self { name, description, kind: ArgKind::Required, help }
    }

    pub const fn flag(name: &'static str, description: &'static str, help: &'static str) -> Self {
        Self { name, description, kind: ArgKind::Flag, help }
    }

    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.kind == ArgKind::Flag
    }
}

/// Validate collected matches into a command.
pub(crate) type BuildFn = fn(&mut Matches) -> Result<Command>;

/// Runtime information of a command variant.
pub struct CommandInfo {
    pub name: &'static str,
    /// One line summary shown in the command list.
    pub about: &'static str,
    /// Argument descriptors. Positionals are filled in order of appearance.
    pub args: &'static [ArgInfo],
    pub(crate) build: BuildFn,
}

impl std::fmt::Debug for CommandInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInfo")
            .field("name", &self.name)
            .field("about", &self.about)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl CommandInfo {
    /// Iterate over positional arguments with their indices into `args`.
    pub fn positionals(&self) -> impl Iterator<Item = (usize, &'static ArgInfo)> + Clone {
        self.args.iter().enumerate().filter(|(_, arg)| !arg.is_flag())
    }

    /// Iterate over flags with their indices into `args`.
    pub fn flags(&self) -> impl Iterator<Item = (usize, &'static ArgInfo)> + Clone {
        self.args.iter().enumerate().filter(|(_, arg)| arg.is_flag())
    }

    /// Find a flag by its long name without the leading `--`.
    #[must_use]
    pub fn find_flag(&self, name: &str) -> Option<(usize, &'static ArgInfo)> {
        self.flags().find(|(_, arg)| arg.name == name)
    }
}

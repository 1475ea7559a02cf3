//! Reads a [`CommandSpec`] tree out of a `clap::Command` definition.
//!
//! The command is cloned and built first, so the tree includes what clap
//! generates on its own: the `--help`/`--version` flags, propagated global
//! arguments and the `help` subcommand. Positional arguments are skipped.

use clap::{Arg, Command};

use crate::{CommandSpec, FlagSpec};

impl From<&Command> for CommandSpec {
    fn from(command: &Command) -> Self {
        let mut command = command.clone();
        command.build();
        spec_from_built(&command)
    }
}

fn spec_from_built(command: &Command) -> CommandSpec {
    CommandSpec {
        name: command.get_name().to_string(),
        aliases: command.get_all_aliases().map(String::from).collect(),
        hidden: command.is_hide_set(),
        flags: command
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .map(flag_from_arg)
            .collect(),
        children: command.get_subcommands().map(spec_from_built).collect(),
    }
}

fn flag_from_arg(arg: &Arg) -> FlagSpec {
    FlagSpec {
        long: arg.get_long().map(String::from),
        aliases: arg
            .get_all_aliases()
            .unwrap_or_default()
            .into_iter()
            .map(String::from)
            .collect(),
        short: arg.get_short(),
        takes_value: arg.get_action().takes_values(),
        negation: None,
        hidden: arg.is_hide_set(),
    }
}

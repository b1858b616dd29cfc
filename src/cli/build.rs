//! Function for building the command line hierarchy.

use super::{
    completions::create_completions_subcommand, lines::create_lines_subcommand,
    model::create_model_subcommand,
};
use clap::{self, Arg, Command};

/// Build the `photosphere` command line hierarchy.
pub fn build() -> Command<'static> {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .global(true)
                .help("Display elapsed time when done"),
        )
        .subcommand(create_model_subcommand())
        .subcommand(create_lines_subcommand())
        .subcommand(create_completions_subcommand())
}

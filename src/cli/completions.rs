//! Command line interface for generating a command line completion script.

use super::build;
use clap::{Arg, ArgMatches, Command};
use clap_complete::{generate, Shell};
use std::io;

/// Creates a subcommand for printing a shell completion script.
pub fn create_completions_subcommand() -> Command<'static> {
    Command::new("completions")
        .about("Generate tab-completion script for your shell")
        .hide(true)
        .arg(
            Arg::new("shell")
                .value_name("SHELL")
                .required(true)
                .possible_values(["bash", "zsh", "fish"])
                .help("The shell to generate the script for"),
        )
        .after_help(
            r#"DISCUSSION
    The script is output on `stdout`, allowing one to re-direct the
    output to the file of their choosing.

    BASH:

        $ mkdir -p ~/.local/share/bash-completion/completions
        $ photosphere completions bash >> ~/.local/share/bash-completion/completions/photosphere

    ZSH:

    Add a directory such as `~/.zfunc` to `$fpath` in your `.zshrc`
    before `compinit`, then run

        $ photosphere completions zsh > ~/.zfunc/_photosphere

    FISH:

        $ mkdir -p ~/.config/fish/completions
        $ photosphere completions fish > ~/.config/fish/completions/photosphere.fish

    You may have to log out and log back in to your shell session for
    the changes to take affect."#,
        )
}

/// Runs actions for the `completions` subcommand.
pub fn run_completions_subcommand(arguments: &ArgMatches) {
    let shell: Shell = super::utils::get_value_from_required_parseable_argument(arguments, "shell");
    let mut command = build::build();
    generate(shell, &mut command, clap::crate_name!(), &mut io::stdout());
}

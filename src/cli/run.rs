//! Function for running the command line program.

use super::{
    build, completions::run_completions_subcommand, lines::run_lines_subcommand,
    model::run_model_subcommand,
};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `photosphere` command line program.
pub fn run() {
    run_with_args(build::build().get_matches());
}

/// Runs the `photosphere` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    match arguments.subcommand() {
        Some(("model", model_arguments)) => run_model_subcommand(model_arguments),
        Some(("lines", lines_arguments)) => run_lines_subcommand(lines_arguments),
        Some(("completions", completions_arguments)) => {
            run_completions_subcommand(completions_arguments)
        }
        _ => {}
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}

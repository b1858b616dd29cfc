//! Command line interface for listing the built-in line catalog.

use crate::line::catalog::LINE_CATALOG;
use clap::{ArgMatches, Command};

/// Creates a subcommand for printing the line catalog.
pub fn create_lines_subcommand() -> Command<'static> {
    Command::new("lines").about("List the lines in the built-in line catalog")
}

/// Runs actions for the `lines` subcommand.
pub fn run_lines_subcommand(_arguments: &ArgMatches) {
    println!(
        "{:<10} {:<12} {:>12} {:>8} {:>8} {:>8}",
        "Name", "Title", "λ [nm]", "log gf", "χ [eV]", "A12"
    );
    for line in LINE_CATALOG.iter() {
        println!(
            "{:<10} {:<12} {:>12.3} {:>8.3} {:>8.3} {:>8.2}",
            line.name(),
            line.title(),
            line.wavelength_nm(),
            line.log_oscillator_strength() + line.lower_weight().log10(),
            line.excitation_energy(),
            line.abundance()
        );
    }
}

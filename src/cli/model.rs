//! Command line interface for computing a model atmosphere and its spectrum.

use super::utils;
use crate::{
    driver::{
        synthesis::{synthesize, SynthesisResult},
        AtmosphereConfig, AtmosphereSolver, AtmosphereStructure, IterationControl,
        SpectrumConfig, StellarParameters,
    },
    hydrostatics::HydrostaticStrategy,
    io::Verbosity,
    line::{catalog, ProfileKind},
    radiation::formal_solution::SourceFunction,
};
use clap::{Arg, ArgMatches, Command};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Structure and spectra produced by the `model` subcommand.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct ModelOutput {
    pub structure: AtmosphereStructure,
    pub synthesis: Option<SynthesisResult>,
}

/// Creates a subcommand for computing a model atmosphere.
pub fn create_model_subcommand() -> Command<'static> {
    let command = Command::new("model")
        .about("Compute an LTE model atmosphere and its emergent spectrum")
        .long_about(
            "Compute an LTE model atmosphere and its emergent spectrum.\n\
             The structure is bootstrapped from a rescaled reference model and iterated\n\
             until chemistry, opacity and hydrostatic equilibrium are consistent.",
        )
        .arg(
            Arg::new("teff")
                .long("teff")
                .require_equals(true)
                .value_name("VALUE")
                .help("Effective temperature [K]")
                .takes_value(true)
                .default_value("5778"),
        )
        .arg(
            Arg::new("log-g")
                .long("log-g")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Base 10 logarithm of the surface gravity [cgs]")
                .takes_value(true)
                .default_value("4.44"),
        )
        .arg(
            Arg::new("log-z")
                .long("log-z")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Base 10 logarithm of the metallicity relative to the Sun")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("mass")
                .long("mass")
                .require_equals(true)
                .value_name("VALUE")
                .help("Stellar mass [solar masses]")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::new("microturbulence")
                .long("microturbulence")
                .require_equals(true)
                .value_name("VALUE")
                .help("Microturbulent speed [km/s]")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::new("num-depths")
                .long("num-depths")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of points in the optical depth grid")
                .takes_value(true)
                .default_value("48"),
        )
        .arg(
            Arg::new("wavelength-range")
                .long("wavelength-range")
                .require_equals(true)
                .use_value_delimiter(true)
                .value_names(&["MIN", "MAX"])
                .help("Wavelength range of the synthesized spectrum [nm]")
                .takes_value(true)
                .number_of_values(2)
                .default_values(&["300", "1000"]),
        )
        .arg(
            Arg::new("num-wavelengths")
                .long("num-wavelengths")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of continuum wavelengths in the synthesized spectrum")
                .takes_value(true)
                .default_value("250"),
        )
        .arg(
            Arg::new("catalog-lines")
                .long("catalog-lines")
                .require_equals(true)
                .use_value_delimiter(true)
                .value_name("NAMES")
                .help(
                    "Comma-separated list of catalog lines to include in the spectrum\n\
                     [default: all catalog lines]",
                )
                .takes_value(true)
                .multiple_values(true)
                .conflicts_with("no-catalog-lines"),
        )
        .arg(
            Arg::new("no-catalog-lines")
                .long("no-catalog-lines")
                .help("Synthesize the spectrum without catalog lines"),
        )
        .arg(
            Arg::new("line")
                .long("line")
                .require_equals(true)
                .value_name("NAME")
                .help("Catalog line to synthesize in detail, along with its equivalent width")
                .takes_value(true)
                .default_value(SpectrumConfig::DEFAULT_DETAILED_LINE),
        )
        .arg(
            Arg::new("no-line")
                .long("no-line")
                .help("Do not synthesize a line in detail"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .require_equals(true)
                .value_name("NAME")
                .help("Line profile shape")
                .takes_value(true)
                .possible_values(ProfileKind::NAMES)
                .default_value("voigt"),
        )
        .arg(
            Arg::new("line-epsilon")
                .long("line-epsilon")
                .require_equals(true)
                .value_name("VALUE")
                .help(
                    "Use a scattering source function with this thermalization parameter\n\
                     for the detailed line [default: thermal source function]",
                )
                .takes_value(true),
        )
        .arg(
            Arg::new("hydrostatics")
                .long("hydrostatics")
                .require_equals(true)
                .value_name("NAME")
                .help("Method for integrating the hydrostatic equilibrium")
                .takes_value(true)
                .possible_values(HydrostaticStrategy::NAMES)
                .default_value("integral"),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .require_equals(true)
                .value_name("VALUE")
                .help("Maximum relative change of gas pressure and electron density at convergence")
                .takes_value(true)
                .default_value("1e-3"),
        )
        .arg(
            Arg::new("max-passes")
                .long("max-passes")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Maximum number of structure passes before giving up")
                .takes_value(true)
                .default_value("50"),
        )
        .arg(
            Arg::new("fixed-passes")
                .long("fixed-passes")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Run this many structure passes without checking for convergence")
                .takes_value(true)
                .conflicts_with("legacy"),
        )
        .arg(
            Arg::new("legacy")
                .long("legacy")
                .help("Run a single structure pass without checking for convergence"),
        )
        .arg(
            Arg::new("electron-iterations")
                .long("electron-iterations")
                .require_equals(true)
                .value_name("NUMBER")
                .help("Number of electron density iterations in each chemistry pass")
                .takes_value(true)
                .default_value("3"),
        )
        .arg(
            Arg::new("no-molecules")
                .long("no-molecules")
                .help("Exclude molecules from the chemical equilibrium"),
        )
        .arg(
            Arg::new("temperature-correction")
                .long("temperature-correction")
                .help("Apply flux-constant temperature corrections to the structure"),
        )
        .arg(
            Arg::new("convection")
                .long("convection")
                .help("Apply the mixing-length convective gradient below the convective boundary"),
        )
        .arg(
            Arg::new("legacy-hot-electron-pressure")
                .long("legacy-hot-electron-pressure")
                .help("Scale the electron pressure of the hot reference model with gravity alone"),
        )
        .arg(
            Arg::new("continuum-fudge")
                .long("continuum-fudge")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Base 10 logarithm of the scale factor for the continuum opacity")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("line-fudge")
                .long("line-fudge")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Base 10 logarithm of the scale factor for the line opacity")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("structure-only")
                .long("structure-only")
                .help("Compute the structure without synthesizing any spectra"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages"),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Show progress bars for long-running computations"),
        );

    #[cfg(feature = "json")]
    let command = command.arg(
        Arg::new("output")
            .short('o')
            .long("output")
            .require_equals(true)
            .value_name("PATH")
            .help("Save the structure and spectra as JSON to the given path, or print them if '-'")
            .takes_value(true),
    );

    command
}

/// Runs actions for the `model` subcommand.
pub fn run_model_subcommand(arguments: &ArgMatches) {
    let verbosity = utils::parse_verbosity(arguments, true);
    let stellar = construct_stellar_parameters_from_options(arguments);
    let atmosphere_config = construct_atmosphere_config_from_options(arguments);

    let solver = exit_on_error!(
        AtmosphereSolver::new(stellar, atmosphere_config),
        "Error: Invalid model parameters: {}"
    );
    let structure = exit_on_error!(
        solver.solve(&verbosity),
        "Error: Could not compute atmospheric structure: {}"
    );

    let synthesis = if arguments.is_present("structure-only") {
        None
    } else {
        let spectrum_config = construct_spectrum_config_from_options(arguments);
        Some(exit_on_error!(
            synthesize(&structure, &spectrum_config, &verbosity),
            "Error: Could not synthesize spectrum: {}"
        ))
    };

    let output = ModelOutput {
        structure,
        synthesis,
    };

    #[cfg(feature = "json")]
    if let Some(output_path) = arguments.value_of("output") {
        if output_path == "-" {
            exit_on_error!(
                crate::io::utils::print_data_as_json(&output),
                "Error: Could not print output: {}"
            );
            return;
        }
        let output_path = std::path::Path::new(output_path);
        exit_on_error!(
            crate::io::utils::save_data_as_json(output_path, &output),
            "Error: Could not save output: {}"
        );
        if verbosity.print_messages() {
            println!("Saved model in {}", output_path.display());
        }
        return;
    }

    print_summary(&output, &verbosity);
}

/// Determines stellar parameters based on provided options.
pub fn construct_stellar_parameters_from_options(arguments: &ArgMatches) -> StellarParameters {
    StellarParameters {
        teff: utils::get_finite_float_value_from_required_parseable_argument(arguments, "teff"),
        log_g: utils::get_finite_float_value_from_required_parseable_argument(arguments, "log-g"),
        log_z: utils::get_finite_float_value_from_required_parseable_argument(arguments, "log-z"),
        mass: utils::get_finite_float_value_from_required_parseable_argument(arguments, "mass"),
        microturbulence: utils::get_finite_float_value_from_required_parseable_argument(
            arguments,
            "microturbulence",
        ),
    }
}

/// Determines atmosphere configuration parameters based on provided options.
pub fn construct_atmosphere_config_from_options(arguments: &ArgMatches) -> AtmosphereConfig {
    let iteration = if arguments.is_present("legacy") {
        IterationControl::legacy()
    } else if let Some(num_passes) =
        utils::get_values_from_parseable_argument::<usize>(arguments, "fixed-passes")
            .and_then(|values| values.first().copied())
    {
        IterationControl::FixedPasses(num_passes)
    } else {
        IterationControl::Converge {
            tolerance: utils::get_finite_float_value_from_required_parseable_argument(
                arguments,
                "tolerance",
            ),
            max_passes: utils::get_value_from_required_parseable_argument(arguments, "max-passes"),
        }
    };

    AtmosphereConfig {
        num_depths: utils::get_value_from_required_parseable_argument(arguments, "num-depths"),
        iteration,
        hydrostatics: utils::get_value_from_required_parseable_argument(arguments, "hydrostatics"),
        num_electron_iterations: utils::get_value_from_required_parseable_argument(
            arguments,
            "electron-iterations",
        ),
        include_molecules: !arguments.is_present("no-molecules"),
        log10_continuum_fudge: utils::get_finite_float_value_from_required_parseable_argument(
            arguments,
            "continuum-fudge",
        ),
        temperature_correction: arguments.is_present("temperature-correction"),
        convection: arguments.is_present("convection"),
        legacy_hot_electron_pressure: arguments.is_present("legacy-hot-electron-pressure"),
        ..AtmosphereConfig::default()
    }
}

/// Determines spectrum configuration parameters based on provided options.
pub fn construct_spectrum_config_from_options(arguments: &ArgMatches) -> SpectrumConfig {
    let wavelength_range: Vec<f64> =
        utils::get_values_from_parseable_argument(arguments, "wavelength-range")
            .unwrap_or_default();
    exit_on_false!(
        wavelength_range.len() == 2,
        "Error: wavelength-range must have 2 values, got {}",
        wavelength_range.len()
    );

    let catalog_lines = if arguments.is_present("no-catalog-lines") {
        Vec::new()
    } else if let Some(names) = arguments.values_of("catalog-lines") {
        names.map(String::from).collect()
    } else {
        catalog::catalog_line_names()
            .into_iter()
            .map(String::from)
            .collect()
    };

    let detailed_line = if arguments.is_present("no-line") {
        None
    } else {
        let name = arguments
            .value_of("line")
            .expect("No value for argument with default");
        Some(
            exit_on_error!(catalog::catalog_line(name), "Error: Invalid line: {}").clone(),
        )
    };

    let line_source = match arguments.value_of("line-epsilon") {
        Some(value_string) => SourceFunction::Scattering {
            epsilon: utils::parse_value_string("line-epsilon", value_string),
        },
        None => SourceFunction::Thermal,
    };

    SpectrumConfig {
        num_wavelengths: utils::get_value_from_required_parseable_argument(
            arguments,
            "num-wavelengths",
        ),
        min_wavelength_nm: wavelength_range[0],
        max_wavelength_nm: wavelength_range[1],
        catalog_lines,
        detailed_line,
        profile: utils::get_value_from_required_parseable_argument(arguments, "profile"),
        line_source,
        log10_line_fudge: utils::get_finite_float_value_from_required_parseable_argument(
            arguments,
            "line-fudge",
        ),
        ..SpectrumConfig::default()
    }
}

fn print_summary(output: &ModelOutput, verbosity: &Verbosity) {
    let structure = &output.structure;
    println!(
        "Model for Teff = {:.0} K, log g = {:.2}, log Z = {:.2} ({} passes)",
        structure.stellar.teff, structure.stellar.log_g, structure.stellar.log_z, structure.num_passes
    );
    println!(
        "{:>10} {:>10} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "log tau", "T [K]", "P_gas", "N_e", "rho", "kappa_R", "z [km]"
    );
    let tau = structure.tau_grid.tau();
    let num_depths = structure.tau_grid.num_depths();
    let stride = if verbosity.print_messages() {
        1
    } else {
        usize::max(1, num_depths / 8)
    };
    for depth in (0..num_depths).step_by(stride) {
        println!(
            "{:>10.3} {:>10.1} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.3}",
            tau.log_at(depth) / std::f64::consts::LN_10,
            structure.temperature.linear_at(depth),
            structure.gas_pressure.linear_at(depth),
            structure.electron_density.linear_at(depth),
            structure.mass_density.linear_at(depth),
            structure.rosseland_opacity.linear_at(depth),
            structure.depths[depth] * 1e-5,
        );
    }

    if let Some(synthesis) = &output.synthesis {
        println!(
            "Recovered Teff: {:.0} K",
            synthesis.recovered_teff
        );
        println!(
            "Flux maximum at {:.1} nm (Wien: {:.1} nm)",
            synthesis.sed_peak.wavelength * 1e7,
            synthesis.sed_peak.wien_wavelength * 1e7
        );
        println!(
            "Radius: {:.3} R_sun ({:.4e} cm), luminosity: {:.3} L_sun ({:.4e} erg/s)",
            synthesis.summary.radius,
            synthesis.summary.radius_cm(),
            synthesis.summary.luminosity,
            synthesis.summary.luminosity_erg_per_s()
        );
        if let Some(line) = &synthesis.detailed_line {
            println!(
                "Equivalent width of {}: {:.2} pm",
                line.line.title(),
                line.equivalent_width
            );
        }
    }
}

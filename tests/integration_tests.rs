mod common;

use approx::assert_relative_eq;
use photosphere::{
    driver::{
        synthesize, AtmosphereConfig, IterationControl, SpectrumConfig, StellarParameters,
    },
    hydrostatics::HydrostaticStrategy,
    io::Verbosity,
    radiation::planck::planck,
};

fn spectrum_config() -> SpectrumConfig {
    SpectrumConfig {
        num_wavelengths: 120,
        num_bolometric_wavelengths: 200,
        ..SpectrumConfig::default()
    }
}

#[test]
fn solar_structure_is_monotonic() {
    let structure = common::solar_structure();
    let num_depths = structure.tau_grid.num_depths();
    assert_eq!(num_depths, 48);
    for depth in 1..num_depths {
        assert!(structure.tau_grid.tau().linear_at(depth) > structure.tau_grid.tau().linear_at(depth - 1));
        assert!(structure.gas_pressure.linear_at(depth) > structure.gas_pressure.linear_at(depth - 1));
        assert!(structure.depths[depth] > structure.depths[depth - 1]);
    }
    for depth in 0..num_depths {
        let gas_pressure = structure.gas_pressure.linear_at(depth);
        let radiation_pressure = structure.radiation_pressure.linear_at(depth);
        assert!(radiation_pressure <= 0.5 * (gas_pressure + radiation_pressure));
        assert_relative_eq!(
            structure.temperature.linear_at(depth),
            structure.temperature.log_at(depth).exp(),
            max_relative = 1e-12
        );
    }
}

#[test]
fn rosseland_mean_lies_within_monochromatic_range() {
    let structure = common::solar_structure();
    for depth in 0..structure.tau_grid.num_depths() {
        let column = structure.log_opacity.column(depth);
        assert!(column.iter().all(|value| value.is_finite()));
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_rosseland = structure.rosseland_opacity.log_at(depth);
        assert!(log_rosseland >= min - 1e-9 && log_rosseland <= max + 1e-9);
    }
}

#[test]
fn solar_spectrum_has_expected_observables() {
    let structure = common::solar_structure();
    let result = synthesize(&structure, &spectrum_config(), &Verbosity::Quiet).unwrap();

    let teff = structure.stellar.teff;
    assert_relative_eq!(result.recovered_teff, teff, max_relative = 0.1);
    assert_relative_eq!(
        result.sed_peak.wavelength,
        result.sed_peak.wien_wavelength,
        max_relative = 0.25
    );

    let line = result.detailed_line.as_ref().unwrap();
    assert_eq!(line.line.name(), "NaI_5895");
    assert!(
        line.equivalent_width > 5.0 && line.equivalent_width < 500.0,
        "Unexpected equivalent width {} pm",
        line.equivalent_width
    );

    assert!(result
        .limb_darkening
        .iter()
        .all(|&coefficient| coefficient > 0.0 && coefficient < 1.5));
    assert_eq!(result.master_lines.len(), 14);
}

#[test]
fn disk_centre_intensity_follows_unit_optical_depth_temperature() {
    let structure = common::solar_structure();
    let config = SpectrumConfig {
        catalog_lines: Vec::new(),
        detailed_line: None,
        ..spectrum_config()
    };
    let result = synthesize(&structure, &config, &Verbosity::Quiet).unwrap();
    let unit_depth = structure.tau_grid.index_closest_to(1.0);
    let temperature = structure.temperature.linear_at(unit_depth);
    let wavelengths = result.continuum.wavelengths().wavelengths();
    let idx = wavelengths.len() / 2;
    let ratio = result.continuum.intensity()[[idx, 0]] / planck(temperature, wavelengths[idx]);
    assert!(ratio > 0.5 && ratio < 2.0, "Intensity ratio {}", ratio);
}

#[test]
fn hydrostatic_pressure_increases_inwards_across_parameter_space() {
    for strategy in [HydrostaticStrategy::IntegralForm, HydrostaticStrategy::Euler] {
        for (teff, log_g) in [
            (4000.0, 2.0),
            (5778.0, 4.44),
            (7300.0, 0.0),
            (9000.0, 4.0),
            (20000.0, 4.5),
        ] {
            let config = AtmosphereConfig {
                num_depths: 24,
                num_opacity_wavelengths: 60,
                iteration: IterationControl::FixedPasses(3),
                hydrostatics: strategy,
                ..AtmosphereConfig::default()
            };
            let structure = common::compute_structure(StellarParameters::new(teff, log_g, 0.0), config);
            for depth in 1..structure.tau_grid.num_depths() {
                assert!(
                    structure.gas_pressure.linear_at(depth) > structure.gas_pressure.linear_at(depth - 1),
                    "Gas pressure not increasing for Teff = {}, log g = {} with {:?}",
                    teff,
                    log_g,
                    strategy
                );
            }
        }
    }
}

#[test]
fn lower_metallicity_reduces_electron_density() {
    let solar = common::solar_structure();
    let poor = common::compute_structure(StellarParameters::new(5778.0, 4.44, -1.0), common::test_config());
    let depth = solar.tau_grid.index_closest_to(1e-2);
    assert!(poor.electron_density.linear_at(depth) < solar.electron_density.linear_at(depth));
}

#[test]
fn line_catalog_can_be_listed() {
    common::run(["lines"]);
}

#[cfg(feature = "json")]
#[test]
fn model_command_saves_json_output() {
    let test = common::Test::new("model_command_saves_json_output");
    let output_path = test.output_path("model.json");
    common::run([
        "model",
        "--num-depths=24",
        "--num-wavelengths=40",
        "--no-catalog-lines",
        "--fixed-passes=3",
        &format!("--output={}", output_path.to_string_lossy()),
    ]);
    common::assert_file_exists(&output_path);
}

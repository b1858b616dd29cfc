//! Emergent spectra of a computed atmosphere.

use super::{config::SpectrumConfig, AtmosphereStructure, DriverStage};
use crate::{
    depth::fdp,
    error::AtmosphereResult,
    io::Verbosity,
    line::{
        equivalent_width::rectify_flux, equivalent_width, BroadeningReference, LineAtmosphere,
        LineDescriptor, LineGrid, LineOpacity,
    },
    opacity::{continuum_opacity, AbsorberPopulations},
    postprocess::{limb_darkening_coefficients, recover_teff, SedPeak, StellarSummary},
    radiation::{
        angles::QuadratureAngles, formal_solution::SourceFunction, monochromatic_log_tau_table,
        synthesize_spectrum, Spectrum, WavelengthGrid,
    },
};
use ndarray::{Array1, Array2};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// High resolution spectrum of a single line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DetailedLineSpectrum {
    pub line: LineDescriptor,
    pub grid: LineGrid,
    pub spectrum: Spectrum,
    /// Flux divided by the continuum flux.
    pub rectified_flux: Array1<fdp>,
    /// Equivalent width [pm].
    pub equivalent_width: fdp,
}

/// Spectra and derived observables of an atmosphere.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SynthesisResult {
    pub continuum: Spectrum,
    /// Continuum ln κ_λ indexed as `[wavelength][depth]`.
    pub continuum_log_opacity: Array2<fdp>,
    /// Linear limb darkening coefficient for each continuum wavelength.
    pub limb_darkening: Array1<fdp>,
    /// Spectrum on the continuum wavelengths merged with the catalog line grids.
    pub master: Spectrum,
    /// Names of the catalog lines included in the master spectrum.
    pub master_lines: Vec<String>,
    pub master_log_opacity: Array2<fdp>,
    /// ln τ_λ indexed as `[wavelength][depth]`.
    pub master_log_tau: Array2<fdp>,
    pub detailed_line: Option<DetailedLineSpectrum>,
    /// Effective temperature [K] recovered from the bolometric flux.
    pub recovered_teff: fdp,
    pub sed_peak: SedPeak,
    pub summary: StellarSummary,
}

/// Synthesizes the continuum, line and bolometric spectra of the given structure.
pub fn synthesize(
    structure: &AtmosphereStructure,
    config: &SpectrumConfig,
    verbosity: &Verbosity,
) -> AtmosphereResult<SynthesisResult> {
    config.validate()?;
    if verbosity.show_progress() {
        println!("Stage: {}", DriverStage::Synthesis);
    }
    let stellar = &structure.stellar;
    let angles = QuadratureAngles::default();
    let populations = AbsorberPopulations::from_chemistry(&structure.chemistry, &structure.temperature)?;

    let spectrum_for = |wavelengths: &WavelengthGrid,
                        log_opacity: &Array2<fdp>,
                        source: SourceFunction,
                        verbosity: &Verbosity| {
        synthesize_spectrum(
            &structure.tau_grid,
            &structure.temperature,
            &structure.rosseland_opacity,
            wavelengths,
            log_opacity,
            &angles,
            source,
            verbosity,
        )
    };

    if verbosity.print_messages() {
        println!("Synthesizing continuum spectrum");
    }
    let wavelengths = config.wavelengths()?;
    let continuum_log_opacity = continuum_opacity(
        &structure.mass_density,
        &wavelengths,
        &populations,
        structure.log10_continuum_fudge,
    )?;
    let continuum = spectrum_for(
        &wavelengths,
        &continuum_log_opacity,
        SourceFunction::Thermal,
        verbosity,
    )?;
    let limb_darkening = limb_darkening_coefficients(continuum.intensity(), &angles)?;

    let atmosphere = LineAtmosphere {
        temperature: &structure.temperature,
        gas_pressure: &structure.gas_pressure,
        mass_density: &structure.mass_density,
        chemistry: &structure.chemistry,
        composition: &structure.composition,
    };
    let reference = BroadeningReference::solar();

    let mut master_wavelengths = wavelengths.clone();
    let mut master_log_opacity = continuum_log_opacity.clone();
    let mut master_lines = Vec::new();
    let (min_wavelength, max_wavelength) = wavelength_range(&wavelengths);
    for line in config.resolve_catalog_lines()? {
        if line.wavelength() < min_wavelength || line.wavelength() > max_wavelength {
            if verbosity.print_messages() {
                println!("Skipping {}, which lies outside the wavelength range", line.title());
            }
            continue;
        }
        let grid = LineGrid::new(
            line,
            stellar.teff,
            stellar.microturbulence,
            config.num_catalog_core,
            config.num_catalog_wing,
        )?;
        let opacity = LineOpacity::compute(
            line,
            grid,
            config.profile,
            &atmosphere,
            &reference,
            config.log10_line_fudge,
        )?;
        let (combined, merged) = opacity.add_to(&master_wavelengths, &master_log_opacity)?;
        master_wavelengths = combined;
        master_log_opacity = merged;
        master_lines.push(line.name().to_string());
    }
    if verbosity.print_messages() {
        println!(
            "Synthesizing spectrum with {} line{} at {} wavelengths",
            master_lines.len(),
            if master_lines.len() == 1 { "" } else { "s" },
            master_wavelengths.len()
        );
    }
    let master = spectrum_for(
        &master_wavelengths,
        &master_log_opacity,
        SourceFunction::Thermal,
        verbosity,
    )?;
    let master_log_tau = monochromatic_log_tau_table(
        &structure.tau_grid,
        &master_log_opacity,
        &structure.rosseland_opacity,
    )?;

    let detailed_line = match &config.detailed_line {
        Some(line) => {
            if verbosity.print_messages() {
                println!("Synthesizing {}", line.title());
            }
            let grid = LineGrid::new(
                line,
                stellar.teff,
                stellar.microturbulence,
                config.num_core,
                config.num_wing,
            )?;
            let opacity = LineOpacity::compute(
                line,
                grid.clone(),
                config.profile,
                &atmosphere,
                &reference,
                config.log10_line_fudge,
            )?;
            let (line_wavelengths, total_log_opacity) =
                opacity.total_on_line_grid(&wavelengths, &continuum_log_opacity)?;
            let spectrum = spectrum_for(
                &line_wavelengths,
                &total_log_opacity,
                config.line_source,
                &Verbosity::Quiet,
            )?;
            let line_wavelength_values = line_wavelengths.wavelengths().to_vec();
            let flux = spectrum.flux().linear().to_vec();
            let rectified_flux = rectify_flux(
                &line_wavelength_values,
                &flux,
                &wavelengths.wavelengths().to_vec(),
                &continuum.flux().linear().to_vec(),
            )?;
            let width = equivalent_width(&flux, &line_wavelength_values, line.wavelength())?;
            if verbosity.print_messages() {
                println!("Equivalent width of {}: {:.2} pm", line.title(), width);
            }
            Some(DetailedLineSpectrum {
                line: line.clone(),
                grid,
                spectrum,
                rectified_flux: Array1::from(rectified_flux),
                equivalent_width: width,
            })
        }
        None => None,
    };

    if verbosity.print_messages() {
        println!("Computing bolometric flux");
    }
    let bolometric_wavelengths = config.bolometric_wavelengths()?;
    let bolometric_log_opacity = continuum_opacity(
        &structure.mass_density,
        &bolometric_wavelengths,
        &populations,
        structure.log10_continuum_fudge,
    )?;
    let bolometric = spectrum_for(
        &bolometric_wavelengths,
        &bolometric_log_opacity,
        SourceFunction::Thermal,
        &Verbosity::Quiet,
    )?;
    let recovered_teff = recover_teff(&bolometric)?;
    if verbosity.print_messages() {
        println!(
            "Recovered effective temperature: {:.0} K (input {:.0} K)",
            recovered_teff, stellar.teff
        );
    }

    Ok(SynthesisResult {
        sed_peak: SedPeak::new(&continuum, stellar.teff),
        summary: StellarSummary::new(stellar.mass, stellar.log_g, stellar.teff)?,
        continuum,
        continuum_log_opacity,
        limb_darkening,
        master,
        master_lines,
        master_log_opacity,
        master_log_tau,
        detailed_line,
        recovered_teff,
    })
}

fn wavelength_range(wavelengths: &WavelengthGrid) -> (fdp, fdp) {
    let values = wavelengths.wavelengths();
    (values[0], values[values.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{compute_atmosphere, AtmosphereConfig, IterationControl, StellarParameters};

    #[test]
    fn merged_spectrum_contains_line_grids() {
        let config = AtmosphereConfig {
            num_depths: 24,
            num_opacity_wavelengths: 60,
            iteration: IterationControl::FixedPasses(4),
            ..AtmosphereConfig::default()
        };
        let structure =
            compute_atmosphere(StellarParameters::default(), config, &Verbosity::Quiet).unwrap();
        let spectrum_config = SpectrumConfig {
            num_wavelengths: 40,
            min_wavelength_nm: 500.0,
            max_wavelength_nm: 700.0,
            catalog_lines: vec!["NaI_5889".to_string(), "CaII_3933".to_string()],
            num_bolometric_wavelengths: 120,
            ..SpectrumConfig::default()
        };
        let result = synthesize(&structure, &spectrum_config, &Verbosity::Quiet).unwrap();
        assert_eq!(result.master_lines, vec!["NaI_5889".to_string()]);
        let num_line_points = 2 * (spectrum_config.num_catalog_core + spectrum_config.num_catalog_wing) - 1;
        assert_eq!(result.master.num_wavelengths(), 40 + num_line_points);
        assert_eq!(result.master_log_tau.dim(), result.master_log_opacity.dim());
        assert_eq!(result.limb_darkening.len(), 40);

        let detailed = result.detailed_line.unwrap();
        assert!(detailed.equivalent_width > 0.0);
        assert!(detailed.rectified_flux.iter().all(|&value| value > 0.0 && value < 1.05));
    }
}

//! Initial structure estimates rescaled from tabulated reference models.

use crate::{
    constants::{KBOLTZMANN, LN10},
    data::reference_models::{
        COOL_ELECTRON_PRESSURE, COOL_GAS_PRESSURE, COOL_LOG_G, COOL_TEFF, COOL_TEMPERATURE,
        HOT_ELECTRON_PRESSURE, HOT_GAS_PRESSURE, HOT_LOG_G, HOT_TEFF, HOT_TEMPERATURE,
        NUM_REFERENCE_DEPTHS, REFERENCE_HELIUM_ABUNDANCE, REFERENCE_TAU, SUN_ELECTRON_PRESSURE,
        SUN_GAS_PRESSURE, SUN_LOG_G, SUN_TEFF, SUN_TEMPERATURE,
    },
    depth::{fdp, DualArray, TauGrid},
    error::{AtmosphereError, AtmosphereResult},
    math::interpolate_clamped,
};
use lazy_static::lazy_static;
use ndarray::Array1;

/// Effective temperature below which the cool reference model is used [K].
pub const COOL_MODEL_TEFF_LIMIT: fdp = 7300.0;

lazy_static! {
    /// Natural logarithm of the reference optical depths. The τ = 0 surface
    /// point is placed one mean log step above the first non-zero depth.
    static ref REFERENCE_LOG_TAU: [fdp; NUM_REFERENCE_DEPTHS] = {
        let mut log_tau = [0.0; NUM_REFERENCE_DEPTHS];
        for i in 1..NUM_REFERENCE_DEPTHS {
            log_tau[i] = REFERENCE_TAU[i].ln();
        }
        log_tau[0] = log_tau[1]
            - (log_tau[NUM_REFERENCE_DEPTHS - 1] - log_tau[1]) / (NUM_REFERENCE_DEPTHS as fdp);
        log_tau
    };
}

/// Linear dependence of the electron pressure on effective temperature,
/// with a coefficient that varies with optical depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeffCorrection {
    /// Coefficient above τ = 0.1.
    pub upper_coefficient: fdp,
    /// Coefficient below τ = 10.
    pub lower_coefficient: fdp,
    /// The correction only applies for effective temperatures below this value.
    pub max_teff: Option<fdp>,
}

/// Exponents relating the pressures of a target atmosphere to those of a reference model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingLaw {
    /// Gravity exponents for gas pressure at the top and bottom of the grid.
    pub gas_gravity_exponents: (fdp, fdp),
    pub gas_metallicity_exponent: fdp,
    pub gas_helium_exponent: fdp,
    /// Gravity exponents for electron pressure at the top and bottom of the grid.
    pub electron_gravity_exponents: (fdp, fdp),
    pub electron_metallicity_exponent: fdp,
    pub electron_helium_exponent: fdp,
    pub teff_correction: Option<TeffCorrection>,
    /// Whether to force the surface gas pressure below that of the next depth.
    pub enforce_increasing_surface_pressure: bool,
}

/// A tabulated reference model together with its scaling law.
#[derive(Clone, Copy, Debug)]
pub struct ReferenceModel {
    pub name: &'static str,
    pub teff: fdp,
    pub log_g: fdp,
    /// Helium abundance on the A12 scale.
    pub helium_abundance: fdp,
    pub temperature: &'static [fdp; NUM_REFERENCE_DEPTHS],
    pub gas_pressure: &'static [fdp; NUM_REFERENCE_DEPTHS],
    pub electron_pressure: &'static [fdp; NUM_REFERENCE_DEPTHS],
    pub scaling: ScalingLaw,
}

/// Structure estimate obtained from a reference model.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceGuess {
    pub temperature: DualArray,
    pub gas_pressure: DualArray,
    pub electron_pressure: DualArray,
    pub electron_density: DualArray,
}

/// Options affecting how the reference models are rescaled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReferenceOptions {
    /// Scale the hot model's electron pressure with gravity alone, discarding
    /// the metallicity, helium and temperature terms.
    pub legacy_hot_electron_pressure: bool,
}

impl ReferenceModel {
    /// Solar model, scaled with gravity and metallicity alone.
    pub fn sun() -> Self {
        Self {
            name: "sun",
            teff: SUN_TEFF,
            log_g: SUN_LOG_G,
            helium_abundance: REFERENCE_HELIUM_ABUNDANCE,
            temperature: &SUN_TEMPERATURE,
            gas_pressure: &SUN_GAS_PRESSURE,
            electron_pressure: &SUN_ELECTRON_PRESSURE,
            scaling: ScalingLaw {
                gas_gravity_exponents: (1.0, 1.0),
                gas_metallicity_exponent: 0.0,
                gas_helium_exponent: 0.0,
                electron_gravity_exponents: (1.0, 1.0),
                electron_metallicity_exponent: -1.0,
                electron_helium_exponent: 0.0,
                teff_correction: None,
                enforce_increasing_surface_pressure: false,
            },
        }
    }

    /// Model for effective temperatures around 5000 K.
    pub fn cool() -> Self {
        Self {
            name: "5000 K",
            teff: COOL_TEFF,
            log_g: COOL_LOG_G,
            helium_abundance: REFERENCE_HELIUM_ABUNDANCE,
            temperature: &COOL_TEMPERATURE,
            gas_pressure: &COOL_GAS_PRESSURE,
            electron_pressure: &COOL_ELECTRON_PRESSURE,
            scaling: ScalingLaw {
                gas_gravity_exponents: (0.54, 0.64),
                gas_metallicity_exponent: -0.333333,
                gas_helium_exponent: 0.666667,
                electron_gravity_exponents: (0.48, 0.33),
                electron_metallicity_exponent: 0.333333,
                electron_helium_exponent: 0.333333,
                teff_correction: Some(TeffCorrection {
                    upper_coefficient: 0.0012,
                    lower_coefficient: 0.0015,
                    max_teff: None,
                }),
                enforce_increasing_surface_pressure: true,
            },
        }
    }

    /// Model for effective temperatures around 10000 K.
    pub fn hot() -> Self {
        Self {
            name: "10000 K",
            teff: HOT_TEFF,
            log_g: HOT_LOG_G,
            helium_abundance: REFERENCE_HELIUM_ABUNDANCE,
            temperature: &HOT_TEMPERATURE,
            gas_pressure: &HOT_GAS_PRESSURE,
            electron_pressure: &HOT_ELECTRON_PRESSURE,
            scaling: ScalingLaw {
                gas_gravity_exponents: (0.53, 0.85),
                gas_metallicity_exponent: -0.5,
                gas_helium_exponent: 0.666667,
                electron_gravity_exponents: (0.53, 0.82),
                electron_metallicity_exponent: 0.5,
                electron_helium_exponent: 0.333333,
                teff_correction: Some(TeffCorrection {
                    upper_coefficient: 0.0012,
                    lower_coefficient: 0.0015,
                    max_teff: Some(HOT_TEFF),
                }),
                enforce_increasing_surface_pressure: true,
            },
        }
    }

    /// Selects the reference model to bootstrap an atmosphere with the given
    /// effective temperature from.
    pub fn for_teff(teff: fdp) -> Self {
        if teff < COOL_MODEL_TEFF_LIMIT {
            Self::cool()
        } else {
            Self::hot()
        }
    }

    /// Natural logarithms of the tabulated temperature and gas pressure at the
    /// given optical depth, interpolated in ln τ.
    pub fn log_conditions_at(&self, tau: fdp) -> (fdp, fdp) {
        let log_tau = tau.ln();
        let log_temperature = interpolate_clamped(
            &REFERENCE_LOG_TAU[..],
            &log_of(self.temperature)[..],
            log_tau,
        );
        let log_gas_pressure = interpolate_clamped(
            &REFERENCE_LOG_TAU[..],
            &log_of(self.gas_pressure)[..],
            log_tau,
        );
        (log_temperature, log_gas_pressure)
    }

    /// Natural logarithm of the reference model optical depths.
    pub fn log_tau(&self) -> &'static [fdp; NUM_REFERENCE_DEPTHS] {
        &REFERENCE_LOG_TAU
    }

    /// Interpolates the reference temperature onto the given optical depths
    /// and rescales it to the target effective temperature.
    pub fn scaled_temperature(&self, teff: fdp, tau_grid: &TauGrid) -> AtmosphereResult<DualArray> {
        let log_tau = tau_grid.tau().log();
        let temperature = log_tau.mapv(|log_tau| {
            teff * interpolate_clamped(&REFERENCE_LOG_TAU[..], &self.temperature[..], log_tau)
                / self.teff
        });
        DualArray::from_linear("temperature", temperature)
    }

    /// Interpolates the reference gas pressure onto the given optical depths
    /// and rescales it to the target gravity, metallicity and helium abundance.
    pub fn scaled_gas_pressure(
        &self,
        log_g: fdp,
        metallicity_scale: fdp,
        helium_abundance: fdp,
        tau_grid: &TauGrid,
    ) -> AtmosphereResult<DualArray> {
        let scaling = &self.scaling;
        let log_reference_pressure = log_of(self.gas_pressure);
        let helium_term = scaling.gas_helium_exponent
            * (helium_factor(helium_abundance) - helium_factor(self.helium_abundance));

        let mut log_pressure = self.interpolate_with_gravity_exponents(
            &log_reference_pressure,
            scaling.gas_gravity_exponents,
            log_g,
            tau_grid,
        );
        log_pressure
            .mapv_inplace(|p| p + scaling.gas_metallicity_exponent * metallicity_scale.ln() + helium_term);

        if scaling.enforce_increasing_surface_pressure
            && log_pressure.len() > 1
            && log_pressure[0] >= log_pressure[1]
        {
            log_pressure[0] = log_pressure[1] + 0.5f64.ln();
        }
        DualArray::from_log("gas pressure", log_pressure)
    }

    /// Interpolates the reference electron pressure onto the given optical
    /// depths and rescales it to the target parameters.
    pub fn scaled_electron_pressure(
        &self,
        teff: fdp,
        log_g: fdp,
        metallicity_scale: fdp,
        helium_abundance: fdp,
        tau_grid: &TauGrid,
        options: ReferenceOptions,
    ) -> AtmosphereResult<DualArray> {
        let scaling = &self.scaling;
        let log_reference_pressure = log_of(self.electron_pressure);

        if options.legacy_hot_electron_pressure && self.teff == HOT_TEFF {
            let log_pressure = self.interpolate_with_gravity_exponents(
                &log_reference_pressure,
                (1.0, 1.0),
                log_g,
                tau_grid,
            );
            return DualArray::from_log("electron pressure", log_pressure);
        }

        let helium_term = scaling.electron_helium_exponent
            * (helium_factor(helium_abundance) - helium_factor(self.helium_abundance));

        let mut log_pressure = self.interpolate_with_gravity_exponents(
            &log_reference_pressure,
            scaling.electron_gravity_exponents,
            log_g,
            tau_grid,
        );

        if let Some(correction) = scaling.teff_correction {
            if correction.max_teff.map_or(true, |max_teff| teff < max_teff) {
                let log_tau = tau_grid.tau().log();
                let log_tau_range = log_tau[log_tau.len() - 1] - log_tau[0];
                let ln_upper_limit = 0.1f64.ln();
                for (p, &log_tau) in log_pressure.iter_mut().zip(log_tau.iter()) {
                    let tau = log_tau.exp();
                    let coefficient = if tau < 0.1 {
                        correction.upper_coefficient
                    } else if tau > 10.0 {
                        correction.lower_coefficient
                    } else {
                        correction.upper_coefficient
                            + (correction.lower_coefficient - correction.upper_coefficient)
                                * (log_tau - ln_upper_limit)
                                / log_tau_range
                    };
                    *p += coefficient * (teff - self.teff);
                }
            }
        }
        log_pressure.mapv_inplace(|p| {
            p + scaling.electron_metallicity_exponent * metallicity_scale.ln() + helium_term
        });
        DualArray::from_log("electron pressure", log_pressure)
    }

    fn interpolate_with_gravity_exponents(
        &self,
        log_reference_values: &[fdp; NUM_REFERENCE_DEPTHS],
        (top_exponent, bottom_exponent): (fdp, fdp),
        log_g: fdp,
        tau_grid: &TauGrid,
    ) -> Array1<fdp> {
        let log_tau = tau_grid.tau().log();
        let log_tau_top = log_tau[0];
        let log_tau_range = log_tau[log_tau.len() - 1] - log_tau_top;
        let ln_g = LN10 * log_g;
        let ln_g_ref = LN10 * self.log_g;

        log_tau.mapv(|log_tau| {
            let exponent = top_exponent
                + (bottom_exponent - top_exponent) * (log_tau - log_tau_top) / log_tau_range;
            let log_value =
                interpolate_clamped(&REFERENCE_LOG_TAU[..], &log_reference_values[..], log_tau);
            exponent * ln_g + log_value - exponent * ln_g_ref
        })
    }
}

/// Rescales the reference model suited for the given effective temperature
/// onto the given optical depth grid.
pub fn interpolate_reference(
    teff: fdp,
    log_g: fdp,
    metallicity_scale: fdp,
    helium_abundance: fdp,
    tau_grid: &TauGrid,
    options: ReferenceOptions,
) -> AtmosphereResult<ReferenceGuess> {
    validate_reference_parameters(teff, log_g, metallicity_scale)?;
    let model = ReferenceModel::for_teff(teff);
    interpolate_model(
        &model,
        teff,
        log_g,
        metallicity_scale,
        helium_abundance,
        tau_grid,
        options,
    )
}

/// Rescales the given reference model onto the given optical depth grid.
pub fn interpolate_model(
    model: &ReferenceModel,
    teff: fdp,
    log_g: fdp,
    metallicity_scale: fdp,
    helium_abundance: fdp,
    tau_grid: &TauGrid,
    options: ReferenceOptions,
) -> AtmosphereResult<ReferenceGuess> {
    validate_reference_parameters(teff, log_g, metallicity_scale)?;

    let temperature = model.scaled_temperature(teff, tau_grid)?;
    let gas_pressure =
        model.scaled_gas_pressure(log_g, metallicity_scale, helium_abundance, tau_grid)?;
    let electron_pressure = model.scaled_electron_pressure(
        teff,
        log_g,
        metallicity_scale,
        helium_abundance,
        tau_grid,
        options,
    )?;
    let log_k = KBOLTZMANN.ln();
    let electron_density = DualArray::from_log(
        "electron density",
        electron_pressure.log() - temperature.log() - log_k,
    )?;
    Ok(ReferenceGuess {
        temperature,
        gas_pressure,
        electron_pressure,
        electron_density,
    })
}

fn validate_reference_parameters(
    teff: fdp,
    log_g: fdp,
    metallicity_scale: fdp,
) -> AtmosphereResult<()> {
    if !(teff.is_finite() && teff > 0.0) {
        return Err(AtmosphereError::invalid_parameter(
            "teff",
            teff,
            "effective temperature must be positive",
        ));
    }
    if !log_g.is_finite() {
        return Err(AtmosphereError::invalid_parameter(
            "log_g",
            log_g,
            "surface gravity must be finite",
        ));
    }
    if !(metallicity_scale.is_finite() && metallicity_scale > 0.0) {
        return Err(AtmosphereError::invalid_parameter(
            "metallicity_scale",
            metallicity_scale,
            "metallicity scale must be positive",
        ));
    }
    Ok(())
}

fn log_of(values: &[fdp; NUM_REFERENCE_DEPTHS]) -> [fdp; NUM_REFERENCE_DEPTHS] {
    let mut log_values = [0.0; NUM_REFERENCE_DEPTHS];
    for (log_value, &value) in log_values.iter_mut().zip(values.iter()) {
        *log_value = value.ln();
    }
    log_values
}

/// ln(1 + 4 N_He/N_H) for a helium abundance on the A12 scale.
fn helium_factor(helium_abundance: fdp) -> fdp {
    (1.0 + 4.0 * fdp::powf(10.0, helium_abundance - 12.0)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Grid whose non-surface points coincide with the reference optical depths.
    fn reference_grid() -> TauGrid {
        TauGrid::new(NUM_REFERENCE_DEPTHS - 1, -6.0, 2.0).unwrap()
    }

    #[test]
    fn reference_interpolation_reproduces_own_grid() {
        let grid = reference_grid();
        let model = ReferenceModel::sun();
        let guess = interpolate_model(
            &model,
            model.teff,
            model.log_g,
            1.0,
            REFERENCE_HELIUM_ABUNDANCE,
            &grid,
            ReferenceOptions::default(),
        )
        .unwrap();
        for i in 0..grid.num_depths() {
            assert_relative_eq!(
                guess.temperature.linear_at(i),
                SUN_TEMPERATURE[i + 1],
                max_relative = 1e-6
            );
            assert_relative_eq!(
                guess.gas_pressure.linear_at(i),
                SUN_GAS_PRESSURE[i + 1],
                max_relative = 1e-6
            );
            assert_relative_eq!(
                guess.electron_pressure.linear_at(i),
                SUN_ELECTRON_PRESSURE[i + 1],
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn solar_conditions_at_unit_optical_depth_are_photospheric() {
        let (log_temperature, log_gas_pressure) = ReferenceModel::sun().log_conditions_at(1.0);
        assert!(log_temperature.exp() > 5500.0 && log_temperature.exp() < 7500.0);
        assert!(log_gas_pressure.exp() > 5e4 && log_gas_pressure.exp() < 5e5);
    }

    #[test]
    fn temperature_scales_with_teff() {
        let grid = TauGrid::default();
        let model = ReferenceModel::cool();
        let base = model.scaled_temperature(COOL_TEFF, &grid).unwrap();
        let scaled = model.scaled_temperature(2.0 * COOL_TEFF, &grid).unwrap();
        for i in 0..grid.num_depths() {
            assert_relative_eq!(
                scaled.linear_at(i),
                2.0 * base.linear_at(i),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn interpolation_clamps_beyond_table() {
        let grid = TauGrid::new(10, -9.0, 4.0).unwrap();
        let model = ReferenceModel::sun();
        let temperature = model.scaled_temperature(SUN_TEFF, &grid).unwrap();
        assert_relative_eq!(temperature.linear_at(0), SUN_TEMPERATURE[0]);
        assert_relative_eq!(
            temperature.linear_at(9),
            SUN_TEMPERATURE[NUM_REFERENCE_DEPTHS - 1]
        );
    }

    #[test]
    fn model_selection_follows_teff() {
        assert_eq!(ReferenceModel::for_teff(5778.0).teff, COOL_TEFF);
        assert_eq!(ReferenceModel::for_teff(9000.0).teff, HOT_TEFF);
    }

    #[test]
    fn guesses_are_positive_and_increasing() {
        let grid = TauGrid::default();
        for &(teff, log_g) in &[(3500.0, 5.0), (5778.0, 4.44), (12000.0, 3.5), (30000.0, 4.0)] {
            let guess =
                interpolate_reference(teff, log_g, 1.0, 10.93, &grid, ReferenceOptions::default())
                    .unwrap();
            let pressure = guess.gas_pressure.linear();
            for i in 1..pressure.len() {
                assert!(pressure[i] > pressure[i - 1]);
            }
            for i in 0..grid.num_depths() {
                assert!(guess.electron_pressure.linear_at(i) > 0.0);
            }
        }
    }

    #[test]
    fn legacy_hot_electron_pressure_ignores_metallicity() {
        let grid = TauGrid::default();
        let model = ReferenceModel::hot();
        let options = ReferenceOptions {
            legacy_hot_electron_pressure: true,
        };
        let metal_poor = model
            .scaled_electron_pressure(9000.0, 4.0, 0.1, 10.93, &grid, options)
            .unwrap();
        let solar = model
            .scaled_electron_pressure(9000.0, 4.0, 1.0, 10.93, &grid, options)
            .unwrap();
        assert_eq!(metal_poor, solar);
        let fixed = model
            .scaled_electron_pressure(9000.0, 4.0, 0.1, 10.93, &grid, ReferenceOptions::default())
            .unwrap();
        assert_ne!(fixed, solar);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let grid = TauGrid::default();
        assert!(matches!(
            interpolate_reference(-10.0, 4.4, 1.0, 10.93, &grid, ReferenceOptions::default()),
            Err(AtmosphereError::InvalidParameter { name: "teff", .. })
        ));
        assert!(
            interpolate_reference(5000.0, f64::NAN, 1.0, 10.93, &grid, ReferenceOptions::default())
                .is_err()
        );
    }
}

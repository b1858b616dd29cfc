//! Bound-free absorption by the abundant metals C I, Mg I/II, Al I, Si I/II and Fe I.
//!
//! Mg I and Si I/II use the temperature and frequency tables of Peach (1970),
//! C I the fits of Luo & Pradhan (1989) and Burke & Taylor (1979), and Fe I a
//! sum of resonant photoionization edges from 48 excited terms.

use super::{
    continuum::{stimulated_emission_factor, SpectralPoint},
    fop, LocalAbsorbers,
};
use crate::{
    chemistry::ionization::log_partition_functions,
    constants::{CLIGHT, EV_TO_ERG, HPLANCK, KBOLTZMANN},
    data::atomic::ELEMENTS,
};

const CARBON_IDX: usize = 5;
const MAGNESIUM_IDX: usize = 11;
const ALUMINIUM_IDX: usize = 12;
const SILICON_IDX: usize = 13;
const IRON_IDX: usize = 25;

/// Lowest frequency of the tabulated Mg I and Si I cross-sections [Hz].
const PEACH_NEUTRAL_MIN_FREQUENCY: fop = 2.997925e14;
/// Lowest wavenumber of the Fe I edges [1/cm].
const IRON_MIN_WAVENUMBER: fop = 21000.0;

/// Ground-state number densities [1/cm^3] of the metal absorbers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetalAbsorbers {
    pub neutral_carbon: fop,
    pub neutral_magnesium: fop,
    pub ionized_magnesium: fop,
    pub neutral_aluminium: fop,
    pub neutral_silicon: fop,
    pub ionized_silicon: fop,
    pub neutral_iron: fop,
}

impl MetalAbsorbers {
    /// Element indices and ionization stages of the absorbers in field order.
    pub const SPECIES: [(usize, usize); 7] = [
        (CARBON_IDX, 0),
        (MAGNESIUM_IDX, 0),
        (MAGNESIUM_IDX, 1),
        (ALUMINIUM_IDX, 0),
        (SILICON_IDX, 0),
        (SILICON_IDX, 1),
        (IRON_IDX, 0),
    ];

    /// Derives the ground-state densities from the total stage densities
    /// returned by `stage_density(element_idx, stage)`.
    pub fn from_stage_densities<F>(log_temperature: fop, stage_density: F) -> Self
    where
        F: Fn(usize, usize) -> fop,
    {
        let ground = Self::SPECIES.map(|(element_idx, stage)| {
            let log_u = log_partition_functions(&ELEMENTS[element_idx], log_temperature)[stage];
            stage_density(element_idx, stage) * (-log_u).exp()
        });
        Self {
            neutral_carbon: ground[0],
            neutral_magnesium: ground[1],
            ionized_magnesium: ground[2],
            neutral_aluminium: ground[3],
            neutral_silicon: ground[4],
            ionized_silicon: ground[5],
            neutral_iron: ground[6],
        }
    }
}

/// Cross-sections tabulated at a set of temperatures and on both sides of a
/// sequence of photoionization edges.
struct PeachTable {
    /// Edge frequencies in decreasing order [Hz].
    edge_frequencies: &'static [fop],
    /// ln ν of the interpolation nodes bracketing the edges.
    log_frequencies: &'static [fop],
    log_temperatures: &'static [fop],
    /// One row of tabulated values per temperature.
    rows: &'static [&'static [fop]],
    temperature_step: fop,
    temperature_offset: fop,
}

impl PeachTable {
    fn evaluate(&self, frequency: fop, temperature: fop) -> fop {
        let num_edges_above = self
            .edge_frequencies
            .iter()
            .take_while(|&&edge| frequency <= edge)
            .count();
        let lower = self.log_frequencies[num_edges_above];
        let upper = self.log_frequencies[num_edges_above + 1];
        let fraction = (frequency.ln() - lower) / (upper - lower);
        let column = if num_edges_above > 1 {
            2 * num_edges_above - 2
        } else {
            num_edges_above
        };
        let at_frequency =
            |row: &[fop]| row[column + 1] * fraction + row[column] * (1.0 - fraction);

        let max_row = (self.rows.len() - 1) as fop;
        let row = ((temperature / self.temperature_step).floor() - self.temperature_offset)
            .clamp(1.0, max_row) as usize
            - 1;
        let weight = (temperature.ln() - self.log_temperatures[row])
            / (self.log_temperatures[row + 1] - self.log_temperatures[row]);
        at_frequency(self.rows[row]) * (1.0 - weight) + at_frequency(self.rows[row + 1]) * weight
    }
}

static MAGNESIUM_TABLE: PeachTable = PeachTable {
    edge_frequencies: &[
        1.9341452e15, 1.8488510e15, 1.1925797e15, 7.9804046e14, 4.5772110e14, 4.1440977e14,
        4.1113514e14,
    ],
    log_frequencies: &[
        35.23123, 35.19844, 35.15334, 34.71490, 34.31318, 33.75728, 33.65788, 33.64994, 33.43947,
    ],
    log_temperatures: &[8.29405, 8.51719, 8.69951, 8.85367, 8.98720, 9.10498, 9.21034],
    rows: &[
        &[
            -42.474, -41.808, -41.273, -45.583, -44.324, -50.969, -50.633, -53.028, -51.785,
            -52.285, -52.028, -52.384, -52.363, -54.704, -54.359,
        ],
        &[
            -42.350, -41.735, -41.223, -44.008, -42.747, -48.388, -48.026, -49.643, -48.352,
            -48.797, -48.540, -48.876, -48.856, -50.772, -50.349,
        ],
        &[
            -42.109, -41.582, -41.114, -42.957, -41.694, -46.630, -46.220, -47.367, -46.050,
            -46.453, -46.196, -46.513, -46.493, -48.107, -47.643,
        ],
        &[
            -41.795, -41.363, -40.951, -42.205, -40.939, -45.344, -44.859, -45.729, -44.393,
            -44.765, -44.507, -44.806, -44.786, -46.176, -45.685,
        ],
        &[
            -41.467, -41.115, -40.755, -41.639, -40.370, -44.355, -43.803, -44.491, -43.140,
            -43.486, -43.227, -43.509, -43.489, -44.707, -44.198,
        ],
        &[
            -41.159, -40.866, -40.549, -41.198, -39.925, -43.568, -42.957, -43.520, -42.157,
            -42.480, -42.222, -42.488, -42.467, -43.549, -43.027,
        ],
        &[
            -40.883, -40.631, -40.347, -40.841, -39.566, -42.924, -42.264, -42.736, -41.363,
            -41.668, -41.408, -41.660, -41.639, -42.611, -42.418,
        ],
    ],
    temperature_step: 1000.0,
    temperature_offset: 3.0,
};

/// Silicon I values are tabulated as −ln σ.
static SILICON_TABLE: PeachTable = PeachTable {
    edge_frequencies: &[
        2.1413750e15, 1.9723165e15, 1.7879689e15, 1.5152920e15, 5.5723927e14, 5.3295914e14,
        4.7886458e14, 4.7216422e14, 4.6185133e14,
    ],
    log_frequencies: &[
        35.45438, 35.30022, 35.21799, 35.11986, 34.95438, 33.95402, 33.90947, 33.80244, 33.78835,
        33.76626, 33.70518,
    ],
    log_temperatures: &[
        8.29405, 8.51719, 8.69951, 8.85367, 8.98720, 9.10498, 9.21034, 9.30565, 9.39266,
    ],
    rows: &[
        &[
            38.136, 37.834, 37.898, 40.737, 40.581, 45.521, 45.520, 55.068, 53.868, 54.133, 54.051,
            54.442, 54.320, 55.691, 55.661, 55.973, 55.922, 56.828, 56.657,
        ],
        &[
            38.138, 37.839, 37.898, 40.319, 40.164, 44.456, 44.455, 51.783, 50.369, 50.597, 50.514,
            50.854, 50.722, 51.965, 51.933, 52.193, 52.141, 52.821, 52.653,
        ],
        &[
            38.140, 37.843, 37.897, 40.047, 39.893, 43.753, 43.752, 49.553, 48.031, 48.233, 48.150,
            48.455, 48.313, 49.444, 49.412, 49.630, 49.577, 50.110, 49.944,
        ],
        &[
            38.141, 37.847, 37.897, 39.855, 39.702, 43.254, 43.251, 47.942, 46.355, 46.539, 46.454,
            46.733, 46.583, 47.615, 47.582, 47.769, 47.715, 48.146, 47.983,
        ],
        &[
            38.143, 37.850, 37.897, 39.714, 39.561, 42.878, 42.871, 46.723, 45.092, 45.261, 45.176,
            45.433, 45.277, 46.221, 46.188, 46.349, 46.295, 46.654, 46.491,
        ],
        &[
            38.144, 37.853, 37.896, 39.604, 39.452, 42.580, 42.569, 45.768, 44.104, 44.262, 44.175,
            44.415, 44.251, 45.119, 45.085, 45.226, 45.172, 45.477, 45.315,
        ],
        &[
            38.144, 37.855, 37.895, 39.517, 39.366, 42.332, 42.315, 44.997, 43.308, 43.456, 43.368,
            43.592, 43.423, 44.223, 44.189, 44.314, 44.259, 44.522, 44.360,
        ],
        &[
            38.145, 37.857, 37.895, 39.445, 39.295, 42.119, 42.094, 44.360, 42.652, 42.790, 42.702,
            42.912, 42.738, 43.478, 43.445, 43.555, 43.500, 43.730, 43.569,
        ],
        &[
            38.145, 37.858, 37.894, 39.385, 39.235, 41.930, 41.896, 43.823, 42.100, 42.230, 42.141,
            42.340, 42.160, 42.848, 42.813, 42.913, 42.858, 43.061, 42.901,
        ],
    ],
    temperature_step: 1000.0,
    temperature_offset: 3.0,
};

static IONIZED_SILICON_TABLE: PeachTable = PeachTable {
    edge_frequencies: &[
        4.9965417e15, 3.9466738e15, 1.5736321e15, 1.5171539e15, 9.2378947e14, 8.3825004e14,
        7.6869872e14,
    ],
    log_frequencies: &[
        36.32984, 36.14752, 35.91165, 34.99216, 34.95561, 34.45951, 34.36234, 34.27572, 34.20161,
    ],
    log_temperatures: &[9.21034, 9.39266, 9.54681, 9.68034, 9.79813, 9.90349],
    rows: &[
        &[
            -43.8941, -42.2444, -40.6054, -54.2389, -50.4108, -52.0936, -51.9548, -54.2407,
            -52.7355, -53.5387, -53.2417, -53.5097, -54.0561, -53.8469,
        ],
        &[
            -43.8941, -42.2444, -40.6054, -52.2906, -48.4892, -50.0741, -49.9371, -51.7319,
            -50.2218, -50.9189, -50.6234, -50.8535, -51.2365, -51.0256,
        ],
        &[
            -43.8941, -42.2444, -40.6054, -50.8799, -47.1090, -48.5999, -48.4647, -49.9178,
            -48.4059, -49.0200, -48.7252, -48.9263, -49.1980, -48.9860,
        ],
        &[
            -43.8941, -42.2444, -40.6054, -49.8033, -46.0672, -47.4676, -47.3340, -48.5395,
            -47.0267, -47.5750, -47.2810, -47.4586, -47.6497, -47.4368,
        ],
        &[
            -43.8941, -42.2444, -40.6054, -48.9485, -45.2510, -46.5649, -46.4333, -47.4529,
            -45.9402, -46.4341, -46.1410, -46.2994, -46.4302, -46.2162,
        ],
        &[
            -43.8941, -42.2444, -40.6054, -48.2490, -44.5933, -45.8246, -45.6947, -46.5709,
            -45.0592, -45.5082, -45.2153, -45.3581, -45.4414, -45.2266,
        ],
    ],
    temperature_step: 2000.0,
    temperature_offset: 4.0,
};

/// Statistical weight, excitation energy [1/cm] and edge wavenumber [1/cm] of
/// the Fe I terms.
const IRON_TERMS: [(fop, fop, fop); 48] = [
    (25.0, 500.0, 63500.0),
    (35.0, 7500.0, 58500.0),
    (21.0, 12500.0, 53500.0),
    (15.0, 17500.0, 59500.0),
    (9.0, 19000.0, 45000.0),
    (35.0, 19500.0, 44500.0),
    (33.0, 19500.0, 44500.0),
    (21.0, 21000.0, 43000.0),
    (27.0, 22000.0, 58000.0),
    (49.0, 23000.0, 41000.0),
    (9.0, 23000.0, 54000.0),
    (21.0, 24000.0, 40000.0),
    (27.0, 24000.0, 40000.0),
    (9.0, 24500.0, 57500.0),
    (9.0, 24500.0, 55500.0),
    (25.0, 26000.0, 38000.0),
    (33.0, 26500.0, 57500.0),
    (15.0, 26500.0, 57500.0),
    (35.0, 27000.0, 37000.0),
    (3.0, 27500.0, 54500.0),
    (5.0, 28500.0, 53500.0),
    (11.0, 29000.0, 55000.0),
    (15.0, 29500.0, 34500.0),
    (13.0, 29500.0, 34500.0),
    (15.0, 29500.0, 34500.0),
    (9.0, 30000.0, 34000.0),
    (21.0, 31500.0, 32500.0),
    (15.0, 31500.0, 32500.0),
    (21.0, 33500.0, 32500.0),
    (25.0, 33500.0, 32500.0),
    (35.0, 34000.0, 32000.0),
    (9.0, 34500.0, 29500.0),
    (5.0, 34500.0, 29500.0),
    (45.0, 35000.0, 31000.0),
    (27.0, 35500.0, 30500.0),
    (21.0, 37000.0, 29000.0),
    (15.0, 37000.0, 27000.0),
    (21.0, 37000.0, 54000.0),
    (15.0, 38500.0, 27500.0),
    (25.0, 40000.0, 24000.0),
    (21.0, 40000.0, 47000.0),
    (35.0, 41000.0, 23000.0),
    (5.0, 41000.0, 44000.0),
    (15.0, 43000.0, 42000.0),
    (45.0, 43000.0, 42000.0),
    (35.0, 43000.0, 21000.0),
    (55.0, 43000.0, 42000.0),
    (25.0, 44000.0, 42000.0),
];

/// General fit `σ (a + r(1 − a)) r^s` with `r = ν0/ν` for absorption above the
/// edge at ν0.
fn seaton(edge_frequency: fop, cross_section: fop, power: i32, a: fop, frequency: fop) -> fop {
    let ratio = edge_frequency / frequency;
    cross_section * (a + ratio * (1.0 - a)) * ratio.powi(power)
}

/// Lorentzian-like resonance used for the C I autoionizing features.
fn resonance(wavenumber: fop, center: fop, half_width: fop, a: fop, b: fop) -> fop {
    let epsilon = (wavenumber - center) / half_width;
    (a * epsilon + b) / (epsilon * epsilon + 1.0)
}

/// Cross-section per ground-state C I atom [cm^2].
fn carbon_cross_section(frequency: fop, wavenumber: fop, temperature: fop) -> fop {
    if frequency < 2.0761e15 {
        return 0.0;
    }
    const RYDBERG: fop = 109732.298;
    let thermal_energy = KBOLTZMANN * temperature / EV_TO_ERG;
    let hydrogenic =
        |threshold: fop| fop::powf(10.0, -16.80 - (wavenumber - threshold) / 3.0 / RYDBERG);

    let x1100 = if frequency >= 2.7254e15 {
        hydrogenic(90777.000) * seaton(2.7254e15, 1.219e-17, 2, 3.317, frequency)
    } else {
        0.0
    };
    let x1240 = if frequency >= 2.4196e15 {
        hydrogenic(80627.760)
            + resonance(wavenumber, 93917.0, 4615.0, 22.0e-18, 26.0e-18)
            + resonance(wavenumber, 111130.0, 1371.5, -10.5e-18, 46.0e-18)
    } else {
        0.0
    };
    let x1444 =
        hydrogenic(69172.400) + resonance(wavenumber, 97700.0, 1371.5, 68.0e-18, 118.0e-18);

    x1100 * 9.0
        + x1240 * 5.0 * fop::exp(-1.264 / thermal_energy)
        + x1444 * fop::exp(-2.683 / thermal_energy)
}

/// Cross-section per ground-state Mg II ion [cm^2], with edges at 824 and 1169 Å.
fn ionized_magnesium_cross_section(frequency: fop, temperature: fop) -> fop {
    if frequency < 2.564306e15 {
        return 0.0;
    }
    let thermal_energy = KBOLTZMANN * temperature / EV_TO_ERG;
    let x824 = if frequency >= 3.635492e15 {
        seaton(3.635492e15, 1.40e-19, 4, 6.7, frequency)
    } else {
        0.0
    };
    let x1169 = 5.11e-19 * (2.564306e15 / frequency).powi(3);
    x824 * 2.0 + x1169 * 6.0 * fop::exp(-4.43 / thermal_energy)
}

/// Cross-section per ground-state Al I atom [cm^2].
fn aluminium_cross_section(frequency: fop) -> fop {
    if frequency < 1.443e15 {
        return 0.0;
    }
    6.0 * 6.5e-17 * (1.443e15 / frequency).powi(5)
}

/// Cross-section per ground-state Fe I atom [cm^2], summed over the excited
/// terms whose edges lie redward of the wavenumber.
fn iron_cross_section(wavenumber: fop, temperature: fop) -> fop {
    if wavenumber < IRON_MIN_WAVENUMBER {
        return 0.0;
    }
    let energy_scale = HPLANCK * CLIGHT / (KBOLTZMANN * temperature);
    IRON_TERMS
        .iter()
        .filter(|(_, _, edge)| *edge < wavenumber)
        .map(|&(weight, energy, edge)| {
            let detuning = (edge + 3000.0 - wavenumber) / (0.1 * edge);
            3.0e-18 / (1.0 + detuning.powi(4)) * weight * fop::exp(-energy * energy_scale)
        })
        .sum()
}

/// Bound-free extinction [1/cm] of all metal absorbers, corrected for
/// stimulated emission.
pub fn metal_bound_free(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    let metals = &absorbers.metals;
    let temperature = absorbers.temperature;
    let frequency = CLIGHT / point.wavelength;
    let wavenumber = 1.0 / point.wavelength;

    let mut extinction = carbon_cross_section(frequency, wavenumber, temperature)
        * metals.neutral_carbon
        + ionized_magnesium_cross_section(frequency, temperature) * metals.ionized_magnesium
        + aluminium_cross_section(frequency) * metals.neutral_aluminium
        + iron_cross_section(wavenumber, temperature) * metals.neutral_iron;

    if frequency >= PEACH_NEUTRAL_MIN_FREQUENCY {
        extinction += MAGNESIUM_TABLE.evaluate(frequency, temperature).exp()
            * metals.neutral_magnesium
            + 9.0
                * (-SILICON_TABLE.evaluate(frequency, temperature)).exp()
                * metals.neutral_silicon;
    }
    if frequency >= 7.6869872e14 {
        extinction += 6.0
            * IONIZED_SILICON_TABLE.evaluate(frequency, temperature).exp()
            * metals.ionized_silicon;
    }
    extinction * stimulated_emission_factor(absorbers.theta, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solar_metals() -> MetalAbsorbers {
        MetalAbsorbers {
            neutral_carbon: 1e12,
            neutral_magnesium: 2e11,
            ionized_magnesium: 2e12,
            neutral_aluminium: 1e9,
            neutral_silicon: 5e10,
            ionized_silicon: 5e11,
            neutral_iron: 5e9,
        }
    }

    fn absorbers(temperature: fop, metals: MetalAbsorbers) -> LocalAbsorbers {
        LocalAbsorbers::new(temperature, 1e13, 1e17, 1e13, 1e16, 1e12).with_metals(metals)
    }

    fn point(wavelength_nm: fop) -> SpectralPoint {
        SpectralPoint::new(wavelength_nm * 1e-7)
    }

    #[test]
    fn no_metals_give_no_absorption() {
        let absorbers = absorbers(6000.0, MetalAbsorbers::default());
        for &wavelength_nm in &[150.0, 350.0, 800.0] {
            assert_eq!(metal_bound_free(&absorbers, &point(wavelength_nm)), 0.0);
        }
    }

    #[test]
    fn absorption_vanishes_redward_of_all_edges() {
        let absorbers = absorbers(6000.0, solar_metals());
        assert_eq!(metal_bound_free(&absorbers, &point(1200.0)), 0.0);
        assert_eq!(iron_cross_section(1.0 / 600e-7, 6000.0), 0.0);
        assert!(iron_cross_section(1.0 / 300e-7, 6000.0) > 0.0);
    }

    #[test]
    fn aluminium_falls_with_fifth_power_of_frequency() {
        let edge = aluminium_cross_section(1.443e15);
        assert_relative_eq!(edge, 3.9e-16, max_relative = 1e-12);
        assert_relative_eq!(aluminium_cross_section(2.886e15), edge / 32.0, max_relative = 1e-12);
        assert_eq!(aluminium_cross_section(1.4e15), 0.0);
    }

    #[test]
    fn peach_cross_sections_grow_with_temperature() {
        let frequency = CLIGHT / 300e-7;
        let magnesium = |temperature| MAGNESIUM_TABLE.evaluate(frequency, temperature);
        let silicon = |temperature| SILICON_TABLE.evaluate(frequency, temperature);
        assert!(magnesium(8000.0) > magnesium(5000.0));
        assert!(silicon(8000.0) < silicon(5000.0));
        assert!(MAGNESIUM_TABLE.evaluate(frequency, 6000.0).is_finite());
        assert!(IONIZED_SILICON_TABLE.evaluate(frequency, 6000.0).is_finite());
    }

    #[test]
    fn near_ultraviolet_absorption_exceeds_visible() {
        let absorbers = absorbers(6000.0, solar_metals());
        let ultraviolet = metal_bound_free(&absorbers, &point(300.0));
        let visible = metal_bound_free(&absorbers, &point(600.0));
        assert!(ultraviolet > 0.0);
        assert!(ultraviolet > visible);
    }

    #[test]
    fn ground_states_divide_out_partition_functions() {
        let log_temperature = fop::ln(5040.0);
        let metals = MetalAbsorbers::from_stage_densities(log_temperature, |_, _| 1e10);
        let log10_u_iron = ELEMENTS[IRON_IDX].log10_partition_functions[0][0];
        assert_relative_eq!(
            metals.neutral_iron,
            1e10 / fop::powf(10.0, log10_u_iron),
            max_relative = 1e-10
        );
        assert!(metals.neutral_magnesium <= 1e10);
    }
}

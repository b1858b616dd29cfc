//! Tabulated properties of the tracked chemical elements.
//!
//! Ionization energies are given in eV for stages I-IV, with 999999 eV marking
//! stages that do not exist. Partition functions are base 10 logarithms
//! evaluated at θ = 5040/T = 1 and θ = 0.5. Solar abundances follow
//! Grevesse & Sauval (1998) on the A12 scale.

/// Number of tracked elements.
pub const NUM_ELEMENTS: usize = 40;
/// Number of tracked ionization stages per element.
pub const NUM_STAGES: usize = 4;
/// Ionization energy used for stages that do not exist [eV].
pub const MISSING_STAGE_ENERGY: f64 = 999_999.0;

/// Reference data for a single element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementData {
    /// Chemical symbol.
    pub symbol: &'static str,
    pub atomic_number: u32,
    /// Atomic mass [amu].
    pub mass: f64,
    /// Solar abundance on the A12 scale, log10(N/N_H) + 12.
    pub solar_abundance: f64,
    /// Ionization energies from stage I, II, III and IV [eV].
    pub ionization_energies: [f64; NUM_STAGES],
    /// Base 10 logarithms of the partition function of each stage at θ = 1 and θ = 0.5.
    pub log10_partition_functions: [[f64; 2]; NUM_STAGES],
}

pub static ELEMENTS: [ElementData; NUM_ELEMENTS] = [
    ElementData {
        symbol: "H",
        atomic_number: 1,
        mass: 1.007,
        solar_abundance: 12.0,
        ionization_energies: [13.598434, 999999.0, 999999.0, 999999.0],
        log10_partition_functions: [[0.3, 0.3], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "He",
        atomic_number: 2,
        mass: 4.002,
        solar_abundance: 10.93,
        ionization_energies: [24.587387936, 54.41776311, 999999.0, 999999.0],
        log10_partition_functions: [[0.0, 0.0], [0.3, 0.3], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Li",
        atomic_number: 3,
        mass: 6.938,
        solar_abundance: 1.1,
        ionization_energies: [5.391714761, 75.6400937, 122.4543538, 999999.0],
        log10_partition_functions: [[0.32, 0.49], [0.0, 0.0], [0.301030, 0.301030], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Be",
        atomic_number: 4,
        mass: 9.012,
        solar_abundance: 1.4,
        ionization_energies: [9.322699, 18.211153, 153.896198, 217.7185766],
        log10_partition_functions: [[0.01, 0.13], [0.3, 0.3], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "B",
        atomic_number: 5,
        mass: 10.806,
        solar_abundance: 2.55,
        ionization_energies: [8.298019, 25.15483, 37.93058, 259.3715],
        log10_partition_functions: [[0.78, 0.78], [0.0, 0.0], [0.301030, 0.301030], [0.0, 0.0]],
    },
    ElementData {
        symbol: "C",
        atomic_number: 6,
        mass: 12.0096,
        solar_abundance: 8.52,
        ionization_energies: [11.2603, 24.3845, 47.88778, 64.49351],
        log10_partition_functions: [[0.97, 1.0], [0.78, 0.78], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "N",
        atomic_number: 7,
        mass: 14.006,
        solar_abundance: 7.92,
        ionization_energies: [14.53413, 29.60125, 47.4453, 77.4735],
        log10_partition_functions: [[0.61, 0.66], [0.95, 0.97], [0.778151, 0.778151], [0.0, 0.0]],
    },
    ElementData {
        symbol: "O",
        atomic_number: 8,
        mass: 15.999,
        solar_abundance: 8.83,
        ionization_energies: [13.618054, 35.12111, 54.93554, 77.4135],
        log10_partition_functions: [[0.94, 0.97], [0.6, 0.61], [0.954243, 0.954243], [0.0, 0.0]],
    },
    ElementData {
        symbol: "F",
        atomic_number: 9,
        mass: 18.998,
        solar_abundance: 4.56,
        ionization_energies: [17.42282, 34.97081, 62.708, 87.175],
        log10_partition_functions: [[0.75, 0.77], [0.92, 0.94], [0.602060, 0.602060], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Ne",
        atomic_number: 10,
        mass: 20.1797,
        solar_abundance: 8.08,
        ionization_energies: [21.56454, 40.96296, 63.42331, 97.19],
        log10_partition_functions: [[0.0, 0.0], [0.73, 0.75], [0.954243, 0.954243], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Na",
        atomic_number: 11,
        mass: 22.989,
        solar_abundance: 6.33,
        ionization_energies: [5.1390767, 47.28636, 71.62, 98.936],
        log10_partition_functions: [[0.31, 0.6], [0.0, 0.0], [0.778151, 0.778151], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Mg",
        atomic_number: 12,
        mass: 24.304,
        solar_abundance: 7.58,
        ionization_energies: [7.646235, 15.035267, 80.1436, 109.2654],
        log10_partition_functions: [[0.01, 0.15], [0.31, 0.31], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Al",
        atomic_number: 13,
        mass: 26.981,
        solar_abundance: 6.47,
        ionization_energies: [5.9857684, 18.82855, 28.44764, 119.9924],
        log10_partition_functions: [[0.77, 0.81], [0.0, 0.01], [0.301030, 0.301030], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Si",
        atomic_number: 14,
        mass: 28.084,
        solar_abundance: 7.55,
        ionization_energies: [8.151683, 16.345845, 33.493, 45.14179],
        log10_partition_functions: [[0.98, 1.04], [0.76, 0.77], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "P",
        atomic_number: 15,
        mass: 30.973,
        solar_abundance: 5.45,
        ionization_energies: [10.486686, 19.76949, 30.20264, 51.44387],
        log10_partition_functions: [[0.65, 0.79], [0.91, 0.94], [0.778151, 0.778151], [0.0, 0.0]],
    },
    ElementData {
        symbol: "S",
        atomic_number: 16,
        mass: 32.059,
        solar_abundance: 7.33,
        ionization_energies: [10.36001, 23.33788, 34.856, 47.222],
        log10_partition_functions: [[0.91, 0.94], [0.62, 0.72], [0.954243, 0.954243], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Cl",
        atomic_number: 17,
        mass: 35.446,
        solar_abundance: 5.5,
        ionization_energies: [12.967632, 23.81364, 39.8, 53.24],
        log10_partition_functions: [[0.72, 0.75], [0.89, 0.92], [0.602060, 0.602060], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Ar",
        atomic_number: 18,
        mass: 39.948,
        solar_abundance: 6.4,
        ionization_energies: [15.7596112, 27.62967, 40.735, 59.58],
        log10_partition_functions: [[0.0, 0.0], [0.69, 0.71], [0.954243, 0.954243], [0.0, 0.0]],
    },
    ElementData {
        symbol: "K",
        atomic_number: 19,
        mass: 39.0983,
        solar_abundance: 5.12,
        ionization_energies: [4.34066354, 31.625, 45.8031, 60.917],
        log10_partition_functions: [[0.34, 0.6], [0.0, 0.0], [0.778151, 0.778151], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Ca",
        atomic_number: 20,
        mass: 40.078,
        solar_abundance: 6.36,
        ionization_energies: [6.1131552, 11.871718, 50.91315, 67.273],
        log10_partition_functions: [[0.07, 0.55], [0.34, 0.54], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Sc",
        atomic_number: 21,
        mass: 44.955,
        solar_abundance: 3.17,
        ionization_energies: [6.56149, 12.79977, 24.756838, 73.4894],
        log10_partition_functions: [[1.08, 1.49], [1.36, 1.52], [1.0, 1.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Ti",
        atomic_number: 22,
        mass: 47.867,
        solar_abundance: 5.02,
        ionization_energies: [6.82812, 13.5755, 27.49171, 43.26717],
        log10_partition_functions: [[1.48, 1.88], [1.75, 1.92], [1.322219, 1.322219], [0.0, 0.0]],
    },
    ElementData {
        symbol: "V",
        atomic_number: 23,
        mass: 50.9415,
        solar_abundance: 4.0,
        ionization_energies: [6.746187, 14.62, 29.311, 46.709],
        log10_partition_functions: [[1.62, 2.03], [1.64, 1.89], [1.447158, 1.447158], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Cr",
        atomic_number: 24,
        mass: 51.9961,
        solar_abundance: 5.67,
        ionization_energies: [6.76651, 16.486305, 30.96, 49.16],
        log10_partition_functions: [[1.02, 1.51], [0.86, 1.22], [1.397940, 1.397940], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Mn",
        atomic_number: 25,
        mass: 54.938,
        solar_abundance: 5.39,
        ionization_energies: [7.4340377, 15.63999, 33.668, 51.2],
        log10_partition_functions: [[0.81, 1.16], [0.89, 1.13], [0.778151, 0.778151], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Fe",
        atomic_number: 26,
        mass: 55.845,
        solar_abundance: 7.5,
        ionization_energies: [7.9024678, 16.1992, 30.651, 54.91],
        log10_partition_functions: [[1.43, 1.74], [1.63, 1.8], [1.397940, 1.397940], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Co",
        atomic_number: 27,
        mass: 58.933,
        solar_abundance: 4.92,
        ionization_energies: [7.88101, 17.0844, 33.5, 51.27],
        log10_partition_functions: [[1.52, 1.76], [1.46, 1.66], [1.447158, 1.447158], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Ni",
        atomic_number: 28,
        mass: 58.6934,
        solar_abundance: 6.25,
        ionization_energies: [7.639877, 18.168837, 35.19, 54.9],
        log10_partition_functions: [[1.47, 1.6], [1.02, 1.28], [1.322219, 1.322219], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Cu",
        atomic_number: 29,
        mass: 63.546,
        solar_abundance: 4.21,
        ionization_energies: [7.72638, 20.29239, 36.841, 57.38],
        log10_partition_functions: [[0.36, 0.58], [0.01, 0.18], [1.0, 1.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Zn",
        atomic_number: 30,
        mass: 65.38,
        solar_abundance: 4.6,
        ionization_energies: [9.394197, 17.96439, 39.723, 59.573],
        log10_partition_functions: [[0.0, 0.03], [0.3, 0.3], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Ga",
        atomic_number: 31,
        mass: 69.723,
        solar_abundance: 2.88,
        ionization_energies: [5.9993018, 20.51514, 30.726, 63.241],
        log10_partition_functions: [[0.73, 0.77], [0.0, 0.0], [0.301030, 0.301030], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Kr",
        atomic_number: 36,
        mass: 83.798,
        solar_abundance: 3.25,
        ionization_energies: [13.9996049, 24.35984, 35.838, 50.85],
        log10_partition_functions: [[0.0, 0.0], [0.62, 0.66], [0.954243, 0.954243], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Rb",
        atomic_number: 37,
        mass: 85.4678,
        solar_abundance: 2.6,
        ionization_energies: [4.177128, 27.28954, 39.247, 52.2],
        log10_partition_functions: [[0.36, 0.7], [0.0, 0.0], [0.778151, 0.778151], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Sr",
        atomic_number: 38,
        mass: 87.62,
        solar_abundance: 2.97,
        ionization_energies: [5.6948672, 11.030276, 42.88353, 56.28],
        log10_partition_functions: [[0.1, 0.7], [0.34, 0.53], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Y",
        atomic_number: 39,
        mass: 88.905,
        solar_abundance: 2.24,
        ionization_energies: [6.21726, 12.224, 20.52441, 60.607],
        log10_partition_functions: [[1.08, 1.5], [1.18, 1.41], [1.0, 1.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Zr",
        atomic_number: 40,
        mass: 91.224,
        solar_abundance: 2.6,
        ionization_energies: [6.6339, 13.13, 23.17, 34.41836],
        log10_partition_functions: [[1.53, 1.99], [1.66, 1.91], [1.322219, 1.322219], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Nb",
        atomic_number: 41,
        mass: 92.906,
        solar_abundance: 1.42,
        ionization_energies: [6.75885, 14.32, 25.0, 37.611],
        log10_partition_functions: [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Cs",
        atomic_number: 55,
        mass: 132.905,
        solar_abundance: 1.13,
        ionization_energies: [3.893905548, 23.15745, 33.195, 43.0],
        log10_partition_functions: [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "Ba",
        atomic_number: 56,
        mass: 137.327,
        solar_abundance: 2.13,
        ionization_energies: [5.211664, 10.003826, 35.84, 47.03],
        log10_partition_functions: [[0.36, 0.92], [0.62, 0.85], [0.0, 0.0], [0.0, 0.0]],
    },
    ElementData {
        symbol: "La",
        atomic_number: 57,
        mass: 138.905,
        solar_abundance: 1.17,
        ionization_energies: [5.5769, 11.18492, 19.1773, 49.95],
        log10_partition_functions: [[1.41, 1.85], [1.47, 1.71], [1.0, 1.0], [0.0, 0.0]],
    },
];

//! Tabulated properties of the tracked diatomic molecules.

/// Number of tracked molecules.
pub const NUM_MOLECULES: usize = 18;

/// Temperatures at which molecular partition functions are tabulated [K].
pub const PARTITION_FUNCTION_TEMPERATURES: [f64; 5] = [130.0, 500.0, 3000.0, 8000.0, 10000.0];

/// Reference data for a diatomic molecule AB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoleculeData {
    pub label: &'static str,
    /// Symbols of the two constituent elements.
    pub constituents: [&'static str; 2],
    /// Zero-based ionization stage of the second constituent (1 for H2+).
    pub partner_stage: usize,
    /// Ground state dissociation energy [eV].
    pub dissociation_energy: f64,
    /// Partition function at the tabulated temperatures.
    pub partition_functions: [f64; 5],
}

pub static MOLECULES: [MoleculeData; NUM_MOLECULES] = [
    MoleculeData {
        label: "H2",
        constituents: ["H", "H"],
        partner_stage: 0,
        dissociation_energy: 4.4781,
        partition_functions: [8.83429e-1, 3.12970, 2.22684e1, 1.24852e2, 1.94871e2],
    },
    MoleculeData {
        label: "H2+",
        constituents: ["H", "H"],
        partner_stage: 1,
        dissociation_energy: 2.6507,
        partition_functions: [3.40918, 1.21361e1, 1.16205e2, 7.56297e2, 1.18728e3],
    },
    MoleculeData {
        label: "C2",
        constituents: ["C", "C"],
        partner_stage: 0,
        dissociation_energy: 6.296,
        partition_functions: [2.53157e1, 2.08677e2, 6.75852e3, 6.15554e4, 1.07544e5],
    },
    MoleculeData {
        label: "CH",
        constituents: ["C", "H"],
        partner_stage: 0,
        dissociation_energy: 3.465,
        partition_functions: [3.13181e1, 1.03985e2, 9.04412e2, 6.99662e3, 1.22732e4],
    },
    MoleculeData {
        label: "CO",
        constituents: ["C", "O"],
        partner_stage: 0,
        dissociation_energy: 11.092,
        partition_functions: [4.73391e1, 1.81659e2, 1.71706e3, 9.67381e3, 1.50689e4],
    },
    MoleculeData {
        label: "CN",
        constituents: ["C", "N"],
        partner_stage: 0,
        dissociation_energy: 7.76,
        partition_functions: [9.62592e1, 3.69706e2, 3.65207e3, 2.59277e4, 4.43257e4],
    },
    MoleculeData {
        label: "N2",
        constituents: ["N", "N"],
        partner_stage: 0,
        dissociation_energy: 9.759,
        partition_functions: [2.28805e1, 8.76988e1, 7.89979e2, 4.32734e3, 6.68047e3],
    },
    MoleculeData {
        label: "NH",
        constituents: ["N", "H"],
        partner_stage: 0,
        dissociation_energy: 3.47,
        partition_functions: [1.76430e1, 6.50991e1, 5.20090e2, 3.35774e3, 5.85785e3],
    },
    MoleculeData {
        label: "NO",
        constituents: ["N", "O"],
        partner_stage: 0,
        dissociation_energy: 6.497,
        partition_functions: [1.38024e2, 7.06108e2, 8.21159e3, 4.97309e4, 7.94214e4],
    },
    MoleculeData {
        label: "O2",
        constituents: ["O", "O"],
        partner_stage: 0,
        dissociation_energy: 5.116,
        partition_functions: [9.78808e1, 3.70966e2, 4.34427e3, 3.30098e4, 5.76869e4],
    },
    MoleculeData {
        label: "OH",
        constituents: ["O", "H"],
        partner_stage: 0,
        dissociation_energy: 4.392,
        partition_functions: [2.54704e1, 8.07652e1, 5.77700e2, 3.11647e3, 5.02698e3],
    },
    MoleculeData {
        label: "MgH",
        constituents: ["Mg", "H"],
        partner_stage: 0,
        dissociation_energy: 1.34,
        partition_functions: [3.22349e1, 1.24820e2, 1.69231e3, 1.72862e4, 3.16394e4],
    },
    MoleculeData {
        label: "SiO",
        constituents: ["Si", "O"],
        partner_stage: 0,
        dissociation_energy: 8.26,
        partition_functions: [1.25136e2, 4.95316e2, 6.63653e3, 4.56577e4, 8.57529e4],
    },
    MoleculeData {
        label: "CaH",
        constituents: ["Ca", "H"],
        partner_stage: 0,
        dissociation_energy: 1.70,
        partition_functions: [4.34133e1, 1.69692e2, 2.33105e3, 2.24220e4, 4.33139e4],
    },
    MoleculeData {
        label: "CaO",
        constituents: ["Ca", "O"],
        partner_stage: 0,
        dissociation_energy: 4.8,
        partition_functions: [2.03667e2, 8.94430e2, 2.08874e4, 5.21424e5, 1.08355e6],
    },
    MoleculeData {
        label: "TiO",
        constituents: ["Ti", "O"],
        partner_stage: 0,
        dissociation_energy: 6.87,
        partition_functions: [5.04547e2, 3.27426e3, 6.43969e4, 5.28755e5, 9.61395e5],
    },
    MoleculeData {
        label: "VO",
        constituents: ["V", "O"],
        partner_stage: 0,
        dissociation_energy: 6.4,
        partition_functions: [6.62935e2, 2.70111e3, 4.15856e4, 3.57467e5, 6.53298e5],
    },
    MoleculeData {
        label: "FeO",
        constituents: ["Fe", "O"],
        partner_stage: 0,
        dissociation_energy: 4.20,
        partition_functions: [1.85254e3, 7.52666e3, 1.23649e5, 9.55089e5, 1.58411e6],
    },
];

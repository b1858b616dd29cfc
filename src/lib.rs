//! The `photosphere` crate computes LTE model stellar atmospheres and their spectra.

#[macro_use]
pub mod error;

pub mod chemistry;
pub mod constants;
pub mod convection;
pub mod data;
pub mod depth;
pub mod depth_scale;
pub mod driver;
pub mod hydrostatics;
pub mod io;
pub mod line;
pub mod math;
pub mod opacity;
pub mod postprocess;
pub mod radiation;
pub mod reference;
pub mod temperature_correction;

#[cfg(feature = "cli")]
pub mod cli;

//! Command line interface.

pub mod build;
pub mod completions;
pub mod lines;
pub mod model;
pub mod run;
pub mod utils;

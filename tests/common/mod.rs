use clap::Command;
use lazy_static::lazy_static;
use photosphere::{
    cli,
    driver::{
        compute_atmosphere, AtmosphereConfig, AtmosphereStructure, IterationControl,
        StellarParameters,
    },
    exit_on_error,
    io::Verbosity,
};
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

lazy_static! {
    static ref COMMAND: Command<'static> = cli::build::build().no_binary_name(true);
    static ref BASE_OUTPUT_DIR: PathBuf = ["tests", "data", "output"].iter().collect();
}

pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    cli::run::run_with_args(COMMAND.clone().get_matches_from(args));
}

pub fn assert_file_exists<P: AsRef<Path>>(file_path: P) {
    let file_path = file_path.as_ref();
    assert!(
        file_path.exists(),
        "File {} does not exist",
        file_path.to_string_lossy()
    );
}

/// Structure configuration that keeps the tests fast.
pub fn test_config() -> AtmosphereConfig {
    AtmosphereConfig {
        iteration: IterationControl::Converge {
            tolerance: 1e-2,
            max_passes: 200,
        },
        num_opacity_wavelengths: 100,
        ..AtmosphereConfig::default()
    }
}

pub fn compute_structure(stellar: StellarParameters, config: AtmosphereConfig) -> AtmosphereStructure {
    exit_on_error!(
        compute_atmosphere(stellar, config, &Verbosity::Quiet),
        "Error: Could not compute structure: {}"
    )
}

pub fn solar_structure() -> AtmosphereStructure {
    compute_structure(StellarParameters::default(), test_config())
}

#[derive(Debug, Clone)]
pub struct Test {
    output_dir: PathBuf,
}

impl Test {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        let output_dir = BASE_OUTPUT_DIR.join(name.as_ref());
        exit_on_error!(
            fs::create_dir_all(&output_dir),
            "Error: Could not create output directory: {}"
        );
        Self { output_dir }
    }

    pub fn output_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.output_dir.join(file_name.as_ref())
    }
}

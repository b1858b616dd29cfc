//! File output and status message control.

pub mod utils;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use lazy_static::lazy_static;

lazy_static! {
    pub static ref DEFAULT_PROGRESS_STYLE: ProgressStyle =
        ProgressStyle::default_bar().template("Progress: {bar:40}  {percent}% | ETA: {eta}");
}

/// How much non-critical status information to print.
#[derive(Clone, Debug)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress(ProgressStyle),
}

impl Verbosity {
    /// Status messages and progress bars.
    pub fn progress() -> Self {
        Self::Progress(DEFAULT_PROGRESS_STYLE.clone())
    }

    pub fn print_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    pub fn show_progress(&self) -> bool {
        matches!(self, Self::Progress(_))
    }

    /// Creates a progress bar for the given number of steps, which is hidden
    /// unless progress is to be shown.
    pub fn create_progress_bar(&self, n_steps: usize) -> ProgressBar {
        match self {
            Self::Progress(style) => {
                let bar = ProgressBar::new(n_steps as u64);
                bar.set_style(style.clone());
                bar
            }
            _ => {
                let bar = ProgressBar::new(n_steps as u64);
                bar.set_draw_target(ProgressDrawTarget::hidden());
                bar
            }
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::Quiet
    }
}

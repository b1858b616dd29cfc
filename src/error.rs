//! Error types and macros for reporting errors.

use std::{error::Error, fmt};

/// Error produced when an atmosphere or spectrum computation can not be completed.
#[derive(Clone, Debug, PartialEq)]
pub enum AtmosphereError {
    /// A stellar or numerical parameter is outside its supported range.
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: String,
    },
    /// A quantity became non-finite or left its physical domain.
    NumericDomain {
        quantity: &'static str,
        value: f64,
        depth: Option<usize>,
        wavelength: Option<f64>,
    },
    /// A species label was not present in a reference table.
    LookupMiss { table: &'static str, label: String },
    /// The outer iteration did not reach the requested tolerance.
    ConvergenceNotReached {
        iterations: usize,
        residual: f64,
        tolerance: f64,
    },
}

pub type AtmosphereResult<T> = Result<T, AtmosphereError>;

impl AtmosphereError {
    pub fn invalid_parameter<S: Into<String>>(name: &'static str, value: f64, reason: S) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    pub fn numeric_domain(quantity: &'static str, value: f64, depth: Option<usize>) -> Self {
        Self::NumericDomain {
            quantity,
            value,
            depth,
            wavelength: None,
        }
    }

    pub fn lookup_miss<S: Into<String>>(table: &'static str, label: S) -> Self {
        Self::LookupMiss {
            table,
            label: label.into(),
        }
    }

    /// Attaches the given wavelength [cm] to a numeric domain error.
    pub fn at_wavelength(self, wavelength: f64) -> Self {
        match self {
            Self::NumericDomain {
                quantity,
                value,
                depth,
                ..
            } => Self::NumericDomain {
                quantity,
                value,
                depth,
                wavelength: Some(wavelength),
            },
            other => other,
        }
    }
}

impl fmt::Display for AtmosphereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "Invalid value {} for {}: {}", value, name, reason),
            Self::NumericDomain {
                quantity,
                value,
                depth,
                wavelength,
            } => {
                write!(f, "Invalid value {} for {}", value, quantity)?;
                if let Some(depth) = depth {
                    write!(f, " at depth index {}", depth)?;
                }
                if let Some(wavelength) = wavelength {
                    write!(f, " at wavelength {:.4} nm", wavelength * 1e7)?;
                }
                Ok(())
            }
            Self::LookupMiss { table, label } => {
                write!(f, "No entry for {} in {} table", label, table)
            }
            Self::ConvergenceNotReached {
                iterations,
                residual,
                tolerance,
            } => write!(
                f,
                "Structure not converged after {} iterations (relative change {:.3e} > {:.3e})",
                iterations, residual, tolerance
            ),
        }
    }
}

impl Error for AtmosphereError {}

/// Returns the given value if it is finite and strictly positive.
pub fn ensure_positive(
    quantity: &'static str,
    value: f64,
    depth: Option<usize>,
) -> AtmosphereResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AtmosphereError::numeric_domain(quantity, value, depth))
    }
}

/// Returns the given value if it is finite.
pub fn ensure_finite(
    quantity: &'static str,
    value: f64,
    depth: Option<usize>,
) -> AtmosphereResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AtmosphereError::numeric_domain(quantity, value, depth))
    }
}

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if $logic {
            true
        } else {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}

#[macro_export]
macro_rules! exit_on_none {
    ($option:expr, $($print_arg:tt)*) => {
        $option.unwrap_or_else(|| $crate::exit_with_error!($($print_arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_positive_rejects_invalid_values() {
        assert!(ensure_positive("temperature", 5000.0, Some(3)).is_ok());
        assert_eq!(
            ensure_positive("temperature", 0.0, Some(3)),
            Err(AtmosphereError::numeric_domain("temperature", 0.0, Some(3)))
        );
        assert!(ensure_positive("temperature", f64::NAN, None).is_err());
        assert!(ensure_finite("opacity", f64::INFINITY, None).is_err());
    }

    #[test]
    fn numeric_domain_message_includes_context() {
        let err = AtmosphereError::numeric_domain("opacity", f64::NAN, Some(7)).at_wavelength(5e-5);
        let message = err.to_string();
        assert!(message.contains("depth index 7"));
        assert!(message.contains("500.0000 nm"));
    }
}

//! Numeric tolerance shared by the inclusion predicates and the inverse map.

use crate::locate_error::LocateError;
use serde::{Deserialize, Serialize};

/// Characteristic size of the reference domains (`[-1, 1]` has extent 2).
pub const REFERENCE_EXTENT: f64 = 2.0;

/// Default tolerance: a small multiple of machine epsilon scaled by the reference extent.
pub const DEFAULT_TOLERANCE: f64 = 100.0 * f64::EPSILON * REFERENCE_EXTENT;

/// Upper bound on accepted tolerances.
pub const MAX_TOLERANCE: f64 = 0.1;

/// Default Newton iteration budget for the inverse map.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// A validated tolerance: finite and in `(0, MAX_TOLERANCE)`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    /// Validate and wrap a tolerance value.
    pub fn new(value: f64) -> Result<Self, LocateError> {
        if value.is_finite() && value > 0.0 && value < MAX_TOLERANCE {
            Ok(Self(value))
        } else {
            Err(LocateError::InvalidTolerance(value))
        }
    }

    /// The raw tolerance value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = LocateError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Tolerance::new(value)
    }
}

impl From<Tolerance> for f64 {
    fn from(tol: Tolerance) -> f64 {
        tol.0
    }
}

/// Per-call configuration for physical-space classification.
///
/// Deserializes from partial documents; missing fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateOptions {
    /// Inclusion slack and inverse-map convergence threshold.
    pub tolerance: Tolerance,
    /// Newton iteration budget per point.
    pub max_iterations: usize,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl LocateOptions {
    /// Default options with the given tolerance.
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Check the iteration budget; the tolerance is valid by construction.
    pub fn validate(&self) -> Result<(), LocateError> {
        if self.max_iterations == 0 {
            return Err(LocateError::InvalidIterationLimit(self.max_iterations));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_values() {
        for bad in [0.0, -1e-6, f64::NAN, f64::INFINITY, 0.5] {
            assert!(matches!(
                Tolerance::new(bad),
                Err(LocateError::InvalidTolerance(_))
            ));
        }
        assert_eq!(Tolerance::new(1e-8).unwrap().value(), 1e-8);
    }

    #[test]
    fn zero_iteration_budget_is_invalid() {
        let options = LocateOptions {
            max_iterations: 0,
            ..LocateOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(LocateError::InvalidIterationLimit(0))
        );
        assert!(LocateOptions::default().validate().is_ok());
    }

    #[test]
    fn default_is_small() {
        let tol = Tolerance::default().value();
        assert!(tol > 0.0 && tol < 1e-12);
    }
}

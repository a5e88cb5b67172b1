//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from the Newton-Raphson solver
//! - `ShapeError`: Dimension mismatches between points, values, and Jacobians
//! - `ConfigError`: Invalid solver configuration values

use std::convert::Infallible;
use thiserror::Error;

fn radius_message(distance: &f64, radius_max: &f64) -> String {
    if distance.is_finite() {
        format!(
            "Solution lies {} from the initial guess, outside radius_max = {}; try a new guess",
            distance, radius_max
        )
    } else {
        format!(
            "Estimate is not finite, so it cannot lie within radius_max = {}; try a new guess",
            radius_max
        )
    }
}

/// Dimension mismatch between two objects that must agree.
///
/// Raised when `f(x)` returns a value with a different dimension than `x`,
/// when a Jacobian is not `n×n`, or when matrix rows are ragged.
///
/// # Examples
/// ```
/// use newton_core::types::ShapeError;
///
/// let err = ShapeError::new("f(x) dimension", 2, 3);
/// assert_eq!(format!("{}", err), "Shape mismatch in f(x) dimension: expected 2, found 3");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Shape mismatch in {context}: expected {expected}, found {found}")]
pub struct ShapeError {
    /// What was being measured
    pub context: &'static str,
    /// Required dimension
    pub expected: usize,
    /// Observed dimension
    pub found: usize,
}

impl ShapeError {
    /// Create a shape error.
    pub fn new(context: &'static str, expected: usize, found: usize) -> Self {
        Self {
            context,
            expected,
            found,
        }
    }
}

/// Invalid solver configuration.
///
/// # Examples
/// ```
/// use newton_core::types::error::ConfigError;
///
/// let err = ConfigError::InvalidTolerance(-1.0);
/// assert!(format!("{}", err).contains("tolerance"));
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Tolerance is not a positive finite number.
    #[error("Invalid tolerance {0}: must be positive")]
    InvalidTolerance(f64),

    /// Finite-difference step is not a positive finite number.
    #[error("Invalid step size {0}: must be positive")]
    InvalidStepSize(f64),

    /// Trust radius is not a positive number.
    #[error("Invalid radius_max {0}: must be positive")]
    InvalidRadius(f64),

    /// Iteration budget is zero.
    #[error("Invalid max_iterations: must be > 0")]
    ZeroIterations,
}

/// Errors from the Newton-Raphson solver.
///
/// The type parameter `E` is the error type of a fallible residual or
/// Jacobian function. Solvers built from plain closures use
/// [`Infallible`].
///
/// # Variants
/// - `MaxIterationsExceeded`: `‖f(x)‖` never dropped below the tolerance
/// - `RadiusExceeded`: the final estimate lies outside `radius_max` of `x0`
/// - `SingularSystem`: the Newton linear system could not be solved
/// - `ShapeMismatch`: inconsistent dimensions between `x`, `f(x)`, and `J`
/// - `Evaluation`: the user function failed; carried unmodified
/// - `InvalidConfig`: the configuration failed validation
///
/// # Examples
/// ```
/// use newton_core::types::SolverError;
///
/// let err: SolverError = SolverError::MaxIterationsExceeded {
///     iterations: 20,
///     residual_norm: 13.0,
/// };
/// assert!(format!("{}", err).contains("20 iterations"));
/// assert!(err.is_max_iterations_exceeded());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError<E = Infallible> {
    /// Solver failed to converge within the iteration budget.
    #[error(
        "Failed to converge after {iterations} iterations (|f(x)| = {residual_norm}); \
         maybe there are no roots"
    )]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// `‖f(x)‖` at the last estimate
        residual_norm: f64,
    },

    /// Final estimate lies farther from the initial guess than allowed, or
    /// is not finite.
    #[error("{}", radius_message(.distance, .radius_max))]
    RadiusExceeded {
        /// `‖x − x0‖` of the final estimate
        distance: f64,
        /// Configured trust radius
        radius_max: f64,
    },

    /// Linear solve against a numerically singular, non-zero Jacobian.
    #[error("Singular Jacobian system at iteration {iteration}")]
    SingularSystem {
        /// Iteration at which the solve failed
        iteration: usize,
    },

    /// Inconsistent dimensions between point, value, and Jacobian.
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeError),

    /// The residual or Jacobian function returned an error.
    #[error("Function evaluation failed: {0}")]
    Evaluation(#[source] E),

    /// The solver configuration is invalid.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl<E> SolverError<E> {
    /// Check if this is an iteration budget failure.
    pub fn is_max_iterations_exceeded(&self) -> bool {
        matches!(self, Self::MaxIterationsExceeded { .. })
    }

    /// Check if this is a trust radius failure.
    pub fn is_radius_exceeded(&self) -> bool {
        matches!(self, Self::RadiusExceeded { .. })
    }

    /// Check if this is a shape mismatch.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch(_))
    }

    /// Check if this is an evaluation failure of the user function.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::Evaluation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug, Clone, PartialEq)]
    #[error("log of negative number")]
    struct DomainError;

    #[test]
    fn test_shape_error_display() {
        let err = ShapeError::new("Jacobian rows", 3, 2);
        let display = format!("{}", err);
        assert!(display.contains("Jacobian rows"));
        assert!(display.contains("expected 3"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_max_iterations_display() {
        let err: SolverError = SolverError::MaxIterationsExceeded {
            iterations: 10,
            residual_norm: 42.5,
        };
        let display = format!("{}", err);
        assert!(display.contains("10 iterations"));
        assert!(display.contains("42.5"));
        assert!(display.contains("no roots"));
    }

    #[test]
    fn test_radius_exceeded_display() {
        let err: SolverError = SolverError::RadiusExceeded {
            distance: 1.0,
            radius_max: 0.3,
        };
        let display = format!("{}", err);
        assert!(display.contains("radius_max = 0.3"));
        assert!(display.contains("lies 1 from the initial guess"));
        assert!(err.is_radius_exceeded());
        assert!(!err.is_max_iterations_exceeded());
    }

    #[test]
    fn test_radius_exceeded_display_non_finite() {
        let err: SolverError = SolverError::RadiusExceeded {
            distance: f64::NAN,
            radius_max: 0.3,
        };
        let display = format!("{}", err);
        assert!(display.contains("not finite"));
        assert!(display.contains("radius_max = 0.3"));
        assert!(!display.contains("NaN"));
    }

    #[test]
    fn test_from_shape_error() {
        let err: SolverError = ShapeError::new("f(x) dimension", 2, 1).into();
        assert!(err.is_shape_mismatch());
        assert_eq!(
            format!("{}", err),
            "Shape mismatch in f(x) dimension: expected 2, found 1"
        );
    }

    #[test]
    fn test_from_config_error() {
        let err: SolverError = ConfigError::ZeroIterations.into();
        assert_eq!(err, SolverError::InvalidConfig(ConfigError::ZeroIterations));
    }

    #[test]
    fn test_evaluation_keeps_source() {
        use std::error::Error as _;

        let err = SolverError::Evaluation(DomainError);
        assert!(err.is_evaluation());
        assert!(format!("{}", err).contains("log of negative number"));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("log of negative number"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err: SolverError = SolverError::SingularSystem { iteration: 3 };
        let _: &dyn std::error::Error = &err;
        assert!(format!("{}", err).contains("iteration 3"));
    }
}

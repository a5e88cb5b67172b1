//! Solver configuration types.

use num_traits::Float;

use crate::types::error::ConfigError;

/// Finite-difference scheme used when no analytical Jacobian is supplied.
///
/// # Variants
///
/// - `Forward`: one-sided difference, `n + 1` evaluations of `f` (default)
/// - `Central`: centred difference, `2n` evaluations, second-order accurate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DifferenceScheme {
    /// `(f(x + dx) − f(x)) / dx`
    #[default]
    Forward,
    /// `(f(x + dx) − f(x − dx)) / (2dx)`
    Central,
}

/// Configuration for the Newton-Raphson solver.
///
/// Immutable once handed to a solver; the same configuration serves any
/// number of `solve` calls.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use newton_core::math::solvers::{DifferenceScheme, NewtonConfig};
///
/// // Default configuration
/// let config: NewtonConfig<f64> = NewtonConfig::default();
/// assert_eq!(config.max_iterations, 20);
/// assert!(config.radius_max.is_none());
///
/// // Builder style
/// let custom = NewtonConfig::new(1e-12, 100)
///     .with_step_size(1e-8)
///     .with_radius_max(0.5)
///     .with_difference(DifferenceScheme::Central);
/// assert_eq!(custom.radius_max, Some(0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NewtonConfig<T: Float> {
    /// Convergence tolerance on `‖f(x)‖`.
    ///
    /// The solver stops when `‖f(x)‖ < tolerance`.
    pub tolerance: T,

    /// Maximum number of Newton steps before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,

    /// Finite-difference step `dx`.
    ///
    /// Used for the approximate Jacobian and as the offset added to a
    /// zero-norm Jacobian.
    pub step_size: T,

    /// Maximum accepted distance `‖x − x0‖` between the solution and the
    /// initial guess. `None` disables the check.
    pub radius_max: Option<T>,

    /// Finite-difference scheme.
    pub difference: DifferenceScheme,
}

/// Convert an `f64` constant; a failed conversion yields zero, which
/// [`NewtonConfig::validate`] rejects.
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::zero)
}

impl<T: Float> Default for NewtonConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-6
    /// - `max_iterations`: 20
    /// - `step_size`: 1e-6
    /// - `radius_max`: None
    /// - `difference`: Forward
    fn default() -> Self {
        Self {
            tolerance: constant(1e-6),
            max_iterations: 20,
            step_size: constant(1e-6),
            radius_max: None,
            difference: DifferenceScheme::Forward,
        }
    }
}

impl<T: Float> NewtonConfig<T> {
    /// Create a configuration with the given tolerance and iteration budget.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use newton_core::math::solvers::NewtonConfig;
    ///
    /// let config = NewtonConfig::new(1e-15, 4);
    /// assert_eq!(config.max_iterations, 4);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Tight tolerance (1e-14) and a large budget (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: constant(1e-14),
            max_iterations: 500,
            ..Self::default()
        }
    }

    /// Relaxed tolerance (1e-4) and a small budget (10).
    pub fn fast() -> Self {
        Self {
            tolerance: constant(1e-4),
            max_iterations: 10,
            ..Self::default()
        }
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the finite-difference step.
    pub fn with_step_size(mut self, step_size: T) -> Self {
        self.step_size = step_size;
        self
    }

    /// Bound the solution to a ball of this radius around the initial guess.
    pub fn with_radius_max(mut self, radius_max: T) -> Self {
        self.radius_max = Some(radius_max);
        self
    }

    /// Set the finite-difference scheme.
    pub fn with_difference(mut self, difference: DifferenceScheme) -> Self {
        self.difference = difference;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let as_f64 = |v: T| v.to_f64().unwrap_or(f64::NAN);

        if !(self.tolerance > T::zero()) {
            return Err(ConfigError::InvalidTolerance(as_f64(self.tolerance)));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !(self.step_size > T::zero() && self.step_size.is_finite()) {
            return Err(ConfigError::InvalidStepSize(as_f64(self.step_size)));
        }
        if let Some(radius) = self.radius_max {
            if !(radius > T::zero()) {
                return Err(ConfigError::InvalidRadius(as_f64(radius)));
            }
        }
        Ok(())
    }
}

//! Newton-Raphson solver for scalar and vector-valued functions.

use std::convert::Infallible;
use std::fmt;

use num_traits::{Float, Zero};
use tracing::{debug, warn};

use super::NewtonConfig;
use crate::math::jacobian::try_approximate_jacobian;
use crate::math::linalg::{distance, norm};
use crate::types::{IntoMatrix, Point, ShapeError, SolverError};

type Residual<'a, P, E> = Box<dyn Fn(&P) -> Result<P, E> + Send + Sync + 'a>;
type JacobianFn<'a, P, E> = Box<dyn Fn(&P) -> Result<<P as Point>::Jacobian, E> + Send + Sync + 'a>;

#[inline]
fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Result of a successful solve.
#[derive(Debug, Clone)]
pub struct Solution<P: Point> {
    /// Estimate with `‖f(root)‖ < tolerance`, same shape as the initial guess.
    pub root: P,
    /// Newton steps taken.
    pub iterations: usize,
    /// `‖f(root)‖`
    pub residual_norm: P::Scalar,
    /// Steps where a zero-norm Jacobian was shifted by the step size.
    pub regularized_steps: usize,
    /// Jacobian evaluations, analytical or finite-difference.
    pub jacobian_evaluations: usize,
}

/// Per-call bookkeeping; the solver itself is never mutated.
#[derive(Debug, Default)]
struct IterationState {
    iteration: usize,
    regularized_steps: usize,
    jacobian_evaluations: usize,
}

/// Newton-Raphson root finder.
///
/// Holds the function `f`, an optional analytical Jacobian `Df` and a
/// [`NewtonConfig`]. Solving never mutates the solver, so a shared
/// reference can serve concurrent solves from different initial guesses.
///
/// # Type Parameters
///
/// * `P` - Point type: `f64`/`f32` for scalar problems, `Vec<T>` or
///   `[T; N]` for systems
/// * `E` - Error type of a fallible `f` or `Df` ([`Infallible`] for plain
///   closures)
///
/// # Convergence
///
/// Convergence is quadratic near a simple root and linear near a multiple
/// root. The iteration may fail if:
/// - The function has no real root (`MaxIterationsExceeded`)
/// - The estimate wanders off (`RadiusExceeded` when `radius_max` is set)
/// - The Jacobian is rank-deficient but non-zero (`SingularSystem`)
///
/// A Jacobian with zero Frobenius norm is shifted element-wise by the step
/// size and the iteration continues; each occurrence is logged at `warn`
/// level and counted in [`Solution::regularized_steps`].
///
/// # Example
///
/// ```
/// use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
///
/// let config = NewtonConfig::new(1e-15, 4);
/// let solver = NewtonSolver::new(|x: &f64| 3.0 * x + 6.0, config);
///
/// // Already a root: returned unchanged
/// assert_eq!(solver.solve(-2.0).unwrap(), -2.0);
/// ```
pub struct NewtonSolver<'a, P: Point, E = Infallible> {
    f: Residual<'a, P, E>,
    df: Option<JacobianFn<'a, P, E>>,
    config: NewtonConfig<P::Scalar>,
}

impl<P: Point, E> fmt::Debug for NewtonSolver<'_, P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewtonSolver")
            .field("config", &self.config)
            .field("analytical_jacobian", &self.df.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a, P: Point> NewtonSolver<'a, P, Infallible> {
    /// Create a solver for an infallible `f`; the Jacobian is approximated
    /// by finite differences until [`with_jacobian`](Self::with_jacobian)
    /// attaches an analytical one.
    ///
    /// # Example
    ///
    /// ```
    /// use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
    ///
    /// let solver = NewtonSolver::new(|x: &f64| x * x - 4.0, NewtonConfig::default());
    /// assert!(!solver.has_analytical_jacobian());
    /// ```
    pub fn new<F>(f: F, config: NewtonConfig<P::Scalar>) -> Self
    where
        F: Fn(&P) -> P + Send + Sync + 'a,
    {
        Self {
            f: Box::new(move |x: &P| Ok::<P, Infallible>(f(x))),
            df: None,
            config,
        }
    }

    /// Attach an analytical Jacobian `Df`.
    ///
    /// For scalar points `Df` returns the derivative; for `[T; N]` an
    /// `N×N` array; for `Vec<T>` a [`Matrix`](crate::math::linalg::Matrix).
    pub fn with_jacobian<G>(mut self, df: G) -> Self
    where
        G: Fn(&P) -> P::Jacobian + Send + Sync + 'a,
    {
        self.df = Some(Box::new(move |x: &P| Ok::<P::Jacobian, Infallible>(df(x))));
        self
    }
}

impl<'a, P: Point, E> NewtonSolver<'a, P, E> {
    /// Create a solver for a fallible `f`.
    ///
    /// An `Err` from `f` aborts the solve and is returned unmodified inside
    /// [`SolverError::Evaluation`].
    ///
    /// # Example
    ///
    /// ```
    /// use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
    /// use newton_core::types::SolverError;
    ///
    /// let solver = NewtonSolver::try_new(
    ///     |x: &f64| if *x > 0.0 { Ok(x.ln()) } else { Err("log of non-positive number") },
    ///     NewtonConfig::default(),
    /// );
    /// assert!((solver.solve(2.0).unwrap() - 1.0).abs() < 1e-6);
    /// assert_eq!(
    ///     solver.solve(-1.0).unwrap_err(),
    ///     SolverError::Evaluation("log of non-positive number")
    /// );
    /// ```
    pub fn try_new<F>(f: F, config: NewtonConfig<P::Scalar>) -> Self
    where
        F: Fn(&P) -> Result<P, E> + Send + Sync + 'a,
    {
        Self {
            f: Box::new(f),
            df: None,
            config,
        }
    }

    /// Attach a fallible analytical Jacobian.
    pub fn with_try_jacobian<G>(mut self, df: G) -> Self
    where
        G: Fn(&P) -> Result<P::Jacobian, E> + Send + Sync + 'a,
    {
        self.df = Some(Box::new(df));
        self
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &NewtonConfig<P::Scalar> {
        &self.config
    }

    /// Whether an analytical Jacobian is attached.
    pub fn has_analytical_jacobian(&self) -> bool {
        self.df.is_some()
    }

    /// Find a root of `f` starting from `x0`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Estimate with `‖f(x)‖ < tolerance`, same shape as `x0`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Budget exhausted
    /// * `Err(SolverError::RadiusExceeded)` - Estimate outside `radius_max`
    /// * `Err(SolverError::SingularSystem)` - Rank-deficient Jacobian
    /// * `Err(SolverError::ShapeMismatch)` - Inconsistent dimensions
    /// * `Err(SolverError::Evaluation)` - `f` or `Df` failed
    /// * `Err(SolverError::InvalidConfig)` - Configuration out of range
    pub fn solve(&self, x0: P) -> Result<P, SolverError<E>> {
        self.solve_detailed(x0).map(|solution| solution.root)
    }

    /// Like [`solve`](Self::solve), also reporting iteration statistics.
    ///
    /// The radius constraint is checked once, after the iteration stops,
    /// and takes precedence over an exhausted budget.
    pub fn solve_detailed(&self, x0: P) -> Result<Solution<P>, SolverError<E>> {
        self.config.validate()?;

        let origin = x0.to_components();
        if origin.is_empty() {
            return Err(ShapeError::new("initial guess dimension", 1, 0).into());
        }
        let n = origin.len();

        let mut state = IterationState::default();
        let mut x = x0;

        let (residual, converged) = loop {
            let fx = self.evaluate(&x, n)?;
            let residual = norm(&fx);
            debug!(
                iteration = state.iteration,
                residual_norm = to_f64(residual),
                "Newton iteration"
            );

            if residual < self.config.tolerance {
                break (residual, true);
            }
            if state.iteration >= self.config.max_iterations {
                break (residual, false);
            }

            x = self.newton_step(&x, &fx, &mut state)?;
            state.iteration += 1;
        };

        if let Some(radius_max) = self.config.radius_max {
            let offset = distance(&x.to_components(), &origin);
            if offset.is_nan() || offset > radius_max {
                debug!(
                    distance = to_f64(offset),
                    radius_max = to_f64(radius_max),
                    "Estimate outside trust radius"
                );
                return Err(SolverError::RadiusExceeded {
                    distance: to_f64(offset),
                    radius_max: to_f64(radius_max),
                });
            }
        }

        if !converged {
            debug!(
                iterations = state.iteration,
                residual_norm = to_f64(residual),
                "Iteration budget exhausted"
            );
            return Err(SolverError::MaxIterationsExceeded {
                iterations: state.iteration,
                residual_norm: to_f64(residual),
            });
        }

        debug!(
            iterations = state.iteration,
            residual_norm = to_f64(residual),
            regularized_steps = state.regularized_steps,
            "Newton iteration converged"
        );
        Ok(Solution {
            root: x,
            iterations: state.iteration,
            residual_norm: residual,
            regularized_steps: state.regularized_steps,
            jacobian_evaluations: state.jacobian_evaluations,
        })
    }

    /// One Newton step from `x` given the already-computed `fx = f(x)`.
    ///
    /// Returns `x − h` where `J(x) · h = fx`. At an exact root `fx` is zero
    /// and `x` is returned unchanged.
    pub fn step(&self, x: &P, fx: &P) -> Result<P, SolverError<E>> {
        let fx = fx.to_components();
        self.newton_step(x, &fx, &mut IterationState::default())
    }

    /// One Newton step from `x`, evaluating `f(x)` first.
    pub fn step_from(&self, x: &P) -> Result<P, SolverError<E>> {
        let fx = self.evaluate(x, x.dim())?;
        self.newton_step(x, &fx, &mut IterationState::default())
    }

    fn evaluate(&self, x: &P, n: usize) -> Result<Vec<P::Scalar>, SolverError<E>> {
        let fx = (self.f)(x).map_err(SolverError::Evaluation)?.to_components();
        if fx.len() != n {
            return Err(ShapeError::new("f(x) dimension", n, fx.len()).into());
        }
        Ok(fx)
    }

    fn newton_step(
        &self,
        x: &P,
        fx: &[P::Scalar],
        state: &mut IterationState,
    ) -> Result<P, SolverError<E>> {
        let components = x.to_components();
        let n = components.len();
        if fx.len() != n {
            return Err(ShapeError::new("f(x) dimension", n, fx.len()).into());
        }

        let mut jacobian = match &self.df {
            Some(df) => df(x).map_err(SolverError::Evaluation)?.into_matrix()?,
            None => try_approximate_jacobian(
                |p: &P| (self.f)(p),
                x,
                Some(fx),
                self.config.step_size,
                self.config.difference,
            )?,
        };
        state.jacobian_evaluations += 1;

        if jacobian.rows() != n {
            return Err(ShapeError::new("Jacobian rows", n, jacobian.rows()).into());
        }
        if jacobian.cols() != n {
            return Err(ShapeError::new("Jacobian columns", n, jacobian.cols()).into());
        }

        if jacobian.frobenius_norm() == P::Scalar::zero() {
            warn!(
                iteration = state.iteration,
                step_size = to_f64(self.config.step_size),
                "Singular Jacobian with zero norm; adjusting by the step size"
            );
            jacobian.add_scalar(self.config.step_size);
            state.regularized_steps += 1;
        }

        let h = jacobian.solve(fx).ok_or(SolverError::SingularSystem {
            iteration: state.iteration,
        })?;

        let next: Vec<P::Scalar> = components
            .iter()
            .zip(&h)
            .map(|(xi, hi)| *xi - *hi)
            .collect();
        P::from_components(&next).ok_or_else(|| ShapeError::new("Newton step", n, next.len()).into())
    }
}

/// Batch solving over independent initial guesses.
#[cfg(feature = "parallel")]
impl<P, E> NewtonSolver<'_, P, E>
where
    P: Point + Send + Sync,
    E: Send,
{
    /// Solve from every guess in parallel.
    ///
    /// Each guess is an independent solve on the same solver; results are
    /// returned in input order.
    ///
    /// # Example
    ///
    /// ```
    /// use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
    ///
    /// let solver = NewtonSolver::new(|x: &f64| x * x - 4.0, NewtonConfig::new(1e-10, 50));
    /// let roots = solver.solve_batch(&[1.0, -1.0]);
    ///
    /// assert!((roots[0].as_ref().unwrap() - 2.0).abs() < 1e-8);
    /// assert!((roots[1].as_ref().unwrap() + 2.0).abs() < 1e-8);
    /// ```
    pub fn solve_batch(&self, guesses: &[P]) -> Vec<Result<P, SolverError<E>>> {
        use rayon::prelude::*;

        guesses.par_iter().map(|x0| self.solve(x0.clone())).collect()
    }
}

/// AD-enabled construction for scalar `f64` problems.
#[cfg(feature = "num-dual-mode")]
impl<'a> NewtonSolver<'a, f64, Infallible> {
    /// Create a solver whose derivative comes from forward-mode automatic
    /// differentiation with `Dual64`.
    ///
    /// # Example
    ///
    /// ```
    /// use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
    /// use num_dual::Dual64;
    ///
    /// // Solve x² - 2 = 0 using AD
    /// let solver = NewtonSolver::from_dual(
    ///     |x: Dual64| x * x - Dual64::from(2.0),
    ///     NewtonConfig::new(1e-12, 50),
    /// );
    ///
    /// let root = solver.solve(1.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn from_dual<F>(f: F, config: NewtonConfig<f64>) -> Self
    where
        F: Fn(num_dual::Dual64) -> num_dual::Dual64 + Send + Sync + 'a,
    {
        use num_dual::Dual64;
        use std::sync::Arc;

        let value = Arc::new(f);
        let derivative = Arc::clone(&value);

        Self::new(move |x: &f64| (*value)(Dual64::from(*x)).re, config)
            // Seed the dual part with 1 to carry df/dx
            .with_jacobian(move |x: &f64| (*derivative)(Dual64::new(*x, 1.0)).eps)
    }
}

//! Catalogue of demonstration problems.
//!
//! Scalar problems run on `f64` points and systems on `[f64; 2]`, so the
//! catalogue exercises both the scalar and the vector path of the solver.

use clap::ValueEnum;
use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
use newton_core::types::{Point, ShapeError, SolverError};

/// A demonstration problem `f(x) = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Problem {
    /// `3x + 6`, root at −2
    Affine,
    /// `(x − 5)²`, double root at 5
    DoubleRoot,
    /// `x² + 13`, no real root
    NoRealRoot,
    /// `x·eˣ` from −1, where the derivative vanishes
    ExpTrap,
    /// `[4y, x]`, root at the origin
    LinearMap,
    /// `[x² − 4y, x² + y²]`, root at the origin
    Polynomial,
    /// `−x² + 3` from 0, where the slope is zero
    ZeroSlope,
}

/// Summary of a successful solve, flattened to components.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Root components
    pub root: Vec<f64>,
    /// Newton steps taken
    pub iterations: usize,
    /// `‖f(root)‖`
    pub residual_norm: f64,
    /// Zero-norm Jacobians shifted by the step size
    pub regularized_steps: usize,
    /// Jacobian evaluations
    pub jacobian_evaluations: usize,
}

fn run<P>(solver: NewtonSolver<'_, P>, x0: &[f64], dimension: usize) -> Result<Report, SolverError>
where
    P: Point<Scalar = f64>,
{
    let guess = P::from_components(x0)
        .ok_or_else(|| ShapeError::new("initial guess", dimension, x0.len()))?;
    let solution = solver.solve_detailed(guess)?;

    Ok(Report {
        root: solution.root.to_components(),
        iterations: solution.iterations,
        residual_norm: solution.residual_norm,
        regularized_steps: solution.regularized_steps,
        jacobian_evaluations: solution.jacobian_evaluations,
    })
}

impl Problem {
    /// Every catalogue entry, in display order.
    pub const ALL: [Problem; 7] = [
        Problem::Affine,
        Problem::DoubleRoot,
        Problem::NoRealRoot,
        Problem::ExpTrap,
        Problem::LinearMap,
        Problem::Polynomial,
        Problem::ZeroSlope,
    ];

    /// Command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Problem::Affine => "affine",
            Problem::DoubleRoot => "double-root",
            Problem::NoRealRoot => "no-real-root",
            Problem::ExpTrap => "exp-trap",
            Problem::LinearMap => "linear-map",
            Problem::Polynomial => "polynomial",
            Problem::ZeroSlope => "zero-slope",
        }
    }

    /// Human-readable formula.
    pub fn formula(&self) -> &'static str {
        match self {
            Problem::Affine => "f(x) = 3x + 6",
            Problem::DoubleRoot => "f(x) = (x - 5)^2",
            Problem::NoRealRoot => "f(x) = x^2 + 13",
            Problem::ExpTrap => "f(x) = x e^x",
            Problem::LinearMap => "f(x, y) = [4y, x]",
            Problem::Polynomial => "f(x, y) = [x^2 - 4y, x^2 + y^2]",
            Problem::ZeroSlope => "f(x) = -x^2 + 3",
        }
    }

    /// Number of unknowns.
    pub fn dimension(&self) -> usize {
        match self {
            Problem::LinearMap | Problem::Polynomial => 2,
            _ => 1,
        }
    }

    /// Initial guess used when `--x0` is not given.
    pub fn default_guess(&self) -> Vec<f64> {
        match self {
            Problem::Affine | Problem::DoubleRoot => vec![0.0],
            Problem::NoRealRoot => vec![1.0],
            Problem::ExpTrap => vec![-1.0],
            Problem::LinearMap => vec![3.0, 15.0],
            Problem::Polynomial => vec![1.0, 4.0],
            Problem::ZeroSlope => vec![0.0],
        }
    }

    /// Solve from `x0`, with the analytical Jacobian if `analytical` is set
    /// and finite differences otherwise.
    pub fn solve(
        &self,
        x0: &[f64],
        config: NewtonConfig<f64>,
        analytical: bool,
    ) -> Result<Report, SolverError> {
        fn scalar<'a>(
            f: fn(f64) -> f64,
            df: fn(f64) -> f64,
            config: NewtonConfig<f64>,
            analytical: bool,
        ) -> NewtonSolver<'a, f64> {
            let solver = NewtonSolver::new(move |x: &f64| f(*x), config);
            if analytical {
                solver.with_jacobian(move |x: &f64| df(*x))
            } else {
                solver
            }
        }

        fn planar<'a>(
            f: fn(&[f64; 2]) -> [f64; 2],
            df: fn(&[f64; 2]) -> [[f64; 2]; 2],
            config: NewtonConfig<f64>,
            analytical: bool,
        ) -> NewtonSolver<'a, [f64; 2]> {
            let solver = NewtonSolver::new(f, config);
            if analytical {
                solver.with_jacobian(df)
            } else {
                solver
            }
        }

        let n = self.dimension();
        match self {
            Problem::Affine => run(scalar(|x| 3.0 * x + 6.0, |_| 3.0, config, analytical), x0, n),
            Problem::DoubleRoot => run(
                scalar(|x| (x - 5.0) * (x - 5.0), |x| 2.0 * (x - 5.0), config, analytical),
                x0,
                n,
            ),
            Problem::NoRealRoot => {
                run(scalar(|x| x * x + 13.0, |x| 2.0 * x, config, analytical), x0, n)
            }
            Problem::ExpTrap => run(
                scalar(|x| x * x.exp(), |x| (1.0 + x) * x.exp(), config, analytical),
                x0,
                n,
            ),
            Problem::LinearMap => run(
                planar(
                    |p| [4.0 * p[1], p[0]],
                    |_| [[0.0, 4.0], [1.0, 0.0]],
                    config,
                    analytical,
                ),
                x0,
                n,
            ),
            Problem::Polynomial => run(
                planar(
                    |p| [p[0] * p[0] - 4.0 * p[1], p[0] * p[0] + p[1] * p[1]],
                    |p| [[2.0 * p[0], -4.0], [2.0 * p[0], 2.0 * p[1]]],
                    config,
                    analytical,
                ),
                x0,
                n,
            ),
            Problem::ZeroSlope => {
                run(scalar(|x| -x * x + 3.0, |x| -2.0 * x, config, analytical), x0, n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_names_match_clap_values() {
        for problem in Problem::ALL {
            let value = problem.to_possible_value().unwrap();
            assert_eq!(value.get_name(), problem.name());
            assert_eq!(problem.default_guess().len(), problem.dimension());
        }
    }

    #[test]
    fn test_affine_default_guess() {
        let report = Problem::Affine
            .solve(&Problem::Affine.default_guess(), NewtonConfig::default(), false)
            .unwrap();
        assert_relative_eq!(report.root[0], -2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_linear_map_analytical() {
        let report = Problem::LinearMap
            .solve(&[3.0, 15.0], NewtonConfig::default(), true)
            .unwrap();
        assert_eq!(report.root, vec![0.0, 0.0]);
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn test_no_real_root_fails() {
        let err = Problem::NoRealRoot
            .solve(&[1.0], NewtonConfig::default(), true)
            .unwrap_err();
        assert!(err.is_max_iterations_exceeded());
    }

    #[test]
    fn test_exp_trap_with_radius() {
        let config = NewtonConfig::default().with_radius_max(0.3);
        let err = Problem::ExpTrap.solve(&[-1.0], config, true).unwrap_err();
        assert!(err.is_radius_exceeded());
    }

    #[test]
    fn test_zero_slope_regularized() {
        let config = NewtonConfig::new(1e-6, 50);
        let report = Problem::ZeroSlope.solve(&[0.0], config, true).unwrap();
        assert_eq!(report.regularized_steps, 1);
        assert_relative_eq!(report.root[0], -(3.0_f64.sqrt()), epsilon = 1e-6);
    }

    #[test]
    fn test_wrong_guess_dimension() {
        let err = Problem::Polynomial
            .solve(&[1.0], NewtonConfig::default(), true)
            .unwrap_err();
        assert!(err.is_shape_mismatch());
    }
}

//! Finite-difference Jacobian approximation.
//!
//! Column `j` of the Jacobian of `f` at `x` is estimated from a
//! perturbation of the `j`-th component by the step `dx`:
//!
//! ```text
//! forward:  J[:, j] = (f(x + dx·e_j) − f(x)) / dx             (n + 1 evaluations)
//! central:  J[:, j] = (f(x + dx·e_j) − f(x − dx·e_j)) / (2dx)  (2n evaluations)
//! ```
//!
//! For a scalar point this reduces to the ordinary difference quotient.

use std::convert::Infallible;

use tracing::trace;

use super::linalg::Matrix;
use crate::math::solvers::DifferenceScheme;
use crate::types::{Point, ShapeError, SolverError};

/// Forward-difference Jacobian of an infallible `f` at `x`.
///
/// # Example
///
/// ```
/// use newton_core::math::jacobian::approximate_jacobian;
///
/// let j = approximate_jacobian(|x: &f64| x * x, &3.0, 1e-6).unwrap();
/// assert!((j[(0, 0)] - 6.0).abs() < 1e-5);
/// ```
pub fn approximate_jacobian<P, F>(
    f: F,
    x: &P,
    dx: P::Scalar,
) -> Result<Matrix<P::Scalar>, SolverError>
where
    P: Point,
    F: Fn(&P) -> P,
{
    try_approximate_jacobian(
        |p: &P| Ok::<P, Infallible>(f(p)),
        x,
        None,
        dx,
        DifferenceScheme::Forward,
    )
}

/// Finite-difference Jacobian of a fallible `f` at `x`.
///
/// `fx` may carry the already-computed components of `f(x)`; the forward
/// scheme then reuses it as its baseline instead of evaluating `f(x)` again.
/// Errors from `f` are returned unmodified inside
/// [`SolverError::Evaluation`]; a value of the wrong dimension is a
/// [`SolverError::ShapeMismatch`].
pub fn try_approximate_jacobian<P, E, F>(
    f: F,
    x: &P,
    fx: Option<&[P::Scalar]>,
    dx: P::Scalar,
    scheme: DifferenceScheme,
) -> Result<Matrix<P::Scalar>, SolverError<E>>
where
    P: Point,
    F: Fn(&P) -> Result<P, E>,
{
    let base = x.to_components();
    let n = base.len();

    let eval = |components: &[P::Scalar]| -> Result<Vec<P::Scalar>, SolverError<E>> {
        let point = P::from_components(components)
            .ok_or(ShapeError::new("perturbed point", n, components.len()))?;
        let values = f(&point).map_err(SolverError::Evaluation)?.to_components();
        if values.len() != n {
            return Err(ShapeError::new("f(x) dimension", n, values.len()).into());
        }
        Ok(values)
    };

    let baseline = match (scheme, fx) {
        (DifferenceScheme::Forward, Some(fx)) if fx.len() == n => fx.to_vec(),
        (DifferenceScheme::Forward, Some(fx)) => {
            return Err(ShapeError::new("f(x) dimension", n, fx.len()).into())
        }
        (DifferenceScheme::Forward, None) => eval(&base)?,
        (DifferenceScheme::Central, _) => Vec::new(),
    };

    let mut jacobian = Matrix::zeros(n, n);
    let mut perturbed = base.clone();

    for j in 0..n {
        let xj = base[j];

        let column: Vec<P::Scalar> = match scheme {
            DifferenceScheme::Forward => {
                perturbed[j] = xj + dx;
                let f_plus = eval(&perturbed)?;
                f_plus
                    .iter()
                    .zip(&baseline)
                    .map(|(fp, f0)| (*fp - *f0) / dx)
                    .collect()
            }
            DifferenceScheme::Central => {
                perturbed[j] = xj + dx;
                let f_plus = eval(&perturbed)?;
                perturbed[j] = xj - dx;
                let f_minus = eval(&perturbed)?;
                f_plus
                    .iter()
                    .zip(&f_minus)
                    .map(|(fp, fm)| (*fp - *fm) / (dx + dx))
                    .collect()
            }
        };
        perturbed[j] = xj;

        for (i, value) in column.into_iter().enumerate() {
            jacobian[(i, j)] = value;
        }
    }

    trace!(dimension = n, ?scheme, "finite-difference Jacobian evaluated");
    Ok(jacobian)
}

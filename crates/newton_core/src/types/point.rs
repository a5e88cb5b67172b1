//! Points of the solver's search space.
//!
//! A [`Point`] is anything the solver can iterate on: a scalar (`f64`,
//! `f32`) is the dimension-1 case, `Vec<T>` and `[T; N]` are vectors.
//! The solver works on the flattened components and rebuilds a value of
//! the caller's type, so a scalar guess yields a scalar root and a vector
//! guess yields a vector of the same length.

use std::fmt::Debug;

use num_traits::Float;

use super::error::ShapeError;
use crate::math::linalg::Matrix;

/// A value the solver can iterate on.
///
/// # Example
///
/// ```
/// use newton_core::types::Point;
///
/// assert_eq!(2.5_f64.dim(), 1);
/// assert_eq!(vec![1.0_f64, 2.0, 3.0].dim(), 3);
/// assert_eq!(<[f64; 2]>::from_components(&[1.0, 2.0]), Some([1.0, 2.0]));
/// assert_eq!(f64::from_components(&[1.0, 2.0]), None);
/// ```
pub trait Point: Clone {
    /// Element type
    type Scalar: Float + Debug + Send + Sync;

    /// What an analytical Jacobian returns for this point type.
    type Jacobian: IntoMatrix<Self::Scalar>;

    /// Number of components.
    fn dim(&self) -> usize;

    /// Components in order.
    fn to_components(&self) -> Vec<Self::Scalar>;

    /// Rebuild a point from components; `None` if the length does not fit.
    fn from_components(components: &[Self::Scalar]) -> Option<Self>;
}

/// Conversion of an analytical Jacobian into a dense matrix.
pub trait IntoMatrix<T> {
    /// Convert into a [`Matrix`], rejecting ragged shapes.
    fn into_matrix(self) -> Result<Matrix<T>, ShapeError>;
}

macro_rules! impl_scalar_point {
    ($($t:ty),*) => {
        $(
            impl Point for $t {
                type Scalar = $t;
                type Jacobian = $t;

                #[inline]
                fn dim(&self) -> usize {
                    1
                }

                #[inline]
                fn to_components(&self) -> Vec<$t> {
                    vec![*self]
                }

                #[inline]
                fn from_components(components: &[$t]) -> Option<Self> {
                    match components {
                        [value] => Some(*value),
                        _ => None,
                    }
                }
            }

            impl IntoMatrix<$t> for $t {
                fn into_matrix(self) -> Result<Matrix<$t>, ShapeError> {
                    Ok(Matrix::from_scalar(self))
                }
            }
        )*
    };
}

impl_scalar_point!(f32, f64);

impl<T: Float + Debug + Send + Sync> Point for Vec<T> {
    type Scalar = T;
    type Jacobian = Matrix<T>;

    fn dim(&self) -> usize {
        self.len()
    }

    fn to_components(&self) -> Vec<T> {
        self.clone()
    }

    fn from_components(components: &[T]) -> Option<Self> {
        Some(components.to_vec())
    }
}

impl<T: Float + Debug + Send + Sync, const N: usize> Point for [T; N] {
    type Scalar = T;
    type Jacobian = [[T; N]; N];

    fn dim(&self) -> usize {
        N
    }

    fn to_components(&self) -> Vec<T> {
        self.to_vec()
    }

    fn from_components(components: &[T]) -> Option<Self> {
        <[T; N]>::try_from(components).ok()
    }
}

impl<T: Float> IntoMatrix<T> for Matrix<T> {
    fn into_matrix(self) -> Result<Matrix<T>, ShapeError> {
        Ok(self)
    }
}

impl<T: Float, const N: usize> IntoMatrix<T> for [[T; N]; N] {
    fn into_matrix(self) -> Result<Matrix<T>, ShapeError> {
        Matrix::from_rows(self.iter().map(|row| row.to_vec()).collect())
    }
}

impl<T: Float> IntoMatrix<T> for Vec<Vec<T>> {
    fn into_matrix(self) -> Result<Matrix<T>, ShapeError> {
        Matrix::from_rows(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Scalar Points
    // ========================================

    #[test]
    fn test_scalar_roundtrip_shape() {
        let x = -2.0_f64;
        assert_eq!(x.dim(), 1);
        assert_eq!(x.to_components(), vec![-2.0]);
        assert_eq!(f64::from_components(&[-2.0]), Some(-2.0));
    }

    #[test]
    fn test_scalar_rejects_wrong_length() {
        assert_eq!(f64::from_components(&[]), None);
        assert_eq!(f32::from_components(&[1.0, 2.0]), None);
    }

    #[test]
    fn test_scalar_jacobian_is_1x1() {
        let m = 4.0_f64.into_matrix().unwrap();
        assert_eq!(m.rows(), 1);
        assert_eq!(m.cols(), 1);
        assert_eq!(m[(0, 0)], 4.0);
    }

    // ========================================
    // Vector Points
    // ========================================

    #[test]
    fn test_vec_point() {
        let x = vec![3.0_f64, 15.0];
        assert_eq!(x.dim(), 2);
        assert_eq!(Vec::<f64>::from_components(&[1.0]), Some(vec![1.0]));
    }

    #[test]
    fn test_array_point() {
        let x = [1.0_f64, 2.0, 3.0];
        assert_eq!(x.dim(), 3);
        assert_eq!(<[f64; 3]>::from_components(&[1.0, 2.0]), None);
        assert_eq!(
            <[f64; 3]>::from_components(&[4.0, 5.0, 6.0]),
            Some([4.0, 5.0, 6.0])
        );
    }

    #[test]
    fn test_array_jacobian_into_matrix() {
        let m = [[0.0_f64, 4.0], [1.0, 0.0]].into_matrix().unwrap();
        assert_eq!(m[(0, 1)], 4.0);
        assert_eq!(m[(1, 0)], 1.0);
    }

    #[test]
    fn test_ragged_nested_vec_rejected() {
        let result = vec![vec![1.0_f64, 2.0], vec![3.0]].into_matrix();
        assert_eq!(result, Err(ShapeError::new("matrix row length", 2, 1)));
    }
}

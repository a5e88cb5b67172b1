//! Dense linear algebra for Newton steps.
//!
//! Provides a small row-major [`Matrix`] and the linear solve used for the
//! Newton update `J · h = f(x)`. Systems are tiny and dense, so Gaussian
//! elimination with partial pivoting is used throughout.

use std::ops::{Index, IndexMut};

use num_traits::Float;

use crate::types::ShapeError;

/// Dense row-major matrix.
///
/// # Example
///
/// ```
/// use newton_core::math::linalg::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![0.0, 4.0], vec![1.0, 0.0]]).unwrap();
/// let x = a.solve(&[60.0, 3.0]).unwrap();
/// assert_eq!(x, vec![3.0, 15.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> Matrix<T> {
    /// Matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// `n×n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// 1×1 matrix holding a scalar derivative.
    pub fn from_scalar(value: T) -> Self {
        Self {
            rows: 1,
            cols: 1,
            data: vec![value],
        }
    }

    /// Build from rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(ShapeError::new("matrix row length", n_cols, row.len()));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of the entries.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Frobenius norm `sqrt(Σ a_ij²)`.
    pub fn frobenius_norm(&self) -> T {
        norm(&self.data)
    }

    /// Add `value` to every entry.
    pub fn add_scalar(&mut self, value: T) {
        for a in &mut self.data {
            *a = *a + value;
        }
    }

    /// Solve `A · x = b` by Gaussian elimination with scaled partial
    /// pivoting.
    ///
    /// Returns `None` if the matrix is not square, `b` has the wrong length,
    /// a row is entirely zero, or a pivot vanishes relative to the largest
    /// entry of its own row. Rows are compared by their own scale, so
    /// equations in very different units still solve.
    #[allow(clippy::needless_range_loop)]
    pub fn solve(&self, b: &[T]) -> Option<Vec<T>> {
        let n = b.len();
        if n == 0 || self.rows != n || self.cols != n {
            return None;
        }

        // Augmented matrix [A | b] and the scale of each original row
        let mut aug: Vec<Vec<T>> = Vec::with_capacity(n);
        let mut scales: Vec<T> = Vec::with_capacity(n);
        for i in 0..n {
            let row = &self.data[i * n..(i + 1) * n];
            if row.iter().all(|a| *a == T::zero()) {
                return None;
            }
            let scale = row.iter().fold(T::zero(), |acc, a| acc.max(a.abs()));
            scales.push(if scale > T::zero() && scale.is_finite() {
                scale
            } else {
                T::one()
            });

            let mut row = row.to_vec();
            row.push(b[i]);
            aug.push(row);
        }

        // Forward elimination
        for col in 0..n {
            let mut max_row = col;
            let mut max_ratio = aug[col][col].abs() / scales[col];
            for row in (col + 1)..n {
                let ratio = aug[row][col].abs() / scales[row];
                if ratio > max_ratio {
                    max_ratio = ratio;
                    max_row = row;
                }
            }

            if max_ratio <= T::epsilon() {
                return None;
            }

            aug.swap(col, max_row);
            scales.swap(col, max_row);

            for row in (col + 1)..n {
                let factor = aug[row][col] / aug[col][col];
                for j in col..=n {
                    aug[row][j] = aug[row][j] - factor * aug[col][j];
                }
            }
        }

        // Back substitution
        let mut x = vec![T::zero(); n];
        for i in (0..n).rev() {
            let mut sum = aug[i][n];
            for j in (i + 1)..n {
                sum = sum - aug[i][j] * x[j];
            }
            x[i] = sum / aug[i][i];
        }

        Some(x)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(i < self.rows && j < self.cols, "matrix index out of bounds");
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(i < self.rows && j < self.cols, "matrix index out of bounds");
        &mut self.data[i * self.cols + j]
    }
}

/// Euclidean (L2) norm of a vector. For a single component this is `|v|`.
#[inline]
pub fn norm<T: Float>(v: &[T]) -> T {
    v.iter().fold(T::zero(), |acc, x| acc + *x * *x).sqrt()
}

/// Euclidean distance between two component vectors.
#[inline]
pub fn distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (x, y)| acc + (*x - *y) * (*x - *y))
        .sqrt()
}

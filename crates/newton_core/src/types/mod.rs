//! Point and error types shared by the solvers.
//!
//! This module provides:
//! - `point`: the [`Point`] trait (scalar and vector points) and [`IntoMatrix`]
//!   for analytical Jacobians
//! - `error`: structured errors for solver operations
//!
//! # Re-exports
//!
//! - [`Point`], [`IntoMatrix`] from `point`
//! - [`SolverError`], [`ShapeError`] from `error`

pub mod error;
pub mod point;

pub use error::{ShapeError, SolverError};
pub use point::{IntoMatrix, Point};

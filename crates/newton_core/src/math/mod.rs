//! Numerical building blocks for root finding.
//!
//! - [`linalg`]: dense matrices and the Newton linear solve
//! - [`jacobian`]: finite-difference Jacobian approximation
//! - [`solvers`]: the Newton-Raphson solver and its configuration

pub mod jacobian;
pub mod linalg;
pub mod solvers;

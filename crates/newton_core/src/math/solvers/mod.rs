//! Newton-Raphson root finding.
//!
//! [`NewtonSolver`] iterates
//!
//! ```text
//! J(x_n) · h = f(x_n)
//! x_{n+1}    = x_n − h
//! ```
//!
//! until `‖f(x)‖ < tolerance`, the iteration budget runs out, or the linear
//! system cannot be solved. `J` comes from an analytical Jacobian when one
//! is attached and from finite differences otherwise.
//!
//! ## Configuration
//!
//! [`NewtonConfig`] carries:
//! - `tolerance`: convergence tolerance on `‖f(x)‖` (default: 1e-6)
//! - `max_iterations`: iteration budget (default: 20)
//! - `step_size`: finite-difference step `dx` (default: 1e-6)
//! - `radius_max`: optional bound on `‖x − x0‖` (default: none)
//! - `difference`: [`DifferenceScheme`] for approximate Jacobians
//!
//! ## Examples
//!
//! ### Scalar root with an analytical derivative
//!
//! ```
//! use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = NewtonSolver::new(|x: &f64| x * x - 2.0, NewtonConfig::new(1e-12, 50))
//!     .with_jacobian(|x: &f64| 2.0 * x);
//!
//! let root = solver.solve(1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```
//!
//! ### Vector system with finite differences
//!
//! ```
//! use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
//!
//! // Intersection of the unit circle with the line x = y
//! let solver = NewtonSolver::new(
//!     |p: &Vec<f64>| vec![p[0] * p[0] + p[1] * p[1] - 1.0, p[0] - p[1]],
//!     NewtonConfig::new(1e-10, 50),
//! );
//!
//! let solution = solver.solve_detailed(vec![0.5, 0.5]).unwrap();
//! assert!((solution.root[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-8);
//! assert!(solution.iterations < 10);
//! ```

mod config;
mod newton_raphson;

// Re-export public types at module level
pub use config::{DifferenceScheme, NewtonConfig};
pub use newton_raphson::{NewtonSolver, Solution};

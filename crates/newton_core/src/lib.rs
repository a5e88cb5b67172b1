//! # newton_core: Newton-Raphson Root Finding
//!
//! newton_core finds a point `x` with `f(x) ≈ 0` for scalar- and
//! vector-valued functions using Newton's method:
//!
//! ```text
//! J(x_n) · h = f(x_n)
//! x_{n+1}    = x_n − h
//! ```
//!
//! The Jacobian `J` is either supplied analytically or approximated by
//! finite differences.
//!
//! ## Modules
//!
//! - `types::point`: the [`Point`](types::Point) abstraction unifying scalars
//!   (`f64`, `f32`) and vectors (`Vec<T>`, `[T; N]`)
//! - `types::error`: [`SolverError`](types::SolverError) and
//!   [`ShapeError`](types::ShapeError)
//! - `math::linalg`: dense square [`Matrix`](math::linalg::Matrix) and a
//!   partial-pivoting linear solve
//! - `math::jacobian`: finite-difference Jacobian approximation
//! - `math::solvers`: [`NewtonSolver`](math::solvers::NewtonSolver) and
//!   [`NewtonConfig`](math::solvers::NewtonConfig)
//!
//! ## Usage Examples
//!
//! ```rust
//! use newton_core::math::solvers::{NewtonConfig, NewtonSolver};
//!
//! // Scalar in, scalar out
//! let solver = NewtonSolver::new(|x: &f64| 3.0 * x + 6.0, NewtonConfig::default());
//! let root = solver.solve(0.0).unwrap();
//! assert!((root + 2.0).abs() < 1e-6);
//!
//! // Vector in, vector out
//! let solver = NewtonSolver::new(
//!     |x: &[f64; 2]| [x[0] + x[1] - 3.0, 2.0 * x[0] - x[1]],
//!     NewtonConfig::default(),
//! );
//! let root = solver.solve([0.0, 0.0]).unwrap();
//! assert!((root[0] - 1.0).abs() < 1e-6);
//! assert!((root[1] - 2.0).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): derivatives via `num_dual::Dual64`
//!   (`NewtonSolver::from_dual`)
//! - `parallel` (default): `NewtonSolver::solve_batch` over rayon
//! - `serde`: serialisation for `NewtonConfig` and `DifferenceScheme`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

//! Solve command: run one catalogue problem.

use tracing::info;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::problems::{Problem, Report};
use crate::Result;

/// Parse a comma-separated initial guess such as `-1` or `3,15`.
pub fn parse_guess(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| CliError::invalid_guess(input, format!("'{}' is not a number", part)))
        })
        .collect()
}

fn print_report(problem: Problem, report: &Report) {
    let root: Vec<String> = report.root.iter().map(|v| format!("{:.12}", v)).collect();

    println!("========================================");
    println!("{}: {}", problem.name(), problem.formula());
    println!("========================================");
    println!("{:<22} [{}]", "root", root.join(", "));
    println!("{:<22} {:e}", "|f(root)|", report.residual_norm);
    println!("{:<22} {}", "iterations", report.iterations);
    println!("{:<22} {}", "jacobian evaluations", report.jacobian_evaluations);
    if report.regularized_steps > 0 {
        println!("{:<22} {}", "regularized steps", report.regularized_steps);
    }
}

/// Solves `problem` from `x0` (or its default guess) and prints the result.
///
/// # Arguments
///
/// * `problem` - Catalogue entry to solve
/// * `x0` - Comma-separated initial guess
/// * `analytical` - Use the analytical Jacobian instead of finite differences
/// * `config` - Effective configuration
pub fn run(problem: Problem, x0: Option<&str>, analytical: bool, config: &CliConfig) -> Result<()> {
    let guess = match x0 {
        Some(input) => parse_guess(input)?,
        None => problem.default_guess(),
    };

    info!(
        problem = problem.name(),
        x0 = ?guess,
        analytical,
        difference = ?config.solver.difference,
        "Solving"
    );

    let report = problem.solve(&guess, config.solver, analytical)?;
    print_report(problem, &report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guess() {
        assert_eq!(parse_guess("-1").unwrap(), vec![-1.0]);
        assert_eq!(parse_guess("3, 15").unwrap(), vec![3.0, 15.0]);
        assert_eq!(parse_guess("1e-3,2.5").unwrap(), vec![1e-3, 2.5]);
    }

    #[test]
    fn test_parse_guess_rejects_garbage() {
        let err = parse_guess("1,x").unwrap_err();
        assert!(matches!(err, CliError::InvalidGuess { .. }));
        assert!(parse_guess("").is_err());
    }

    #[test]
    fn test_run_reports_solver_failure() {
        let config = CliConfig::default();
        let err = run(Problem::NoRealRoot, None, true, &config).unwrap_err();
        assert!(matches!(err, CliError::Solver(_)));
    }

    #[test]
    fn test_run_with_explicit_guess() {
        let config = CliConfig::default();
        assert!(run(Problem::Affine, Some("10"), false, &config).is_ok());
        assert!(run(Problem::LinearMap, Some("1"), true, &config).is_err());
    }
}

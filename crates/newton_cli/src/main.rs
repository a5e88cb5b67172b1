//! Newton CLI - Command Line Front End for newton_core
//!
//! Runs the Newton-Raphson solver on a catalogue of demonstration problems.
//!
//! # Commands
//!
//! - `newton solve <problem> [--x0 <guess>] [--analytical] [--central]` - Solve one problem
//! - `newton list` - Print the problem catalogue
//! - `newton check` - Print the effective configuration
//!
//! # Configuration
//!
//! Defaults, then `newton.toml` (or `--config <FILE>`), then `NEWTON_*`
//! environment variables, then command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use newton_core::math::solvers::DifferenceScheme;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod problems;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};
use problems::Problem;

/// Newton-Raphson root finder CLI
#[derive(Parser, Debug)]
#[command(name = "newton")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Convergence tolerance on |f(x)|
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Maximum number of Newton steps
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Finite-difference step
    #[arg(long, global = true)]
    step_size: Option<f64>,

    /// Maximum distance between the root and the initial guess
    #[arg(long, global = true)]
    radius_max: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve one catalogue problem
    Solve {
        /// Problem to solve
        #[arg(value_enum)]
        problem: Problem,

        /// Initial guess, comma-separated for systems (e.g. "3,15")
        #[arg(long, allow_hyphen_values = true)]
        x0: Option<String>,

        /// Use the analytical Jacobian instead of finite differences
        #[arg(long)]
        analytical: bool,

        /// Use central instead of forward differences
        #[arg(long)]
        central: bool,
    },

    /// List the problem catalogue
    List,

    /// Check the effective configuration
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        let central = matches!(cli.command, Commands::Solve { central: true, .. });
        CliArgs {
            config_file: cli.config.clone(),
            tolerance: cli.tolerance,
            max_iterations: cli.max_iterations,
            step_size: cli.step_size,
            radius_max: cli.radius_max,
            difference: central.then_some(DifferenceScheme::Central),
            log_level: cli.log_level.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());

    info!(
        log_level = %config.log_level,
        tolerance = config.solver.tolerance,
        max_iterations = config.solver.max_iterations,
        step_size = config.solver.step_size,
        radius_max = ?config.solver.radius_max,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Solve {
            problem,
            x0,
            analytical,
            ..
        } => commands::solve::run(problem, x0.as_deref(), analytical, &config),
        Commands::List => commands::list::run(),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve_with_negative_guess() {
        let cli = Cli::try_parse_from([
            "newton",
            "solve",
            "exp-trap",
            "--x0",
            "-1",
            "--analytical",
            "--central",
            "--radius-max",
            "0.3",
        ])
        .unwrap();

        let args = CliArgs::from(&cli);
        assert_eq!(args.radius_max, Some(0.3));
        assert_eq!(args.difference, Some(DifferenceScheme::Central));
        match cli.command {
            Commands::Solve {
                problem,
                x0,
                analytical,
                ..
            } => {
                assert_eq!(problem, Problem::ExpTrap);
                assert_eq!(x0.as_deref(), Some("-1"));
                assert!(analytical);
            }
            other => panic!("expected solve, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_flags_leave_overrides_unset() {
        // Environment variables are layered by build_config, not by clap
        let cli = Cli::try_parse_from(["newton", "list"]).unwrap();
        let args = CliArgs::from(&cli);
        assert_eq!(args.tolerance, None);
        assert_eq!(args.max_iterations, None);
        assert_eq!(args.log_level, None);
    }

    #[test]
    fn test_unknown_problem_rejected() {
        assert!(Cli::try_parse_from(["newton", "solve", "quartic"]).is_err());
    }
}

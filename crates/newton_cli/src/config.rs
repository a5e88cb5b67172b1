//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables,
//! and command-line flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use newton_core::math::solvers::{DifferenceScheme, NewtonConfig};
use serde::Deserialize;
use thiserror::Error;

/// Configuration file picked up from the working directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_FILE: &str = "newton.toml";

/// Environment variable names.
pub mod env_vars {
    /// Convergence tolerance
    pub const TOLERANCE: &str = "NEWTON_TOLERANCE";
    /// Iteration budget
    pub const MAX_ITERATIONS: &str = "NEWTON_MAX_ITERATIONS";
    /// Finite-difference step
    pub const STEP_SIZE: &str = "NEWTON_STEP_SIZE";
    /// Trust radius around the initial guess
    pub const RADIUS_MAX: &str = "NEWTON_RADIUS_MAX";
    /// Log level
    pub const LOG_LEVEL: &str = "NEWTON_LOG_LEVEL";
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable holds an unparsable value.
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Solver settings out of range.
    #[error(transparent)]
    Solver(#[from] newton_core::types::error::ConfigError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every Jacobian evaluation
    Trace,
    /// Every Newton iteration
    Debug,
    /// Command progress
    Info,
    /// Recoverable numerical trouble only
    #[default]
    Warn,
    /// Failures only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Effective CLI configuration.
///
/// ```toml
/// log_level = "debug"
///
/// [solver]
/// tolerance = 1e-10
/// max_iterations = 50
/// difference = "central"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Solver settings
    pub solver: NewtonConfig<f64>,
}

/// Parse one environment value, naming the variable on failure.
fn parse_env<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::EnvError(format!("{}={}: {}", name, value, e)))
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `lookup`, which maps a variable name to its
    /// value if set.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(env_vars::TOLERANCE) {
            self.solver.tolerance = parse_env(env_vars::TOLERANCE, &v)?;
        }
        if let Some(v) = lookup(env_vars::MAX_ITERATIONS) {
            self.solver.max_iterations = parse_env(env_vars::MAX_ITERATIONS, &v)?;
        }
        if let Some(v) = lookup(env_vars::STEP_SIZE) {
            self.solver.step_size = parse_env(env_vars::STEP_SIZE, &v)?;
        }
        if let Some(v) = lookup(env_vars::RADIUS_MAX) {
            self.solver.radius_max = Some(parse_env(env_vars::RADIUS_MAX, &v)?);
        }
        if let Some(v) = lookup(env_vars::LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&v)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(tolerance) = cli.tolerance {
            self.solver.tolerance = tolerance;
        }
        if let Some(max_iterations) = cli.max_iterations {
            self.solver.max_iterations = max_iterations;
        }
        if let Some(step_size) = cli.step_size {
            self.solver.step_size = step_size;
        }
        if let Some(radius_max) = cli.radius_max {
            self.solver.radius_max = Some(radius_max);
        }
        if let Some(difference) = cli.difference {
            self.solver.difference = difference;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver.validate()?;
        Ok(())
    }
}

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Tolerance override
    pub tolerance: Option<f64>,
    /// Iteration budget override
    pub max_iterations: Option<usize>,
    /// Step size override
    pub step_size: Option<f64>,
    /// Trust radius override
    pub radius_max: Option<f64>,
    /// Difference scheme override
    pub difference: Option<DifferenceScheme>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `newton.toml` if present)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = cli.config_file.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.is_file().then_some(default)
    });

    let mut config = match file {
        Some(path) => CliConfig::from_file(&path)?,
        None => CliConfig::default(),
    };

    config.apply_env_from(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

//! Check command: print the effective configuration.

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Render the effective configuration as key/value lines.
fn describe(config: &CliConfig) -> Vec<(&'static str, String)> {
    let solver = &config.solver;
    vec![
        ("log_level", config.log_level.to_string()),
        ("tolerance", format!("{:e}", solver.tolerance)),
        ("max_iterations", solver.max_iterations.to_string()),
        ("step_size", format!("{:e}", solver.step_size)),
        (
            "radius_max",
            solver
                .radius_max
                .map_or_else(|| "none".to_string(), |r| r.to_string()),
        ),
        ("difference", format!("{:?}", solver.difference).to_lowercase()),
    ]
}

/// Prints the configuration after merging file, environment and flags.
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Configuration validated");
    for (key, value) in describe(config) {
        println!("{:<16} {}", key, value);
    }
    Ok(())
}

//! List command: print the problem catalogue.

use crate::problems::Problem;
use crate::Result;

/// Format one catalogue row.
fn row(problem: Problem) -> String {
    let guess: Vec<String> = problem
        .default_guess()
        .iter()
        .map(|v| v.to_string())
        .collect();
    format!(
        "{:<14} {:<36} x0 = [{}]",
        problem.name(),
        problem.formula(),
        guess.join(", ")
    )
}

/// Prints every catalogue problem with its default initial guess.
pub fn run() -> Result<()> {
    println!("{:<14} {:<36} {}", "Problem", "Function", "Default guess");
    println!("{}", "-".repeat(68));
    for problem in Problem::ALL {
        println!("{}", row(problem));
    }
    Ok(())
}

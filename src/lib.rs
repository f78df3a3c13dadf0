// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

#[macro_use]
extern crate log;

pub mod config;
pub mod data;
pub mod generator;
pub mod level;
pub mod map;
pub mod map_formatter;
pub mod moves;
pub mod parser;
pub mod reachability;
pub mod scoring;
pub mod solution_formatter;
pub mod solver;
pub mod state;
pub mod vec2d;

mod fs;

use std::error::Error;
use std::time::Duration;

use crate::level::Level;
use crate::parser::MalformedLevel;
use crate::solver::{SolveOutcome, SolverOk, Verdict};

pub use crate::generator::generate_level;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    /// Heuristic search that gives up after `time_budget`.
    fn solve(&self, time_budget: Duration) -> SolverOk;

    /// Exhaustive BFS that gives up after `iteration_cap` expansions.
    fn verify(&self, iteration_cap: usize) -> SolverOk;
}

/// Parses `map` and looks for any solution within `time_budget`.
pub fn solve<S: AsRef<str>>(
    map: &[S],
    time_budget: Duration,
) -> Result<SolveOutcome, MalformedLevel> {
    let level = parser::parse(map)?;
    Ok(level.solve(time_budget).into_solve_outcome())
}

/// Parses `map` and decides whether it can be solved.
///
/// `Verdict::AssumedSolvable` means the search hit `iteration_cap` first.
pub fn is_solvable<S: AsRef<str>>(
    map: &[S],
    iteration_cap: usize,
) -> Result<Verdict, MalformedLevel> {
    let level = parser::parse(map)?;
    Ok(level.verify(iteration_cap).verdict())
}

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

/// Wall clock budget of the heuristic solver if the caller doesn't pick one.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(5000);

/// Expansions after which verification gives up and assumes the level is solvable.
pub const DEFAULT_ITERATION_CAP: usize = 50_000;

/// How often (in expanded states) the solver looks at the clock.
pub const CLOCK_CHECK_INTERVAL: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Best-first search ordered by moves so far plus a heuristic, with corner deadlock pruning.
    Solve,
    /// Plain BFS, no heuristic, no pruning.
    Verify,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::Solve => write!(f, "solve"),
            Mode::Verify => write!(f, "verify"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Level index at which difficulty reaches 1.0
    pub max_index: u32,
    pub difficulty_exponent: f64,
    pub min_size: u32,
    pub size_range: u32,
    pub min_boxes: u32,
    pub boxes_range: u32,
    pub min_pulls: u32,
    pub pulls_range: u32,
    /// Failed random placements before giving up
    pub placement_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_index: 100,
            difficulty_exponent: 0.8,
            min_size: 7,
            size_range: 5,
            min_boxes: 3,
            boxes_range: 7,
            min_pulls: 30,
            pulls_range: 470,
            placement_attempts: 1000,
        }
    }
}

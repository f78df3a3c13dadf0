use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::level::Level;
use crate::moves::{Move, Moves};
use crate::state::State;

/// A move that can't be made from the state it's applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalMove {
    pub index: usize,
    pub mov: Move,
}

impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal move '{}' at index {}", self.mov, self.index)
    }
}

impl Error for IllegalMove {}

/// Every state visited by `moves`, starting with the level's initial state.
///
/// A walk written as a push (or the other way around) is illegal too.
pub fn replay_states(level: &Level, moves: &Moves) -> Result<Vec<State>, IllegalMove> {
    let mut states = vec![level.state.clone()];
    for (index, &mov) in moves.iter().enumerate() {
        let last = &states[states.len() - 1];
        match last.step(&level.map, mov.dir()) {
            Some((next, actual)) if actual == mov => states.push(next),
            _ => return Err(IllegalMove { index, mov }),
        }
    }
    Ok(states)
}

/// The state after the last move.
pub fn replay(level: &Level, moves: &Moves) -> Result<State, IllegalMove> {
    let mut states = replay_states(level, moves)?;
    // there is always at least the initial state
    Ok(states.pop().unwrap_or_else(|| level.state.clone()))
}

pub struct SolutionFormatter<'a> {
    level: &'a Level,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    /// Without `include_steps` only the states after pushes are shown.
    pub fn new(level: &'a Level, moves: &'a Moves, include_steps: bool) -> Self {
        Self {
            level,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let states = match replay_states(self.level, self.moves) {
            Ok(states) => states,
            Err(err) => return writeln!(f, "{}", err),
        };

        let map = &self.level.map;
        writeln!(f, "{}", map.format_with_state(&states[0]))?;
        for (mov, state) in self.moves.iter().zip(&states[1..]) {
            if mov.is_push() || self.include_steps {
                writeln!(f, "{}", map.format_with_state(state))?;
            }
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The static part of a level - never changes during a search.
#[derive(Clone, PartialEq, Eq)]
pub struct GoalMap {
    pub grid: Vec2d<MapCell>,
    pub goals: Vec<Pos>,
    /// Row lengths as written, trailing floor included
    row_lens: Vec<usize>,
}

impl GoalMap {
    pub fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        let row_lens = vec![grid.cols(); grid.rows()];
        GoalMap {
            grid,
            goals,
            row_lens,
        }
    }

    /// Keeps the written length of ragged rows so rendering gives back the same text.
    pub(crate) fn with_row_lens(mut self, row_lens: Vec<usize>) -> Self {
        self.row_lens = row_lens;
        self
    }

    pub fn row_len(&self, r: usize) -> usize {
        self.row_lens.get(r).cloned().unwrap_or(0)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Goal)
    }

    /// Non-goal cell with walls on two perpendicular sides - a box there can never move again.
    pub fn is_dead_corner(&self, pos: Pos) -> bool {
        use crate::data::Dir::*;

        if self.grid.is_wall(pos) || self.is_goal(pos) {
            return false;
        }
        let up = self.grid.is_wall(pos + Up);
        let down = self.grid.is_wall(pos + Down);
        let left = self.grid.is_wall(pos + Left);
        let right = self.grid.is_wall(pos + Right);
        (up || down) && (left || right)
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, Some(state))
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", MapFormatter::new(self, None))
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

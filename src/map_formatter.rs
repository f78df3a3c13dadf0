use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    map: &'a GoalMap,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a GoalMap, state: Option<&'a State>) -> Self {
        Self { map, state }
    }

    /// One string per grid row, without the newlines.
    pub fn rows(&self) -> Vec<String> {
        let grid = &self.map.grid;
        let state_grid = self.state_grid();
        (0..grid.rows())
            .map(|r| {
                let mut row = String::new();
                for pos in self.row_positions(&state_grid, r) {
                    row.push(Self::glyph(grid[pos], state_grid[pos]));
                }
                row
            })
            .collect()
    }

    /// Entities outside the grid or inside walls have no glyph and are left out.
    fn state_grid(&self) -> Vec2d<Contents> {
        let grid = &self.map.grid;
        let mut state_grid = grid.scratchpad();
        if let Some(state) = self.state {
            let entities = state
                .boxes
                .iter()
                .map(|&b| (b, Contents::Box))
                .chain(Some((state.player_pos, Contents::Player)));
            for (pos, contents) in entities {
                if !grid.is_wall(pos) {
                    state_grid[pos] = contents;
                }
            }
        }
        state_grid
    }

    /// The row as long as it was written, longer only if something was moved into the padding.
    fn row_positions(&self, state_grid: &Vec2d<Contents>, r: usize) -> impl Iterator<Item = Pos> {
        let written = self.map.row_len(r) as i32;
        let r = r as i32;
        let last_entity = (written..self.map.grid.cols() as i32)
            .map(|c| Pos::new(r, c))
            .filter(|&pos| state_grid[pos] != Contents::Empty)
            .last();
        let end = last_entity.map_or(written, |pos| pos.c + 1);
        (0..end).map(move |c| Pos::new(r, c))
    }

    fn glyph(cell: MapCell, contents: Contents) -> char {
        match (cell, contents) {
            (MapCell::Floor, Contents::Empty) => ' ',
            (MapCell::Floor, Contents::Box) => '$',
            (MapCell::Floor, Contents::Player) => '@',
            (MapCell::Wall, _) => '#',
            (MapCell::Goal, Contents::Empty) => '.',
            (MapCell::Goal, Contents::Box) => '*',
            (MapCell::Goal, Contents::Player) => '+',
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The level text can't be turned into a playable level.
/// Never repaired - the caller has to fix the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedLevel {
    Empty,
    InvalidCell(usize, usize),
    MultiplePlayers,
    NoPlayer,
    BoxesGoals(usize, usize),
}

impl Display for MalformedLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MalformedLevel::Empty => write!(f, "Empty level"),
            MalformedLevel::InvalidCell(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            MalformedLevel::MultiplePlayers => write!(f, "More than one player"),
            MalformedLevel::NoPlayer => write!(f, "No player"),
            MalformedLevel::BoxesGoals(boxes, goals) => write!(
                f,
                "Different number of boxes ({}) and goals ({})",
                boxes, goals
            ),
        }
    }
}

impl Error for MalformedLevel {}

impl FromStr for Level {
    type Err = MalformedLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // trim so we can specify levels using raw strings more easily
        let level = s.trim_matches('\n').trim_end();
        let rows: Vec<_> = level.lines().collect();
        parse(&rows)
    }
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
///
/// Rows may have different lengths, missing cells are floor.
pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Level, MalformedLevel> {
    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in rows.iter().enumerate() {
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.as_ref().chars().enumerate() {
            let pos = Pos::new(r as i32, c as i32);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                '@' => {
                    if player_pos.is_some() {
                        return Err(MalformedLevel::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Floor
                }
                '+' => {
                    if player_pos.is_some() {
                        return Err(MalformedLevel::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '$' => {
                    boxes.push(pos);
                    MapCell::Floor
                }
                '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                ' ' => MapCell::Floor,
                _ => return Err(MalformedLevel::InvalidCell(r, c)),
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles)
    }

    if grid.iter().all(|row| row.is_empty()) {
        return Err(MalformedLevel::Empty);
    }
    let player_pos = player_pos.ok_or(MalformedLevel::NoPlayer)?;
    if boxes.len() != goals.len() {
        return Err(MalformedLevel::BoxesGoals(boxes.len(), goals.len()));
    }

    let row_lens = grid.iter().map(Vec::len).collect();
    Ok(Level::new(
        GoalMap::new(Vec2d::new(&grid), goals).with_row_lens(row_lens),
        State::new(player_pos, boxes),
    ))
}

use std::fmt::{self, Debug, Display, Formatter};

use crate::map::GoalMap;
use crate::map_formatter::MapFormatter;
use crate::state::State;

/// Travels alongside the map, never embedded in the level text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub number: Option<u32>,
    pub name: String,
    pub difficulty: String,
    pub description: String,
}

#[derive(Clone)]
pub struct Level {
    pub map: GoalMap,
    pub state: State,
    pub meta: Metadata,
}

impl Level {
    pub fn new(map: GoalMap, state: State) -> Self {
        Level {
            map,
            state,
            meta: Metadata::default(),
        }
    }

    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.map, Some(&self.state))
    }

    /// Inverse of parsing - `render(parse(rows)) == rows` for well-formed rows.
    pub fn render(&self) -> Vec<String> {
        self.xsb().rows()
    }

    pub fn box_cnt(&self) -> usize {
        self.state.boxes.len()
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}

//! Builds levels that are solvable by construction.
//!
//! Boxes start on the goals and the player then *pulls* them around.
//! Every pull is the exact inverse of a push so replaying the pulls backwards
//! as pushes always leads back to the solved configuration.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;
use crate::data::{Dir, MapCell, Pos, DIRECTIONS};
use crate::level::{Level, Metadata};
use crate::map::GoalMap;
use crate::reachability;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErr {
    /// Levels are numbered from 1
    ZeroIndex,
    /// Random placement of goals or the player kept colliding
    PlacementExhausted,
}

impl Display for GenerationErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            GenerationErr::ZeroIndex => write!(f, "Level index must be at least 1"),
            GenerationErr::PlacementExhausted => {
                write!(f, "Too many failed attempts to place goals or the player")
            }
        }
    }
}

impl Error for GenerationErr {}

/// Everything derived from the level index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub difficulty: f64,
    pub size: u32,
    pub box_cnt: u32,
    pub pull_steps: u32,
}

impl Params {
    pub fn new(index: u32, config: &GeneratorConfig) -> Result<Self, GenerationErr> {
        let d = difficulty(index, config)?;
        let scale = |min: u32, range: u32| min + (d * f64::from(range)).round() as u32;
        Ok(Params {
            difficulty: d,
            size: scale(config.min_size, config.size_range),
            box_cnt: scale(config.min_boxes, config.boxes_range),
            pull_steps: scale(config.min_pulls, config.pulls_range),
        })
    }
}

/// Concave curve from 0.0 at level 1 to 1.0 at `max_index`.
pub fn difficulty(index: u32, config: &GeneratorConfig) -> Result<f64, GenerationErr> {
    if index == 0 {
        return Err(GenerationErr::ZeroIndex);
    }
    if config.max_index <= 1 {
        return Ok(1.0);
    }
    let progress = f64::from(index - 1) / f64::from(config.max_index - 1);
    Ok(progress.powf(config.difficulty_exponent).max(0.0).min(1.0))
}

pub fn difficulty_label(index: u32) -> &'static str {
    match index {
        0..=10 => "Beginner",
        11..=25 => "Intermediate",
        26..=50 => "Advanced",
        51..=75 => "Expert",
        _ => "Master",
    }
}

/// Player stands on `player_req` next to the box, steps back to `player_dest`
/// and the box follows onto `player_req`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pull {
    box_index: usize,
    dir: Dir,
    player_req: Pos,
    player_dest: Pos,
}

#[derive(Debug)]
pub struct Generator<R> {
    rng: R,
    config: GeneratorConfig,
}

impl Generator<ChaCha8Rng> {
    pub fn from_seed(seed: u64) -> Self {
        Generator::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Generator::with_config(rng, GeneratorConfig::default())
    }

    pub fn with_config(rng: R, config: GeneratorConfig) -> Self {
        Generator { rng, config }
    }

    pub fn generate(&mut self, index: u32) -> Result<Level, GenerationErr> {
        self.generate_traced(index).map(|(level, _)| level)
    }

    /// Also returns the applied pulls, oldest first.
    fn generate_traced(&mut self, index: u32) -> Result<(Level, Vec<Pull>), GenerationErr> {
        let params = Params::new(index, &self.config)?;
        debug!("Generating level {} with {:?}", index, params);

        let grid = empty_room(params.size as usize);
        let goals = self.place_goals(&grid, params.box_cnt as usize)?;
        let player = self.place_player(&grid, &goals)?;

        let mut boxes = goals.clone();
        let mut player_pos = player;
        let mut applied = Vec::new();
        for _ in 0..params.pull_steps {
            let pulls = valid_pulls(&grid, &boxes, player_pos);
            let pull = match pulls.choose(&mut self.rng) {
                Some(&pull) => pull,
                None => break, // stuck - the scramble is just shorter
            };
            trace!("Pulling box {} {:?}", boxes[pull.box_index], pull.dir);
            boxes[pull.box_index] = pull.player_req;
            player_pos = pull.player_dest;
            applied.push(pull);
        }
        debug!(
            "Level {}: {} of {} pulls done",
            index,
            applied.len(),
            params.pull_steps
        );

        let mut grid = grid;
        for &goal in &goals {
            grid[goal] = MapCell::Goal;
        }
        let meta = Metadata {
            number: Some(index),
            name: format!("Generated Sector {}", index),
            difficulty: difficulty_label(index).to_string(),
            description: format!(
                "Procedurally generated challenge (S{} B{})",
                params.pull_steps, params.box_cnt
            ),
        };
        let level =
            Level::new(GoalMap::new(grid, goals), State::new(player_pos, boxes)).with_meta(meta);
        Ok((level, applied))
    }

    fn random_interior(&mut self, grid: &Vec2d<MapCell>) -> Pos {
        let r = self.rng.gen_range(1..grid.rows() - 1);
        let c = self.rng.gen_range(1..grid.cols() - 1);
        Pos::new(r as i32, c as i32)
    }

    fn interior_cnt(grid: &Vec2d<MapCell>) -> usize {
        grid.rows().saturating_sub(2) * grid.cols().saturating_sub(2)
    }

    fn place_goals(&mut self, grid: &Vec2d<MapCell>, cnt: usize) -> Result<Vec<Pos>, GenerationErr> {
        // room for the goals and the player
        if Self::interior_cnt(grid) < cnt + 1 {
            return Err(GenerationErr::PlacementExhausted);
        }

        let mut goals = Vec::with_capacity(cnt);
        let mut failed = 0;
        while goals.len() < cnt {
            let pos = self.random_interior(grid);
            if goals.contains(&pos) {
                failed += 1;
                if failed >= self.config.placement_attempts {
                    return Err(GenerationErr::PlacementExhausted);
                }
            } else {
                goals.push(pos);
            }
        }
        Ok(goals)
    }

    fn place_player(&mut self, grid: &Vec2d<MapCell>, goals: &[Pos]) -> Result<Pos, GenerationErr> {
        for _ in 0..self.config.placement_attempts {
            let pos = self.random_interior(grid);
            if !goals.contains(&pos) {
                return Ok(pos);
            }
        }
        Err(GenerationErr::PlacementExhausted)
    }
}

/// Seeded convenience wrapper - the same seed and index always give the same level.
pub fn generate_level(index: u32, seed: u64) -> Result<Level, GenerationErr> {
    Generator::from_seed(seed).generate(index)
}

fn empty_room(size: usize) -> Vec2d<MapCell> {
    let rows: Vec<Vec<MapCell>> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| {
                    if r == 0 || c == 0 || r == size - 1 || c == size - 1 {
                        MapCell::Wall
                    } else {
                        MapCell::Floor
                    }
                })
                .collect()
        })
        .collect();
    Vec2d::new(&rows)
}

/// All pulls executable from the current configuration, in a stable order.
fn valid_pulls(grid: &Vec2d<MapCell>, boxes: &[Pos], player_pos: Pos) -> Vec<Pull> {
    // all boxes (including the pulled one) block the walk to `player_req`
    let reachable = reachability::flood_fill(grid, boxes, player_pos);
    let free = |pos: Pos| !grid.is_wall(pos) && !boxes.contains(&pos);

    let mut pulls = Vec::new();
    for (box_index, &box_pos) in boxes.iter().enumerate() {
        for &dir in &DIRECTIONS {
            let player_req = box_pos + dir;
            let player_dest = player_req + dir;
            if free(player_req) && free(player_dest) && reachable[player_req] {
                pulls.push(Pull {
                    box_index,
                    dir,
                    player_req,
                    player_dest,
                });
            }
        }
    }
    pulls
}

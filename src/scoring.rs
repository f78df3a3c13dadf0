//! Points awarded for finishing a level, fewer moves than par earn more.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub par: u32,
    pub difficulty: f64,
}

const DEFAULT_CONFIG: LevelConfig = LevelConfig {
    par: 50,
    difficulty: 1.0,
};

const LEVEL_CONFIGS: [LevelConfig; 5] = [
    LevelConfig {
        par: 15,
        difficulty: 1.0,
    },
    LevelConfig {
        par: 25,
        difficulty: 1.1,
    },
    LevelConfig {
        par: 35,
        difficulty: 1.2,
    },
    LevelConfig {
        par: 40,
        difficulty: 1.3,
    },
    LevelConfig {
        par: 45,
        difficulty: 1.4,
    },
];

pub const UNDER_PAR_BONUS: u32 = 500;
pub const MIN_SCORE: u32 = 10;

/// Levels without their own entry share the default.
pub fn level_config(index: u32) -> LevelConfig {
    match index {
        1..=5 => LEVEL_CONFIGS[index as usize - 1],
        _ => DEFAULT_CONFIG,
    }
}

/// `1000 * difficulty * par / moves`, plus a bonus under par, never below `MIN_SCORE`.
///
/// Zero moves count as one.
pub fn score(index: u32, moves: usize) -> u32 {
    let config = level_config(index);
    let moves = moves.max(1) as f64;
    let par = f64::from(config.par);

    let mut points = (1000.0 * config.difficulty * (par / moves)).round() as u32;
    if moves < par {
        points += UNDER_PAR_BONUS;
    }
    points.max(MIN_SCORE)
}

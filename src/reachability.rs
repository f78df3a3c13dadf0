//! Which cells can the player get to without moving any box.

use std::collections::VecDeque;

use crate::data::{MapCell, Pos, DIRECTIONS};
use crate::vec2d::Vec2d;

fn box_grid(grid: &Vec2d<MapCell>, boxes: &[Pos]) -> Vec2d<bool> {
    let mut box_grid = grid.scratchpad();
    for &b in boxes {
        if grid.contains(b) {
            box_grid[b] = true;
        }
    }
    box_grid
}

fn is_blocked(grid: &Vec2d<MapCell>, box_grid: &Vec2d<bool>, pos: Pos) -> bool {
    grid.is_wall(pos) || box_grid[pos]
}

/// BFS over 4-neighborhood, walls, boxes and cells outside the grid block.
///
/// `start` is always marked reachable.
pub fn flood_fill(grid: &Vec2d<MapCell>, boxes: &[Pos], start: Pos) -> Vec2d<bool> {
    let box_grid = box_grid(grid, boxes);
    let mut reachable = grid.scratchpad();
    if !grid.contains(start) {
        return reachable;
    }

    reachable[start] = true;
    let mut to_visit = VecDeque::new();
    to_visit.push_back(start);

    while let Some(cur) = to_visit.pop_front() {
        for &next in &cur.neighbors() {
            if !is_blocked(grid, &box_grid, next) && !reachable[next] {
                reachable[next] = true;
                to_visit.push_back(next);
            }
        }
    }

    reachable
}

pub fn reachable_positions(grid: &Vec2d<MapCell>, boxes: &[Pos], start: Pos) -> Vec<Pos> {
    let reachable = flood_fill(grid, boxes, start);
    grid.positions().filter(|&pos| reachable[pos]).collect()
}

/// Same as `flood_fill` but stops as soon as `target` is found.
pub fn can_reach(grid: &Vec2d<MapCell>, boxes: &[Pos], start: Pos, target: Pos) -> bool {
    if start == target {
        return true;
    }
    if !grid.contains(start) {
        return false;
    }

    let box_grid = box_grid(grid, boxes);
    if is_blocked(grid, &box_grid, target) {
        return false;
    }

    let mut touched: Vec2d<bool> = grid.scratchpad();
    touched[start] = true;
    let mut to_visit = VecDeque::new();
    to_visit.push_back(start);

    while let Some(cur) = to_visit.pop_front() {
        for &dir in &DIRECTIONS {
            let next = cur + dir;
            if next == target {
                return true;
            }
            if !is_blocked(grid, &box_grid, next) && !touched[next] {
                touched[next] = true;
                to_visit.push_back(next);
            }
        }
    }

    false
}

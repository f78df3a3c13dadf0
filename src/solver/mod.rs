pub mod a_star;
pub mod budget;

use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

use fnv::FnvHashSet;
use typed_arena::Arena;

use crate::config::Mode;
use crate::data::DIRECTIONS;
use crate::level::Level;
use crate::map::GoalMap;
use crate::moves::Moves;
use crate::state::State;
use crate::vec2d::Vec2d;
use crate::Solve;

use self::a_star::{BestFirst, Fifo, Frontier, SearchNode, Stats};
use self::budget::{Budget, IterationCap, TimeBudget};

/// What the search itself found, independent of mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Moves),
    /// Every reachable state was visited, there is no solution.
    Exhausted,
    BudgetExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Moves),
    NoSolution,
    /// Ran out of time before deciding.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Solvable,
    Unsolvable,
    /// Hit the iteration cap, treated as solvable.
    AssumedSolvable,
}

impl Verdict {
    /// Only a full search proves a level unsolvable.
    pub fn is_acceptable(self) -> bool {
        self != Verdict::Unsolvable
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Verdict::Solvable => write!(f, "solvable"),
            Verdict::Unsolvable => write!(f, "unsolvable"),
            Verdict::AssumedSolvable => write!(f, "assumed solvable"),
        }
    }
}

pub struct SolverOk {
    pub outcome: SearchOutcome,
    pub stats: Stats,
    pub mode: Mode,
}

impl SolverOk {
    fn new(outcome: SearchOutcome, stats: Stats, mode: Mode) -> Self {
        Self {
            outcome,
            stats,
            mode,
        }
    }

    pub fn moves(&self) -> Option<&Moves> {
        match self.outcome {
            SearchOutcome::Found(ref moves) => Some(moves),
            _ => None,
        }
    }

    pub fn into_solve_outcome(self) -> SolveOutcome {
        match self.outcome {
            SearchOutcome::Found(moves) => SolveOutcome::Solved(moves),
            SearchOutcome::Exhausted => SolveOutcome::NoSolution,
            SearchOutcome::BudgetExceeded => SolveOutcome::Unknown,
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self.outcome {
            SearchOutcome::Found(_) => Verdict::Solvable,
            SearchOutcome::Exhausted => Verdict::Unsolvable,
            SearchOutcome::BudgetExceeded => Verdict::AssumedSolvable,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SearchOutcome::Found(ref moves) => writeln!(f, "{}: {}", self.mode, moves.move_cnt())?,
            SearchOutcome::Exhausted => writeln!(f, "{}: no solution", self.mode)?,
            SearchOutcome::BudgetExceeded => writeln!(f, "{}: budget exceeded", self.mode)?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, time_budget: Duration) -> SolverOk {
        search(self, Mode::Solve, TimeBudget::new(time_budget))
    }

    fn verify(&self, iteration_cap: usize) -> SolverOk {
        search(self, Mode::Verify, IterationCap(iteration_cap))
    }
}

/// Searches the state space of `level` for a state with every box on a goal.
///
/// `Mode::Solve` expands the lowest `moves + heuristic` first and never pushes
/// a box into a dead corner. `Mode::Verify` is a plain BFS so it returns a solution
/// with the fewest moves possible.
///
/// States are deduplicated when first generated, not when dequeued.
pub fn search<B: Budget>(level: &Level, mode: Mode, budget: B) -> SolverOk {
    debug!("Search called, mode: {}", mode);

    let arena = Arena::new();
    match mode {
        Mode::Solve => {
            let dead_corners = find_dead_corners(&level.map);
            run(
                &arena,
                level,
                mode,
                budget,
                BestFirst::default(),
                Some(&dead_corners),
                heuristic_push,
            )
        }
        Mode::Verify => run(
            &arena,
            level,
            mode,
            budget,
            Fifo::default(),
            None,
            |_, _| 0,
        ),
    }
}

fn run<'a, B, F, H>(
    arena: &'a Arena<SearchNode<'a>>,
    level: &Level,
    mode: Mode,
    mut budget: B,
    mut frontier: F,
    dead_corners: Option<&Vec2d<bool>>,
    heuristic: H,
) -> SolverOk
where
    B: Budget,
    F: Frontier<'a>,
    H: Fn(&GoalMap, &State) -> u32,
{
    let map = &level.map;
    let mut stats = Stats::new();
    let mut visited: FnvHashSet<&'a State> = FnvHashSet::default();

    let start: &'a SearchNode<'a> = arena.alloc(SearchNode::new(
        level.state.clone(),
        None,
        0,
        heuristic(map, &level.state),
    ));
    stats.add_created(0);
    visited.insert(&start.state);
    frontier.push(start);

    let mut expanded = 0;
    while let Some(cur) = frontier.pop() {
        if cur.state.is_solved(map) {
            stats.add_unique_visited(cur.dist);
            debug!("Solved, backtracking path");
            return SolverOk::new(SearchOutcome::Found(backtrack_moves(cur)), stats, mode);
        }

        if budget.exceeded(expanded) {
            debug!("Budget exceeded after {} states", expanded);
            return SolverOk::new(SearchOutcome::BudgetExceeded, stats, mode);
        }
        expanded += 1;

        if stats.add_unique_visited(cur.dist) {
            debug!("Visited new depth: {}", cur.dist);
            trace!("{:?}", stats);
        }

        for &dir in &DIRECTIONS {
            let (next_state, mov) = match cur.state.step(map, dir) {
                Some(step) => step,
                None => continue,
            };
            if let Some(dead_corners) = dead_corners {
                if mov.is_push() && dead_corners[next_state.player_pos() + dir] {
                    continue;
                }
            }
            if visited.contains(&next_state) {
                stats.add_reached_duplicate(cur.dist + 1);
                continue;
            }

            let h = heuristic(map, &next_state);
            let next: &'a SearchNode<'a> = arena.alloc(SearchNode::new(
                next_state,
                Some((cur, mov)),
                cur.dist + 1,
                h,
            ));
            stats.add_created(next.dist);
            visited.insert(&next.state);
            frontier.push(next);
        }
    }

    debug!("Search space exhausted after {} states", expanded);
    SolverOk::new(SearchOutcome::Exhausted, stats, mode)
}

/// Cells a box must never be pushed into.
fn find_dead_corners(map: &GoalMap) -> Vec2d<bool> {
    let mut dead_corners = map.grid.scratchpad();
    for pos in map.grid.positions() {
        dead_corners[pos] = map.is_dead_corner(pos);
    }
    dead_corners
}

/// Sum over boxes of the Manhattan distance to the nearest goal.
///
/// Every box needs at least that many pushes so this never overestimates.
fn heuristic_push(map: &GoalMap, state: &State) -> u32 {
    state
        .boxes()
        .iter()
        .map(|&b| map.goals.iter().map(|&g| b.dist(g)).min().unwrap_or(0))
        .sum()
}

fn backtrack_moves(final_node: &SearchNode<'_>) -> Moves {
    let mut moves = Moves::default();
    let mut node = final_node;
    while let Some((prev, mov)) = node.prev {
        moves.add(mov);
        node = prev;
    }
    moves.reverse();
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Pos;
    use crate::solution_formatter::replay_states;

    fn scenario_one() -> Level {
        r"
######
#    #
# $@ #
#  . #
#    #
######
"
        .parse()
        .unwrap()
    }

    fn replays_to_solved(level: &Level, moves: &Moves) -> bool {
        let mut state = level.state.clone();
        for &mov in moves {
            match state.step(&level.map, mov.dir()) {
                Some((next, actual)) if actual == mov => state = next,
                _ => return false,
            }
        }
        state.is_solved(&level.map)
    }

    #[test]
    fn solves_one_box() {
        let level = scenario_one();
        let solver_ok = level.solve(Duration::from_secs(10));
        let moves = solver_ok.moves().unwrap().clone();
        assert!(moves.move_cnt() >= 6);
        assert!(moves.push_cnt() >= 2);
        assert!(replays_to_solved(&level, &moves));
        assert_eq!(solver_ok.verdict(), Verdict::Solvable);
        assert_eq!(solver_ok.into_solve_outcome(), SolveOutcome::Solved(moves));
    }

    #[test]
    fn verify_finds_shortest() {
        // down needs the player above the box, right needs it on the left
        let level = scenario_one();
        let solver_ok = level.verify(1000);
        let moves = solver_ok.moves().unwrap();
        assert_eq!(moves.move_cnt(), 6);
        assert!(replays_to_solved(&level, moves));
        assert_eq!(solver_ok.verdict(), Verdict::Solvable);
    }

    #[test]
    fn already_solved() {
        let level: Level = "#@*#".parse().unwrap();
        for solver_ok in vec![level.solve(Duration::from_secs(1)), level.verify(10)] {
            assert_eq!(solver_ok.moves(), Some(&Moves::default()));
            assert_eq!(solver_ok.stats.total_unique_visited(), 1);
        }
    }

    #[test]
    fn box_in_corner_is_unsolvable() {
        let level: Level = r"
#####
#$  #
# @.#
#####
"
        .parse()
        .unwrap();
        let verified = level.verify(50_000);
        assert_eq!(verified.outcome, SearchOutcome::Exhausted);
        assert_eq!(verified.verdict(), Verdict::Unsolvable);
        assert!(!verified.verdict().is_acceptable());

        let solved = level.solve(Duration::from_secs(10));
        assert_eq!(solved.into_solve_outcome(), SolveOutcome::NoSolution);
    }

    #[test]
    fn cap_means_assumed_solvable() {
        let level: Level = r"
##########
#        #
# $    . #
#   @    #
#  $  .  #
#        #
##########
"
        .parse()
        .unwrap();
        let solver_ok = level.verify(5);
        assert_eq!(solver_ok.outcome, SearchOutcome::BudgetExceeded);
        assert_eq!(solver_ok.verdict(), Verdict::AssumedSolvable);
        assert!(solver_ok.verdict().is_acceptable());
        assert_eq!(solver_ok.stats.total_unique_visited(), 5);
    }

    #[test]
    fn cancelled_search_is_unknown() {
        let level = scenario_one();
        let solver_ok = search(&level, Mode::Solve, |dequeued: usize| dequeued >= 1);
        assert_eq!(solver_ok.into_solve_outcome(), SolveOutcome::Unknown);

        let solver_ok = search(&level, Mode::Solve, |_: usize| false);
        assert!(solver_ok.moves().is_some());
    }

    #[test]
    fn zero_time_budget() {
        let level = scenario_one();
        let solver_ok = search(&level, Mode::Solve, TimeBudget::new(Duration::from_millis(0)));
        // the clock might not have moved yet, but nothing else is possible
        match solver_ok.into_solve_outcome() {
            SolveOutcome::Unknown => {}
            SolveOutcome::Solved(moves) => assert!(replays_to_solved(&level, &moves)),
            SolveOutcome::NoSolution => panic!("solvable level reported as unsolvable"),
        }
    }

    #[test]
    fn heuristic_never_overestimates() {
        let level: Level = r"
#######
#     #
# $ $ #
#. @ .#
#     #
#######
"
        .parse()
        .unwrap();
        let moves = level.verify(100_000).moves().unwrap().clone();

        // BFS path is optimal so the real remaining cost from step i is len - i
        let len = moves.move_cnt() as u32;
        let mut state = level.state.clone();
        assert!(heuristic_push(&level.map, &state) <= len);
        for (i, &mov) in moves.iter().enumerate() {
            state = state.step(&level.map, mov.dir()).unwrap().0;
            assert!(heuristic_push(&level.map, &state) <= len - (i as u32 + 1));
        }
        assert_eq!(heuristic_push(&level.map, &state), 0);
    }

    #[test]
    fn dead_corner_pruning_keeps_solutions() {
        let level: Level = r"
#######
#.    #
# $$  #
#  @ .#
#######
"
        .parse()
        .unwrap();
        let dead_corners = find_dead_corners(&level.map);
        assert!(dead_corners[Pos::new(1, 5)]);
        assert!(dead_corners[Pos::new(3, 1)]);
        assert!(!dead_corners[Pos::new(1, 1)]);

        let solved = level.solve(Duration::from_secs(10));
        let verified = level.verify(100_000);
        assert!(replays_to_solved(&level, solved.moves().unwrap()));
        assert_eq!(verified.verdict(), Verdict::Solvable);
        assert!(solved.moves().unwrap().move_cnt() >= verified.moves().unwrap().move_cnt());
    }

    #[test]
    fn solved_start_needs_no_budget() {
        let level: Level = "#@*#".parse().unwrap();
        let verified = level.verify(0);
        assert_eq!(verified.verdict(), Verdict::Solvable);
        assert_eq!(verified.moves(), Some(&Moves::default()));

        let solved = search(&level, Mode::Solve, |_: usize| true);
        assert_eq!(solved.into_solve_outcome(), SolveOutcome::Solved(Moves::default()));
    }

    #[test]
    fn pushes_into_dead_corners_are_never_generated() {
        // the only push sends the box into the corner on the right
        let level: Level = r"
######
#.@$ #
######
"
        .parse()
        .unwrap();
        let solved = level.solve(Duration::from_secs(10));
        assert_eq!(solved.outcome, SearchOutcome::Exhausted);
        assert_eq!(solved.stats.total_created(), 2);

        // VERIFY doesn't prune so it also walks around the stuck box
        let verified = level.verify(1000);
        assert_eq!(verified.outcome, SearchOutcome::Exhausted);
        assert_eq!(verified.stats.total_created(), 5);
    }

    #[test]
    fn solutions_never_push_into_dead_corners() {
        let level: Level = r"
########
#.     #
# $$ # #
#   @ .#
#  $  .#
########
"
        .parse()
        .unwrap();
        for solver_ok in vec![level.solve(Duration::from_secs(10)), level.verify(100_000)] {
            let moves = solver_ok.moves().unwrap();
            let states = replay_states(&level, moves).unwrap();
            for (state, mov) in states[1..].iter().zip(moves) {
                if mov.is_push() {
                    let pushed_box = state.player_pos() + mov.dir();
                    assert!(state.has_box(pushed_box));
                    assert!(!level.map.is_dead_corner(pushed_box), "{}", pushed_box);
                }
            }
            assert!(states[states.len() - 1].is_solved(&level.map));
        }
    }
}

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

use crate::moves::Move;
use crate::state::State;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stats {
    created_states: Vec<usize>,
    visited_states: Vec<usize>,
    duplicate_states: Vec<usize>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> usize {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> usize {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    /// Returns true when this is the first state at that depth.
    pub(crate) fn add_created(&mut self, dist: u32) -> bool {
        Self::add(&mut self.created_states, dist)
    }

    pub(crate) fn add_unique_visited(&mut self, dist: u32) -> bool {
        Self::add(&mut self.visited_states, dist)
    }

    pub(crate) fn add_reached_duplicate(&mut self, dist: u32) -> bool {
        Self::add(&mut self.duplicate_states, dist)
    }

    fn add(counts: &mut Vec<usize>, dist: u32) -> bool {
        let mut ret = false;

        // while because best-first search can skip depths
        while dist as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[dist as usize] += 1;
        ret
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(
            f,
            "total reached duplicates: {}",
            self.total_reached_duplicates().separated_string()
        )?;
        writeln!(
            f,
            "total unique visited: {}",
            self.total_unique_visited().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_unique_visited();
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            self.total_reached_duplicates().separated_string()
        )?;
        // duplicates are never created so this can't underflow
        writeln!(
            f,
            "Created but not reached total: {}",
            (created - visited).separated_string()
        )
    }
}

/// Lives in the arena for the whole search so `prev` can be a plain reference.
pub(crate) struct SearchNode<'a> {
    pub(crate) state: State,
    pub(crate) prev: Option<(&'a SearchNode<'a>, Move)>,
    pub(crate) dist: u32,
    pub(crate) h: u32,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn new(
        state: State,
        prev: Option<(&'a SearchNode<'a>, Move)>,
        dist: u32,
        h: u32,
    ) -> Self {
        Self {
            state,
            prev,
            dist,
            h,
        }
    }

    fn cost(&self) -> u32 {
        self.dist + self.h
    }
}

impl Debug for SearchNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {} dist: {} h: {} }}",
            self.state.encode(),
            self.dist,
            self.h
        )
    }
}

pub(crate) trait Frontier<'a> {
    fn push(&mut self, node: &'a SearchNode<'a>);
    fn pop(&mut self) -> Option<&'a SearchNode<'a>>;
    fn is_empty(&self) -> bool;
}

struct Entry<'a> {
    cost: u32,
    seq: u64,
    node: &'a SearchNode<'a>,
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry<'_> {}

impl PartialOrd for Entry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // seq is unique so there are no real ties
        (self.cost, self.seq).cmp(&(other.cost, other.seq))
    }
}

/// Lowest `dist + h` first, equal costs in insertion order.
#[derive(Default)]
pub(crate) struct BestFirst<'a> {
    heap: BinaryHeap<Reverse<Entry<'a>>>,
    seq: u64,
}

impl<'a> Frontier<'a> for BestFirst<'a> {
    fn push(&mut self, node: &'a SearchNode<'a>) {
        self.heap.push(Reverse(Entry {
            cost: node.cost(),
            seq: self.seq,
            node,
        }));
        self.seq += 1;
    }

    fn pop(&mut self) -> Option<&'a SearchNode<'a>> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[derive(Default)]
pub(crate) struct Fifo<'a>(VecDeque<&'a SearchNode<'a>>);

impl<'a> Frontier<'a> for Fifo<'a> {
    fn push(&mut self, node: &'a SearchNode<'a>) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<&'a SearchNode<'a>> {
        self.0.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

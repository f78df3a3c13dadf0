use std::time::{Duration, Instant};

use crate::config::CLOCK_CHECK_INTERVAL;

/// Decides when a search should stop early.
///
/// Asked before a dequeued state is expanded, with the number of states expanded so far.
/// A dequeued goal state is returned without asking.
/// Any `FnMut(usize) -> bool` works too, so callers can cancel a search from outside.
pub trait Budget {
    fn exceeded(&mut self, dequeued: usize) -> bool;
}

impl<F: FnMut(usize) -> bool> Budget for F {
    fn exceeded(&mut self, dequeued: usize) -> bool {
        self(dequeued)
    }
}

/// Wall clock limit, the clock is only read every `CLOCK_CHECK_INTERVAL` expansions.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    started: Instant,
    limit: Duration,
}

impl TimeBudget {
    /// The clock starts now.
    pub fn new(limit: Duration) -> Self {
        TimeBudget {
            started: Instant::now(),
            limit,
        }
    }
}

impl Budget for TimeBudget {
    fn exceeded(&mut self, dequeued: usize) -> bool {
        dequeued % CLOCK_CHECK_INTERVAL == 0 && self.started.elapsed() > self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationCap(pub usize);

impl Budget for IterationCap {
    fn exceeded(&mut self, dequeued: usize) -> bool {
        dequeued >= self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap() {
        let mut cap = IterationCap(3);
        assert!(!cap.exceeded(0));
        assert!(!cap.exceeded(2));
        assert!(cap.exceeded(3));
        assert!(IterationCap(0).exceeded(0));
    }

    #[test]
    fn clock_is_checked_periodically() {
        let mut budget = TimeBudget::new(Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(2));
        assert!(budget.exceeded(0));
        assert!(!budget.exceeded(1));
        assert!(!budget.exceeded(CLOCK_CHECK_INTERVAL - 1));
        assert!(budget.exceeded(CLOCK_CHECK_INTERVAL));

        let mut generous = TimeBudget::new(Duration::from_secs(3600));
        assert!(!generous.exceeded(0));
    }

    #[test]
    fn closures() {
        let mut calls = 0;
        let mut budget = |dequeued: usize| {
            calls += 1;
            dequeued > 1
        };
        assert!(!budget.exceeded(1));
        assert!(budget.exceeded(2));
        assert_eq!(calls, 2);
    }
}

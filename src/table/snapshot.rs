// ABOUTME: Copy-out views of table state for observers.
// ABOUTME: Snapshots own their data and never reference live table state.

use serde::Serialize;

use crate::philosopher::PhilosopherState;

/// Observable state of one philosopher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhilosopherSnapshot {
    pub id: usize,
    pub state: PhilosopherState,
    pub remaining_meals: u32,
    pub meals_eaten: u32,
    pub is_eating: bool,
    pub failed_attempts: u64,
    pub left_fork: usize,
    pub right_fork: usize,
}

/// Observable state of one fork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkSnapshot {
    pub id: usize,
    pub held: bool,
    /// The philosopher holding the fork, if any.
    pub holder: Option<usize>,
}

/// A coherent copy of every philosopher and fork at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub philosophers: Vec<PhilosopherSnapshot>,
    pub forks: Vec<ForkSnapshot>,
}

impl TableSnapshot {
    /// Number of philosophers currently eating.
    pub fn eating_count(&self) -> usize {
        self.philosophers.iter().filter(|p| p.is_eating).count()
    }

    /// Meals still to be eaten across the table.
    pub fn meals_remaining(&self) -> u64 {
        self.philosophers
            .iter()
            .map(|p| u64::from(p.remaining_meals))
            .sum()
    }

    /// Meals eaten so far across the table.
    pub fn meals_eaten(&self) -> u64 {
        self.philosophers
            .iter()
            .map(|p| u64::from(p.meals_eaten))
            .sum()
    }

    /// Returns true once every philosopher has eaten all its meals.
    pub fn all_done(&self) -> bool {
        self.philosophers
            .iter()
            .all(|p| p.state == PhilosopherState::Done)
    }

    /// The philosopher holding `fork`, if any.
    pub fn holder_of(&self, fork: usize) -> Option<usize> {
        self.forks.get(fork).and_then(|f| f.holder)
    }

    /// Number of forks `philosopher` holds right now: 0, 1, or 2.
    pub fn forks_held_by(&self, philosopher: usize) -> usize {
        self.forks
            .iter()
            .filter(|f| f.holder == Some(philosopher))
            .count()
    }
}

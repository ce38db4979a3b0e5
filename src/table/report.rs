// ABOUTME: Final report returned once every philosopher task has ended.

use std::time::Duration;

use serde::Serialize;

use super::snapshot::TableSnapshot;

/// Outcome of a finished table run.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    /// State of the table after the last philosopher left.
    pub last: TableSnapshot,
    /// True if the run was cut short by cancellation.
    pub cancelled: bool,
    /// Time from start until the last philosopher left.
    pub elapsed: Duration,
}

impl TableReport {
    /// Meals eaten across all philosophers.
    pub fn total_meals(&self) -> u64 {
        self.last.meals_eaten()
    }

    /// Returns true if every philosopher ate all of its meals.
    pub fn is_complete(&self) -> bool {
        self.last.all_done()
    }
}

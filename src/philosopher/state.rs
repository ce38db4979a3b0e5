// ABOUTME: Lifecycle states a philosopher moves through.
// ABOUTME: Stored as a u8 so observers can read it without locking.

use serde::Serialize;

/// Where a philosopher is in its cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhilosopherState {
    /// Not contending for any fork.
    Thinking = 0,
    /// Trying to pick up both forks.
    Hungry = 1,
    /// Holding both forks.
    Eating = 2,
    /// Every meal eaten. Terminal.
    Done = 3,
    /// Cancelled before finishing its meals. Terminal.
    Stopped = 4,
}

impl PhilosopherState {
    /// Convert from u8 value to PhilosopherState.
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => PhilosopherState::Thinking,
            1 => PhilosopherState::Hungry,
            2 => PhilosopherState::Eating,
            3 => PhilosopherState::Done,
            _ => PhilosopherState::Stopped,
        }
    }

    /// Returns true for states the philosopher never leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PhilosopherState::Done | PhilosopherState::Stopped)
    }

    /// Single-letter code used by console observers.
    pub fn code(&self) -> char {
        match self {
            PhilosopherState::Thinking => 'T',
            PhilosopherState::Hungry => 'H',
            PhilosopherState::Eating => 'E',
            PhilosopherState::Done => 'X',
            PhilosopherState::Stopped => 'S',
        }
    }
}

impl std::fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhilosopherState::Thinking => write!(f, "thinking"),
            PhilosopherState::Hungry => write!(f, "hungry"),
            PhilosopherState::Eating => write!(f, "eating"),
            PhilosopherState::Done => write!(f, "done"),
            PhilosopherState::Stopped => write!(f, "stopped"),
        }
    }
}

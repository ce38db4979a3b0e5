// ABOUTME: Philosopher module - the think, pick up, eat, put down lifecycle.
// ABOUTME: Contains the lifecycle state machine and per-philosopher counters.

mod philosopher;
mod state;

pub use philosopher::Philosopher;
pub use state::PhilosopherState;

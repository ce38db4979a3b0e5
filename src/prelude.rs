// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use symposium::prelude::*;` to get started quickly.

pub use crate::config::{DelayRange, TableConfig, Timing};
pub use crate::error::{ConfigError, SymposiumError, TableError};
pub use crate::fork::{Fork, ForkGuard, ForkRing};
pub use crate::philosopher::{Philosopher, PhilosopherState};
pub use crate::table::{
    ForkSnapshot, PhilosopherSnapshot, Table, TableObserver, TableReport, TableSnapshot,
};

// ABOUTME: Table module - seats philosophers around a fork ring and runs them.
// ABOUTME: Provides the table handle, read-only observers, snapshots, and reports.

mod report;
mod snapshot;
mod table;

pub use report::TableReport;
pub use snapshot::{ForkSnapshot, PhilosopherSnapshot, TableSnapshot};
pub use table::{Table, TableObserver};

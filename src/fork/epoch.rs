// ABOUTME: Write epoch shared by every fork and philosopher of one table.
// ABOUTME: Lets observers copy out a consistent view without blocking writers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Number of busy spins before a reader starts yielding its thread.
const SPINS_BEFORE_YIELD: u32 = 64;

/// Brackets every write to observable table state.
///
/// Writers bump `begun` before and `ended` after each mutation and never
/// wait. Readers retry until they observe a window in which no write was in
/// flight and none started, so what they copied is a single coherent state.
#[derive(Debug, Default)]
pub(crate) struct WriteEpoch {
    begun: AtomicU64,
    ended: AtomicU64,
}

impl WriteEpoch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run a mutation of observable state.
    pub(crate) fn write<R>(&self, f: impl FnOnce() -> R) -> R {
        self.begun.fetch_add(1, Ordering::SeqCst);
        let value = f();
        self.ended.fetch_add(1, Ordering::SeqCst);
        value
    }

    /// Run a read of observable state until it did not overlap any write.
    pub(crate) fn read<R>(&self, mut f: impl FnMut() -> R) -> R {
        let mut attempts = 0u32;
        loop {
            // `ended` first: every write counted in it has also been counted in `begun`.
            let ended = self.ended.load(Ordering::SeqCst);
            let begun = self.begun.load(Ordering::SeqCst);
            if begun == ended {
                let value = f();
                if self.begun.load(Ordering::SeqCst) == begun {
                    return value;
                }
            }

            attempts = attempts.saturating_add(1);
            if attempts < SPINS_BEFORE_YIELD {
                std::hint::spin_loop();
            } else {
                std::thread::yield_now();
            }
        }
    }
}

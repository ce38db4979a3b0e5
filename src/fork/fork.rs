// ABOUTME: A fork - an identity plus a non-blocking exclusive ownership slot.
// ABOUTME: Acquisition yields a guard that releases the fork when dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::epoch::WriteEpoch;

/// Holder slot value meaning nobody holds the fork.
const FREE: usize = 0;

/// A fork shared by the two philosophers on either side of it.
///
/// The fork is composed of an identity and an atomic holder slot. There is
/// no blocking acquire: a philosopher that finds the fork taken goes back to
/// thinking instead of waiting for it.
#[derive(Debug)]
pub struct Fork {
    id: usize,
    /// `FREE`, or the holder's philosopher id plus one.
    holder: AtomicUsize,
    epoch: Arc<WriteEpoch>,
}

impl Fork {
    /// Create a free fork with its own epoch.
    pub fn new(id: usize) -> Self {
        Self::with_epoch(id, Arc::new(WriteEpoch::new()))
    }

    pub(crate) fn with_epoch(id: usize, epoch: Arc<WriteEpoch>) -> Self {
        Self {
            id,
            holder: AtomicUsize::new(FREE),
            epoch,
        }
    }

    /// The fork's position in the ring.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The philosopher currently holding the fork, if any.
    pub fn holder(&self) -> Option<usize> {
        match self.holder.load(Ordering::SeqCst) {
            FREE => None,
            slot => Some(slot - 1),
        }
    }

    /// Returns true if some philosopher holds the fork.
    pub fn is_held(&self) -> bool {
        self.holder().is_some()
    }

    /// Try to take the fork for `philosopher` without waiting.
    ///
    /// Returns `None` if the fork is already held. Of any number of
    /// concurrent callers racing for a free fork, exactly one gets a guard.
    /// The fork stays held until the guard is dropped.
    pub fn try_acquire(&self, philosopher: usize) -> Option<ForkGuard<'_>> {
        // Skip the epoch when the fork is visibly taken, so losing races
        // does not disturb observers.
        if self.holder.load(Ordering::SeqCst) != FREE {
            return None;
        }

        let claimed = self.epoch.write(|| {
            self.holder
                .compare_exchange(FREE, philosopher + 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
        });

        if !claimed {
            return None;
        }
        Some(ForkGuard {
            fork: self,
            philosopher,
        })
    }
}

/// Proof that a philosopher holds a fork.
///
/// Dropping the guard releases the fork; there is no other way to release
/// it, so a fork can never be released by someone who does not hold it.
#[derive(Debug)]
#[must_use = "the fork is released as soon as the guard is dropped"]
pub struct ForkGuard<'a> {
    fork: &'a Fork,
    philosopher: usize,
}

impl ForkGuard<'_> {
    /// The held fork's id.
    pub fn fork_id(&self) -> usize {
        self.fork.id
    }

    /// The philosopher holding the fork.
    pub fn philosopher(&self) -> usize {
        self.philosopher
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        self.fork
            .epoch
            .write(|| self.fork.holder.store(FREE, Ordering::SeqCst));
    }
}

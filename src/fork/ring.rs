// ABOUTME: The ring of forks owned by a table.
// ABOUTME: Maps philosopher i to forks i and (i + 1) mod n.

use std::sync::Arc;

use super::epoch::WriteEpoch;
use super::fork::Fork;

/// A fixed-size ring of forks.
///
/// Philosopher `i` uses forks `i` (left) and `(i + 1) % n` (right). Every
/// philosopher reaches for its left fork first, which closes the cycle of
/// waits that a blocking acquire would deadlock on.
#[derive(Debug)]
pub struct ForkRing {
    forks: Vec<Fork>,
    epoch: Arc<WriteEpoch>,
}

impl ForkRing {
    /// Create `n` free forks sharing one write epoch.
    pub fn new(n: usize) -> Self {
        let epoch = Arc::new(WriteEpoch::new());
        let forks = (0..n)
            .map(|id| Fork::with_epoch(id, epoch.clone()))
            .collect();
        Self { forks, epoch }
    }

    /// Number of forks in the ring.
    pub fn len(&self) -> usize {
        self.forks.len()
    }

    /// Returns true if the ring has no forks.
    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// The fork at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn fork(&self, id: usize) -> &Fork {
        &self.forks[id]
    }

    /// All forks, in ring order.
    pub fn forks(&self) -> &[Fork] {
        &self.forks
    }

    /// The `(left, right)` fork ids for `philosopher`.
    pub fn pair(&self, philosopher: usize) -> (usize, usize) {
        let n = self.forks.len();
        (philosopher % n, (philosopher + 1) % n)
    }

    pub(crate) fn epoch(&self) -> &Arc<WriteEpoch> {
        &self.epoch
    }
}

// ABOUTME: A philosopher and its think, pick up, eat, put down cycle.
// ABOUTME: Picks up both forks or neither, so no philosopher waits while holding one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::PhilosopherState;
use crate::config::Timing;
use crate::fork::{ForkGuard, ForkRing, WriteEpoch};
use crate::table::PhilosopherSnapshot;

/// A philosopher seated between two forks of a ring.
///
/// The philosopher refers to its forks by index only; the ring owns them.
/// Its counters and flags are written solely by its own `dine` task and are
/// read by observers through snapshots.
#[derive(Debug)]
pub struct Philosopher {
    id: usize,
    left: usize,
    right: usize,
    meals: u32,
    remaining: AtomicU32,
    eating: AtomicBool,
    state: AtomicU8,
    failed_attempts: AtomicU64,
    epoch: Arc<WriteEpoch>,
}

impl Philosopher {
    /// Seat philosopher `id` at `ring` with `meals` meals to eat.
    ///
    /// A philosopher with no meals starts out `Done`.
    pub fn new(id: usize, ring: &ForkRing, meals: u32) -> Self {
        let (left, right) = ring.pair(id);
        let state = if meals == 0 {
            PhilosopherState::Done
        } else {
            PhilosopherState::Thinking
        };

        Self {
            id,
            left,
            right,
            meals,
            remaining: AtomicU32::new(meals),
            eating: AtomicBool::new(false),
            state: AtomicU8::new(state as u8),
            failed_attempts: AtomicU64::new(0),
            epoch: ring.epoch().clone(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The `(left, right)` fork ids.
    pub fn forks(&self) -> (usize, usize) {
        (self.left, self.right)
    }

    pub fn state(&self) -> PhilosopherState {
        PhilosopherState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn remaining_meals(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn meals_eaten(&self) -> u32 {
        self.meals - self.remaining_meals()
    }

    pub fn is_eating(&self) -> bool {
        self.eating.load(Ordering::SeqCst)
    }

    /// Pick-up attempts abandoned because a fork was taken.
    pub fn failed_attempts(&self) -> u64 {
        self.failed_attempts.load(Ordering::SeqCst)
    }

    /// Copy out the observable state.
    pub fn snapshot(&self) -> PhilosopherSnapshot {
        PhilosopherSnapshot {
            id: self.id,
            state: self.state(),
            remaining_meals: self.remaining_meals(),
            meals_eaten: self.meals_eaten(),
            is_eating: self.is_eating(),
            failed_attempts: self.failed_attempts(),
            left_fork: self.left,
            right_fork: self.right,
        }
    }

    /// Run the lifecycle until every meal is eaten or `cancel` fires.
    ///
    /// Returns the terminal state: `Done` or `Stopped`. Must only be driven
    /// by one task per philosopher.
    pub(crate) async fn dine(
        &self,
        ring: &ForkRing,
        timing: &Timing,
        cancel: &CancellationToken,
    ) -> PhilosopherState {
        debug!(philosopher = self.id, meals = self.meals, "seated");

        loop {
            if self.remaining_meals() == 0 {
                self.set_state(PhilosopherState::Done);
                info!(
                    philosopher = self.id,
                    failed_attempts = self.failed_attempts(),
                    "finished all meals"
                );
                return PhilosopherState::Done;
            }

            self.set_state(PhilosopherState::Thinking);
            if !pause(timing.think.sample(), cancel).await {
                return self.stop();
            }

            self.set_state(PhilosopherState::Hungry);
            let Some((left, right)) = self.pick_up(ring) else {
                self.failed_attempts.fetch_add(1, Ordering::SeqCst);
                debug!(philosopher = self.id, "forks taken, back to thinking");
                if timing.think.is_zero() {
                    tokio::task::yield_now().await;
                }
                continue;
            };

            let finished = self.eat(timing, cancel).await;

            // Put down right first, then left.
            drop(right);
            drop(left);

            if !finished {
                return self.stop();
            }
        }
    }

    /// Take both forks or neither.
    ///
    /// Losing the right fork drops the left guard on the way out, so the
    /// left fork is released before the philosopher goes back to thinking.
    fn pick_up<'r>(&self, ring: &'r ForkRing) -> Option<(ForkGuard<'r>, ForkGuard<'r>)> {
        let left = ring.fork(self.left).try_acquire(self.id)?;
        let right = ring.fork(self.right).try_acquire(self.id)?;
        Some((left, right))
    }

    /// Eat one meal. Only called while both fork guards are alive.
    ///
    /// Returns false if cancelled part way through.
    async fn eat(&self, timing: &Timing, cancel: &CancellationToken) -> bool {
        self.set_state(PhilosopherState::Eating);
        if !pause(timing.pre_eat.sample(), cancel).await {
            return false;
        }

        let remaining = self.epoch.write(|| {
            self.eating.store(true, Ordering::SeqCst);
            self.remaining.fetch_sub(1, Ordering::SeqCst) - 1
        });
        debug!(philosopher = self.id, remaining, "eating");

        let finished = pause(timing.eat.sample(), cancel).await;
        self.epoch
            .write(|| self.eating.store(false, Ordering::SeqCst));
        finished
    }

    fn stop(&self) -> PhilosopherState {
        self.set_state(PhilosopherState::Stopped);
        warn!(
            philosopher = self.id,
            remaining = self.remaining_meals(),
            "stopped before finishing"
        );
        PhilosopherState::Stopped
    }

    fn set_state(&self, state: PhilosopherState) {
        self.epoch
            .write(|| self.state.store(state as u8, Ordering::SeqCst));
    }
}

/// Sleep for `duration` unless cancelled first. Returns false on cancellation.
async fn pause(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(duration) => true,
    }
}

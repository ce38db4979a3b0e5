// ABOUTME: The table - builds the fork ring, seats philosophers, and runs them.
// ABOUTME: Exposes snapshots for observers and waits for every philosopher to leave.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::Notify;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::report::TableReport;
use super::snapshot::{ForkSnapshot, TableSnapshot};
use crate::config::{TableConfig, Timing};
use crate::error::{ConfigError, TableError};
use crate::fork::ForkRing;
use crate::philosopher::{Philosopher, PhilosopherState};

/// State shared between the table handle, observers, and philosopher tasks.
struct Shared {
    ring: ForkRing,
    philosophers: Vec<Philosopher>,
    timing: Timing,
    cancel: CancellationToken,
    /// Philosopher tasks that have ended.
    departed: AtomicUsize,
    /// Notified when the last philosopher leaves.
    done: Notify,
    started: Instant,
}

impl Shared {
    fn snapshot(&self) -> TableSnapshot {
        self.ring.epoch().read(|| TableSnapshot {
            philosophers: self.philosophers.iter().map(Philosopher::snapshot).collect(),
            forks: self
                .ring
                .forks()
                .iter()
                .map(|fork| {
                    let holder = fork.holder();
                    ForkSnapshot {
                        id: fork.id(),
                        held: holder.is_some(),
                        holder,
                    }
                })
                .collect(),
        })
    }

    fn is_finished(&self) -> bool {
        self.departed.load(Ordering::SeqCst) == self.philosophers.len()
    }

    async fn finished(&self) {
        loop {
            let notified = self.done.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_finished() {
                return;
            }
            notified.await;
        }
    }

    fn depart(&self) {
        let departed = self.departed.fetch_add(1, Ordering::SeqCst) + 1;
        if departed == self.philosophers.len() {
            info!(
                elapsed_ms = self.started.elapsed().as_millis() as u64,
                "every philosopher has left the table"
            );
            self.done.notify_waiters();
        }
    }
}

/// Counts a philosopher task as ended even if it panics.
struct Departure(Arc<Shared>);

impl Drop for Departure {
    fn drop(&mut self) {
        self.0.depart();
    }
}

/// A running table of philosophers.
///
/// The table owns the fork ring and the philosophers; each philosopher runs
/// as its own tokio task. Dropping the table cancels any philosopher still
/// at the table.
pub struct Table {
    shared: Arc<Shared>,
    tasks: Vec<JoinHandle<PhilosopherState>>,
}

impl Table {
    /// Validate `config`, seat the philosophers, and start them all.
    ///
    /// Configuration errors are returned before any task is spawned.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ring = ForkRing::new(config.philosophers);
        let philosophers = (0..config.philosophers)
            .map(|id| Philosopher::new(id, &ring, config.meals))
            .collect();

        let shared = Arc::new(Shared {
            ring,
            philosophers,
            timing: config.timing,
            cancel: CancellationToken::new(),
            departed: AtomicUsize::new(0),
            done: Notify::new(),
            started: Instant::now(),
        });

        info!(
            philosophers = config.philosophers,
            meals = config.meals,
            "table started"
        );

        let tasks = (0..config.philosophers)
            .map(|id| {
                let shared = shared.clone();
                tokio::spawn(async move {
                    let departure = Departure(shared);
                    let shared = &departure.0;
                    shared.philosophers[id]
                        .dine(&shared.ring, &shared.timing, &shared.cancel)
                        .await
                })
            })
            .collect();

        Ok(Self { shared, tasks })
    }

    /// Number of philosophers at the table.
    pub fn len(&self) -> usize {
        self.shared.philosophers.len()
    }

    /// Returns true if nobody is seated. Never true for a started table.
    pub fn is_empty(&self) -> bool {
        self.shared.philosophers.is_empty()
    }

    /// Copy out the current state of every philosopher and fork.
    ///
    /// Never blocks a philosopher.
    pub fn snapshot(&self) -> TableSnapshot {
        self.shared.snapshot()
    }

    /// A cloneable read-only handle for observers.
    pub fn observer(&self) -> TableObserver {
        TableObserver {
            shared: self.shared.clone(),
        }
    }

    /// Returns true once every philosopher task has ended.
    pub fn is_finished(&self) -> bool {
        self.shared.is_finished()
    }

    /// Ask every philosopher to stop at its next delay.
    pub fn cancel(&self) {
        if !self.shared.cancel.is_cancelled() {
            warn!("table cancelled");
        }
        self.shared.cancel.cancel();
    }

    /// The token philosophers watch for shutdown.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.shared.cancel.clone()
    }

    /// Wait until every philosopher task has ended.
    ///
    /// Completes once every philosopher is `Done`, or `Stopped` after a
    /// cancellation.
    pub async fn finished(&self) {
        self.shared.finished().await;
    }

    /// Wait for every philosopher, then report how the run went.
    pub async fn wait(mut self) -> Result<TableReport, TableError> {
        let tasks = std::mem::take(&mut self.tasks);
        let results = futures::future::join_all(tasks).await;
        self.collect(results)
    }

    /// Like [`Table::wait`], but gives up after `timeout`.
    ///
    /// On expiry the table is cancelled and drained before returning
    /// `TableError::Timeout`.
    pub async fn wait_timeout(mut self, timeout: Duration) -> Result<TableReport, TableError> {
        let tasks = std::mem::take(&mut self.tasks);
        let joined = futures::future::join_all(tasks);
        tokio::pin!(joined);

        match tokio::time::timeout(timeout, joined.as_mut()).await {
            Ok(results) => self.collect(results),
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "table timed out");
                self.cancel();
                joined.await;
                Err(TableError::Timeout(timeout))
            }
        }
    }

    fn collect(
        &self,
        results: Vec<Result<PhilosopherState, JoinError>>,
    ) -> Result<TableReport, TableError> {
        for (id, result) in results.into_iter().enumerate() {
            if let Err(e) = result {
                return Err(TableError::Join {
                    id,
                    message: e.to_string(),
                });
            }
        }

        Ok(TableReport {
            last: self.shared.snapshot(),
            cancelled: self.shared.cancel.is_cancelled(),
            elapsed: self.shared.started.elapsed(),
        })
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

/// Read-only view of a running table, for observers on other tasks or threads.
#[derive(Clone)]
pub struct TableObserver {
    shared: Arc<Shared>,
}

impl TableObserver {
    /// Copy out the current state of every philosopher and fork.
    pub fn snapshot(&self) -> TableSnapshot {
        self.shared.snapshot()
    }

    /// Returns true once every philosopher task has ended.
    pub fn is_finished(&self) -> bool {
        self.shared.is_finished()
    }

    /// Wait until every philosopher task has ended.
    pub async fn finished(&self) {
        self.shared.finished().await;
    }
}

//! Tokio-backed [`Scheduler`].
//!
//! Each scheduled timer is a spawned task that sleeps and then sends its
//! [`TimerId`] over an unbounded channel. The runtime reads fired ids through
//! [`FiredTimers`], which drops any id cancelled after its task already sent
//! it.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use stepwise_core::Scheduler;
use tokio::{sync::mpsc, task::AbortHandle};

/// Identifier of one tokio timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Ids scheduled and neither delivered nor cancelled.
type LiveTimers = Arc<Mutex<HashSet<TimerId>>>;

fn lock(live: &LiveTimers) -> MutexGuard<'_, HashSet<TimerId>> {
    // a set of ids cannot be left half-updated, so a poisoned lock is usable
    live.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scheduler that spawns one sleeping task per timer.
///
/// Must be used from within a tokio runtime. Cancelling aborts the task and
/// retires the id, so a send that raced the abort is discarded by
/// [`FiredTimers`].
#[derive(Debug)]
pub struct TokioScheduler {
    next: u64,
    fired: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, AbortHandle>,
    live: LiveTimers,
}

/// Receiving side of a [`TokioScheduler`].
#[derive(Debug)]
pub struct FiredTimers {
    rx: mpsc::UnboundedReceiver<TimerId>,
    live: LiveTimers,
}

impl FiredTimers {
    /// Wait for the next timer that fired and was not cancelled.
    ///
    /// Cancel safe. Returns `None` once the scheduler and all of its tasks
    /// are gone.
    pub async fn recv(&mut self) -> Option<TimerId> {
        loop {
            let id = self.rx.recv().await?;
            if self.accept(id) {
                return Some(id);
            }
        }
    }

    /// Next already-delivered live timer, without waiting.
    pub fn try_recv(&mut self) -> Option<TimerId> {
        while let Ok(id) = self.rx.try_recv() {
            if self.accept(id) {
                return Some(id);
            }
        }
        None
    }

    fn accept(&self, id: TimerId) -> bool {
        let live = lock(&self.live).remove(&id);
        if !live {
            tracing::trace!(%id, "discarded fire of cancelled timer");
        }
        live
    }
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its fired ids arrive on.
    pub fn new() -> (Self, FiredTimers) {
        let (fired, rx) = mpsc::unbounded_channel();
        let live = LiveTimers::default();
        let scheduler = Self { next: 0, fired, tasks: HashMap::new(), live: live.clone() };
        (scheduler, FiredTimers { rx, live })
    }

    /// Number of timer tasks still running.
    pub fn live_tasks(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TimerId;

    fn schedule(&mut self, after: Duration) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next += 1;
        let id = TimerId(self.next);
        let fired = self.fired.clone();
        lock(&self.live).insert(id);

        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // receiver gone means the runtime is shutting down
            let _ = fired.send(id);
        });
        self.tasks.insert(id, task.abort_handle());
        id
    }

    fn cancel(&mut self, handle: TimerId) {
        lock(&self.live).remove(&handle);
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_interval() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(500));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(rx.try_recv(), None);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let cancelled = scheduler.schedule(Duration::from_millis(100));
        let kept = scheduler.schedule(Duration::from_millis(300));
        scheduler.cancel(cancelled);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(rx.recv().await, Some(kept));
        assert_eq!(rx.try_recv(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn fire_already_sent_is_dropped_on_cancel() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(scheduler.live_tasks(), 0);
        scheduler.cancel(id);

        assert_eq!(rx.try_recv(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn each_timer_is_delivered_once() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(10));

        assert_eq!(rx.recv().await, Some(id));
        scheduler.cancel(id);
        assert_eq!(rx.try_recv(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn handles_are_unique() {
        let (mut scheduler, _rx) = TokioScheduler::new();
        let a = scheduler.schedule(Duration::from_millis(1));
        let b = scheduler.schedule(Duration::from_millis(1));
        assert_ne!(a, b);
        assert_eq!(scheduler.live_tasks(), 2);
    }
}

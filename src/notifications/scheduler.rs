// SPDX-License-Identifier: MPL-2.0
//! Deferred, cancellable callbacks used for auto-dismiss timers.
//!
//! Two schedulers are provided:
//!
//! - [`TokioScheduler`] spawns a sleeping task per timer on an explicit
//!   runtime handle. This is what the desktop client uses.
//! - [`TickScheduler`] keeps a pending list that an event loop drains by
//!   calling [`TickScheduler::tick`] periodically, for hosts that already
//!   run a frame or tick loop and want timers to fire on it.

use crate::error::Result;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::{Duration, Instant};

/// A callback run once when its timer elapses.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Source of deferred callbacks.
pub trait Scheduler: Send + Sync + fmt::Debug {
    /// Runs `task` once after `delay`, unless the returned handle is cancelled first.
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerHandle;
}

/// Cancellation capability for a scheduled task.
///
/// Dropping the handle leaves the timer running; only [`TimerHandle::cancel`]
/// prevents it from firing.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Prevents the task from running if it has not run yet.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by tokio timers.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Uses the runtime the caller is currently running on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`](crate::error::Error::Runtime) when called
    /// outside of a tokio runtime.
    pub fn current() -> Result<Self> {
        Ok(Self::new(tokio::runtime::Handle::try_current()?))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerHandle {
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TimerHandle::new(move || join.abort())
    }
}

struct PendingTask {
    seq: u64,
    /// `None` when the deadline lies beyond what `Instant` can represent.
    due: Option<Instant>,
    task: DeferredTask,
}

impl PendingTask {
    fn is_due(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| due <= now)
    }
}

#[derive(Default)]
struct TickQueue {
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler driven by an external tick loop.
///
/// # Example
///
/// ```
/// use bizdesk::notifications::{Scheduler, TickScheduler};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let scheduler = TickScheduler::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
/// let _timer = scheduler.schedule(
///     Duration::from_millis(100),
///     Box::new(move || flag.store(true, Ordering::SeqCst)),
/// );
///
/// scheduler.tick(Instant::now() + Duration::from_secs(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Clone, Default)]
pub struct TickScheduler {
    queue: Arc<Mutex<TickQueue>>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every task due at or before `now`, in deadline order.
    ///
    /// Tasks run after the internal lock is released, so they may schedule
    /// or cancel other timers. Returns the number of tasks run.
    pub fn tick(&self, now: Instant) -> usize {
        let mut due = {
            let mut queue = self.lock();
            let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut queue.pending)
                .into_iter()
                .partition(|pending| pending.is_due(now));
            queue.pending = waiting;
            due
        };
        due.sort_by_key(|pending| (pending.due, pending.seq));

        let count = due.len();
        for pending in due {
            (pending.task)();
        }
        count
    }

    /// Number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock().pending.iter().filter_map(|pending| pending.due).min()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TickQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for TickScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerHandle {
        let seq = {
            let mut queue = self.lock();
            let seq = queue.next_seq;
            queue.next_seq += 1;
            queue.pending.push(PendingTask {
                seq,
                due: Instant::now().checked_add(delay),
                task,
            });
            seq
        };

        let queue: Weak<Mutex<TickQueue>> = Arc::downgrade(&self.queue);
        TimerHandle::new(move || {
            if let Some(queue) = queue.upgrade() {
                queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pending
                    .retain(|pending| pending.seq != seq);
            }
        })
    }
}

impl fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

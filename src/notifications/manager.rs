// SPDX-License-Identifier: MPL-2.0
//! Notification registry, subscriber broadcast and auto-dismiss timers.
//!
//! The `NotificationManager` owns the ordered list of active notifications.
//! Every mutation (`show`, `dismiss`, `clear`) captures a snapshot of the
//! list while holding the registry lock and queues it for delivery; queued
//! snapshots are handed to listeners strictly in mutation order. A listener
//! may call back into the manager: its own mutation is queued behind the
//! snapshot currently being delivered.
//!
//! The manager is a cheap `Clone` handle. Independent managers share nothing.

use super::notification::{Notification, NotificationId, NotificationOptions, NotificationSpec, Variant};
use super::scheduler::{Scheduler, TimerHandle, TokioScheduler};
use super::timing::AutoCloseDelay;
use crate::config::NotificationsConfig;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, ThreadId};
use tracing::{debug, trace};

/// Callback receiving a fresh snapshot of the registry after every change.
pub type Listener = Arc<dyn Fn(Vec<Notification>) + Send + Sync + 'static>;

/// Tunables applied to every notification the manager creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManagerSettings {
    /// Delay used when a notification does not set its own.
    pub auto_close_delay: AutoCloseDelay,
}

impl From<&NotificationsConfig> for ManagerSettings {
    fn from(config: &NotificationsConfig) -> Self {
        Self {
            auto_close_delay: config.auto_close_delay(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    Manual,
    Expired,
}

#[derive(Default)]
struct Registry {
    notifications: Vec<Notification>,
    listeners: Vec<(ListenerId, Listener)>,
    timers: HashMap<NotificationId, TimerHandle>,
    /// Snapshots captured by mutations, not yet handed to listeners.
    outbox: VecDeque<Vec<Notification>>,
    /// Thread currently draining `outbox`, if any.
    drainer: Option<ThreadId>,
    /// Snapshots ever queued; the value after a push is that snapshot's ticket.
    published: u64,
    /// Snapshots fully handed to every listener, in ticket order.
    delivered: u64,
    next_listener: u64,
}

impl Registry {
    /// Queues a snapshot of the current list and returns its ticket.
    fn publish(&mut self) -> u64 {
        self.outbox.push_back(self.notifications.clone());
        self.published += 1;
        self.published
    }

    fn position(&self, id: NotificationId) -> Option<usize> {
        self.notifications.iter().position(|n| n.id() == id)
    }
}

struct Shared {
    settings: ManagerSettings,
    scheduler: Arc<dyn Scheduler>,
    next_id: AtomicU64,
    registry: Mutex<Registry>,
    /// Signalled whenever a snapshot finishes delivery or a drainer steps down.
    drained: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: NotificationId, reason: Removal) -> bool {
        let (timer, ticket) = {
            let mut registry = self.lock();
            let Some(pos) = registry.position(id) else {
                trace!(%id, ?reason, "dismiss ignored, not registered");
                return false;
            };
            let removed = registry.notifications.remove(pos);
            removed.close_handle().mark_closed();
            let ticket = registry.publish();
            (registry.timers.remove(&id), ticket)
        };

        match reason {
            Removal::Manual => {
                if let Some(timer) = timer {
                    timer.cancel();
                }
                debug!(%id, "notification dismissed");
            }
            // The firing timer is the one being removed; nothing to cancel.
            Removal::Expired => debug!(%id, "notification expired"),
        }

        self.flush(ticket);
        true
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut registry = self.lock();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        trace!(listeners = registry.listeners.len(), "listener removed");
    }

    /// Returns once the snapshot with `ticket` has reached every listener.
    ///
    /// One thread drains the outbox at a time, which keeps delivery in
    /// mutation order. A listener mutating the manager from inside its
    /// callback only queues its snapshot; the drain loop it is running under
    /// delivers it next. Any other thread waits until its snapshot is out,
    /// draining itself if the previous drainer stepped down first.
    fn flush(&self, ticket: u64) {
        let current = thread::current().id();
        let mut registry = self.lock();
        loop {
            if registry.delivered >= ticket {
                return;
            }
            match registry.drainer {
                None => break,
                Some(drainer) if drainer == current => return,
                Some(_) => {
                    registry = self
                        .drained
                        .wait(registry)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
        registry.drainer = Some(current);
        drop(registry);

        let mut guard = DeliveryGuard {
            shared: self,
            armed: true,
        };
        let mut finished = false;

        loop {
            let next = {
                let mut registry = self.lock();
                if finished {
                    registry.delivered += 1;
                    self.drained.notify_all();
                }
                match registry.outbox.pop_front() {
                    Some(snapshot) => {
                        let listeners: Vec<Listener> = registry
                            .listeners
                            .iter()
                            .map(|(_, listener)| Arc::clone(listener))
                            .collect();
                        Some((snapshot, listeners))
                    }
                    None => {
                        registry.drainer = None;
                        None
                    }
                }
            };

            let Some((snapshot, listeners)) = next else {
                guard.armed = false;
                return;
            };

            for listener in listeners {
                listener(snapshot.clone());
            }
            finished = true;
        }
    }
}

/// Steps down as drainer if a listener panics mid-delivery, so waiting
/// threads can take over the outbox.
struct DeliveryGuard<'a> {
    shared: &'a Shared,
    armed: bool,
}

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut registry = self.shared.lock();
            // The snapshot in flight is abandoned, not retried.
            registry.delivered += 1;
            registry.drainer = None;
            self.shared.drained.notify_all();
        }
    }
}

/// Close capability bound to one notification.
///
/// Shared by every snapshot clone of the notification. The first `close()`
/// dismisses the entry; later calls, and calls after the manager removed the
/// entry on its own (timer, `clear`), do nothing.
#[derive(Clone)]
pub struct CloseHandle {
    id: NotificationId,
    registry: Weak<Shared>,
    closed: Arc<AtomicBool>,
}

impl CloseHandle {
    fn bound(id: NotificationId, registry: Weak<Shared>) -> Self {
        Self {
            id,
            registry,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A handle not attached to any manager.
    #[cfg(test)]
    pub(crate) fn detached(id: NotificationId) -> Self {
        Self::bound(id, Weak::new())
    }

    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(shared) = self.registry.upgrade() {
            shared.remove(self.id, Removal::Manual);
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub(crate) fn mark_closed(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

impl fmt::Debug for CloseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseHandle")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Registration of one listener. Unsubscribes when dropped.
#[must_use = "dropping the handle unsubscribes the listener"]
pub struct ListenerHandle {
    id: ListenerId,
    registry: Weak<Shared>,
    active: AtomicBool,
}

impl ListenerHandle {
    /// Removes this listener. Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(shared) = self.registry.upgrade() {
            shared.remove_listener(self.id);
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("id", &self.id.0)
            .field("active", &self.is_active())
            .finish()
    }
}

/// In-memory publish/subscribe registry of active toast notifications.
///
/// # Example
///
/// ```
/// use bizdesk::notifications::{NotificationManager, NotificationOptions, TickScheduler};
/// use std::sync::{Arc, Mutex};
///
/// let manager = NotificationManager::new(Arc::new(TickScheduler::new()));
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let _subscription = manager.subscribe(move |list| sink.lock().unwrap().push(list.len()));
///
/// let id = manager.success("Saved", None, NotificationOptions::default());
/// manager.dismiss(id);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct NotificationManager {
    shared: Arc<Shared>,
}

impl NotificationManager {
    /// Creates an empty manager with default settings.
    #[must_use]
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_settings(ManagerSettings::default(), scheduler)
    }

    #[must_use]
    pub fn with_settings(settings: ManagerSettings, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            shared: Arc::new(Shared {
                settings,
                scheduler,
                next_id: AtomicU64::new(1),
                registry: Mutex::new(Registry::default()),
                drained: Condvar::new(),
            }),
        }
    }

    /// Creates a manager whose timers run on the given tokio runtime.
    #[must_use]
    pub fn on_runtime(settings: ManagerSettings, runtime: tokio::runtime::Handle) -> Self {
        Self::with_settings(settings, Arc::new(TokioScheduler::new(runtime)))
    }

    #[must_use]
    pub fn settings(&self) -> ManagerSettings {
        self.shared.settings
    }

    /// Registers a listener for every future change of the registry.
    ///
    /// No snapshot is delivered at subscription time; use
    /// [`notifications`](Self::notifications) for the initial state.
    pub fn subscribe<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(Vec<Notification>) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.shared.lock();
            let id = ListenerId(registry.next_listener);
            registry.next_listener += 1;
            registry.listeners.push((id, Arc::new(listener)));
            trace!(listeners = registry.listeners.len(), "listener added");
            id
        };

        ListenerHandle {
            id,
            registry: Arc::downgrade(&self.shared),
            active: AtomicBool::new(true),
        }
    }

    /// Registers a notification and returns its id.
    ///
    /// Every listener has received the new snapshot when this returns, even
    /// if another thread was mid-delivery. Called from inside a listener, the
    /// snapshot is queued behind the one being delivered. Unless `auto_close`
    /// is `false`, a timer dismisses the entry after its delay.
    pub fn show(&self, spec: NotificationSpec) -> NotificationId {
        let id = NotificationId::from_raw(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let on_close = CloseHandle::bound(id, Arc::downgrade(&self.shared));
        let notification = Notification::from_spec(
            id,
            spec,
            self.shared.settings.auto_close_delay.as_duration(),
            on_close,
        );
        let timer_delay = notification
            .auto_close()
            .then(|| notification.auto_close_delay());

        debug!(
            %id,
            variant = %notification.variant(),
            title = notification.title().unwrap_or_default(),
            auto_close_ms = timer_delay.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            "notification shown"
        );

        let ticket = {
            let mut registry = self.shared.lock();

            // Scheduled under the lock so a very short timer cannot observe
            // the registry before its handle is recorded, and before the push
            // so a failing scheduler leaves the registry untouched.
            let timer = timer_delay.map(|delay| {
                let weak = Arc::downgrade(&self.shared);
                self.shared.scheduler.schedule(
                    delay,
                    Box::new(move || {
                        if let Some(shared) = weak.upgrade() {
                            shared.remove(id, Removal::Expired);
                        }
                    }),
                )
            });

            registry.notifications.push(notification);
            if let Some(timer) = timer {
                registry.timers.insert(id, timer);
            }
            registry.publish()
        };

        self.shared.flush(ticket);
        id
    }

    /// Removes a notification. Unknown or already dismissed ids are ignored
    /// and produce no delivery. Returns whether an entry was removed.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.shared.remove(id, Removal::Manual)
    }

    /// Removes every notification in one step; listeners receive a single
    /// empty snapshot.
    pub fn clear(&self) {
        let (timers, count, ticket) = {
            let mut registry = self.shared.lock();
            let removed = std::mem::take(&mut registry.notifications);
            for notification in &removed {
                notification.close_handle().mark_closed();
            }
            let ticket = registry.publish();
            let timers: Vec<TimerHandle> = registry.timers.drain().map(|(_, t)| t).collect();
            (timers, removed.len(), ticket)
        };

        for timer in timers {
            timer.cancel();
        }
        debug!(count, "notifications cleared");
        self.shared.flush(ticket);
    }

    /// Shows a success notification.
    pub fn success(
        &self,
        title: impl Into<String>,
        description: Option<&str>,
        options: NotificationOptions,
    ) -> NotificationId {
        self.show(Self::severity_spec(Variant::Success, title, description, options))
    }

    /// Shows a warning notification.
    pub fn warning(
        &self,
        title: impl Into<String>,
        description: Option<&str>,
        options: NotificationOptions,
    ) -> NotificationId {
        self.show(Self::severity_spec(Variant::Warning, title, description, options))
    }

    /// Shows an info notification.
    pub fn info(
        &self,
        title: impl Into<String>,
        description: Option<&str>,
        options: NotificationOptions,
    ) -> NotificationId {
        self.show(Self::severity_spec(Variant::Info, title, description, options))
    }

    /// Shows an error notification.
    ///
    /// Errors stay until dismissed unless `options.auto_close` says otherwise.
    pub fn error(
        &self,
        title: impl Into<String>,
        description: Option<&str>,
        mut options: NotificationOptions,
    ) -> NotificationId {
        options.auto_close.get_or_insert(false);
        self.show(Self::severity_spec(Variant::Error, title, description, options))
    }

    fn severity_spec(
        variant: Variant,
        title: impl Into<String>,
        description: Option<&str>,
        options: NotificationOptions,
    ) -> NotificationSpec {
        NotificationSpec {
            variant,
            title: Some(title.into()),
            description: description.map(str::to_owned),
            options,
        }
    }

    /// Returns a snapshot of the registry in insertion order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.shared.lock().notifications.clone()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        let registry = self.shared.lock();
        registry.position(id).map(|pos| registry.notifications[pos].clone())
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.shared.lock().position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.lock().notifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.lock().notifications.is_empty()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.lock().listeners.len()
    }

    /// Number of auto-dismiss timers still outstanding.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.shared.lock().timers.len()
    }
}

impl fmt::Debug for NotificationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.shared.lock();
        f.debug_struct("NotificationManager")
            .field("notifications", &registry.notifications.len())
            .field("listeners", &registry.listeners.len())
            .field("timers", &registry.timers.len())
            .field("settings", &self.shared.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::TickScheduler;
    use std::sync::Barrier;
    use std::time::{Duration, Instant};

    type Recorded = Arc<Mutex<Vec<Vec<NotificationId>>>>;

    fn manager() -> (NotificationManager, TickScheduler) {
        let scheduler = TickScheduler::new();
        (
            NotificationManager::new(Arc::new(scheduler.clone())),
            scheduler,
        )
    }

    fn record(manager: &NotificationManager) -> (Recorded, ListenerHandle) {
        let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&recorded);
        let handle = manager.subscribe(move |list| {
            sink.lock()
                .unwrap()
                .push(list.iter().map(Notification::id).collect());
        });
        (recorded, handle)
    }

    fn ids(manager: &NotificationManager) -> Vec<NotificationId> {
        manager.notifications().iter().map(Notification::id).collect()
    }

    #[test]
    fn new_manager_is_empty() {
        let (manager, _) = manager();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
        assert_eq!(manager.listener_count(), 0);
    }

    #[test]
    fn show_appends_in_insertion_order() {
        let (manager, _) = manager();
        let first = manager.info("first", None, NotificationOptions::default());
        let second = manager.info("second", None, NotificationOptions::default());
        assert_eq!(ids(&manager), vec![first, second]);
    }

    #[test]
    fn ids_are_unique() {
        let (manager, _) = manager();
        let mut seen: Vec<NotificationId> = (0..50)
            .map(|i| manager.show(NotificationSpec::new(Variant::Info).title(format!("n{i}"))))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn show_notifies_synchronously() {
        let (manager, _) = manager();
        let (recorded, _handle) = record(&manager);

        let id = manager.success("Saved", None, NotificationOptions::default());

        assert_eq!(*recorded.lock().unwrap(), vec![vec![id]]);
    }

    #[test]
    fn subscribe_does_not_replay_current_state() {
        let (manager, _) = manager();
        manager.info("existing", None, NotificationOptions::default());
        let (recorded, _handle) = record(&manager);
        assert!(recorded.lock().unwrap().is_empty());
    }

    #[test]
    fn dismiss_twice_notifies_once() {
        let (manager, _) = manager();
        let id = manager.warning("Low stock", None, NotificationOptions::default());
        let (recorded, _handle) = record(&manager);

        assert!(manager.dismiss(id));
        assert!(!manager.dismiss(id));

        assert_eq!(*recorded.lock().unwrap(), vec![Vec::<NotificationId>::new()]);
    }

    #[test]
    fn dismiss_unknown_id_is_silent() {
        let (manager, _) = manager();
        let (recorded, _handle) = record(&manager);
        assert!(!manager.dismiss(NotificationId::from_raw(999)));
        assert!(recorded.lock().unwrap().is_empty());
    }

    #[test]
    fn dismiss_cancels_pending_timer() {
        let (manager, scheduler) = manager();
        let id = manager.info("Report ready", None, NotificationOptions::default());
        assert_eq!(scheduler.pending(), 1);

        manager.dismiss(id);

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(manager.pending_timers(), 0);
    }

    #[test]
    fn error_defaults_to_manual_dismiss() {
        let (manager, scheduler) = manager();
        let id = manager.error("t", Some("d"), NotificationOptions::default());

        let notification = manager.get(id).expect("registered");
        assert!(!notification.auto_close());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn error_honors_explicit_auto_close() {
        let (manager, scheduler) = manager();
        let id = manager.error("t", Some("d"), NotificationOptions::new().auto_close(true));

        assert!(manager.get(id).expect("registered").auto_close());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn severity_helpers_set_variant_and_text() {
        let (manager, _) = manager();
        let s = manager.success("a", Some("desc"), NotificationOptions::default());
        let w = manager.warning("b", None, NotificationOptions::default());
        let i = manager.info("c", None, NotificationOptions::default());
        let e = manager.error("d", None, NotificationOptions::default());

        assert_eq!(manager.get(s).unwrap().variant(), Variant::Success);
        assert_eq!(manager.get(s).unwrap().description(), Some("desc"));
        assert_eq!(manager.get(w).unwrap().variant(), Variant::Warning);
        assert_eq!(manager.get(i).unwrap().variant(), Variant::Info);
        assert_eq!(manager.get(e).unwrap().variant(), Variant::Error);
        assert_eq!(manager.get(e).unwrap().title(), Some("d"));
    }

    #[test]
    fn auto_close_false_schedules_no_timer() {
        let (manager, scheduler) = manager();
        manager.show(NotificationSpec::new(Variant::Warning).auto_close(false));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn default_delay_comes_from_settings() {
        let settings = ManagerSettings {
            auto_close_delay: AutoCloseDelay::new(1200),
        };
        let manager = NotificationManager::with_settings(settings, Arc::new(TickScheduler::new()));
        let id = manager.show(NotificationSpec::new(Variant::Info));
        assert_eq!(
            manager.get(id).unwrap().auto_close_delay(),
            Duration::from_millis(1200)
        );
    }

    #[test]
    fn timer_expiry_removes_notification() {
        let (manager, scheduler) = manager();
        let id = manager.show(
            NotificationSpec::new(Variant::Success).auto_close_delay(Duration::from_millis(1000)),
        );
        let (recorded, _handle) = record(&manager);

        scheduler.tick(Instant::now() + Duration::from_millis(500));
        assert!(manager.contains(id));

        scheduler.tick(Instant::now() + Duration::from_millis(1500));
        assert!(!manager.contains(id));
        assert_eq!(*recorded.lock().unwrap(), vec![Vec::<NotificationId>::new()]);
        assert_eq!(manager.pending_timers(), 0);
    }

    #[test]
    fn stale_timer_after_manual_dismiss_is_harmless() {
        // Bypass cancellation to exercise the presence guard directly.
        let (manager, scheduler) = manager();
        let id = manager.show(
            NotificationSpec::new(Variant::Info).auto_close_delay(Duration::from_millis(1000)),
        );
        let (recorded, _handle) = record(&manager);
        let timer = manager.shared.lock().timers.remove(&id);
        drop(timer);

        manager.dismiss(id);
        let fired = scheduler.tick(Instant::now() + Duration::from_millis(1500));

        assert_eq!(fired, 1);
        assert!(manager.is_empty());
        assert_eq!(recorded.lock().unwrap().len(), 1);
    }

    #[test]
    fn clear_delivers_single_empty_snapshot() {
        let (manager, scheduler) = manager();
        for title in ["a", "b", "c"] {
            manager.info(title, None, NotificationOptions::default());
        }
        let (recorded, _handle) = record(&manager);

        manager.clear();

        assert!(manager.is_empty());
        assert_eq!(*recorded.lock().unwrap(), vec![Vec::<NotificationId>::new()]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn clear_marks_snapshots_closed() {
        let (manager, _) = manager();
        manager.info("a", None, NotificationOptions::default());
        let snapshot = manager.notifications();

        manager.clear();

        assert!(snapshot[0].is_closed());
    }

    #[test]
    fn unsubscribe_stops_delivery_for_that_listener_only() {
        let (manager, _) = manager();
        let (first, first_handle) = record(&manager);
        let (second, _second_handle) = record(&manager);

        manager.info("one", None, NotificationOptions::default());
        first_handle.unsubscribe();
        first_handle.unsubscribe();
        manager.info("two", None, NotificationOptions::default());
        manager.clear();

        assert_eq!(first.lock().unwrap().len(), 1);
        assert_eq!(second.lock().unwrap().len(), 3);
        assert_eq!(manager.listener_count(), 1);
    }

    #[test]
    fn dropping_handle_unsubscribes() {
        let (manager, _) = manager();
        let (recorded, handle) = record(&manager);
        drop(handle);

        manager.info("ignored", None, NotificationOptions::default());

        assert!(recorded.lock().unwrap().is_empty());
        assert_eq!(manager.listener_count(), 0);
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let (manager, _) = manager();
        let stash: Arc<Mutex<Vec<Vec<Notification>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&stash);
        let _handle = manager.subscribe(move |list| sink.lock().unwrap().push(list));

        manager.info("a", None, NotificationOptions::default());
        manager.clear();

        let stash = stash.lock().unwrap();
        assert_eq!(stash[0].len(), 1);
        assert!(stash[1].is_empty());
    }

    #[test]
    fn close_handle_dismisses_once() {
        let (manager, _) = manager();
        let id = manager.success("Saved", None, NotificationOptions::default());
        let (recorded, _handle) = record(&manager);
        let snapshot = manager.get(id).expect("registered");

        snapshot.close();
        snapshot.clone().close();

        assert!(manager.is_empty());
        assert_eq!(recorded.lock().unwrap().len(), 1);
    }

    #[test]
    fn reentrant_listener_sees_ordered_snapshots() {
        let (manager, _) = manager();
        let (recorded, _recorder) = record(&manager);

        // Dismisses every warning as soon as it appears.
        let inner = manager.clone();
        let _auto_dismiss = manager.subscribe(move |list| {
            for n in list.iter().filter(|n| n.variant() == Variant::Warning) {
                inner.dismiss(n.id());
            }
        });

        let id = manager.warning("transient", None, NotificationOptions::default());

        assert!(manager.is_empty());
        assert_eq!(
            *recorded.lock().unwrap(),
            vec![vec![id], Vec::<NotificationId>::new()]
        );
    }

    #[test]
    fn independent_managers_do_not_share_state() {
        let (a, _) = manager();
        let (b, _) = manager();
        let (recorded_b, _handle) = record(&b);

        a.info("only in a", None, NotificationOptions::default());

        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        assert!(recorded_b.lock().unwrap().is_empty());
    }

    #[test]
    fn show_then_dismiss_end_to_end() {
        let (manager, _) = manager();
        let (recorded, _handle) = record(&manager);

        let id = manager.show(NotificationSpec::new(Variant::Success).title("Saved"));
        assert_eq!(manager.len(), 1);
        manager.dismiss(id);
        assert_eq!(manager.len(), 0);

        assert_eq!(
            *recorded.lock().unwrap(),
            vec![vec![id], Vec::<NotificationId>::new()]
        );
    }

    #[test]
    fn unrepresentable_delay_still_registers_and_notifies() {
        let (manager, scheduler) = manager();
        let (recorded, _handle) = record(&manager);

        let id = manager.show(NotificationSpec::new(Variant::Info).auto_close_delay(Duration::MAX));

        assert_eq!(ids(&manager), vec![id]);
        assert_eq!(*recorded.lock().unwrap(), vec![vec![id]]);
        assert_eq!(manager.pending_timers(), 1);

        scheduler.tick(Instant::now() + Duration::from_secs(3600));
        assert!(manager.contains(id));

        assert!(manager.dismiss(id));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn show_from_other_thread_waits_for_in_flight_delivery() {
        let (manager, _) = manager();
        let (recorded, _recorder) = record(&manager);

        // Holds the first snapshot's delivery open on the worker thread.
        let entered = Arc::new(Barrier::new(2));
        let gate = Arc::clone(&entered);
        let _slow = manager.subscribe(move |list| {
            if list.len() == 1 {
                gate.wait();
                thread::sleep(Duration::from_millis(50));
            }
        });

        let worker = {
            let manager = manager.clone();
            thread::spawn(move || manager.info("first", None, NotificationOptions::default()))
        };
        entered.wait();

        let second = manager.info("second", None, NotificationOptions::default());
        let seen_on_return = recorded.lock().unwrap().clone();
        let first = worker.join().expect("worker thread");

        assert_eq!(seen_on_return, vec![vec![first], vec![first, second]]);
        assert_eq!(*recorded.lock().unwrap(), seen_on_return);
    }

    #[test]
    fn panicking_listener_does_not_stall_later_delivery() {
        let (manager, _) = manager();
        let armed = Arc::new(AtomicBool::new(true));
        let trigger = Arc::clone(&armed);
        let _faulty = manager.subscribe(move |_| {
            if trigger.swap(false, Ordering::SeqCst) {
                panic!("listener failure");
            }
        });
        let (recorded, _handle) = record(&manager);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            manager.info("first", None, NotificationOptions::default())
        }));
        assert!(outcome.is_err());

        let second = manager.info("second", None, NotificationOptions::default());
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].contains(&second));
        assert_eq!(recorded[0].len(), 2);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! End-to-end lifecycle of notifications driven by real tokio timers.

use bizdesk::config::{NotificationsConfig, Position};
use bizdesk::notifications::{
    ListenerHandle, ManagerSettings, Notification, NotificationManager, NotificationOptions,
    NotificationSpec, Variant,
};
use bizdesk::ui::container::NotificationContainer;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

fn manager() -> NotificationManager {
    NotificationManager::on_runtime(ManagerSettings::default(), Handle::current())
}

type Seen = Arc<Mutex<Vec<Vec<Notification>>>>;

fn recorder(manager: &NotificationManager) -> (Seen, ListenerHandle) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handle = manager.subscribe(move |snapshot| {
        sink.lock().expect("recorder poisoned").push(snapshot);
    });
    (seen, handle)
}

async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn success_toast_expires_after_default_delay() {
    let manager = manager();
    let (seen, _handle) = recorder(&manager);

    let id = manager.success("Invoice saved", None, NotificationOptions::default());
    assert!(manager.contains(id));

    advance(Duration::from_millis(4_900)).await;
    assert!(manager.contains(id));

    advance(Duration::from_millis(200)).await;
    assert!(!manager.contains(id));
    assert_eq!(manager.pending_timers(), 0);

    let seen = seen.lock().expect("recorder poisoned");
    assert_eq!(seen.len(), 2);
    assert!(seen[1].is_empty());
}

#[tokio::test(start_paused = true)]
async fn error_toast_stays_until_dismissed() {
    let manager = manager();
    let id = manager.error("Vendor sync failed", None, NotificationOptions::default());

    advance(Duration::from_secs(120)).await;
    assert!(manager.contains(id));
    assert_eq!(manager.pending_timers(), 0);

    assert!(manager.dismiss(id));
    assert!(manager.is_empty());
}

#[tokio::test(start_paused = true)]
async fn manual_dismiss_cancels_timer() {
    let manager = manager();
    let (seen, _handle) = recorder(&manager);
    let id = manager.info("Report ready", None, NotificationOptions::default());

    assert!(manager.dismiss(id));
    advance(Duration::from_secs(10)).await;

    // One snapshot for show, one for dismiss, none from the cancelled timer.
    assert_eq!(seen.lock().expect("recorder poisoned").len(), 2);
}

#[tokio::test(start_paused = true)]
async fn per_notification_delay_overrides_default() {
    let manager = manager();
    let quick = manager.show(
        NotificationSpec::new(Variant::Warning)
            .title("Low stock")
            .auto_close_delay(Duration::from_secs(1)),
    );
    let slow = manager.warning("Backup pending", None, NotificationOptions::default());

    advance(Duration::from_millis(1_100)).await;
    assert!(!manager.contains(quick));
    assert!(manager.contains(slow));
}

#[tokio::test(start_paused = true)]
async fn clear_stops_every_timer() {
    let manager = manager();
    let (seen, _handle) = recorder(&manager);
    manager.success("One", None, NotificationOptions::default());
    manager.success("Two", None, NotificationOptions::default());

    manager.clear();
    assert_eq!(manager.pending_timers(), 0);
    advance(Duration::from_secs(10)).await;

    let seen = seen.lock().expect("recorder poisoned");
    assert_eq!(seen.len(), 3);
    assert!(seen[2].is_empty());
}

#[tokio::test(start_paused = true)]
async fn container_follows_timer_expiry() {
    let manager = manager();
    let config = NotificationsConfig {
        position: Some(Position::TopCenter),
        ..NotificationsConfig::default()
    };
    let mut container = NotificationContainer::from_config(&manager, &config);
    assert_eq!(container.position(), Position::TopCenter);

    manager.success("Payment recorded", None, NotificationOptions::default());
    container.tick(Instant::now());
    assert_eq!(container.toasts().len(), 1);

    advance(Duration::from_secs(6)).await;
    let now = Instant::now();
    container.tick(now);
    assert!(container.toasts()[0].is_closing());

    container.tick(now + Duration::from_secs(1));
    assert!(container.is_empty());

    drop(container);
    assert_eq!(manager.listener_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn managers_do_not_share_state() {
    let first = manager();
    let second = manager();

    first.success("Only here", None, NotificationOptions::default());
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

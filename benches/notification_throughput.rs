// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the notification registry.
//!
//! Measures the performance of:
//! - Showing and dismissing a notification with subscribed listeners
//! - Expiring a batch of notifications through the tick scheduler
//! - Reconciling the toast container with a fresh snapshot

use bizdesk::config::Position;
use bizdesk::notifications::{
    CloseTransition, NotificationManager, NotificationOptions, TickScheduler,
};
use bizdesk::ui::container::NotificationContainer;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Benchmark a show/dismiss pair against a growing number of listeners.
fn bench_show_dismiss(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_registry");

    for listeners in [0usize, 1, 8] {
        let manager = NotificationManager::new(Arc::new(TickScheduler::new()));
        let _handles: Vec<_> = (0..listeners)
            .map(|_| {
                manager.subscribe(|snapshot| {
                    black_box(snapshot.len());
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("show_dismiss", listeners),
            &listeners,
            |b, _| {
                b.iter(|| {
                    let id = manager.success("Invoice saved", None, NotificationOptions::default());
                    black_box(manager.dismiss(id));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark expiry of 100 auto-closing notifications in one tick.
fn bench_expire_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_registry");

    group.bench_function("expire_100", |b| {
        b.iter(|| {
            let scheduler = TickScheduler::new();
            let manager = NotificationManager::new(Arc::new(scheduler.clone()));
            for _ in 0..100 {
                manager.info("Report ready", None, NotificationOptions::default());
            }
            let fired = scheduler.tick(Instant::now() + Duration::from_secs(60));
            black_box(fired);
        });
    });

    group.finish();
}

/// Benchmark the container picking up a 20-entry snapshot.
fn bench_container_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_container");

    group.bench_function("sync_20", |b| {
        b.iter(|| {
            let manager = NotificationManager::new(Arc::new(TickScheduler::new()));
            let mut container = NotificationContainer::mount(
                &manager,
                Position::BottomRight,
                CloseTransition::default(),
            );
            for _ in 0..20 {
                manager.warning("Low stock", None, NotificationOptions::default());
            }
            black_box(container.sync(Instant::now()));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_show_dismiss,
    bench_expire_batch,
    bench_container_sync
);
criterion_main!(benches);

//! Performance benchmarks for the store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use unistore::app::{self, AppAction, AppState, Todo};
use unistore::Store;

fn counter_store() -> Store<u64, u64> {
    Store::from_fn(|state: Option<Arc<u64>>, n: &u64| Arc::new(state.map_or(0, |s| *s) + n))
}

/// Benchmark dispatch with varying subscriber counts
fn bench_dispatch_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_fanout");

    for subscribers in [0, 1, 10, 100] {
        group.bench_with_input(
            BenchmarkId::new("subscribers", subscribers),
            &subscribers,
            |b, &count| {
                let store = counter_store();
                let hits = Arc::new(AtomicU64::new(0));
                for _ in 0..count {
                    let hits = Arc::clone(&hits);
                    store.subscribe(move || {
                        hits.fetch_add(1, Ordering::Relaxed);
                    });
                }

                b.iter(|| {
                    store.dispatch(black_box(1)).unwrap();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark toggling one todo in lists of varying size
fn bench_todo_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("todo_toggle");

    for todos in [10u64, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("todos", todos), &todos, |b, &len| {
            let store: Store<AppState, AppAction> = Store::from_fn(app::app);
            for id in 0..len {
                store
                    .dispatch(app::add_todo(Todo::new(id, format!("todo {}", id))))
                    .unwrap();
            }

            b.iter(|| {
                store.dispatch(black_box(app::toggle_todo(len / 2))).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark get_state under a subscriber-heavy store
fn bench_get_state(c: &mut Criterion) {
    let store = counter_store();
    store.dispatch(1).unwrap();
    for _ in 0..100 {
        store.subscribe(|| {});
    }

    c.bench_function("get_state", |b| {
        b.iter(|| black_box(store.get_state()));
    });
}

criterion_group!(benches, bench_dispatch_fanout, bench_todo_toggle, bench_get_state);
criterion_main!(benches);

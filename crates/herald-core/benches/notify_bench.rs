//! Benchmarks for notification fan-out and registration.
//!
//! Run with: `cargo bench --package herald-core --bench notify_bench`
//!
//! Groups:
//! - `set_value/N`: one pass over N live listeners.
//! - `set_value_half_expired/N`: N entries, every other listener dropped.
//! - `register_unregister/N`: churn one id on a registry of N entries.

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use herald_core::{Listener, Subject};

struct Sink {
    total: Cell<i64>,
}

impl Listener<i64> for Sink {
    fn on_value_changed(&self, value: &i64) {
        self.total.set(self.total.get().wrapping_add(*value));
    }
}

fn sinks(n: usize) -> Vec<Rc<Sink>> {
    (0..n)
        .map(|_| Rc::new(Sink { total: Cell::new(0) }))
        .collect()
}

fn bench_set_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_value");
    for n in [1usize, 16, 256] {
        let subject: Subject<i64, usize> = Subject::new(0);
        let listeners = sinks(n);
        for (i, l) in listeners.iter().enumerate() {
            subject.register(l, i);
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut v = 0i64;
            b.iter(|| {
                v += 1;
                subject.set_value(black_box(v));
            });
        });
    }
    group.finish();
}

fn bench_set_value_half_expired(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_value_half_expired");
    for n in [16usize, 256] {
        let subject: Subject<i64, usize> = Subject::new(0);
        let mut listeners = sinks(n);
        for (i, l) in listeners.iter().enumerate() {
            subject.register(l, i);
        }
        listeners = listeners
            .into_iter()
            .enumerate()
            .filter_map(|(i, l)| (i % 2 == 0).then_some(l))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| subject.set_value(black_box(1)));
        });
        black_box(&listeners);
    }
    group.finish();
}

fn bench_register_unregister(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_unregister");
    for n in [16usize, 256] {
        let subject: Subject<i64, usize> = Subject::new(0);
        let listeners = sinks(n + 1);
        for (i, l) in listeners.iter().take(n).enumerate() {
            subject.register(l, i);
        }
        let extra = &listeners[n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                subject.register(extra, n);
                black_box(subject.unregister(&n));
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_set_value,
    bench_set_value_half_expired,
    bench_register_unregister
);
criterion_main!(benches);

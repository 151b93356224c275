// benches/threadpool_bench.rs
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ctpool::{Task, ThreadPool};
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn bench_task_dispatch_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("threadpool_dispatch");

    for num_threads in [1, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("push_and_wait", num_threads),
            num_threads,
            |b, &num_threads| {
                let pool = ThreadPool::new(num_threads).unwrap();
                b.iter(|| {
                    let counter = Arc::new(AtomicU64::new(0));
                    for _ in 0..1000 {
                        let counter = Arc::clone(&counter);
                        pool.push_task(Task::new(move || {
                            counter.fetch_add(1, Ordering::Relaxed);
                        }));
                    }
                    pool.wait();
                    black_box(counter.load(Ordering::Relaxed));
                });
            },
        );
    }

    group.finish();
}

fn bench_barrier_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("barrier_round_trip");

    for num_threads in [2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("push_barrier", num_threads),
            num_threads,
            |b, &num_threads| {
                let pool = ThreadPool::new(num_threads).unwrap();
                b.iter(|| {
                    for _ in 0..num_threads {
                        pool.push_task(Task::new(|| {}));
                    }
                    pool.push_barrier();
                    pool.wait();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_task_dispatch_throughput,
    bench_barrier_round_trip
);
criterion_main!(benches);

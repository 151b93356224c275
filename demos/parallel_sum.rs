// demos/parallel_sum.rs
//! Sums a large range of integers by fanning work out across a thread pool.

use ctpool::{Task, ThreadPool};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

fn main() {
    tracing_subscriber::fmt::init();

    const N: u64 = 20_000_000;
    const CHUNK: u64 = 50_000;

    let pool = ThreadPool::new(num_cpus_hint()).unwrap();
    let total = Arc::new(AtomicU64::new(0));
    let start = Instant::now();

    let mut lo = 1u64;
    while lo <= N {
        let hi = (lo + CHUNK - 1).min(N);
        let total = Arc::clone(&total);
        pool.push_task(Task::new(move || {
            let mut partial = 0u64;
            for i in lo..=hi {
                partial += i;
            }
            total.fetch_add(partial, Ordering::Relaxed);
        }));
        lo = hi + 1;
    }

    pool.wait();
    let elapsed = start.elapsed();
    let sum = total.load(Ordering::Relaxed);
    let expected = N * (N + 1) / 2;
    println!("sum(1..={N}) = {sum} (expected {expected}) in {elapsed:?}");
    assert_eq!(sum, expected);
    pool.destroy().unwrap();
}

fn num_cpus_hint() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

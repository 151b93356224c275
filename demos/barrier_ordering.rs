// demos/barrier_ordering.rs
//! Runs a handful of synchronized phases across a thread pool, using `push_barrier` to
//! make sure no worker starts phase N+1 before every worker has finished phase N.

use ctpool::{Task, ThreadPool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt::init();

    const WORKERS: usize = 6;
    const PHASES: usize = 4;

    let pool = ThreadPool::new(WORKERS).unwrap();
    let phase = Arc::new(AtomicUsize::new(0));

    for p in 0..PHASES {
        for w in 0..WORKERS {
            let phase = Arc::clone(&phase);
            pool.push_task(Task::new(move || {
                let observed = phase.load(Ordering::SeqCst);
                println!("worker {w} running phase {p}, shared phase counter reads {observed}");
            }));
        }
        pool.push_barrier();
        let phase = Arc::clone(&phase);
        pool.push_task(Task::new(move || {
            phase.fetch_add(1, Ordering::SeqCst);
        }));
        pool.push_barrier();
    }

    pool.wait();
    println!("completed {} phases", phase.load(Ordering::SeqCst));
    pool.destroy().unwrap();
}

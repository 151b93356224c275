// demos/prefix_sum.rs
//! A Blelloch-style parallel exclusive scan, dispatched through the thread pool with a
//! barrier at each step boundary: an up-sweep (reduce) pass followed by a down-sweep
//! pass that turns the reduction tree back into a per-index prefix sum.

use ctpool::{Task, ThreadPool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt::init();

    const LEN: usize = 1 << 16;
    let data: Arc<Vec<AtomicUsize>> = Arc::new((0..LEN).map(|i| AtomicUsize::new(i + 1)).collect());

    let pool = ThreadPool::new(8).unwrap();

    // Up-sweep: at each level, combine pairs spaced 2^d apart into the right element.
    let mut step = 1;
    while step < LEN {
        let mut idx = step * 2 - 1;
        while idx < LEN {
            let data = Arc::clone(&data);
            let left = idx - step;
            pool.push_task(Task::new(move || {
                let addend = data[left].load(Ordering::Relaxed);
                data[idx].fetch_add(addend, Ordering::Relaxed);
            }));
            idx += step * 2;
        }
        pool.push_barrier();
        step *= 2;
    }
    pool.wait();

    // The root of the reduction tree becomes the identity for the down-sweep.
    data[LEN - 1].store(0, Ordering::Relaxed);

    // Down-sweep: at each level, swap left and right, then fold the old left into the
    // old right. Top to bottom, this distributes partial sums back down the tree until
    // every index holds the exclusive prefix sum of the original input.
    let mut step = LEN / 2;
    while step >= 1 {
        let mut idx = step * 2 - 1;
        while idx < LEN {
            let data = Arc::clone(&data);
            let left = idx - step;
            pool.push_task(Task::new(move || {
                let old_left = data[left].load(Ordering::Relaxed);
                let old_idx = data[idx].load(Ordering::Relaxed);
                data[left].store(old_idx, Ordering::Relaxed);
                data[idx].store(old_idx + old_left, Ordering::Relaxed);
            }));
            idx += step * 2;
        }
        pool.push_barrier();
        step /= 2;
    }
    pool.wait();

    let mut running = 0usize;
    for (i, slot) in data.iter().enumerate() {
        let expected = running;
        let got = slot.load(Ordering::Relaxed);
        assert_eq!(got, expected, "index {i}: got {got}, expected {expected}");
        running += i + 1;
    }
    println!("exclusive scan over 1..={LEN} matches the serial prefix sum at every index");
    pool.destroy().unwrap();
}

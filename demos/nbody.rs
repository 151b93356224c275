// demos/nbody.rs
//! A naive O(N^2) gravitational N-body step, range-partitioned across a thread pool
//! with a barrier between timesteps.
//!
//! This is a user of the runtime, not part of it: bodies live behind an
//! `Arc<Mutex<Vec<Body>>>` shared handle rather than a process-global array, and each
//! timestep is one round of range-partitioned tasks followed by `push_barrier()` so no
//! worker starts reading next-step positions before every worker has finished writing
//! this step's.

use ctpool::{Task, ThreadPool};
use std::sync::{Arc, Mutex};
use std::time::Instant;

const G: f64 = 6.674e-11;
const SOFTENING: f64 = 1e-3;
const DT: f64 = 0.01;

#[derive(Clone, Copy)]
struct Body {
    pos: [f64; 3],
    vel: [f64; 3],
    mass: f64,
}

fn init_bodies(n: usize) -> Vec<Body> {
    // Deterministic pseudo-random spread so the demo doesn't depend on a rand crate.
    let mut seed: u64 = 0x2545F4914F6CDD1D;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n)
        .map(|_| Body {
            pos: [next() * 100.0 - 50.0, next() * 100.0 - 50.0, next() * 100.0 - 50.0],
            vel: [0.0, 0.0, 0.0],
            mass: 1.0 + next() * 10.0,
        })
        .collect()
}

fn step_range(snapshot: &[Body], out: &mut [Body], lo: usize, hi: usize) {
    for i in lo..hi {
        let mut accel = [0.0f64; 3];
        let bi = snapshot[i];
        for (j, bj) in snapshot.iter().enumerate() {
            if i == j {
                continue;
            }
            let dx = bj.pos[0] - bi.pos[0];
            let dy = bj.pos[1] - bi.pos[1];
            let dz = bj.pos[2] - bi.pos[2];
            let dist_sq = dx * dx + dy * dy + dz * dz + SOFTENING;
            let inv_dist = dist_sq.sqrt().recip();
            let inv_dist3 = inv_dist * inv_dist * inv_dist;
            let f = G * bj.mass * inv_dist3;
            accel[0] += f * dx;
            accel[1] += f * dy;
            accel[2] += f * dz;
        }

        let mut body = bi;
        for k in 0..3 {
            body.vel[k] += accel[k] * DT;
            body.pos[k] += body.vel[k] * DT;
        }
        out[i - lo] = body;
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    const NUM_BODIES: usize = 2_000;
    const NUM_STEPS: usize = 10;

    let pool = ThreadPool::new(8).unwrap();
    let bodies = Arc::new(Mutex::new(init_bodies(NUM_BODIES)));
    let start = Instant::now();

    for step in 0..NUM_STEPS {
        let snapshot: Arc<Vec<Body>> = Arc::new(bodies.lock().unwrap().clone());
        let chunk = NUM_BODIES.div_ceil(pool.num_threads());

        let mut lo = 0;
        while lo < NUM_BODIES {
            let hi = (lo + chunk).min(NUM_BODIES);
            let snapshot = Arc::clone(&snapshot);
            let bodies = Arc::clone(&bodies);
            pool.push_task(Task::new(move || {
                let mut out = vec![snapshot[lo]; hi - lo];
                step_range(&snapshot, &mut out, lo, hi);
                let mut guard = bodies.lock().unwrap();
                guard[lo..hi].copy_from_slice(&out);
            }));
            lo = hi;
        }
        pool.push_barrier();
        pool.wait();
        tracing::debug!(step, "timestep complete");
    }

    let elapsed = start.elapsed();
    let final_bodies = bodies.lock().unwrap();
    let centroid = final_bodies
        .iter()
        .fold([0.0; 3], |acc, b| [acc[0] + b.pos[0], acc[1] + b.pos[1], acc[2] + b.pos[2]]);
    println!(
        "{NUM_BODIES} bodies, {NUM_STEPS} steps in {elapsed:?}; centroid = {:?}",
        centroid.map(|c| c / NUM_BODIES as f64)
    );
    pool.destroy().unwrap();
}

// src/barrier.rs
//! A one-shot, N-party rendezvous.
//!
//! Every party calls [`Barrier::wait`] once. The call blocks until all `num_parties`
//! have arrived, then every caller returns together. Two properties are each witnessed
//! by exactly one thread per barrier: "serial" (the thread whose arrival completed the
//! cohort, and so never actually blocked) and "final" (the last thread to leave, after
//! every other waiter has been released). When `num_parties == 1` a single thread is
//! both: it completes the cohort by arriving and is the only one to leave.
//!
//! The barrier is single-use: a generation counter is not exposed, matching the
//! resolved design question of whether to support rearm-and-reuse (it does not).

use std::sync::{Condvar, Mutex};

use crate::error::{BarrierError, BarrierResult};

struct Inner {
    num_parties: usize,
    arrived: usize,
    remaining: usize,
    released: bool,
}

/// The outcome of one thread's call to [`Barrier::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierWaitResult {
    serial: bool,
    final_: bool,
}

impl BarrierWaitResult {
    /// True for exactly one thread per generation: the one whose arrival satisfied the
    /// cohort and so returned without ever parking on the condvar.
    pub fn is_serial(&self) -> bool {
        self.serial
    }

    /// True for exactly one thread per generation: the last to leave after the cohort
    /// was released. With `num_parties == 1` this is the same thread as the serial one.
    pub fn is_final(&self) -> bool {
        self.final_
    }
}

/// A mutex/condvar rendezvous point for a fixed number of parties.
pub struct Barrier {
    inner: Mutex<Inner>,
    cv: Condvar,
}

impl Barrier {
    /// Creates a barrier for `num_parties` threads. `num_parties == 0` is rejected: a
    /// barrier nobody can ever satisfy is a caller bug, not a degenerate but valid case.
    pub fn new(num_parties: usize) -> BarrierResult<Self> {
        if num_parties == 0 {
            return Err(BarrierError::InitFail);
        }
        Ok(Self {
            inner: Mutex::new(Inner {
                num_parties,
                arrived: 0,
                remaining: num_parties,
                released: false,
            }),
            cv: Condvar::new(),
        })
    }

    /// Number of parties this barrier was built for.
    pub fn num_parties(&self) -> usize {
        self.inner.lock().unwrap().num_parties
    }

    /// Blocks until every party has called `wait`, then returns. Consumes no resources
    /// on return beyond the two flags in [`BarrierWaitResult`]; the barrier itself is
    /// reclaimed by ordinary reference counting once every caller has returned.
    pub fn wait(&self) -> BarrierWaitResult {
        let mut inner = self.inner.lock().unwrap();
        inner.arrived += 1;

        let serial = if inner.arrived < inner.num_parties {
            while !inner.released {
                inner = self.cv.wait(inner).unwrap();
            }
            false
        } else {
            inner.released = true;
            self.cv.notify_all();
            true
        };

        inner.remaining -= 1;
        let final_ = inner.remaining == 0;

        BarrierWaitResult { serial, final_ }
    }
}

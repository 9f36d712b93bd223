// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred work for the single control thread.
//!
//! Device handles hand their side effects to the queue instead of running
//! them inside the router. The serve loop runs pending jobs after each
//! request and drains the queue at shutdown.

use std::cell::RefCell;
use std::collections::VecDeque;

type Job = Box<dyn FnOnce()>;

/// FIFO of fire-and-forget jobs.
#[derive(Default)]
pub struct WorkQueue {
    jobs: RefCell<VecDeque<Job>>,
}

impl std::fmt::Debug for WorkQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&self, job: impl FnOnce() + 'static) {
        self.jobs.borrow_mut().push_back(Box::new(job));
    }

    pub fn pending(&self) -> usize {
        self.jobs.borrow().len()
    }

    /// Run the jobs queued before this call. Jobs they queue wait for the
    /// next iteration.
    pub fn run_pending(&self) -> usize {
        let batch = self.pending();
        for _ in 0..batch {
            if !self.run_one() {
                break;
            }
        }
        batch
    }

    /// Run jobs until the queue is empty, including jobs queued by jobs.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        while self.run_one() {
            ran += 1;
        }
        ran
    }

    fn run_one(&self) -> bool {
        // The borrow must end before the job runs; jobs may defer more work
        let job = self.jobs.borrow_mut().pop_front();
        match job {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

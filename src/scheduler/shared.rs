//! Thread-safe handle to a scheduler.
//!
//! Each submission runs entirely under one lock, so jobs from concurrent
//! callers never interleave their step assignments.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::report::{JobOutcome, ScheduleReport};
use super::Scheduler;
use crate::error::Result;
use crate::models::{Job, ScheduledTask};

/// Cloneable, lock-protected scheduler.
#[derive(Debug, Clone)]
pub struct SharedScheduler {
    inner: Arc<Mutex<Scheduler>>,
}

impl SharedScheduler {
    /// Wraps a scheduler.
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
        }
    }

    // A panic mid-submit cannot leave partial state (commit happens after
    // planning), so a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Scheduler> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submits a job as one critical section.
    pub fn submit(&self, job: &Job) -> Result<JobOutcome> {
        self.lock().submit(job)
    }

    /// Snapshot of the flattened schedule.
    pub fn schedule(&self) -> Vec<ScheduledTask> {
        self.lock().schedule().to_vec()
    }

    /// Resets to the configured origin.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Current report.
    pub fn report(&self) -> ScheduleReport {
        self.lock().report()
    }

    /// Runs `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut Scheduler) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use std::thread;

    #[test]
    fn test_concurrent_submissions_do_not_overlap() {
        let shared =
            SharedScheduler::new(Scheduler::standard(SchedulerConfig::default()).unwrap());

        thread::scope(|scope| {
            for i in 0..4 {
                let handle = shared.clone();
                scope.spawn(move || {
                    let product = if i % 2 == 0 { "Inner Bearing" } else { "CVT Tank" };
                    handle.submit(&Job::new(product, 3)).unwrap();
                });
            }
        });

        let tasks = shared.schedule();
        assert_eq!(tasks.len(), 2 * 3 * 6 + 2 * 3 * 4);
        for (i, a) in tasks.iter().enumerate() {
            for b in &tasks[i + 1..] {
                if a.machine_name == b.machine_name {
                    assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
                }
            }
        }
        let job_ids: std::collections::BTreeSet<_> = tasks.iter().map(|t| t.job_id).collect();
        assert_eq!(job_ids.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reset_and_with() {
        let shared =
            SharedScheduler::new(Scheduler::standard(SchedulerConfig::default()).unwrap());
        shared.submit(&Job::new("CVT Tank", 1)).unwrap();
        assert_eq!(shared.with(|s| s.cursor()), 86);
        assert_eq!(shared.report().makespan, 86);

        shared.reset();
        assert!(shared.schedule().is_empty());
    }
}

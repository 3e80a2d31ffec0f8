//! Greedy scheduler and reporting.
//!
//! # Algorithm
//!
//! `Scheduler` assigns each unit-step of a job to the earliest-available
//! eligible machine, in submission order, with no reordering or
//! backtracking.
//!
//! # Reporting
//!
//! `JobOutcome` carries a job's tasks, finish time, and due-time check;
//! `ScheduleReport` summarizes the whole schedule and machine usage.
//!
//! # Concurrency
//!
//! `Scheduler` is single-writer (`&mut self`). `SharedScheduler` wraps it
//! in a mutex so each submission is one critical section.

mod report;
mod simple;
mod shared;

pub use report::{JobOutcome, JobRecord, MachineUsage, ScheduleReport};
pub use shared::SharedScheduler;
pub use simple::Scheduler;

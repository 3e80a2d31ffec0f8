//! Flattened schedule model.
//!
//! The schedule is an append-only list of tasks, kept sorted by start time.
//! Sorting is stable, so tasks with equal starts stay in submission order.

use serde::{Deserialize, Serialize};

use super::{JobId, Minutes};

/// One unit-step placed on a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Job that produced this task.
    pub job_id: JobId,
    /// Product id of the job.
    pub part_no: String,
    /// Unit index within the job (0-based).
    pub unit: u32,
    /// Process step name.
    pub process_name: String,
    /// Machine the step runs on.
    pub machine_name: String,
    /// Start instant (inclusive).
    pub start: Minutes,
    /// End instant (exclusive).
    pub end: Minutes,
}

impl ScheduledTask {
    /// Task length in minutes.
    #[inline]
    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }

    /// Whether two tasks' `[start, end)` intervals overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// All tasks committed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    tasks: Vec<ScheduledTask>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends tasks and re-sorts by start.
    pub fn extend(&mut self, tasks: impl IntoIterator<Item = ScheduledTask>) {
        self.tasks.extend(tasks);
        self.tasks.sort_by_key(|t| t.start);
    }

    /// Removes every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Tasks in start order.
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Latest end over all tasks (0 when empty).
    pub fn makespan(&self) -> Minutes {
        self.tasks.iter().map(|t| t.end).max().unwrap_or(0)
    }

    /// Tasks on one machine, in start order.
    pub fn tasks_for_machine(&self, machine: &str) -> Vec<&ScheduledTask> {
        self.tasks
            .iter()
            .filter(|t| t.machine_name == machine)
            .collect()
    }

    /// Tasks of one job, in start order.
    pub fn tasks_for_job(&self, job_id: JobId) -> Vec<&ScheduledTask> {
        self.tasks.iter().filter(|t| t.job_id == job_id).collect()
    }

    /// Latest end among a job's tasks.
    pub fn job_completion_time(&self, job_id: JobId) -> Option<Minutes> {
        self.tasks
            .iter()
            .filter(|t| t.job_id == job_id)
            .map(|t| t.end)
            .max()
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

//! Job outcomes and schedule reporting.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Global cursor: no job finishes after it |
//! | Busy time | Sum of task durations on a machine |
//! | Utilization | busy time / (makespan - origin) |
//! | Tardiness | max(0, finish - due) |

use serde::{Deserialize, Serialize};

use crate::models::{
    format_window, ClockFormat, JobId, Machine, Minutes, Schedule, ScheduledTask,
};

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// Id the scheduler gave this job.
    pub job_id: JobId,
    /// Product scheduled.
    pub product_id: String,
    /// Units scheduled.
    pub quantity: u32,
    /// Tasks in planning order (unit by unit, step by step).
    pub tasks: Vec<ScheduledTask>,
    /// Start reference the units were released at.
    pub start_time: Minutes,
    /// Latest unit completion.
    pub finish_time: Minutes,
    /// Due time, if one was given.
    pub due_time: Option<Minutes>,
    /// `finish_time <= due_time`, or `true` without a due time.
    pub on_time: bool,
}

impl JobOutcome {
    /// Minutes past the due time (0 if on time or no due time).
    pub fn tardiness(&self) -> Minutes {
        self.due_time
            .map_or(0, |due| self.finish_time.saturating_sub(due).max(0))
    }

    /// Earliest task start, or the finish time if nothing was scheduled.
    pub fn first_start(&self) -> Minutes {
        self.tasks
            .iter()
            .map(|t| t.start)
            .min()
            .unwrap_or(self.finish_time)
    }

    /// Builds the record handed to a persistence collaborator.
    pub fn to_record(&self, label: impl Into<String>, format: ClockFormat) -> JobRecord {
        JobRecord {
            label: label.into(),
            window_description: format_window(self.first_start(), self.finish_time, format),
            tasks: self.tasks.clone(),
        }
    }
}

/// Opaque record stored per job by an external persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Caller-chosen label.
    pub label: String,
    /// `"HH:MM - HH:MM"` from the first task start to the job finish.
    pub window_description: String,
    /// The job's tasks in planning order.
    pub tasks: Vec<ScheduledTask>,
}

/// Per-machine usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineUsage {
    /// Machine name.
    pub name: String,
    /// Sum of task durations booked on the machine.
    pub busy_time: Minutes,
    /// 0.0..=1.0 over the horizon; 0.0 when the horizon is empty.
    pub utilization: f64,
}

/// Snapshot of the scheduler's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Flattened schedule, sorted by start.
    pub tasks: Vec<ScheduledTask>,
    /// Usage for every machine, in pool order.
    pub machines: Vec<MachineUsage>,
    /// Instant the horizon is measured from.
    pub origin: Minutes,
    /// Makespan so far (the global cursor).
    pub makespan: Minutes,
}

impl ScheduleReport {
    /// Computes a report from scheduler state.
    pub fn calculate(
        schedule: &Schedule,
        machines: &[Machine],
        origin: Minutes,
        makespan: Minutes,
    ) -> Self {
        let horizon = makespan.saturating_sub(origin);
        let machines = machines
            .iter()
            .map(|m| MachineUsage {
                name: m.name.clone(),
                busy_time: m.busy_time,
                utilization: if horizon > 0 {
                    m.busy_time as f64 / horizon as f64
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            tasks: schedule.tasks().to_vec(),
            machines,
            origin,
            makespan,
        }
    }

    /// Machines that ran at least one task.
    pub fn used_machines(&self) -> impl Iterator<Item = &MachineUsage> {
        self.machines.iter().filter(|m| m.busy_time > 0)
    }

    /// Mean utilization over used machines (0.0 if none).
    pub fn avg_utilization(&self) -> f64 {
        let (sum, n) = self
            .used_machines()
            .fold((0.0, 0usize), |(s, n), m| (s + m.utilization, n + 1));
        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    }

    /// Machine with the most busy time; first in pool order on ties.
    pub fn busiest_machine(&self) -> Option<&MachineUsage> {
        self.used_machines()
            .fold(None, |best: Option<&MachineUsage>, m| match best {
                Some(b) if b.busy_time >= m.busy_time => Some(b),
                _ => Some(m),
            })
    }
}

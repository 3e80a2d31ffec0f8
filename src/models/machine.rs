//! Machine model.
//!
//! A machine is a single-capacity resource: one task at a time. It tracks
//! when it next becomes free, how long it has been busy in total, and the
//! ordered history of everything assigned to it.
//!
//! # Invariant
//! `available_at` never decreases. After every successful `assign`, it
//! equals the end of the assignment just made.

use serde::{Deserialize, Serialize};

use super::Minutes;

/// A schedulable machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// Unique machine name.
    pub name: String,
    /// Earliest instant a new task may start.
    pub available_at: Minutes,
    /// Sum of all assigned durations. Reporting only.
    pub busy_time: Minutes,
    /// Assignments in the order they were made.
    pub history: Vec<AssignmentRecord>,
}

/// One entry in a machine's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Booked start.
    pub start: Minutes,
    /// Booked end (exclusive).
    pub end: Minutes,
    /// `end - start`.
    pub duration: Minutes,
}

impl Machine {
    /// Creates an idle machine, free from minute 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self::available_from(name, 0)
    }

    /// Creates an idle machine, free from `instant`.
    pub fn available_from(name: impl Into<String>, instant: Minutes) -> Self {
        Self {
            name: name.into(),
            available_at: instant,
            busy_time: 0,
            history: Vec::new(),
        }
    }

    /// Books the machine for `duration` minutes, no earlier than `not_before`.
    ///
    /// Returns the booked `(start, end)`, or `None` (machine untouched) if
    /// the end or the busy total would overflow. Callers validate that
    /// `duration` is positive.
    pub fn assign(
        &mut self,
        duration: Minutes,
        not_before: Minutes,
    ) -> Option<(Minutes, Minutes)> {
        let start = not_before.max(self.available_at);
        let end = start.checked_add(duration)?;
        let busy_time = self.busy_time.checked_add(duration)?;
        self.available_at = end;
        self.busy_time = busy_time;
        self.history.push(AssignmentRecord {
            start,
            end,
            duration,
        });
        Some((start, end))
    }

    /// Clears statistics and frees the machine from `instant`.
    pub fn reset(&mut self, instant: Minutes) {
        self.available_at = instant;
        self.busy_time = 0;
        self.history.clear();
    }

    /// Number of assignments made.
    pub fn assignment_count(&self) -> usize {
        self.history.len()
    }

    /// Whether anything was ever assigned.
    pub fn is_idle(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_when_free() {
        let mut m = Machine::new("M");
        assert_eq!(m.assign(10, 5), Some((5, 15)));
        assert_eq!(m.available_at, 15);
        assert_eq!(m.busy_time, 10);
        assert_eq!(
            m.history,
            vec![AssignmentRecord {
                start: 5,
                end: 15,
                duration: 10
            }]
        );
    }

    #[test]
    fn test_assign_waits_for_machine() {
        let mut m = Machine::new("M");
        m.assign(30, 0).unwrap();
        // Requested at 10 but busy until 30
        assert_eq!(m.assign(20, 10), Some((30, 50)));
        assert_eq!(m.busy_time, 50);
        assert_eq!(m.assignment_count(), 2);
    }

    #[test]
    fn test_available_at_monotonic() {
        let mut m = Machine::new("M");
        let mut last = m.available_at;
        for (duration, not_before) in [(5, 100), (3, 0), (7, 50), (1, 200)] {
            m.assign(duration, not_before).unwrap();
            assert!(m.available_at >= last);
            last = m.available_at;
        }
    }

    #[test]
    fn test_reset() {
        let mut m = Machine::available_from("M", 540);
        m.assign(60, 540).unwrap();
        m.reset(900);
        assert_eq!(m.available_at, 900);
        assert_eq!(m.busy_time, 0);
        assert!(m.is_idle());
    }

    #[test]
    fn test_assign_past_time_range_leaves_machine_untouched() {
        let mut m = Machine::available_from("M", Minutes::MAX - 5);
        assert_eq!(m.assign(10, 0), None);
        assert_eq!(m.available_at, Minutes::MAX - 5);
        assert_eq!(m.busy_time, 0);
        assert!(m.is_idle());

        // Fits exactly
        assert_eq!(m.assign(5, 0), Some((Minutes::MAX - 5, Minutes::MAX)));
    }
}

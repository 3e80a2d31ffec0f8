//! Scheduler configuration.
//!
//! Loaded from JSON or built with `with_*` methods. Every field has a
//! default, so `{}` is a valid document.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Calendar, Minutes};

/// What to do when a step names a machine that is not in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMachinePolicy {
    /// Drop the candidate and log a warning. A step left with no
    /// candidates is skipped.
    #[default]
    Skip,
    /// Fail the job with `UnknownMachine`.
    Reject,
}

/// Scheduler settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Initial cursor, and where `reset()` rewinds to.
    pub origin: Minutes,
    /// Handling of missing machine names.
    pub unknown_machine: UnknownMachinePolicy,
    /// Working calendar. `None` = machines run around the clock.
    pub calendar: Option<Calendar>,
}

impl SchedulerConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the origin instant.
    pub fn with_origin(mut self, origin: Minutes) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the unknown-machine policy.
    pub fn with_unknown_machine(mut self, policy: UnknownMachinePolicy) -> Self {
        self.unknown_machine = policy;
        self
    }

    /// Enables the working calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Checks nested settings.
    pub fn validate(&self) -> Result<()> {
        match &self.calendar {
            Some(cal) => cal.validate(),
            None => Ok(()),
        }
    }
}

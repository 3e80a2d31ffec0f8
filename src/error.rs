//! Crate error type.
//!
//! Job-level failures are returned before any machine state is committed:
//! a failed submission leaves the scheduler exactly as it was.

use thiserror::Error;

use crate::models::Minutes;
use crate::validation::ValidationError;

/// Errors raised while building a shop or scheduling a job.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The submitted product id has no catalog entry.
    #[error("unknown product '{0}'")]
    UnknownProduct(String),

    /// A process step names a machine group that is not registered.
    #[error("unknown machine group '{0}'")]
    UnknownGroup(String),

    /// A process step names a machine that is not in the pool
    /// (only raised under `UnknownMachinePolicy::Reject`).
    #[error("step '{step}' requires machine '{machine}', which is not in the pool")]
    UnknownMachine { step: String, machine: String },

    /// Job quantity must be at least one.
    #[error("invalid quantity {0}: must be positive")]
    InvalidQuantity(u32),

    /// A product added after construction has a step with a non-positive
    /// duration.
    #[error("step '{step}' has non-positive duration {duration}")]
    InvalidDuration { step: String, duration: Minutes },

    /// A booking would end past the last representable minute.
    #[error("step '{step}' starting from minute {from} ends past the time range")]
    TimeOverflow { step: String, from: Minutes },

    /// The working-window search gave up.
    #[error("no working instant found from minute {from} after {attempts} attempts")]
    CalendarResolution { from: Minutes, attempts: u32 },

    /// Calendar parameters are out of range.
    #[error("invalid calendar: {0}")]
    InvalidCalendar(String),

    /// A configuration document failed to parse.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Structural problems found in a shop definition.
    #[error("shop definition has {} problem(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

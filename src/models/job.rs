//! Job (production order) model.
//!
//! A job asks for `quantity` units of one product. It exists only as
//! scheduler input; once scheduled, what remains are its tasks and outcome.

use serde::{Deserialize, Serialize};

use super::Minutes;

/// Identifier the scheduler assigns to each committed job.
pub type JobId = u64;

/// A production order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Catalog product id.
    pub product_id: String,
    /// Number of units. Must be positive.
    pub quantity: u32,
    /// Earliest start. `None` = the scheduler's cursor.
    #[serde(default)]
    pub start_time: Option<Minutes>,
    /// Due time for the feasibility check. `None` = always on time.
    #[serde(default)]
    pub due_time: Option<Minutes>,
}

impl Job {
    /// Creates a job with no start or due time.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            start_time: None,
            due_time: None,
        }
    }

    /// Sets the earliest start.
    pub fn with_start_time(mut self, start: Minutes) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Sets the due time.
    pub fn with_due_time(mut self, due: Minutes) -> Self {
        self.due_time = Some(due);
        self
    }
}

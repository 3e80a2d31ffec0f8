//! Job-shop domain models.
//!
//! Provides the data types the scheduler works on: machines and their
//! groups, product routings, jobs, the working calendar, and the flattened
//! output schedule. All instants are integer minutes (see [`Minutes`]).
//!
//! # Mapping
//!
//! | Type | Shop floor |
//! |------|------------|
//! | `Machine` | One workstation, one task at a time |
//! | `MachineGroupRegistry` | Machine classes ("VMC", "Welding") |
//! | `ProductDefinition` | Routing of a part number |
//! | `Job` | Production order (product × quantity) |
//! | `ScheduledTask` | One unit-step on one machine |

mod calendar;
mod group;
mod job;
mod machine;
mod product;
mod schedule;
mod time;

pub use calendar::Calendar;
pub use group::{MachineGroupRegistry, ResourceRequirement};
pub use job::{Job, JobId};
pub use machine::{AssignmentRecord, Machine};
pub use product::{ProcessStep, ProductCatalog, ProductDefinition};
pub use schedule::{Schedule, ScheduledTask};
pub use time::{format_clock, format_window, ClockFormat, Minutes, MINUTES_PER_DAY};

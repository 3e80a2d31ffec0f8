//! Finite-capacity job-shop simulation.
//!
//! A fixed pool of named machines, a catalog of product routings, and a
//! greedy deterministic scheduler that computes when each unit of each job
//! occupies each machine.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Machine`, `MachineGroupRegistry`,
//!   `ResourceRequirement`, `ProductDefinition`, `Job`, `Calendar`,
//!   `ScheduledTask`
//! - **`scheduler`**: The greedy `Scheduler`, job outcomes, and reports
//! - **`shop`**: `ShopDefinition`, a serde-loadable shop plus the standard preset
//! - **`validation`**: Structural checks (duplicates, unknown references)
//! - **`config`**: `SchedulerConfig` and `UnknownMachinePolicy`
//!
//! # Logging
//!
//! Emits `tracing` events (per step at `debug`, per job at `info`,
//! skipped machines and late jobs at `warn`). No subscriber is installed.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod shop;
pub mod validation;

pub use config::{SchedulerConfig, UnknownMachinePolicy};
pub use error::{Result, ScheduleError};
pub use shop::ShopDefinition;

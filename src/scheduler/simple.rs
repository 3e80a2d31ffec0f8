//! Greedy, deterministic job-shop scheduler.
//!
//! # Algorithm
//!
//! For each submitted job:
//! 1. Look up the product routing and resolve every step to pool machines.
//! 2. For each unit, walk the steps in order starting from the job start
//!    reference `max(start_time ?? cursor, cursor)`.
//! 3. For each step, take the candidate with the smallest `available_at`;
//!    exact ties go to the machine declared first in the pool.
//! 4. With a calendar, push the start forward to the next working instant.
//! 5. Book the machine; the step's end becomes the unit's cursor.
//! 6. Commit every task at once, then raise the global cursor to the job's
//!    finish.
//!
//! Units restart from the job start reference, so units of one job
//! pipeline through the line as machines free up. There is no
//! reordering, backtracking, or preemption.
//!
//! # Atomicity
//! A job is planned against a scratch copy of the machine pool and only
//! committed if every step succeeds.
//!
//! # Complexity
//! O(q * s * c) per job, where q=quantity, s=steps, c=candidate machines.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::report::{JobOutcome, ScheduleReport};
use crate::config::{SchedulerConfig, UnknownMachinePolicy};
use crate::error::{Result, ScheduleError};
use crate::models::{
    Job, JobId, Machine, MachineGroupRegistry, Minutes, ProcessStep, ProductCatalog,
    ProductDefinition, Schedule, ScheduledTask,
};
use crate::shop::ShopDefinition;
use crate::validation::{validate_shop, ValidationError, ValidationErrorKind};

/// Finite-capacity job-shop scheduler.
///
/// Owns the machine pool, the flattened schedule, the global cursor,
/// and the job id counter.
///
/// # Example
///
/// ```
/// use shop_schedule::models::{Job, ProductDefinition, ResourceRequirement};
/// use shop_schedule::scheduler::Scheduler;
/// use shop_schedule::{SchedulerConfig, ShopDefinition};
///
/// let shop = ShopDefinition::new()
///     .with_machine("M")
///     .with_product(
///         ProductDefinition::new("Widget").step("X", 10, ResourceRequirement::machine("M")),
///     );
/// let mut scheduler = Scheduler::new(shop, SchedulerConfig::default()).unwrap();
///
/// let outcome = scheduler.submit(&Job::new("Widget", 3).with_start_time(0)).unwrap();
/// assert_eq!(outcome.finish_time, 30);
/// assert!(outcome.on_time);
///
/// let starts: Vec<_> = scheduler.schedule().iter().map(|t| t.start).collect();
/// assert_eq!(starts, vec![0, 10, 20]);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    groups: MachineGroupRegistry,
    catalog: ProductCatalog,
    machines: Vec<Machine>,
    pool_index: HashMap<String, usize>,
    schedule: Schedule,
    origin: Minutes,
    cursor: Minutes,
    next_job_id: JobId,
}

impl Scheduler {
    /// Builds a scheduler over a validated shop.
    ///
    /// Fails on fatal validation problems or an invalid calendar. Unknown
    /// machine references are logged here and handled per
    /// `UnknownMachinePolicy` at submission.
    pub fn new(shop: ShopDefinition, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;

        if let Err(errors) = validate_shop(&shop) {
            let (fatal, tolerated): (Vec<_>, Vec<_>) =
                errors.into_iter().partition(|e| e.kind.is_fatal());
            for e in &tolerated {
                warn!(problem = %e, "shop definition");
            }
            if !fatal.is_empty() {
                return Err(ScheduleError::Validation(fatal));
            }
        }

        let catalog = shop.catalog();
        let origin = config.origin;
        let machines: Vec<Machine> = shop
            .machines
            .iter()
            .map(|name| Machine::available_from(name.as_str(), origin))
            .collect();
        let pool_index = machines
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();

        Ok(Self {
            config,
            groups: shop.groups,
            catalog,
            machines,
            pool_index,
            schedule: Schedule::new(),
            origin,
            cursor: origin,
            next_job_id: 1,
        })
    }

    /// Adds (or replaces) a product after construction.
    ///
    /// The routing is checked the way jobs use it: it needs at least one
    /// step, every step a positive duration and a resolvable requirement.
    /// Unknown machine names follow `UnknownMachinePolicy`. Returns the
    /// replaced entry.
    pub fn add_product(
        &mut self,
        product: ProductDefinition,
    ) -> Result<Option<ProductDefinition>> {
        if product.steps.is_empty() {
            return Err(ScheduleError::Validation(vec![ValidationError::new(
                ValidationErrorKind::EmptyProduct,
                format!("Product '{}' has no steps", product.id),
            )]));
        }
        for step in &product.steps {
            if step.duration <= 0 {
                return Err(ScheduleError::InvalidDuration {
                    step: step.name.clone(),
                    duration: step.duration,
                });
            }
            self.eligible_machines(step)?;
        }
        debug!(product = %product.id, steps = product.steps.len(), "product added");
        Ok(self.catalog.insert(product))
    }

    /// Scheduler over the standard fabrication shop.
    pub fn standard(config: SchedulerConfig) -> Result<Self> {
        Self::new(ShopDefinition::standard(), config)
    }

    /// Schedules one job and commits its tasks.
    ///
    /// On error nothing is committed.
    pub fn submit(&mut self, job: &Job) -> Result<JobOutcome> {
        let job_id = self.next_job_id;
        let (machines, tasks, job_start, finish) = self.plan(job_id, job)?;

        self.machines = machines;
        self.schedule.extend(tasks.iter().cloned());
        self.cursor = self.cursor.max(finish);
        self.next_job_id += 1;

        let on_time = job.due_time.map_or(true, |due| finish <= due);
        if !on_time {
            warn!(
                job_id,
                product = %job.product_id,
                finish,
                due = job.due_time,
                "job cannot be completed before its due time"
            );
        }
        info!(
            job_id,
            product = %job.product_id,
            quantity = job.quantity,
            tasks = tasks.len(),
            finish,
            on_time,
            "job scheduled"
        );

        Ok(JobOutcome {
            job_id,
            product_id: job.product_id.clone(),
            quantity: job.quantity,
            tasks,
            start_time: job_start,
            finish_time: finish,
            due_time: job.due_time,
            on_time,
        })
    }

    /// Convenience form of [`submit`](Self::submit).
    pub fn submit_job(
        &mut self,
        product_id: &str,
        quantity: u32,
        start_time: Option<Minutes>,
        due_time: Option<Minutes>,
    ) -> Result<JobOutcome> {
        self.submit(&Job {
            product_id: product_id.to_string(),
            quantity,
            start_time,
            due_time,
        })
    }

    /// Submits jobs in order. Stops at the first error; jobs before it
    /// stay committed.
    pub fn submit_batch(&mut self, jobs: &[Job]) -> Result<Vec<JobOutcome>> {
        jobs.iter().map(|job| self.submit(job)).collect()
    }

    /// The flattened schedule, sorted by start.
    pub fn schedule(&self) -> &[ScheduledTask] {
        self.schedule.tasks()
    }

    /// Tasks booked on one machine.
    pub fn tasks_for_machine(&self, machine: &str) -> Vec<&ScheduledTask> {
        self.schedule.tasks_for_machine(machine)
    }

    /// Tasks of one job.
    pub fn tasks_for_job(&self, job_id: JobId) -> Vec<&ScheduledTask> {
        self.schedule.tasks_for_job(job_id)
    }

    /// Clears everything and rewinds to the configured origin.
    pub fn reset(&mut self) {
        self.reset_to(self.config.origin);
    }

    /// Clears everything and rewinds to `instant`.
    ///
    /// Machine availability, busy time, and history are discarded along
    /// with the schedule; job ids restart at 1.
    pub fn reset_to(&mut self, instant: Minutes) {
        self.schedule.clear();
        for machine in &mut self.machines {
            machine.reset(instant);
        }
        self.origin = instant;
        self.cursor = instant;
        self.next_job_id = 1;
        debug!(instant, "scheduler reset");
    }

    /// Schedule, per-machine usage, and makespan so far.
    pub fn report(&self) -> ScheduleReport {
        ScheduleReport::calculate(&self.schedule, &self.machines, self.origin, self.cursor)
    }

    /// Storage key for a job's persisted record.
    pub fn storage_key(job_id: JobId) -> String {
        format!("schedule-{job_id}")
    }

    /// Current global cursor.
    pub fn cursor(&self) -> Minutes {
        self.cursor
    }

    /// The machine pool in declared order.
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// Looks up a machine by name.
    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.pool_index.get(name).map(|&i| &self.machines[i])
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Product catalog.
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Machine group registry.
    pub fn groups(&self) -> &MachineGroupRegistry {
        &self.groups
    }

    /// Computes a job against a copy of the pool.
    ///
    /// Returns the updated pool, the tasks, the job start reference, and
    /// the finish time.
    fn plan(
        &self,
        job_id: JobId,
        job: &Job,
    ) -> Result<(Vec<Machine>, Vec<ScheduledTask>, Minutes, Minutes)> {
        if job.quantity == 0 {
            return Err(ScheduleError::InvalidQuantity(job.quantity));
        }
        let product = self.catalog.require(&job.product_id)?;
        let routes = product
            .steps
            .iter()
            .map(|step| self.eligible_machines(step))
            .collect::<Result<Vec<_>>>()?;

        let job_start = job.start_time.unwrap_or(self.cursor).max(self.cursor);
        let mut machines = self.machines.clone();
        let mut tasks = Vec::with_capacity(job.quantity as usize * product.steps.len());
        let mut finish = job_start;

        for unit in 0..job.quantity {
            let mut unit_cursor = job_start;

            for (step, eligible) in product.steps.iter().zip(&routes) {
                let Some(idx) = pick_machine(&machines, eligible) else {
                    warn!(job_id, unit, step = %step.name, "no machine in pool, step skipped");
                    continue;
                };
                let machine = &mut machines[idx];

                let not_before = match &self.config.calendar {
                    Some(cal) => cal.next_working_instant(unit_cursor.max(machine.available_at))?,
                    None => unit_cursor,
                };
                let (start, end) = machine.assign(step.duration, not_before).ok_or_else(|| {
                    ScheduleError::TimeOverflow {
                        step: step.name.clone(),
                        from: not_before,
                    }
                })?;
                debug!(
                    job_id,
                    unit,
                    step = %step.name,
                    machine = %machine.name,
                    start,
                    end,
                    "step assigned"
                );

                tasks.push(ScheduledTask {
                    job_id,
                    part_no: product.id.clone(),
                    unit,
                    process_name: step.name.clone(),
                    machine_name: machine.name.clone(),
                    start,
                    end,
                });
                unit_cursor = end;
            }

            finish = finish.max(unit_cursor);
        }

        Ok((machines, tasks, job_start, finish))
    }

    /// Pool indices able to run a step, in candidate order.
    fn eligible_machines(&self, step: &ProcessStep) -> Result<Vec<usize>> {
        let names = self.groups.resolve(&step.requirement)?;
        let mut eligible = Vec::with_capacity(names.len());
        for name in names {
            match self.pool_index.get(name.as_str()) {
                Some(&i) => eligible.push(i),
                None => match self.config.unknown_machine {
                    UnknownMachinePolicy::Skip => {
                        debug!(step = %step.name, machine = %name, "machine not in pool, ignored");
                    }
                    UnknownMachinePolicy::Reject => {
                        return Err(ScheduleError::UnknownMachine {
                            step: step.name.clone(),
                            machine: name.clone(),
                        });
                    }
                },
            }
        }
        Ok(eligible)
    }
}

/// Earliest-available candidate; ties go to the lower pool index.
fn pick_machine(machines: &[Machine], eligible: &[usize]) -> Option<usize> {
    eligible
        .iter()
        .copied()
        .min_by_key(|&i| (machines[i].available_at, i))
}

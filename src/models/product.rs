//! Product definitions (routings).
//!
//! A product is an ordered list of process steps. Step order is a strict
//! precedence inside one unit: step k+1 never starts before step k ends.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Minutes, ResourceRequirement};
use crate::error::{Result, ScheduleError};

/// One step of a product's routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    /// Step name (e.g., "Cutting").
    pub name: String,
    /// Processing time in minutes. Must be positive.
    pub duration: Minutes,
    /// Machine(s) able to run the step.
    pub requirement: ResourceRequirement,
}

impl ProcessStep {
    /// Creates a step.
    pub fn new(
        name: impl Into<String>,
        duration: Minutes,
        requirement: ResourceRequirement,
    ) -> Self {
        Self {
            name: name.into(),
            duration,
            requirement,
        }
    }
}

/// A catalog entry: product id plus its routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDefinition {
    /// Product identifier (the part number).
    pub id: String,
    /// Ordered steps.
    pub steps: Vec<ProcessStep>,
}

impl ProductDefinition {
    /// Creates a product with no steps.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step.
    pub fn with_step(mut self, step: ProcessStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Appends a step built from its parts.
    pub fn step(
        self,
        name: impl Into<String>,
        duration: Minutes,
        requirement: ResourceRequirement,
    ) -> Self {
        self.with_step(ProcessStep::new(name, duration, requirement))
    }

    /// Sum of step durations for one unit.
    pub fn unit_duration(&self) -> Minutes {
        self.steps.iter().map(|s| s.duration).sum()
    }
}

/// Product id → definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog {
    products: BTreeMap<String, ProductDefinition>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a product.
    pub fn with_product(mut self, product: ProductDefinition) -> Self {
        self.insert(product);
        self
    }

    /// Adds (or replaces) a product in place. Returns the replaced entry.
    pub fn insert(&mut self, product: ProductDefinition) -> Option<ProductDefinition> {
        self.products.insert(product.id.clone(), product)
    }

    /// Looks up a product.
    pub fn get(&self, id: &str) -> Option<&ProductDefinition> {
        self.products.get(id)
    }

    /// Looks up a product, failing with `UnknownProduct`.
    pub fn require(&self, id: &str) -> Result<&ProductDefinition> {
        self.get(id)
            .ok_or_else(|| ScheduleError::UnknownProduct(id.to_string()))
    }

    /// Iterates products in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductDefinition> {
        self.products.values()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

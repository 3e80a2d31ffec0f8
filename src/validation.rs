//! Structural validation of shop definitions.
//!
//! Checks a `ShopDefinition` before scheduling and reports every problem
//! found, not just the first. Detects:
//! - Duplicate machine or product names
//! - Products with no steps, groups with no members
//! - Non-positive step durations
//! - References to unknown machines or groups

use std::collections::HashSet;

use crate::models::ResourceRequirement;
use crate::shop::ShopDefinition;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two machines share a name.
    DuplicateMachine,
    /// Two products share an id.
    DuplicateProduct,
    /// A product has no steps.
    EmptyProduct,
    /// A group has no members.
    EmptyGroup,
    /// A step has an empty candidate list.
    EmptyCandidateList,
    /// A step duration is zero or negative.
    NonPositiveDuration,
    /// A step or group names a machine that is not in the pool.
    UnknownMachineReference,
    /// A step names an unregistered group.
    UnknownGroupReference,
}

impl ValidationErrorKind {
    /// Whether the scheduler refuses to run with this problem.
    ///
    /// Unknown machine references are left to `UnknownMachinePolicy`.
    pub fn is_fatal(self) -> bool {
        !matches!(self, Self::UnknownMachineReference)
    }
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a shop definition.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_shop(shop: &ShopDefinition) -> ValidationResult {
    let mut errors = Vec::new();

    let mut machine_names = HashSet::new();
    for name in &shop.machines {
        if !machine_names.insert(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateMachine,
                format!("Duplicate machine name: {name}"),
            ));
        }
    }

    for (alias, members) in shop.groups.iter() {
        if members.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyGroup,
                format!("Group '{alias}' has no members"),
            ));
        }
        for member in members {
            if !machine_names.contains(member.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownMachineReference,
                    format!("Group '{alias}' references unknown machine '{member}'"),
                ));
            }
        }
    }

    let mut product_ids = HashSet::new();
    for product in &shop.products {
        if !product_ids.insert(product.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateProduct,
                format!("Duplicate product ID: {}", product.id),
            ));
        }

        if product.steps.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyProduct,
                format!("Product '{}' has no steps", product.id),
            ));
        }

        for step in &product.steps {
            if step.duration <= 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveDuration,
                    format!(
                        "Step '{}' of '{}' has duration {}",
                        step.name, product.id, step.duration
                    ),
                ));
            }

            // Group members are checked once above
            let direct: &[String] = match &step.requirement {
                ResourceRequirement::Machine(name) => std::slice::from_ref(name),
                ResourceRequirement::Candidates(names) => {
                    if names.is_empty() {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::EmptyCandidateList,
                            format!("Step '{}' of '{}' lists no machines", step.name, product.id),
                        ));
                    }
                    names
                }
                ResourceRequirement::Group(alias) => {
                    if !shop.groups.contains(alias) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnknownGroupReference,
                            format!(
                                "Step '{}' of '{}' references unknown group '{alias}'",
                                step.name, product.id
                            ),
                        ));
                    }
                    &[]
                }
            };
            for name in direct {
                if !machine_names.contains(name.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownMachineReference,
                        format!(
                            "Step '{}' of '{}' references unknown machine '{name}'",
                            step.name, product.id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductDefinition, ResourceRequirement as R};

    fn sample_shop() -> ShopDefinition {
        ShopDefinition::new()
            .with_machines(["Saw", "Weld A", "Weld B"])
            .with_group("Weld", ["Weld A", "Weld B"])
            .with_product(
                ProductDefinition::new("Frame")
                    .step("Cut", 15, R::machine("Saw"))
                    .step("Join", 25, R::group("Weld")),
            )
    }

    fn kinds(shop: &ShopDefinition) -> Vec<ValidationErrorKind> {
        validate_shop(shop)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_shop() {
        assert!(validate_shop(&sample_shop()).is_ok());
        assert!(validate_shop(&ShopDefinition::standard()).is_ok());
    }

    #[test]
    fn test_duplicate_machine() {
        let shop = sample_shop().with_machine("Saw");
        assert_eq!(kinds(&shop), vec![ValidationErrorKind::DuplicateMachine]);
    }

    #[test]
    fn test_duplicate_product() {
        let shop = sample_shop()
            .with_product(ProductDefinition::new("Frame").step("Cut", 5, R::machine("Saw")));
        assert_eq!(kinds(&shop), vec![ValidationErrorKind::DuplicateProduct]);
    }

    #[test]
    fn test_empty_product_and_group() {
        let shop = sample_shop()
            .with_group("Paint", Vec::<String>::new())
            .with_product(ProductDefinition::new("Blank"));
        let k = kinds(&shop);
        assert!(k.contains(&ValidationErrorKind::EmptyGroup));
        assert!(k.contains(&ValidationErrorKind::EmptyProduct));
    }

    #[test]
    fn test_non_positive_duration() {
        let shop = sample_shop().with_product(
            ProductDefinition::new("Bad")
                .step("Zero", 0, R::machine("Saw"))
                .step("Negative", -5, R::machine("Saw")),
        );
        let k = kinds(&shop);
        assert_eq!(
            k.iter()
                .filter(|&&k| k == ValidationErrorKind::NonPositiveDuration)
                .count(),
            2
        );
    }

    #[test]
    fn test_unknown_references() {
        let shop = sample_shop().with_product(
            ProductDefinition::new("Gear")
                .step("Hob", 10, R::machine("Hobber"))
                .step("Grind", 10, R::candidates(["Saw", "Grinder"]))
                .step("Paint", 10, R::group("Paint")),
        );
        let errors = validate_shop(&shop).unwrap_err();
        let unknown_machines: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::UnknownMachineReference)
            .collect();
        assert_eq!(unknown_machines.len(), 2);
        assert!(unknown_machines[0].message.contains("Hobber"));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownGroupReference));
    }

    #[test]
    fn test_group_member_not_in_pool() {
        let shop = sample_shop().with_group("Weld", ["Weld A", "Weld C"]);
        let errors = validate_shop(&shop).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Weld C"));
        assert!(!errors[0].kind.is_fatal());
    }

    #[test]
    fn test_empty_candidate_list() {
        let shop = sample_shop().with_product(
            ProductDefinition::new("Odd").step("Nothing", 5, R::candidates(Vec::<String>::new())),
        );
        assert_eq!(kinds(&shop), vec![ValidationErrorKind::EmptyCandidateList]);
    }

    #[test]
    fn test_fatal_kinds() {
        assert!(ValidationErrorKind::DuplicateMachine.is_fatal());
        assert!(ValidationErrorKind::UnknownGroupReference.is_fatal());
        assert!(!ValidationErrorKind::UnknownMachineReference.is_fatal());
    }
}

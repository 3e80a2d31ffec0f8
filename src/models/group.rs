//! Machine groups and resource requirements.
//!
//! A process step asks for one concrete machine, an explicit list of
//! interchangeable machines, or a group alias (a machine class such as
//! `"Welding"`) that the registry expands to its members.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, ScheduleError};

/// What a process step needs to run on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceRequirement {
    /// Exactly this machine.
    Machine(String),
    /// Any one of these machines.
    Candidates(Vec<String>),
    /// Any member of a registered group.
    Group(String),
}

impl ResourceRequirement {
    /// Requires one specific machine.
    pub fn machine(name: impl Into<String>) -> Self {
        Self::Machine(name.into())
    }

    /// Requires any one of the listed machines.
    pub fn candidates<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Candidates(names.into_iter().map(Into::into).collect())
    }

    /// Requires any member of a group.
    pub fn group(alias: impl Into<String>) -> Self {
        Self::Group(alias.into())
    }
}

/// Static mapping from group alias to its ordered member machines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineGroupRegistry {
    groups: BTreeMap<String, Vec<String>>,
}

impl MachineGroupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a group.
    pub fn with_group<I, S>(mut self, alias: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(alias, members);
        self
    }

    /// Registers (or replaces) a group in place.
    pub fn insert<I, S>(&mut self, alias: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .insert(alias.into(), members.into_iter().map(Into::into).collect());
    }

    /// Members of a group, if registered.
    pub fn members(&self, alias: &str) -> Option<&[String]> {
        self.groups.get(alias).map(Vec::as_slice)
    }

    /// Whether the alias is registered.
    pub fn contains(&self, alias: &str) -> bool {
        self.groups.contains_key(alias)
    }

    /// Iterates `(alias, members)` in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups are registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Expands a requirement to its candidate machine names.
    ///
    /// Concrete names and explicit lists come back unchanged. An alias
    /// with no entry is an error rather than a one-element fallback.
    pub fn resolve<'a>(&'a self, requirement: &'a ResourceRequirement) -> Result<&'a [String]> {
        match requirement {
            ResourceRequirement::Machine(name) => Ok(std::slice::from_ref(name)),
            ResourceRequirement::Candidates(names) => Ok(names.as_slice()),
            ResourceRequirement::Group(alias) => self
                .members(alias)
                .ok_or_else(|| ScheduleError::UnknownGroup(alias.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MachineGroupRegistry {
        MachineGroupRegistry::new()
            .with_group("VMC", ["VMC 1", "VMC 2"])
            .with_group("Welding", ["Welding 1", "Welding 2", "Welding 3"])
    }

    #[test]
    fn test_resolve_single_machine() {
        let reg = registry();
        let req = ResourceRequirement::machine("VTL");
        assert_eq!(reg.resolve(&req).unwrap(), ["VTL".to_string()]);
    }

    #[test]
    fn test_resolve_candidates_unchanged() {
        let reg = registry();
        let req = ResourceRequirement::candidates(["B", "A"]);
        assert_eq!(reg.resolve(&req).unwrap(), ["B", "A"]);
    }

    #[test]
    fn test_resolve_group_keeps_order() {
        let reg = registry();
        let req = ResourceRequirement::group("Welding");
        assert_eq!(
            reg.resolve(&req).unwrap(),
            ["Welding 1", "Welding 2", "Welding 3"]
        );
    }

    #[test]
    fn test_resolve_unknown_group() {
        let reg = registry();
        let req = ResourceRequirement::group("Lathe");
        let err = reg.resolve(&req).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownGroup(ref g) if g == "Lathe"));
    }

    #[test]
    fn test_requirement_serde_shape() {
        let req: ResourceRequirement = serde_json::from_str(r#"{"group":"VMC"}"#).unwrap();
        assert_eq!(req, ResourceRequirement::group("VMC"));

        let req: ResourceRequirement =
            serde_json::from_str(r#"{"candidates":["A","B"]}"#).unwrap();
        assert_eq!(req, ResourceRequirement::candidates(["A", "B"]));
    }

    #[test]
    fn test_registry_deserializes_as_map() {
        let reg: MachineGroupRegistry =
            serde_json::from_str(r#"{"VMC":["VMC 1","VMC 2"]}"#).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.members("VMC").unwrap().len(), 2);
        assert!(!reg.contains("Manual"));
    }
}

//! Shop definition: machine pool, groups, and products as one document.
//!
//! Machine order in `machines` is the pool's declared order, which breaks
//! ties between equally available machines.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    MachineGroupRegistry, ProductCatalog, ProductDefinition, ResourceRequirement,
};

/// Static description of a job shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopDefinition {
    /// Machine names in declared order.
    pub machines: Vec<String>,
    /// Group alias → members.
    pub groups: MachineGroupRegistry,
    /// Product routings.
    pub products: Vec<ProductDefinition>,
}

impl ShopDefinition {
    /// Creates an empty shop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends a machine to the pool.
    pub fn with_machine(mut self, name: impl Into<String>) -> Self {
        self.machines.push(name.into());
        self
    }

    /// Appends several machines to the pool.
    pub fn with_machines<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.machines.extend(names.into_iter().map(Into::into));
        self
    }

    /// Registers a group.
    pub fn with_group<I, S>(mut self, alias: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.insert(alias, members);
        self
    }

    /// Adds a product.
    pub fn with_product(mut self, product: ProductDefinition) -> Self {
        self.products.push(product);
        self
    }

    /// Builds the lookup catalog. Later duplicates replace earlier ones.
    pub fn catalog(&self) -> ProductCatalog {
        self.products
            .iter()
            .cloned()
            .fold(ProductCatalog::new(), ProductCatalog::with_product)
    }

    /// The fabrication shop used as the stock example: twenty-one machines,
    /// three machine classes, and two products.
    pub fn standard() -> Self {
        use ResourceRequirement as R;

        Self::new()
            .with_machines([
                "VTL",
                "VMC 1",
                "VMC 2",
                "Universal Milling",
                "Horizontal Milling",
                "Lathe",
                "Drilling",
                "CNC Tapping",
                "Dot Marking",
                "Press Brake",
                "Welding 1",
                "Welding 2",
                "Welding 3",
                "Welding 4",
                "Welding 5",
                "Manual 1",
                "Manual 2",
                "Manual 3",
                "Manual 4",
                "Manual 5",
                "Manual 6",
            ])
            .with_group("VMC", ["VMC 1", "VMC 2"])
            .with_group(
                "Welding",
                ["Welding 1", "Welding 2", "Welding 3", "Welding 4", "Welding 5"],
            )
            .with_group(
                "Manual",
                [
                    "Manual 1", "Manual 2", "Manual 3", "Manual 4", "Manual 5", "Manual 6",
                ],
            )
            .with_product(
                ProductDefinition::new("Inner Bearing")
                    .step("Cutting", 30, R::machine("VTL"))
                    .step("Slot Mill", 50, R::group("VMC"))
                    .step("Debour", 20, R::group("Manual"))
                    .step("Tapping", 12, R::machine("CNC Tapping"))
                    .step("Marking", 3, R::machine("Dot Marking"))
                    .step("Welding", 40, R::group("Welding")),
            )
            .with_product(
                ProductDefinition::new("CVT Tank")
                    .step("Marking", 2, R::machine("Dot Marking"))
                    .step("Bending", 24, R::machine("Press Brake"))
                    .step("Setting", 20, R::group("Welding"))
                    .step("Full Weld", 40, R::group("Welding")),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_shop_contents() {
        let shop = ShopDefinition::standard();
        assert_eq!(shop.machines.len(), 21);
        assert_eq!(shop.groups.len(), 3);
        let catalog = shop.catalog();
        assert_eq!(catalog.require("Inner Bearing").unwrap().steps.len(), 6);
        assert_eq!(catalog.require("CVT Tank").unwrap().unit_duration(), 86);
    }

    #[test]
    fn test_shop_from_json() {
        let shop = ShopDefinition::from_json_str(
            r#"{
                "machines": ["Saw", "Weld A", "Weld B"],
                "groups": { "Weld": ["Weld A", "Weld B"] },
                "products": [{
                    "id": "Frame",
                    "steps": [
                        { "name": "Cut", "duration": 15, "requirement": { "machine": "Saw" } },
                        { "name": "Join", "duration": 25, "requirement": { "group": "Weld" } }
                    ]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(shop.machines, vec!["Saw", "Weld A", "Weld B"]);
        assert_eq!(shop.groups.members("Weld").unwrap().len(), 2);
        assert_eq!(shop.catalog().require("Frame").unwrap().unit_duration(), 40);
    }
}

//! The fixed cookware inventory.
//!
//! The inventory is read-only after start-up and shared across requests.

use serde::Serialize;

use crate::CookwareName;

/// Cookware available in the reference kitchen, in display order.
pub const AVAILABLE_COOKWARE: &[&str] = &[
    "Spatula",
    "Frying Pan",
    "Little Pot",
    "Stovetop",
    "Whisk",
    "Knife",
    "Ladle",
    "Spoon",
];

/// An ordered set of cookware names with case-insensitive membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CookwareInventory {
    items: Vec<CookwareName>,
}

impl CookwareInventory {
    /// Builds an inventory from names, dropping blanks and case-insensitive
    /// duplicates while keeping first-seen order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<CookwareName> = Vec::new();
        for name in names.into_iter().filter_map(CookwareName::new) {
            if !items.contains(&name) {
                items.push(name);
            }
        }
        Self { items }
    }

    /// The reference inventory ([`AVAILABLE_COOKWARE`]).
    pub fn standard() -> Self {
        Self::new(AVAILABLE_COOKWARE.iter().copied())
    }

    /// Returns the items in inventory order.
    pub fn items(&self) -> &[CookwareName] {
        &self.items
    }

    /// Returns `true` if `name` is in the inventory, ignoring case.
    pub fn contains(&self, name: &CookwareName) -> bool {
        self.items.contains(name)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for CookwareInventory {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Display for CookwareInventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::types::join_names(&self.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_inventory_has_eight_items_in_order() {
        let inventory = CookwareInventory::standard();
        assert_eq!(inventory.len(), 8);
        assert_eq!(inventory.items()[0].as_str(), "Spatula");
        assert_eq!(inventory.items()[7].as_str(), "Spoon");
        assert_eq!(
            inventory.to_string(),
            "Spatula, Frying Pan, Little Pot, Stovetop, Whisk, Knife, Ladle, Spoon"
        );
    }

    #[test]
    fn membership_ignores_case() {
        let inventory = CookwareInventory::standard();
        assert!(inventory.contains(&CookwareName::new("little pot").unwrap()));
        assert!(!inventory.contains(&CookwareName::new("Wok").unwrap()));
    }

    #[test]
    fn duplicates_and_blanks_are_dropped() {
        let inventory = CookwareInventory::new(["Whisk", "", "whisk", "Knife"]);
        assert_eq!(inventory.len(), 2);
    }
}

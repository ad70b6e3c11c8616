//! Storefront product types
//!
//! Only the fields the synchronizer reads are modelled; everything else in
//! the storefront's product payload is ignored during deserialization.

use super::feed::InventoryItemId;
use serde::Deserialize;

/// A storefront product matched by barcode
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,

    /// Variants in storefront order
    ///
    /// The synchronizer only ever touches the first one.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A sellable variant of a product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub id: Option<u64>,

    /// Identifier of the variant's stock record, absent for variants
    /// that do not track inventory
    #[serde(default)]
    pub inventory_item_id: Option<InventoryItemId>,
}

impl Product {
    /// Inventory item of the first variant, if there is one
    pub fn first_inventory_item(&self) -> Option<InventoryItemId> {
        self.variants.first().and_then(|v| v.inventory_item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_inventory_item_uses_first_variant() {
        let product = Product {
            id: 1,
            variants: vec![
                Variant {
                    id: Some(10),
                    inventory_item_id: Some(100),
                },
                Variant {
                    id: Some(11),
                    inventory_item_id: Some(101),
                },
            ],
        };
        assert_eq!(product.first_inventory_item(), Some(100));
    }

    #[test]
    fn test_first_inventory_item_absent() {
        let empty = Product {
            id: 1,
            variants: vec![],
        };
        assert_eq!(empty.first_inventory_item(), None);

        let untracked = Product {
            id: 2,
            variants: vec![Variant {
                id: Some(20),
                inventory_item_id: None,
            }],
        };
        assert_eq!(untracked.first_inventory_item(), None);
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "id": 632910392,
            "title": "IPod Nano - 8GB",
            "variants": [
                { "id": 808950810, "barcode": "1234_pink", "inventory_item_id": 808950810 }
            ]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 632910392);
        assert_eq!(product.first_inventory_item(), Some(808950810));
    }

    #[test]
    fn test_deserialize_missing_variants() {
        let product: Product = serde_json::from_str(r#"{ "id": 7 }"#).unwrap();
        assert!(product.variants.is_empty());
    }
}

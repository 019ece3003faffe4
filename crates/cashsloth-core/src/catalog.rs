//! # Catalog
//!
//! The in-memory set of sellable items, loaded wholesale from JSON.
//!
//! ## Load Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {"items":[{"id":"COFFEE","name":"Coffee","unit_cents":500}, ...]}      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. serde parse ──────────── fails? → MalformedInput                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. per-record rules ─────── fails? → InvalidItem { position }          │
//! │     (id, name, unit_cents ≥ 0, unique id)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. fresh Catalog value ──── caller swaps it in as a whole              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is published until every record passed, so a failed load can
//! never leave a half-populated catalog behind.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_item_id, validate_item_name, validate_unit_cents};

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable item definition. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique string key used by add commands.
    pub id: String,

    /// Display name shown to cashier and customer.
    #[serde(default)]
    pub name: String,

    /// Unit price in cents.
    #[serde(rename = "unit_cents")]
    pub unit_price: Money,
}

impl CatalogItem {
    /// Creates an item without validating it.
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_cents: i64) -> Self {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            unit_price: Money::from_cents(unit_cents),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_item_id(&self.id)?;
        validate_item_name(&self.name)?;
        validate_unit_cents(self.unit_price.cents())
    }
}

/// Wire shape of a catalog description.
#[derive(Deserialize)]
struct CatalogDocument {
    items: Vec<CatalogItem>,
}

#[derive(Serialize)]
struct CatalogExport<'a> {
    items: &'a [CatalogItem],
}

// =============================================================================
// Catalog
// =============================================================================

/// Items in load order plus an id index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index_by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Parses and validates a catalog description.
    ///
    /// ## Example
    /// ```rust
    /// use cashsloth_core::Catalog;
    ///
    /// let catalog = Catalog::from_json(
    ///     r#"{"items":[{"id":"TEA","name":"Tea","unit_cents":400}]}"#,
    /// ).unwrap();
    /// assert_eq!(catalog.lookup("TEA").unwrap().unit_price.cents(), 400);
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        if json.trim().is_empty() {
            return Err(CoreError::malformed("catalog JSON must not be empty"));
        }

        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| CoreError::malformed(format!("invalid catalog JSON: {e}")))?;

        Self::from_items(document.items)
    }

    /// Validates already-parsed records and builds the catalog.
    pub fn from_items(items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut index_by_id = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            item.validate()
                .map_err(|source| CoreError::InvalidItem { position, source })?;

            if index_by_id.insert(item.id.clone(), position).is_some() {
                return Err(CoreError::InvalidItem {
                    position,
                    source: ValidationError::Duplicate {
                        field: "id".to_string(),
                        value: item.id.clone(),
                    },
                });
            }
        }

        Ok(Catalog { items, index_by_id })
    }

    /// Returns the item for `id`, or `ItemNotFound`.
    pub fn lookup(&self, id: &str) -> CoreResult<&CatalogItem> {
        self.index_by_id
            .get(id)
            .map(|&i| &self.items[i])
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the catalog back in the load schema.
    pub fn to_json(&self) -> CoreResult<String> {
        export_json(&self.items)
    }
}

/// Renders `{"items":[...]}` for any item slice (an unloaded catalog exports
/// as an empty list).
pub(crate) fn export_json(items: &[CatalogItem]) -> CoreResult<String> {
    serde_json::to_string(&CatalogExport { items }).map_err(|e| CoreError::SerializationError {
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const COFFEE_TEA: &str = r#"{"items":[
        {"id":"COFFEE","name":"Coffee","unit_cents":500},
        {"id":"TEA","name":"Tea","unit_cents":400}
    ]}"#;

    #[test]
    fn test_load_and_lookup() {
        let catalog = Catalog::from_json(COFFEE_TEA).unwrap();

        assert_eq!(catalog.len(), 2);
        let coffee = catalog.lookup("COFFEE").unwrap();
        assert_eq!(coffee.name, "Coffee");
        assert_eq!(coffee.unit_price.cents(), 500);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let catalog = Catalog::from_json(COFFEE_TEA).unwrap();
        let err = catalog.lookup("UNKNOWN").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ItemNotFound);
    }

    #[test]
    fn test_malformed_inputs() {
        for json in [
            "",
            "{invalid",
            "[]",
            r#"{"products":[]}"#,
            r#"{"items":{}}"#,
            r#"{"items":[{"name":"Coffee","unit_cents":500}]}"#,
            r#"{"items":[{"id":"COFFEE","name":"Coffee","unit_cents":5.5}]}"#,
            r#"{"items":[{"id":"COFFEE","name":"Coffee"}]}"#,
            r#"{"items":[42]}"#,
        ] {
            let err = Catalog::from_json(json).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedInput, "input: {json}");
        }
    }

    #[test]
    fn test_invalid_items() {
        for json in [
            r#"{"items":[{"id":"","name":"Coffee","unit_cents":500}]}"#,
            r#"{"items":[{"id":"COFFEE","name":"","unit_cents":500}]}"#,
            r#"{"items":[{"id":"COFFEE","unit_cents":500}]}"#,
            r#"{"items":[{"id":"COFFEE","name":"Coffee","unit_cents":-1}]}"#,
        ] {
            let err = Catalog::from_json(json).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidItem, "input: {json}");
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"items":[
            {"id":"COFFEE","name":"Coffee","unit_cents":500},
            {"id":"COFFEE","name":"Coffee","unit_cents":600}
        ]}"#;
        match Catalog::from_json(json).unwrap_err() {
            CoreError::InvalidItem { position, source } => {
                assert_eq!(position, 1);
                assert!(matches!(source, ValidationError::Duplicate { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_free_items_and_empty_catalog_allowed() {
        let catalog =
            Catalog::from_json(r#"{"items":[{"id":"WATER","name":"Water","unit_cents":0}]}"#)
                .unwrap();
        assert_eq!(catalog.lookup("WATER").unwrap().unit_price, Money::zero());

        let empty = Catalog::from_json(r#"{"items":[]}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_export_preserves_load_order() {
        let catalog = Catalog::from_json(COFFEE_TEA).unwrap();
        let json = catalog.to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"items":[{"id":"COFFEE","name":"Coffee","unit_cents":500},"#,
                r#"{"id":"TEA","name":"Tea","unit_cents":400}]}"#
            )
        );

        let reloaded = Catalog::from_json(&json).unwrap();
        assert_eq!(reloaded.to_json().unwrap(), json);
    }
}

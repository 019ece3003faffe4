//! # Validation Module
//!
//! Input validation utilities for CashSloth.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Only offers catalog buttons, sums cash taps                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: C boundary (cashsloth-ffi)                                   │
//! │  └── Null pointers, UTF-8                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  └── Business rules, checked before any state changes                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashsloth_core::validation::{validate_item_id, validate_quantity};
//!
//! validate_item_id("COFFEE").unwrap();
//! validate_quantity(5, None).unwrap();
//! assert!(validate_quantity(0, None).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Record Validators
// =============================================================================

/// Validates an item identifier.
///
/// ## Rules
/// - Must not be empty
/// - Whitespace is kept as-is and compared exactly
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use cashsloth_core::validation::validate_unit_cents;
///
/// assert!(validate_unit_cents(1099).is_ok());
/// assert!(validate_unit_cents(0).is_ok());
/// assert!(validate_unit_cents(-100).is_err());
/// ```
pub fn validate_unit_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_cents".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Command Validators
// =============================================================================

/// Validates a quantity passed to an add command.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max` when a ceiling is configured
///
/// ## User Workflow
/// ```text
/// Cashier taps "Coffee" (qty 1)
///       │
///       ▼
/// validate_quantity(1, limit) ← THIS FUNCTION
///       │
///       ├── qty <= 0?    → InvalidQuantity
///       ├── qty > limit? → InvalidQuantity
///       └── OK → merge or append line
/// ```
pub fn validate_quantity(qty: i64, max: Option<i64>) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    if let Some(max) = max {
        if qty > max {
            return Err(ValidationError::OutOfRange {
                field: "qty".to_string(),
                min: 1,
                max,
            });
        }
    }

    Ok(())
}

/// Validates a tendered amount in cents.
///
/// ## Rules
/// - Must be non-negative; zero resets the tender
pub fn validate_tendered_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "given_cents".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("COFFEE").is_ok());
        assert!(validate_item_id("tea-01").is_ok());

        assert!(validate_item_id(" ").is_ok());
        assert!(validate_item_id(" TEA ").is_ok());

        assert!(validate_item_id("").is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Coffee").is_ok());
        assert!(validate_item_name(" ").is_ok());
        assert_eq!(
            validate_item_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_unit_cents() {
        assert!(validate_unit_cents(0).is_ok());
        assert!(validate_unit_cents(i64::MAX).is_ok());
        assert!(validate_unit_cents(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1, None).is_ok());
        assert!(validate_quantity(1_000_000, None).is_ok());
        assert!(validate_quantity(999, Some(999)).is_ok());

        assert!(validate_quantity(0, None).is_err());
        assert!(validate_quantity(-1, None).is_err());
        assert_eq!(
            validate_quantity(1000, Some(999)),
            Err(ValidationError::OutOfRange {
                field: "qty".to_string(),
                min: 1,
                max: 999
            })
        );
    }

    #[test]
    fn test_validate_tendered_cents() {
        assert!(validate_tendered_cents(0).is_ok());
        assert!(validate_tendered_cents(1500).is_ok());
        assert!(validate_tendered_cents(-1).is_err());
    }
}

//! # Cart
//!
//! Ordered line items plus the customer's running tender.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Front End Action        Command                  Cart Change           │
//! │  ────────────────        ───────                  ───────────           │
//! │                                                                         │
//! │  Tap item (new) ───────► add_item() ────────────► lines.push(line)     │
//! │                                                                         │
//! │  Tap item (again) ─────► add_item() ────────────► lines[i].qty += n    │
//! │                                                                         │
//! │  Remove selected ──────► remove_line(i) ────────► lines.remove(i)      │
//! │                                                                         │
//! │  Clear ────────────────► clear() ───────────────► lines.clear()        │
//! │                                                  (tendered untouched)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// One catalog item in the cart with its aggregated quantity.
///
/// ## Design Notes
/// `name` and `unit_price` are frozen when the line is created. Reloading
/// the catalog afterwards does not reprice or rename existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog identifier this line was created from.
    pub item_id: String,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a line from a catalog item, capturing its name and price.
    pub fn from_item(item: &CatalogItem, quantity: i64) -> Self {
        CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adding a present item merges quantity)
/// - Every line has quantity >= 1
/// - Σ line totals fits in an i64 (checked before every mutation)
/// - `tendered` >= 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub(crate) lines: Vec<CartLine>,
    pub(crate) tendered: Money,
}

impl Cart {
    /// Creates a new empty cart with nothing tendered.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `quantity` of `item`, merging into an existing line if present.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity increases, position is unchanged
    /// - Item not in cart: a new line is appended with a name/price snapshot
    ///
    /// ## Errors
    /// `InvalidQuantity` for non-positive quantity, a merged quantity above
    /// `max_quantity`, or arithmetic overflow; `AllocationFailure` if the
    /// line vector cannot grow. On error the cart is unchanged.
    pub fn add_item(
        &mut self,
        item: &CatalogItem,
        quantity: i64,
        max_quantity: Option<i64>,
    ) -> CoreResult<()> {
        validate_quantity(quantity, max_quantity).map_err(CoreError::InvalidQuantity)?;

        let existing = self.lines.iter().position(|l| l.item_id == item.id);

        let (unit_price, new_quantity) = match existing {
            Some(i) => {
                let line = &self.lines[i];
                let merged = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| quantity_overflow(max_quantity))?;
                validate_quantity(merged, max_quantity).map_err(CoreError::InvalidQuantity)?;
                (line.unit_price, merged)
            }
            None => (item.unit_price, quantity),
        };

        let line_total = unit_price
            .checked_mul_quantity(new_quantity)
            .ok_or_else(|| quantity_overflow(max_quantity))?;
        self.checked_total_replacing(existing, line_total)
            .ok_or_else(|| quantity_overflow(max_quantity))?;

        match existing {
            Some(i) => self.lines[i].quantity = new_quantity,
            None => {
                self.lines
                    .try_reserve(1)
                    .map_err(|_| CoreError::AllocationFailure { what: "cart line" })?;
                self.lines.push(CartLine::from_item(item, quantity));
            }
        }

        Ok(())
    }

    /// Removes the line at zero-based `index`, returning it.
    ///
    /// Remaining lines keep their relative order; tendered is untouched.
    pub fn remove_line(&mut self, index: i64) -> CoreResult<CartLine> {
        let len = self.lines.len();
        match usize::try_from(index) {
            Ok(i) if i < len => Ok(self.lines.remove(i)),
            _ => Err(CoreError::IndexOutOfRange { index, len }),
        }
    }

    /// Removes all lines. The tendered amount is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line totals, recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Cash the customer has handed over.
    pub fn tendered(&self) -> Money {
        self.tendered
    }

    /// Total of every line except `replaced`, plus `line_total`, or `None`
    /// on overflow.
    fn checked_total_replacing(&self, replaced: Option<usize>, line_total: Money) -> Option<Money> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replaced)
            .try_fold(line_total, |acc, (_, line)| acc.checked_add(line.line_total()))
    }
}

fn quantity_overflow(max_quantity: Option<i64>) -> CoreError {
    CoreError::InvalidQuantity(ValidationError::OutOfRange {
        field: "qty".to_string(),
        min: 1,
        max: max_quantity.unwrap_or(i64::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

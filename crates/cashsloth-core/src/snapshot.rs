//! # Snapshot
//!
//! Point-in-time view of a cart for display.
//!
//! ## Wire Format
//! ```json
//! {
//!   "lines": [
//!     {"id":"COFFEE","name":"Coffee","unit_cents":500,"qty":2,"line_total_cents":1000}
//!   ],
//!   "total_cents": 1000,
//!   "given_cents": 1500,
//!   "change_cents": 500
//! }
//! ```

use serde::Serialize;

use crate::cart::{Cart, CartLine};
use crate::config::ChangePolicy;
use crate::error::{CoreError, CoreResult};
use crate::payment::PaymentSnapshot;

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotLine {
    pub id: String,
    pub name: String,
    pub unit_cents: i64,
    pub qty: i64,
    pub line_total_cents: i64,
}

impl From<&CartLine> for SnapshotLine {
    fn from(line: &CartLine) -> Self {
        SnapshotLine {
            id: line.item_id.clone(),
            name: line.name.clone(),
            unit_cents: line.unit_price.cents(),
            qty: line.quantity,
            line_total_cents: line.line_total().cents(),
        }
    }
}

/// Lines plus payment figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<SnapshotLine>,
    pub total_cents: i64,
    pub given_cents: i64,
    pub change_cents: i64,
}

impl CartSnapshot {
    /// Captures `cart` as it is right now.
    pub fn capture(cart: &Cart, policy: ChangePolicy) -> Self {
        let payment = PaymentSnapshot::of(cart, policy);
        CartSnapshot {
            lines: cart.lines().iter().map(SnapshotLine::from).collect(),
            total_cents: payment.total.cents(),
            given_cents: payment.given.cents(),
            change_cents: payment.change.cents(),
        }
    }

    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::SerializationError {
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Payment
//!
//! Total, tender and change for a cart. Nothing here is stored besides the
//! tendered amount on the [`Cart`]; every figure is derived on demand.
//!
//! ## Tender Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer hands over 10 + 5                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front end sums taps: 1500                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_tendered(1500) ← absolute, not additive                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PaymentSnapshot { total: 1400, given: 1500, change: 100 }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::Cart;
use crate::config::ChangePolicy;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_tendered_cents;

/// Derived payment figures for one cart at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSnapshot {
    /// Σ line totals.
    pub total: Money,
    /// Tendered amount.
    pub given: Money,
    /// `given − total`, adjusted by the change policy.
    pub change: Money,
}

impl PaymentSnapshot {
    /// Computes the figures for `cart`.
    pub fn of(cart: &Cart, policy: ChangePolicy) -> Self {
        let total = cart.total();
        let given = cart.tendered();
        let raw_change = given - total;

        let change = match policy {
            ChangePolicy::ClampToZero => raw_change.max_zero(),
            ChangePolicy::Report | ChangePolicy::RejectInsufficient => raw_change,
        };

        PaymentSnapshot {
            total,
            given,
            change,
        }
    }
}

impl Cart {
    /// Sets the tendered amount to an absolute value.
    ///
    /// ## Errors
    /// `InvalidAmount` if `cents` is negative, or below the current total
    /// under [`ChangePolicy::RejectInsufficient`].
    pub fn set_tendered(&mut self, cents: i64, policy: ChangePolicy) -> CoreResult<()> {
        validate_tendered_cents(cents).map_err(CoreError::InvalidAmount)?;

        if policy == ChangePolicy::RejectInsufficient {
            let total = self.total();
            if cents < total.cents() {
                return Err(CoreError::InvalidAmount(ValidationError::BelowMinimum {
                    field: "given_cents".to_string(),
                    min: total.cents(),
                }));
            }
        }

        self.tendered = Money::from_cents(cents);
        Ok(())
    }

    /// Convenience for [`PaymentSnapshot::of`].
    pub fn payment(&self, policy: ChangePolicy) -> PaymentSnapshot {
        PaymentSnapshot::of(self, policy)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use crate::error::ErrorKind;

    fn cart_with_two_coffees() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&CatalogItem::new("COFFEE", "Coffee", 500), 2, None)
            .unwrap();
        cart
    }

    #[test]
    fn test_change_exact_over_and_under() {
        let mut cart = cart_with_two_coffees();

        for (given, expected_change) in [(1000, 0), (1500, 500), (500, -500), (0, -1000)] {
            cart.set_tendered(given, ChangePolicy::Report).unwrap();
            let payment = cart.payment(ChangePolicy::Report);
            assert_eq!(payment.total.cents(), 1000);
            assert_eq!(payment.given.cents(), given);
            assert_eq!(payment.change.cents(), expected_change);
        }
    }

    #[test]
    fn test_tendered_is_absolute() {
        let mut cart = cart_with_two_coffees();
        cart.set_tendered(1000, ChangePolicy::Report).unwrap();
        cart.set_tendered(200, ChangePolicy::Report).unwrap();
        assert_eq!(cart.tendered().cents(), 200);
    }

    #[test]
    fn test_negative_tender_rejected() {
        let mut cart = cart_with_two_coffees();
        cart.set_tendered(700, ChangePolicy::Report).unwrap();

        let err = cart.set_tendered(-1, ChangePolicy::Report).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
        assert_eq!(cart.tendered().cents(), 700);
    }

    #[test]
    fn test_clamp_policy() {
        let mut cart = cart_with_two_coffees();
        cart.set_tendered(400, ChangePolicy::ClampToZero).unwrap();

        assert_eq!(cart.payment(ChangePolicy::ClampToZero).change, Money::zero());
        assert_eq!(cart.payment(ChangePolicy::Report).change.cents(), -600);

        cart.set_tendered(1200, ChangePolicy::ClampToZero).unwrap();
        assert_eq!(cart.payment(ChangePolicy::ClampToZero).change.cents(), 200);
    }

    #[test]
    fn test_reject_insufficient_policy() {
        let mut cart = cart_with_two_coffees();

        let err = cart
            .set_tendered(999, ChangePolicy::RejectInsufficient)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
        assert_eq!(cart.tendered(), Money::zero());

        cart.set_tendered(1000, ChangePolicy::RejectInsufficient)
            .unwrap();
        assert_eq!(cart.payment(ChangePolicy::RejectInsufficient).change, Money::zero());

        // Adding after tender may still make the change negative; it is reported.
        cart.add_item(&CatalogItem::new("TEA", "Tea", 400), 1, None)
            .unwrap();
        assert_eq!(
            cart.payment(ChangePolicy::RejectInsufficient).change.cents(),
            -400
        );
    }

    #[test]
    fn test_empty_cart_payment() {
        let cart = Cart::new();
        let payment = cart.payment(ChangePolicy::Report);
        assert_eq!(payment.total, Money::zero());
        assert_eq!(payment.given, Money::zero());
        assert_eq!(payment.change, Money::zero());
    }
}

//! # Payment Commands
//!
//! The tendered amount is absolute: the host sums the cash it was handed and
//! sends the running value, never a delta.

use libc::{c_int, c_longlong};
use tracing::debug;

use super::{session, CartHandle};
use crate::error::{report, FfiResult};
use crate::{marshal, state};

/// Sets the amount the customer handed over, in cents.
#[no_mangle]
pub extern "C" fn cs_payment_set_given_cents(cart: CartHandle, given_cents: c_longlong) -> c_int {
    report("cs_payment_set_given_cents", set_given(cart, given_cents))
}

fn set_given(cart: CartHandle, given_cents: c_longlong) -> FfiResult<()> {
    debug!(cart = %session(cart), given_cents, "cs_payment_set_given_cents");
    state::with_engine_mut(|engine| engine.set_tendered(session(cart), given_cents))?;
    Ok(())
}

/// Writes the tendered amount to `*out_given_cents`.
///
/// # Safety
/// `out_given_cents` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn cs_payment_get_given_cents(
    cart: CartHandle,
    out_given_cents: *mut c_longlong,
) -> c_int {
    report("cs_payment_get_given_cents", given_cents(cart, out_given_cents))
}

unsafe fn given_cents(cart: CartHandle, out_given_cents: *mut c_longlong) -> FfiResult<()> {
    let out = marshal::out_ref(out_given_cents, "out_given_cents")?;

    let payment = state::with_engine(|engine| engine.payment(session(cart)))?;
    *out = payment.given.cents();
    Ok(())
}

/// Writes `given − total` (after the configured change policy) to
/// `*out_change_cents`. Negative when the tender is short.
///
/// # Safety
/// `out_change_cents` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn cs_payment_get_change_cents(
    cart: CartHandle,
    out_change_cents: *mut c_longlong,
) -> c_int {
    report("cs_payment_get_change_cents", change_cents(cart, out_change_cents))
}

unsafe fn change_cents(cart: CartHandle, out_change_cents: *mut c_longlong) -> FfiResult<()> {
    let out = marshal::out_ref(out_change_cents, "out_change_cents")?;

    let payment = state::with_engine(|engine| engine.payment(session(cart)))?;
    *out = payment.change.cents();
    Ok(())
}

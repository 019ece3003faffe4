//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │ cs_cart_ │────►│ In Cart  │────►│  Tender  │────►│ cs_cart_ │       │
//! │  │   new    │     │          │     │          │     │   free   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │              add_item_by_id     payment_set_given_cents                 │
//! │              remove_line        (payment.rs)                            │
//! │              get_lines_json                                             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   cs_cart_clear ─────────────────────►                  │
//! │                                          (lines gone, tender kept)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use libc::{c_char, c_int, c_longlong};
use tracing::debug;

use super::{session, CartHandle};
use crate::error::{report, FfiResult};
use crate::{marshal, state};

// =============================================================================
// Lifecycle
// =============================================================================

/// Creates an empty cart and writes its handle to `*out_cart`.
///
/// # Safety
/// `out_cart` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn cs_cart_new(out_cart: *mut CartHandle) -> c_int {
    report("cs_cart_new", new_cart(out_cart))
}

unsafe fn new_cart(out_cart: *mut CartHandle) -> FfiResult<()> {
    let out = marshal::out_ref(out_cart, "out_cart")?;

    let handle = state::with_engine_mut(|engine| engine.create_cart())?;
    debug!(cart = %handle, "cs_cart_new");
    *out = handle.raw();
    Ok(())
}

/// Releases a cart. The handle is invalid afterwards.
#[no_mangle]
pub extern "C" fn cs_cart_free(cart: CartHandle) -> c_int {
    report("cs_cart_free", free_cart(cart))
}

fn free_cart(cart: CartHandle) -> FfiResult<()> {
    debug!(cart = %session(cart), "cs_cart_free");
    state::with_engine_mut(|engine| engine.release_cart(session(cart)))?;
    Ok(())
}

/// Removes every line. The tendered amount is kept.
#[no_mangle]
pub extern "C" fn cs_cart_clear(cart: CartHandle) -> c_int {
    report("cs_cart_clear", clear_cart(cart))
}

fn clear_cart(cart: CartHandle) -> FfiResult<()> {
    debug!(cart = %session(cart), "cs_cart_clear");
    state::with_engine_mut(|engine| engine.clear_cart(session(cart)))?;
    Ok(())
}

// =============================================================================
// Lines
// =============================================================================

/// Adds `qty` units of catalog item `item_id`, merging with an existing line.
///
/// # Safety
/// `item_id` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn cs_cart_add_item_by_id(
    cart: CartHandle,
    item_id: *const c_char,
    qty: c_int,
) -> c_int {
    report("cs_cart_add_item_by_id", add_item(cart, item_id, qty))
}

unsafe fn add_item(cart: CartHandle, item_id: *const c_char, qty: c_int) -> FfiResult<()> {
    let item_id = marshal::read_str(item_id, "item_id")?;
    debug!(cart = %session(cart), item_id, qty, "cs_cart_add_item_by_id");

    state::with_engine_mut(|engine| engine.add_item(session(cart), item_id, i64::from(qty)))?;
    Ok(())
}

/// Removes the line at zero-based `line_index`.
#[no_mangle]
pub extern "C" fn cs_cart_remove_line(cart: CartHandle, line_index: c_int) -> c_int {
    report("cs_cart_remove_line", remove_line(cart, line_index))
}

fn remove_line(cart: CartHandle, line_index: c_int) -> FfiResult<()> {
    debug!(cart = %session(cart), line_index, "cs_cart_remove_line");

    let removed =
        state::with_engine_mut(|engine| engine.remove_line(session(cart), i64::from(line_index)))?;
    debug!(item_id = %removed.item_id, qty = removed.quantity, "line removed");
    Ok(())
}

// =============================================================================
// Queries
// =============================================================================

/// Writes the cart total in cents to `*out_total_cents`.
///
/// # Safety
/// `out_total_cents` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn cs_cart_get_total_cents(
    cart: CartHandle,
    out_total_cents: *mut c_longlong,
) -> c_int {
    report("cs_cart_get_total_cents", total_cents(cart, out_total_cents))
}

unsafe fn total_cents(cart: CartHandle, out_total_cents: *mut c_longlong) -> FfiResult<()> {
    let out = marshal::out_ref(out_total_cents, "out_total_cents")?;

    let payment = state::with_engine(|engine| engine.payment(session(cart)))?;
    *out = payment.total.cents();
    Ok(())
}

/// Writes the cart snapshot JSON to `*out_json` (release with `cs_free`).
///
/// # Safety
/// `out_json` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn cs_cart_get_lines_json(
    cart: CartHandle,
    out_json: *mut *mut c_char,
) -> c_int {
    report("cs_cart_get_lines_json", lines_json(cart, out_json))
}

unsafe fn lines_json(cart: CartHandle, out_json: *mut *mut c_char) -> FfiResult<()> {
    let out = marshal::out_buffer(out_json, "out_json")?;

    let json = state::with_engine(|engine| engine.snapshot_json(session(cart)))?;
    *out = marshal::into_c_string(json)?;
    Ok(())
}

//! # Commands Module
//!
//! Every `extern "C"` operation besides init/shutdown/version and the
//! error exports.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (handle type, shared helpers)
//! ├── catalog.rs  ◄─── Catalog load / export
//! ├── cart.rs     ◄─── Cart lifecycle, lines, snapshot
//! └── payment.rs  ◄─── Tendered amount and change
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #[no_mangle] pub unsafe extern "C" fn cs_xxx(args) -> c_int            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  report("cs_xxx", xxx(args))          ◄── status + last error           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  fn xxx(args) -> FfiResult<()>                                          │
//! │    1. marshal pointers (null / UTF-8 → InvalidArgument)                 │
//! │    2. debug!(...)                                                       │
//! │    3. state::with_engine[_mut](|engine| engine.xxx(...))                │
//! │    4. write outputs                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Outputs are written only after the engine call succeeded.

pub mod cart;
pub mod catalog;
pub mod payment;

use cashsloth_core::SessionHandle;

/// Cart token as seen by C (`cs_cart_t`). Never `0` for a live cart.
pub type CartHandle = u64;

#[inline]
fn session(cart: CartHandle) -> SessionHandle {
    SessionHandle::from_raw(cart)
}

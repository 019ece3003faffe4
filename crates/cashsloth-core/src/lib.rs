//! # cashsloth-core: Pure Business Logic for CashSloth
//!
//! This crate is the **heart** of CashSloth. It tracks a catalog of sellable
//! items, accumulates carts against it and computes totals, tendered amount
//! and change, all in integer cents.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CashSloth Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Desktop Front End                            │   │
//! │  │    Item buttons ──► Cart list ──► Cash taps ──► Change display  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ P/Invoke (cs_* symbols)                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cashsloth-ffi                                │   │
//! │  │    status codes, last error, handles, owned JSON buffers       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cashsloth-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │   │ catalog │ │  cart   │ │ payment │ │snapshot │ │ session │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘ │   │
//! │  │                         engine                                 │   │
//! │  │   NO I/O • NO GLOBALS • NO POINTERS • TYPED ERRORS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Item definitions loaded wholesale from JSON
//! - [`cart`] - Ordered line items with price/name snapshots
//! - [`payment`] - Tendered amount, change and change policy
//! - [`snapshot`] - Serialized view of a cart for display
//! - [`session`] - Opaque handle registry for live carts
//! - [`engine`] - Command surface tying everything together
//! - [`config`] - Engine configuration
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cashsloth_core::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine
//!     .load_catalog_json(r#"{"items":[{"id":"COFFEE","name":"Coffee","unit_cents":500}]}"#)
//!     .unwrap();
//!
//! let cart = engine.create_cart().unwrap();
//! engine.add_item(cart, "COFFEE", 2).unwrap();
//! engine.set_tendered(cart, 1500).unwrap();
//!
//! let payment = engine.payment(cart).unwrap();
//! assert_eq!(payment.total.cents(), 1000);
//! assert_eq!(payment.change.cents(), 500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod payment;
pub mod session;
pub mod snapshot;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogItem};
pub use config::{ChangePolicy, EngineConfig};
pub use engine::Engine;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use payment::PaymentSnapshot;
pub use session::{SessionHandle, SessionRegistry};
pub use snapshot::{CartSnapshot, SnapshotLine};

/// Crate version reported across the boundary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

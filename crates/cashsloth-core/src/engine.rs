//! # Engine
//!
//! The command surface: one catalog, many carts, one config.
//!
//! ## Command Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_catalog_json ──► create_cart ──► add_item / remove_line / clear   │
//! │                              │             set_tendered                 │
//! │                              │                   │                      │
//! │                              │                   ▼                      │
//! │                              │          snapshot_json (after each cmd)  │
//! │                              ▼                                          │
//! │                        release_cart                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command checks the handle first, then its own preconditions, and
//! only then mutates.

use crate::cart::CartLine;
use crate::catalog::{self, Catalog};
use crate::config::EngineConfig;
use crate::error::{CoreError, CoreResult};
use crate::payment::PaymentSnapshot;
use crate::session::{SessionHandle, SessionRegistry};
use crate::snapshot::CartSnapshot;
use crate::validation::validate_quantity;

/// Catalog, carts and config for one process.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    catalog: Option<Catalog>,
    sessions: SessionRegistry,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config,
            catalog: None,
            sessions: SessionRegistry::new(),
        }
    }

    /// Issues fresh cart handles from generation `floor` on, so a handle
    /// from a previous engine never names a cart in this one.
    pub fn with_generation_floor(mut self, floor: u32) -> Self {
        self.sessions = SessionRegistry::starting_at(floor);
        self
    }

    /// Floor to seed the next engine with; `None` when handles are spent.
    pub fn next_generation_floor(&self) -> Option<u32> {
        self.sessions.next_generation_floor()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Parses `json` and replaces the whole catalog, returning the item count.
    /// On error the previous catalog stays in place.
    pub fn load_catalog_json(&mut self, json: &str) -> CoreResult<usize> {
        let catalog = Catalog::from_json(json)?;
        let count = catalog.len();
        self.catalog = Some(catalog);
        Ok(count)
    }

    /// Exports the catalog in load schema; empty list when none is loaded.
    pub fn catalog_json(&self) -> CoreResult<String> {
        match &self.catalog {
            Some(catalog) => catalog.to_json(),
            None => catalog::export_json(&[]),
        }
    }

    // =========================================================================
    // Cart Lifecycle
    // =========================================================================

    pub fn create_cart(&mut self) -> CoreResult<SessionHandle> {
        self.sessions.create()
    }

    pub fn release_cart(&mut self, handle: SessionHandle) -> CoreResult<()> {
        self.sessions.release(handle).map(drop)
    }

    /// Number of live carts.
    pub fn cart_count(&self) -> usize {
        self.sessions.len()
    }

    // =========================================================================
    // Cart Commands
    // =========================================================================

    /// Adds `quantity` of catalog item `item_id` to the cart.
    ///
    /// ## Check Order
    /// handle → quantity → catalog loaded → item exists → merge/append
    pub fn add_item(
        &mut self,
        handle: SessionHandle,
        item_id: &str,
        quantity: i64,
    ) -> CoreResult<()> {
        let max_quantity = self.config.max_line_quantity;
        let cart = self.sessions.get_mut(handle)?;

        validate_quantity(quantity, max_quantity).map_err(CoreError::InvalidQuantity)?;
        let item = self
            .catalog
            .as_ref()
            .ok_or(CoreError::CatalogNotLoaded)?
            .lookup(item_id)?;

        cart.add_item(item, quantity, max_quantity)
    }

    /// Removes the line at `index` and returns it.
    pub fn remove_line(&mut self, handle: SessionHandle, index: i64) -> CoreResult<CartLine> {
        self.sessions.with_cart_mut(handle, |cart| cart.remove_line(index))
    }

    /// Removes every line; the tendered amount is kept.
    pub fn clear_cart(&mut self, handle: SessionHandle) -> CoreResult<()> {
        self.sessions.with_cart_mut(handle, |cart| {
            cart.clear();
            Ok(())
        })
    }

    /// Sets the tendered amount (absolute, in cents).
    pub fn set_tendered(&mut self, handle: SessionHandle, cents: i64) -> CoreResult<()> {
        let policy = self.config.change_policy;
        self.sessions
            .with_cart_mut(handle, |cart| cart.set_tendered(cents, policy))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn payment(&self, handle: SessionHandle) -> CoreResult<PaymentSnapshot> {
        let policy = self.config.change_policy;
        self.sessions
            .with_cart(handle, |cart| PaymentSnapshot::of(cart, policy))
    }

    pub fn snapshot(&self, handle: SessionHandle) -> CoreResult<CartSnapshot> {
        let policy = self.config.change_policy;
        self.sessions
            .with_cart(handle, |cart| CartSnapshot::capture(cart, policy))
    }

    pub fn snapshot_json(&self, handle: SessionHandle) -> CoreResult<String> {
        self.snapshot(handle)?.to_json()
    }

    // =========================================================================
    // Shutdown
    // =========================================================================

    /// Releases every cart and forgets the catalog.
    pub fn reset(&mut self) {
        self.sessions.release_all();
        self.catalog = None;
    }
}

/// Rejects a config the engine cannot run with.
impl TryFrom<EngineConfig> for Engine {
    type Error = CoreError;

    fn try_from(config: EngineConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Engine::new(config))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

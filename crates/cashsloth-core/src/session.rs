//! # Session Registry
//!
//! Maps opaque handles to the carts they own.
//!
//! ## Handle Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  u64 token                                                              │
//! │  ┌──────────────────────────────┬──────────────────────────────┐       │
//! │  │ generation (high 32, >= 1)   │ slot index (low 32)          │       │
//! │  └──────────────────────────────┴──────────────────────────────┘       │
//! │                                                                         │
//! │  create  ──► take a free slot (or append), token = (gen, index)         │
//! │  release ──► drop the cart, gen += 1, slot back on the free list        │
//! │  lookup  ──► slot exists && slot.gen == token.gen && slot occupied      │
//! │  starting_at(floor) ──► fresh slots begin at floor, so a successor      │
//! │  seeded with next_generation_floor() never repeats an earlier token     │
//! │                                                                         │
//! │  A slot whose generation reaches u32::MAX is retired, never reused,     │
//! │  so no token can ever name two different carts.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Token `0` is never issued.

use std::fmt;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Session Handle
// =============================================================================

/// Opaque token identifying one live cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    fn new(index: u32, generation: u32) -> Self {
        SessionHandle((u64::from(generation) << 32) | u64::from(index))
    }

    /// Rebuilds a handle from a token received across the boundary.
    /// Validity is checked on use, not here.
    #[inline]
    pub const fn from_raw(token: u64) -> Self {
        SessionHandle(token)
    }

    /// The token handed to callers.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    fn index(self) -> usize {
        (self.0 & u64::from(u32::MAX)) as usize
    }

    fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug)]
struct Slot {
    generation: u32,
    cart: Option<Cart>,
}

/// Arena of carts addressed by [`SessionHandle`].
#[derive(Debug)]
pub struct SessionRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    first_generation: u32,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        SessionRegistry::starting_at(1)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry::default()
    }

    /// A registry whose fresh slots start at `first_generation` (at least 1).
    ///
    /// Seeding a new registry with [`next_generation_floor`] of the one it
    /// replaces keeps every earlier token invalid in the new one.
    ///
    /// [`next_generation_floor`]: SessionRegistry::next_generation_floor
    pub fn starting_at(first_generation: u32) -> Self {
        SessionRegistry {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            first_generation: first_generation.max(1),
        }
    }

    /// A generation above every token this registry has issued.
    ///
    /// `None` once the generation space is spent.
    pub fn next_generation_floor(&self) -> Option<u32> {
        self.slots
            .iter()
            .map(|s| s.generation)
            .chain([self.first_generation])
            .max()
            .and_then(|g| g.checked_add(1))
    }

    /// Allocates an empty cart and returns its handle.
    ///
    /// ## Errors
    /// `AllocationFailure` if memory or the 32-bit slot space is exhausted.
    pub fn create(&mut self) -> CoreResult<SessionHandle> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.cart = Some(Cart::new());
            self.live += 1;
            return Ok(SessionHandle::new(index, slot.generation));
        }

        let index = u32::try_from(self.slots.len())
            .map_err(|_| CoreError::AllocationFailure { what: "cart handle" })?;
        self.slots
            .try_reserve(1)
            .map_err(|_| CoreError::AllocationFailure { what: "cart" })?;
        self.slots.push(Slot {
            generation: self.first_generation,
            cart: Some(Cart::new()),
        });
        self.live += 1;
        Ok(SessionHandle::new(index, self.first_generation))
    }

    /// Invalidates `handle` and returns the cart it owned.
    ///
    /// Releasing twice fails with `InvalidHandle` on the second call.
    pub fn release(&mut self, handle: SessionHandle) -> CoreResult<Cart> {
        let index = handle.index();
        let issued = self
            .slots
            .get(index)
            .is_some_and(|s| s.generation == handle.generation());
        if !issued {
            return Err(CoreError::InvalidHandle(handle.raw()));
        }
        self.vacate(index)
            .ok_or(CoreError::InvalidHandle(handle.raw()))
    }

    /// Takes the cart out of an occupied slot and advances its generation.
    fn vacate(&mut self, index: usize) -> Option<Cart> {
        let slot = self.slots.get_mut(index)?;
        let cart = slot.cart.take()?;
        self.live -= 1;

        // Retire the slot when its generation cannot advance or the free
        // list cannot grow; either way the old token stays dead.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            if self.free.try_reserve(1).is_ok() {
                self.free.push(index as u32);
            }
        }
        Some(cart)
    }

    /// Borrows the cart behind `handle`.
    pub fn get(&self, handle: SessionHandle) -> CoreResult<&Cart> {
        self.slots
            .get(handle.index())
            .filter(|s| s.generation == handle.generation())
            .and_then(|s| s.cart.as_ref())
            .ok_or(CoreError::InvalidHandle(handle.raw()))
    }

    /// Mutably borrows the cart behind `handle`.
    pub fn get_mut(&mut self, handle: SessionHandle) -> CoreResult<&mut Cart> {
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation())
            .and_then(|s| s.cart.as_mut())
            .ok_or(CoreError::InvalidHandle(handle.raw()))
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use cashsloth_core::SessionRegistry;
    ///
    /// let mut sessions = SessionRegistry::new();
    /// let handle = sessions.create().unwrap();
    /// let lines = sessions.with_cart(handle, |cart| cart.len()).unwrap();
    /// assert_eq!(lines, 0);
    /// ```
    pub fn with_cart<F, R>(&self, handle: SessionHandle, f: F) -> CoreResult<R>
    where
        F: FnOnce(&Cart) -> R,
    {
        self.get(handle).map(f)
    }

    /// Executes a fallible function with write access to the cart.
    pub fn with_cart_mut<F, R>(&mut self, handle: SessionHandle, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut Cart) -> CoreResult<R>,
    {
        f(self.get_mut(handle)?)
    }

    /// Number of live carts.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Releases every live cart.
    pub fn release_all(&mut self) {
        for index in 0..self.slots.len() {
            self.vacate(index);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

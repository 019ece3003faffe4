//! # Error Types
//!
//! Domain-specific error types for cashsloth-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cashsloth-core errors (this file)                                     │
//! │  ├── CoreError        - One variant per failure kind                   │
//! │  ├── ValidationError  - Field-level input failures                     │
//! │  └── ErrorKind        - Fieldless discriminant for status codes        │
//! │                                                                         │
//! │  cashsloth-ffi (boundary crate)                                        │
//! │  └── StatusCode       - What the caller sees (integer + last error)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ErrorKind → StatusCode → Caller   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, index, amount)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable; nothing here panics

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Operations validate before they mutate, so receiving any of these means
/// the catalog and every cart are exactly as they were before the call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The engine has not been initialized (or was shut down).
    #[error("Core is not initialized; call cs_init first")]
    NotInitialized,

    /// Input could not be parsed at all.
    ///
    /// ## When This Occurs
    /// - Catalog text is not JSON, or lacks an `items` array
    /// - An item record lacks `id`, or `unit_cents` is not an integer
    /// - Config JSON has unknown enum values
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// A catalog record parsed but breaks a business rule.
    #[error("Invalid catalog item at position {position}: {source}")]
    InvalidItem {
        position: usize,
        #[source]
        source: ValidationError,
    },

    /// An item was requested before any catalog was loaded.
    #[error("No catalog loaded")]
    CatalogNotLoaded,

    /// The identifier is not in the current catalog.
    #[error("Unknown item_id: {0}")]
    ItemNotFound(String),

    /// Token is unknown, released, or was never issued.
    #[error("Invalid cart handle: {0:#x}")]
    InvalidHandle(u64),

    /// Line index outside `0..len`.
    #[error("line_index {index} out of range (cart has {len} lines)")]
    IndexOutOfRange { index: i64, len: usize },

    /// Quantity is non-positive, over the configured ceiling, or would overflow.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[source] ValidationError),

    /// Tendered amount is negative or rejected by the change policy.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[source] ValidationError),

    /// A snapshot or catalog export could not be rendered.
    #[error("Serialization failed: {reason}")]
    SerializationError { reason: String },

    /// Memory or handle space is exhausted.
    #[error("Out of memory allocating {what}")]
    AllocationFailure { what: &'static str },
}

impl CoreError {
    /// Returns the fieldless discriminant used for status codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotInitialized => ErrorKind::NotInitialized,
            CoreError::MalformedInput { .. } => ErrorKind::MalformedInput,
            CoreError::InvalidItem { .. } => ErrorKind::InvalidItem,
            CoreError::CatalogNotLoaded => ErrorKind::CatalogNotLoaded,
            CoreError::ItemNotFound(_) => ErrorKind::ItemNotFound,
            CoreError::InvalidHandle(_) => ErrorKind::InvalidHandle,
            CoreError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            CoreError::InvalidQuantity(_) => ErrorKind::InvalidQuantity,
            CoreError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            CoreError::SerializationError { .. } => ErrorKind::SerializationError,
            CoreError::AllocationFailure { .. } => ErrorKind::AllocationFailure,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedInput {
            reason: reason.into(),
        }
    }
}

/// Failure kinds, one per [`CoreError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotInitialized,
    MalformedInput,
    InvalidItem,
    CatalogNotLoaded,
    ItemNotFound,
    InvalidHandle,
    IndexOutOfRange,
    InvalidQuantity,
    InvalidAmount,
    SerializationError,
    AllocationFailure,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs; wrapped by the
/// [`CoreError`] variant that names the operation's failure kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Numeric value is below a floor.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// Duplicate value (e.g., duplicate item id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

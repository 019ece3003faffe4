//! # Boundary Errors
//!
//! Turns typed errors into what a C caller can consume: an integer status
//! and a message kept in a per-thread slot.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Host (C / C# / ...)                 Rust Boundary                      │
//! │  ───────────────────                 ─────────────                      │
//! │                                                                         │
//! │  rc = cs_cart_add_item_by_id(...)                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  command body: FfiResult<()>                                     │  │
//! │  │         │                                                        │  │
//! │  │         ├── Ok ─────────────────────────────────► 0              │  │
//! │  │         │                                                        │  │
//! │  │         └── Err(e) ── warn!(...) ── LAST_ERROR = e.to_string()   │  │
//! │  │                                 └─────────────────► e.status()   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  if (rc != 0) show(cs_last_error());                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The slot is thread-local: two threads failing at once each read their
//! own message. A success leaves the slot as it was.

use std::cell::RefCell;
use std::ffi::CString;

use cashsloth_core::{CoreError, ErrorKind};
use libc::{c_char, c_int, c_void};
use thiserror::Error;
use tracing::warn;

use crate::marshal;

// =============================================================================
// Status Codes
// =============================================================================

/// Integer status returned by every fallible export.
///
/// The numeric values are part of the ABI and mirrored in
/// `include/cashsloth_core.h`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Success = 0,
    NotInitialized = 1,
    MalformedInput = 2,
    InvalidItem = 3,
    CatalogNotLoaded = 4,
    ItemNotFound = 5,
    InvalidHandle = 6,
    IndexOutOfRange = 7,
    InvalidQuantity = 8,
    InvalidAmount = 9,
    SerializationError = 10,
    AllocationFailure = 11,
    /// Null required pointer or non-UTF-8 string.
    InvalidArgument = 12,
}

impl StatusCode {
    #[inline]
    pub const fn code(self) -> c_int {
        self as c_int
    }
}

impl From<ErrorKind> for StatusCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotInitialized => StatusCode::NotInitialized,
            ErrorKind::MalformedInput => StatusCode::MalformedInput,
            ErrorKind::InvalidItem => StatusCode::InvalidItem,
            ErrorKind::CatalogNotLoaded => StatusCode::CatalogNotLoaded,
            ErrorKind::ItemNotFound => StatusCode::ItemNotFound,
            ErrorKind::InvalidHandle => StatusCode::InvalidHandle,
            ErrorKind::IndexOutOfRange => StatusCode::IndexOutOfRange,
            ErrorKind::InvalidQuantity => StatusCode::InvalidQuantity,
            ErrorKind::InvalidAmount => StatusCode::InvalidAmount,
            ErrorKind::SerializationError => StatusCode::SerializationError,
            ErrorKind::AllocationFailure => StatusCode::AllocationFailure,
        }
    }
}

// =============================================================================
// Boundary Error
// =============================================================================

/// Everything that can go wrong inside an export.
#[derive(Debug, Error)]
pub enum FfiError {
    /// Business logic rejected the call.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A required pointer argument was null.
    #[error("{what} must not be null")]
    NullPointer { what: &'static str },

    /// A string argument was not valid UTF-8.
    #[error("{what} is not valid UTF-8")]
    InvalidUtf8 { what: &'static str },
}

impl FfiError {
    pub fn status(&self) -> StatusCode {
        match self {
            FfiError::Core(e) => e.kind().into(),
            FfiError::NullPointer { .. } | FfiError::InvalidUtf8 { .. } => {
                StatusCode::InvalidArgument
            }
        }
    }
}

pub type FfiResult<T> = Result<T, FfiError>;

// =============================================================================
// Last Error Slot
// =============================================================================

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

/// Replaces this thread's last error message.
pub(crate) fn set_last_error(message: &str) {
    // Messages can echo caller input; NUL would truncate them on the C side.
    let message = CString::new(message.replace('\0', "\u{fffd}")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

/// Finishes an export: logs and records a failure, returns the status code.
pub(crate) fn report(command: &'static str, result: FfiResult<()>) -> c_int {
    match result {
        Ok(()) => StatusCode::Success.code(),
        Err(err) => {
            let status = err.status();
            warn!(command, ?status, error = %err, "command failed");
            set_last_error(&err.to_string());
            status.code()
        }
    }
}

// =============================================================================
// Exports
// =============================================================================

/// Message of the last failure on the calling thread, or `""`.
///
/// The pointer is borrowed: it stays valid until the next failing call on
/// the same thread and must not be passed to `cs_free`.
#[no_mangle]
pub extern "C" fn cs_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ptr())
}

/// Owned copy of [`cs_last_error`]; release with `cs_free`.
///
/// Returns null if the copy cannot be allocated.
#[no_mangle]
pub extern "C" fn cs_last_error_copy() -> *mut c_char {
    LAST_ERROR.with(|slot| {
        let slot = slot.borrow();
        match slot.to_str() {
            Ok(message) => {
                marshal::into_c_string(message.to_string()).unwrap_or(std::ptr::null_mut())
            }
            Err(_) => std::ptr::null_mut(),
        }
    })
}

/// Releases a buffer returned by this library. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or a pointer obtained from `cs_get_version`,
/// `cs_catalog_get_json`, `cs_cart_get_lines_json` or `cs_last_error_copy`
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn cs_free(ptr: *mut c_void) {
    if ptr.is_null() {
        return;
    }
    drop(CString::from_raw(ptr.cast::<c_char>()));
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Marshalling
//!
//! Pointer helpers shared by every export. Nothing here touches the engine.
//!
//! ## Ownership Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Direction        C type           Rust side                            │
//! │  ─────────        ──────           ─────────                            │
//! │  in  (borrowed)   const char*      &str, valid for the call only        │
//! │  out (scalar)     long long*       written once on success              │
//! │  out (owned)      char**           CString::into_raw → cs_free          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ffi::{CStr, CString};
use std::ptr;

use cashsloth_core::CoreError;
use libc::c_char;

use crate::error::{FfiError, FfiResult};

/// Borrows a NUL-terminated UTF-8 string argument.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char, what: &'static str) -> FfiResult<&'a str> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer { what });
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| FfiError::InvalidUtf8 { what })
}

/// Borrows an output pointer.
///
/// # Safety
/// `ptr` must be null or valid for writes of `T`.
pub(crate) unsafe fn out_ref<'a, T>(ptr: *mut T, what: &'static str) -> FfiResult<&'a mut T> {
    ptr.as_mut().ok_or(FfiError::NullPointer { what })
}

/// Borrows a `char**` output and nulls it so a failed call never leaves a
/// stale pointer behind.
///
/// # Safety
/// Same as [`out_ref`].
pub(crate) unsafe fn out_buffer<'a>(
    ptr: *mut *mut c_char,
    what: &'static str,
) -> FfiResult<&'a mut *mut c_char> {
    let out = out_ref(ptr, what)?;
    *out = ptr::null_mut();
    Ok(out)
}

/// Hands `text` to the caller as an owned, NUL-terminated buffer.
///
/// Allocation is fallible: running out of memory reports
/// `AllocationFailure` instead of aborting.
pub(crate) fn into_c_string(text: String) -> FfiResult<*mut c_char> {
    let mut bytes = text.into_bytes();
    bytes
        .try_reserve_exact(1)
        .map_err(|_| CoreError::AllocationFailure { what: "output buffer" })?;

    let owned = CString::new(bytes).map_err(|e| CoreError::SerializationError {
        reason: format!("output contains NUL at byte {}", e.nul_position()),
    })?;
    Ok(owned.into_raw())
}

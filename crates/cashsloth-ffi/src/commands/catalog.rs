//! # Catalog Commands
//!
//! ```text
//!   cs_catalog_load_json("{\"items\":[...]}")   replace the whole catalog
//!   cs_catalog_get_json(&out)                   export in load schema
//! ```
//!
//! A rejected load leaves the previous catalog in place.

use libc::{c_char, c_int};
use tracing::{debug, info};

use crate::error::{report, FfiResult};
use crate::{marshal, state};

/// Replaces the catalog with the items described by `json`.
///
/// # Safety
/// `json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn cs_catalog_load_json(json: *const c_char) -> c_int {
    report("cs_catalog_load_json", load_json(json))
}

unsafe fn load_json(json: *const c_char) -> FfiResult<()> {
    let json = marshal::read_str(json, "json")?;
    debug!(bytes = json.len(), "cs_catalog_load_json");

    let items = state::with_engine_mut(|engine| engine.load_catalog_json(json))?;
    info!(items, "catalog loaded");
    Ok(())
}

/// Writes the current catalog to `*out_json` (release with `cs_free`).
///
/// # Safety
/// `out_json` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn cs_catalog_get_json(out_json: *mut *mut c_char) -> c_int {
    report("cs_catalog_get_json", get_json(out_json))
}

unsafe fn get_json(out_json: *mut *mut c_char) -> FfiResult<()> {
    let out = marshal::out_buffer(out_json, "out_json")?;
    debug!("cs_catalog_get_json");

    let json = state::with_engine(|engine| engine.catalog_json())?;
    *out = marshal::into_c_string(json)?;
    Ok(())
}

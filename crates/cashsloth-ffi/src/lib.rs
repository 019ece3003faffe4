//! # CashSloth C Boundary
//!
//! Stable C ABI over `cashsloth-core`. Hosts link against this library and
//! drive the engine through the functions declared in
//! `include/cashsloth_core.h`.
//!
//! ## Module Organization
//! ```text
//! cashsloth_ffi/
//! ├── lib.rs          ◄─── You are here (init, shutdown, version)
//! ├── error.rs        ◄─── Status codes, last error, cs_free
//! ├── marshal.rs      ◄─── C string / out-pointer helpers
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   ├── engine.rs   ◄─── The process-wide engine
//! │   └── config.rs   ◄─── Environment configuration
//! └── commands/
//!     ├── mod.rs      ◄─── Handle type
//!     ├── catalog.rs  ◄─── Catalog load / export
//!     ├── cart.rs     ◄─── Cart lifecycle and lines
//!     └── payment.rs  ◄─── Tender and change
//! ```
//!
//! ## Host Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cs_init()                                                              │
//! │  cs_catalog_load_json("{\"items\":[...]}")                              │
//! │  cs_cart_new(&cart)                                                     │
//! │    cs_cart_add_item_by_id(cart, "COFFEE", 1)                            │
//! │    cs_payment_set_given_cents(cart, 1500)                               │
//! │    cs_cart_get_lines_json(cart, &json) ... cs_free(json)                │
//! │  cs_cart_free(cart)                                                     │
//! │  cs_shutdown()                                                          │
//! │                                                                         │
//! │  Any non-zero status: cs_last_error() explains it.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
mod marshal;
pub mod state;

use libc::{c_char, c_int};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cashsloth_core::{EngineConfig, VERSION};
use error::{report, FfiResult};
use state::Installed;

pub use commands::CartHandle;
pub use error::{FfiError, StatusCode};

// =============================================================================
// Lifecycle
// =============================================================================

/// Initializes the engine using `CASHSLOTH_*` environment variables.
///
/// Calling it again while initialized is a no-op that keeps all state,
/// including the running config.
#[no_mangle]
pub extern "C" fn cs_init() -> c_int {
    init_tracing();
    report("cs_init", initialize(state::config_from_env()))
}

/// Initializes the engine with an explicit JSON config, e.g.
/// `{"change_policy":"clamp_to_zero","max_line_quantity":99}`.
///
/// On a running engine the requested config is ignored (with a warning when
/// it differs from the running one).
///
/// # Safety
/// `config_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn cs_init_with_config_json(config_json: *const c_char) -> c_int {
    init_tracing();
    report("cs_init_with_config_json", init_with_json(config_json))
}

unsafe fn init_with_json(config_json: *const c_char) -> FfiResult<()> {
    let json = marshal::read_str(config_json, "config_json")?;
    let config = EngineConfig::from_json(json)?;
    initialize(config)
}

fn initialize(config: EngineConfig) -> FfiResult<()> {
    match state::install(config.clone())? {
        Installed::Started => info!(
            version = VERSION,
            change_policy = ?config.change_policy,
            max_line_quantity = ?config.max_line_quantity,
            "engine initialized"
        ),
        Installed::AlreadyRunning { config: running } if running != config => warn!(
            running = ?running,
            requested = ?config,
            "engine already initialized; requested config ignored"
        ),
        Installed::AlreadyRunning { .. } => debug!("engine already initialized"),
    }
    Ok(())
}

/// Drops the catalog and every cart. Safe to call when not initialized.
#[no_mangle]
pub extern "C" fn cs_shutdown() {
    if let Some(mut engine) = state::take() {
        let carts = engine.cart_count();
        engine.reset();
        info!(released_carts = carts, "engine shut down");
    }
}

// =============================================================================
// Version
// =============================================================================

#[derive(Serialize)]
struct VersionInfo {
    version: &'static str,
}

/// Writes `{"version":"x.y.z"}` to `*out_json` (release with `cs_free`).
/// Works without `cs_init`.
///
/// # Safety
/// `out_json` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn cs_get_version(out_json: *mut *mut c_char) -> c_int {
    report("cs_get_version", version_json(out_json))
}

unsafe fn version_json(out_json: *mut *mut c_char) -> FfiResult<()> {
    let out = marshal::out_buffer(out_json, "out_json")?;
    let json = serde_json::to_string(&VersionInfo { version: VERSION }).map_err(|e| {
        cashsloth_core::CoreError::SerializationError {
            reason: e.to_string(),
        }
    })?;
    *out = marshal::into_c_string(json)?;
    Ok(())
}

// =============================================================================
// Logging
// =============================================================================

/// Installs a formatting subscriber when `CASHSLOTH_LOG` is set.
///
/// ## Log Levels
/// - `CASHSLOTH_LOG=debug` - Every command with its arguments
/// - `CASHSLOTH_LOG=cashsloth_ffi=warn` - Failures only
/// - Unset: nothing is installed; a host subscriber still sees events
fn init_tracing() {
    let Some(directives) = state::log_filter_from_env() else {
        return;
    };
    let filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new("cashsloth_ffi=info"));

    // A host that already installed a global subscriber keeps it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

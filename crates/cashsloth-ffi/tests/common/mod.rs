//! Helpers shared by the contract tests. They call the exported functions
//! exactly as a C host would.

#![allow(dead_code)]

use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cashsloth_ffi::commands::cart::{
    cs_cart_get_lines_json, cs_cart_get_total_cents, cs_cart_new,
};
use cashsloth_ffi::commands::catalog::cs_catalog_load_json;
use cashsloth_ffi::commands::payment::{cs_payment_get_change_cents, cs_payment_get_given_cents};
use cashsloth_ffi::error::{cs_free, cs_last_error};
use cashsloth_ffi::{cs_init, cs_init_with_config_json, cs_shutdown, CartHandle, StatusCode};
use libc::c_char;

pub const COFFEE_TEA: &str = r#"{"items":[
    {"id":"COFFEE","name":"Coffee","unit_cents":500},
    {"id":"TEA","name":"Tea","unit_cents":400}
]}"#;

pub const OK: i32 = StatusCode::Success.code();

static ENGINE_LOCK: Mutex<()> = Mutex::new(());

/// Serializes access to the process-wide engine and starts from a clean one.
pub fn fresh_engine() -> MutexGuard<'static, ()> {
    let guard = ENGINE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    cs_shutdown();
    assert_eq!(cs_init(), OK, "cs_init: {}", last_error());
    guard
}

/// Same as [`fresh_engine`] with an explicit JSON config.
pub fn fresh_engine_with(config_json: &str) -> MutexGuard<'static, ()> {
    let guard = ENGINE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    cs_shutdown();
    let json = cstr(config_json);
    let rc = unsafe { cs_init_with_config_json(json.as_ptr()) };
    assert_eq!(rc, OK, "cs_init_with_config_json: {}", last_error());
    guard
}

/// Serializes access without initializing.
pub fn shut_down_engine() -> MutexGuard<'static, ()> {
    let guard = ENGINE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    cs_shutdown();
    guard
}

pub fn cstr(text: &str) -> CString {
    CString::new(text).unwrap()
}

pub fn last_error() -> String {
    unsafe { CStr::from_ptr(cs_last_error()) }
        .to_string_lossy()
        .into_owned()
}

/// Copies an owned buffer and releases it.
pub fn take_string(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null());
    let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
    unsafe { cs_free(ptr.cast()) };
    text
}

pub fn load_catalog(json: &str) -> i32 {
    let json = cstr(json);
    unsafe { cs_catalog_load_json(json.as_ptr()) }
}

pub fn new_cart() -> CartHandle {
    let mut cart: CartHandle = 0;
    assert_eq!(unsafe { cs_cart_new(&mut cart) }, OK, "cs_cart_new: {}", last_error());
    assert_ne!(cart, 0);
    cart
}

pub fn add_item(cart: CartHandle, item_id: &str, qty: i32) -> i32 {
    let item_id = cstr(item_id);
    unsafe { cashsloth_ffi::commands::cart::cs_cart_add_item_by_id(cart, item_id.as_ptr(), qty) }
}

pub fn snapshot(cart: CartHandle) -> serde_json::Value {
    let mut json: *mut c_char = ptr::null_mut();
    let rc = unsafe { cs_cart_get_lines_json(cart, &mut json) };
    assert_eq!(rc, OK, "cs_cart_get_lines_json: {}", last_error());
    serde_json::from_str(&take_string(json)).unwrap()
}

pub fn total(cart: CartHandle) -> i64 {
    let mut out = 0;
    assert_eq!(unsafe { cs_cart_get_total_cents(cart, &mut out) }, OK);
    out
}

pub fn given(cart: CartHandle) -> i64 {
    let mut out = 0;
    assert_eq!(unsafe { cs_payment_get_given_cents(cart, &mut out) }, OK);
    out
}

pub fn change(cart: CartHandle) -> i64 {
    let mut out = 0;
    assert_eq!(unsafe { cs_payment_get_change_cents(cart, &mut out) }, OK);
    out
}

/// Checks that the snapshot agrees with itself and with the scalar queries.
pub fn assert_consistent(cart: CartHandle) {
    let snap = snapshot(cart);
    let lines_total: i64 = snap["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["line_total_cents"].as_i64().unwrap())
        .sum();

    assert_eq!(snap["total_cents"].as_i64().unwrap(), lines_total);
    assert_eq!(snap["total_cents"].as_i64().unwrap(), total(cart));
    assert_eq!(snap["given_cents"].as_i64().unwrap(), given(cart));
    assert_eq!(snap["change_cents"].as_i64().unwrap(), change(cart));
}

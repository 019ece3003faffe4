//! Catalog load and export across the C boundary.

mod common;

use std::ptr;

use cashsloth_ffi::commands::catalog::{cs_catalog_get_json, cs_catalog_load_json};
use cashsloth_ffi::StatusCode;
use common::*;

fn catalog_json() -> String {
    let mut json = ptr::null_mut();
    assert_eq!(unsafe { cs_catalog_get_json(&mut json) }, OK, "{}", last_error());
    take_string(json)
}

#[test]
fn test_load_then_export() {
    let _engine = fresh_engine();
    assert_eq!(load_catalog(COFFEE_TEA), OK);

    let exported: serde_json::Value = serde_json::from_str(&catalog_json()).unwrap();
    let items = exported["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "COFFEE");
    assert_eq!(items[0]["name"], "Coffee");
    assert_eq!(items[0]["unit_cents"], 500);
    assert_eq!(items[1]["id"], "TEA");
}

#[test]
fn test_export_without_catalog_is_empty() {
    let _engine = fresh_engine();
    assert_eq!(catalog_json(), r#"{"items":[]}"#);
}

#[test]
fn test_malformed_catalogs() {
    let _engine = fresh_engine();

    for json in [
        "",
        "not json",
        r#"{"items":"COFFEE"}"#,
        r#"{"items":[{"name":"Coffee","unit_cents":500}]}"#,
        r#"{"items":[{"id":"COFFEE","name":"Coffee","unit_cents":"500"}]}"#,
    ] {
        assert_eq!(load_catalog(json), StatusCode::MalformedInput.code(), "{json}");
        assert!(!last_error().is_empty());
    }
}

#[test]
fn test_invalid_items() {
    let _engine = fresh_engine();

    for json in [
        r#"{"items":[{"id":"","name":"Blank","unit_cents":100}]}"#,
        r#"{"items":[{"id":"COFFEE","unit_cents":500}]}"#,
        r#"{"items":[{"id":"COFFEE","name":"Coffee","unit_cents":-500}]}"#,
        r#"{"items":[
            {"id":"COFFEE","name":"Coffee","unit_cents":500},
            {"id":"COFFEE","name":"Decaf","unit_cents":450}
        ]}"#,
    ] {
        assert_eq!(load_catalog(json), StatusCode::InvalidItem.code(), "{json}");
    }
}

#[test]
fn test_whitespace_ids_and_names_are_kept_verbatim() {
    let _engine = fresh_engine();
    assert_eq!(
        load_catalog(
            r#"{"items":[
                {"id":"  ","name":" ","unit_cents":100},
                {"id":" TEA ","name":"Tea","unit_cents":400}
            ]}"#
        ),
        OK,
        "{}",
        last_error()
    );

    let cart = new_cart();
    assert_eq!(add_item(cart, "  ", 1), OK);
    assert_eq!(add_item(cart, " TEA ", 1), OK);
    assert_eq!(add_item(cart, "TEA", 1), StatusCode::ItemNotFound.code());

    let snap = snapshot(cart);
    assert_eq!(snap["lines"][0]["id"], "  ");
    assert_eq!(snap["lines"][0]["name"], " ");
    assert_eq!(snap["total_cents"], 500);
}

#[test]
fn test_failed_load_keeps_previous_catalog() {
    let _engine = fresh_engine();
    assert_eq!(load_catalog(COFFEE_TEA), OK);
    let before = catalog_json();

    assert_ne!(load_catalog("{broken"), OK);
    assert_ne!(
        load_catalog(
            r#"{"items":[
                {"id":"X","name":"X","unit_cents":1},
                {"id":"Y","name":"","unit_cents":1}
            ]}"#
        ),
        OK
    );

    assert_eq!(catalog_json(), before);
    let cart = new_cart();
    assert_eq!(add_item(cart, "COFFEE", 1), OK);
    assert_eq!(add_item(cart, "X", 1), StatusCode::ItemNotFound.code());
}

#[test]
fn test_reload_keeps_cart_lines() {
    let _engine = fresh_engine();
    assert_eq!(load_catalog(COFFEE_TEA), OK);
    let cart = new_cart();
    assert_eq!(add_item(cart, "COFFEE", 1), OK);

    assert_eq!(
        load_catalog(r#"{"items":[{"id":"TEA","name":"Green Tea","unit_cents":400}]}"#),
        OK
    );

    assert_eq!(add_item(cart, "TEA", 1), OK);
    assert_eq!(add_item(cart, "COFFEE", 1), StatusCode::ItemNotFound.code());

    let snap = snapshot(cart);
    assert_eq!(snap["lines"][0]["name"], "Coffee");
    assert_eq!(snap["lines"][1]["name"], "Green Tea");
    assert_eq!(snap["total_cents"], 900);
}

#[test]
fn test_null_arguments() {
    let _engine = fresh_engine();
    let invalid = StatusCode::InvalidArgument.code();

    assert_eq!(unsafe { cs_catalog_load_json(ptr::null()) }, invalid);
    assert_eq!(unsafe { cs_catalog_get_json(ptr::null_mut()) }, invalid);
}

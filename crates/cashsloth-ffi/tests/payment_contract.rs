//! Tender and change across the C boundary, including the change policies.

mod common;

use std::ptr;

use cashsloth_ffi::commands::payment::{
    cs_payment_get_change_cents, cs_payment_get_given_cents, cs_payment_set_given_cents,
};
use cashsloth_ffi::StatusCode;
use common::*;

#[test]
fn test_change_is_given_minus_total() {
    let _engine = fresh_engine();
    assert_eq!(load_catalog(COFFEE_TEA), OK);
    let cart = new_cart();
    assert_eq!(add_item(cart, "COFFEE", 2), OK);

    for given_cents in [0, 1, 999, 1000, 1001, 5000, i64::MAX] {
        assert_eq!(cs_payment_set_given_cents(cart, given_cents), OK);
        assert_eq!(given(cart), given_cents);
        assert_eq!(change(cart), given_cents - 1000);
        assert_consistent(cart);
    }
}

#[test]
fn test_tender_is_absolute() {
    let _engine = fresh_engine();
    let cart = new_cart();

    assert_eq!(cs_payment_set_given_cents(cart, 1000), OK);
    assert_eq!(cs_payment_set_given_cents(cart, 500), OK);
    assert_eq!(given(cart), 500);
}

#[test]
fn test_negative_tender_rejected() {
    let _engine = fresh_engine();
    let cart = new_cart();
    assert_eq!(cs_payment_set_given_cents(cart, 700), OK);

    for given_cents in [-1, i64::MIN] {
        assert_eq!(
            cs_payment_set_given_cents(cart, given_cents),
            StatusCode::InvalidAmount.code()
        );
    }
    assert_eq!(given(cart), 700);
}

#[test]
fn test_change_updates_with_cart() {
    let _engine = fresh_engine();
    assert_eq!(load_catalog(COFFEE_TEA), OK);
    let cart = new_cart();
    assert_eq!(cs_payment_set_given_cents(cart, 1000), OK);

    assert_eq!(add_item(cart, "TEA", 3), OK);
    assert_eq!(change(cart), -200);
    assert_eq!(snapshot(cart)["change_cents"], -200);

    assert_eq!(cashsloth_ffi::commands::cart::cs_cart_remove_line(cart, 0), OK);
    assert_eq!(change(cart), 1000);
}

#[test]
fn test_clamp_policy() {
    let _engine = fresh_engine_with(r#"{"change_policy":"clamp_to_zero"}"#);
    assert_eq!(load_catalog(COFFEE_TEA), OK);
    let cart = new_cart();
    assert_eq!(add_item(cart, "COFFEE", 2), OK);

    assert_eq!(cs_payment_set_given_cents(cart, 400), OK);
    assert_eq!(change(cart), 0);
    assert_eq!(snapshot(cart)["change_cents"], 0);

    assert_eq!(cs_payment_set_given_cents(cart, 1250), OK);
    assert_eq!(change(cart), 250);
}

#[test]
fn test_reject_insufficient_policy() {
    let _engine = fresh_engine_with(r#"{"change_policy":"reject_insufficient"}"#);
    assert_eq!(load_catalog(COFFEE_TEA), OK);
    let cart = new_cart();
    assert_eq!(add_item(cart, "COFFEE", 2), OK);

    assert_eq!(
        cs_payment_set_given_cents(cart, 999),
        StatusCode::InvalidAmount.code()
    );
    assert_eq!(given(cart), 0);

    assert_eq!(cs_payment_set_given_cents(cart, 1000), OK);
    assert_eq!(change(cart), 0);
}

#[test]
fn test_max_line_quantity() {
    let _engine = fresh_engine_with(r#"{"max_line_quantity":5}"#);
    assert_eq!(load_catalog(COFFEE_TEA), OK);
    let cart = new_cart();

    assert_eq!(add_item(cart, "TEA", 5), OK);
    assert_eq!(add_item(cart, "TEA", 1), StatusCode::InvalidQuantity.code());
    assert_eq!(add_item(cart, "COFFEE", 6), StatusCode::InvalidQuantity.code());
    assert_eq!(total(cart), 2000);
}

#[test]
fn test_null_arguments() {
    let _engine = fresh_engine();
    let cart = new_cart();
    let invalid = StatusCode::InvalidArgument.code();

    assert_eq!(unsafe { cs_payment_get_given_cents(cart, ptr::null_mut()) }, invalid);
    assert_eq!(unsafe { cs_payment_get_change_cents(cart, ptr::null_mut()) }, invalid);
}

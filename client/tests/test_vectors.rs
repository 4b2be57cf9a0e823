//! Validation behavior pinned against JSON test vectors in `test-vectors/`.
//!
//! Each vector carries a request value and either `null` (valid) or the
//! exact aggregated error message. Pinning whole messages keeps both the
//! per-field texts and the field ordering from drifting.

use gofo_client::{CancelOrderRequest, CreateOrderRequest, Error};
use serde_json::Value;

fn expect_outcome(result: Result<(), Error>, case: &Value) {
    let name = case["name"].as_str().unwrap();
    match case["expected_error"].as_str() {
        None => assert!(result.is_ok(), "{name}: expected valid, got {result:?}"),
        Some(expected) => match result {
            Err(Error::Validation(message)) => assert_eq!(message, expected, "{name}"),
            other => panic!("{name}: expected validation error, got {other:?}"),
        },
    }
}

#[test]
fn create_order_validation_vectors() {
    let raw = include_str!("../../test-vectors/validation.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["create"].as_array().unwrap() {
        let request: CreateOrderRequest = serde_json::from_value(case["request"].clone()).unwrap();
        expect_outcome(request.validate(), case);
    }
}

#[test]
fn cancel_order_validation_vectors() {
    let raw = include_str!("../../test-vectors/validation.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cancel"].as_array().unwrap() {
        let request: CancelOrderRequest = serde_json::from_value(case["request"].clone()).unwrap();
        expect_outcome(request.validate(), case);
    }
}

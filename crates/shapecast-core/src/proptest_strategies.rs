//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! but valid raw values and declared types for property testing.

#![cfg(test)]

use crate::types::TypeDesc;
use crate::value::{Map, Value};
use proptest::collection::vec;
use proptest::prelude::*;

/// Strategy for generating scalar declared types
pub fn scalar_type_strategy() -> impl Strategy<Value = TypeDesc> {
    prop_oneof![
        Just(TypeDesc::bool()),
        Just(TypeDesc::int()),
        Just(TypeDesc::float()),
        Just(TypeDesc::str()),
        Just(TypeDesc::Any),
    ]
}

/// Strategy for generating scalar raw values
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::Str),
    ]
}

/// Strategy for generating flat raw input maps with identifier-like keys
pub fn raw_input_strategy() -> impl Strategy<Value = Map> {
    vec(("[a-z][a-z0-9_]{0,10}", scalar_value_strategy()), 0..8)
        .prop_map(|entries| entries.into_iter().collect::<Map>())
}

//! Built-in transforms for common conversions
//!
//! Each function returns a shareable [`TransformFn`] ready to be registered in
//! a [`TransformTable`](super::TransformTable), e.g. to accept numeric strings
//! for `int` fields or to turn a JSON array into a tuple.
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use super::transform::TransformFn;
use crate::value::{Set, Value};
use crate::{Error, Result};
use std::sync::Arc;

fn conversion_error(value: &Value, expected: &str) -> Error {
    Error::InvalidValue {
        path: String::new(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

/// Render scalars as strings; strings pass through
pub fn to_str() -> TransformFn {
    Arc::new(|value: &Value| -> Result<Value> {
        Ok(match value {
            Value::Str(_) => value.clone(),
            Value::Null => Value::from("null"),
            Value::Bool(b) => Value::from(b.to_string()),
            Value::Int(i) => Value::from(i.to_string()),
            Value::Float(x) => Value::from(format!("{:?}", x)),
            Value::Enum(e) => Value::from(e.member.clone()),
            other => Value::from(other.to_string()),
        })
    })
}

/// Parse numeric strings and truncate floats into ints
pub fn to_int() -> TransformFn {
    Arc::new(|value: &Value| match value {
        Value::Int(_) => Ok(value.clone()),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        // `as` saturates, so anything outside the i64 range is rejected first.
        Value::Float(x) if (i64::MIN as f64..i64::MAX as f64).contains(&x.trunc()) => {
            Ok(Value::Int(x.trunc() as i64))
        }
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| conversion_error(value, "int")),
        _ => Err(conversion_error(value, "int")),
    })
}

/// Parse numeric strings and widen ints into floats
pub fn to_float() -> TransformFn {
    Arc::new(|value: &Value| match value {
        Value::Float(_) => Ok(value.clone()),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| conversion_error(value, "float")),
        _ => Err(conversion_error(value, "float")),
    })
}

/// Accept the usual textual and numeric spellings of booleans
pub fn to_bool() -> TransformFn {
    Arc::new(|value: &Value| match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::Int(i) => Ok(Value::Bool(*i != 0)),
        Value::Str(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "0" | "off" => Ok(Value::Bool(false)),
            _ => Err(conversion_error(value, "bool")),
        },
        _ => Err(conversion_error(value, "bool")),
    })
}

/// Upper-case strings; other values pass through
pub fn uppercase() -> TransformFn {
    Arc::new(|value: &Value| -> Result<Value> {
        Ok(match value {
            Value::Str(s) => Value::Str(s.to_uppercase()),
            other => other.clone(),
        })
    })
}

/// Lower-case strings; other values pass through
pub fn lowercase() -> TransformFn {
    Arc::new(|value: &Value| -> Result<Value> {
        Ok(match value {
            Value::Str(s) => Value::Str(s.to_lowercase()),
            other => other.clone(),
        })
    })
}

/// Turn any sequence-like value into a tuple
pub fn to_tuple() -> TransformFn {
    Arc::new(|value: &Value| -> Result<Value> {
        value
            .as_items()
            .map(|items| Value::Tuple(items.to_vec()))
            .ok_or_else(|| conversion_error(value, "tuple"))
    })
}

/// Turn any sequence-like value into a list
pub fn to_list() -> TransformFn {
    Arc::new(|value: &Value| -> Result<Value> {
        value
            .as_items()
            .map(|items| Value::List(items.to_vec()))
            .ok_or_else(|| conversion_error(value, "list"))
    })
}

/// Turn any sequence-like value into a set, dropping duplicates
pub fn to_set() -> TransformFn {
    Arc::new(|value: &Value| -> Result<Value> {
        value
            .as_items()
            .map(|items| Value::Set(items.iter().cloned().collect::<Set>()))
            .ok_or_else(|| conversion_error(value, "set"))
    })
}

/// Apply `transform` and log, rather than fail, when it errors
///
/// The original value is kept on failure.
pub fn lenient(transform: TransformFn) -> TransformFn {
    Arc::new(move |value: &Value| -> Result<Value> {
        match transform(value) {
            Ok(converted) => Ok(converted),
            Err(e) => {
                log::warn!("Lenient transform kept original value {}: {}", value, e);
                Ok(value.clone())
            }
        }
    })
}

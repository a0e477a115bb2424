//! Source bindings: where a field's raw value comes from
//!
//! By default a field reads the raw input key carrying its own name. A
//! [`SourceBinding`] overrides that, either by naming a different key or by
//! combining several keys into a tuple.
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use crate::value::{Map, Value};
use crate::{Error, Result};
use std::fmt;

/// Override of a field's source key(s)
///
/// Build bindings with [`SourceBinding::single`] and
/// [`SourceBinding::composite`]; the latter enforces that at least one key
/// is named.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceBinding {
    /// Read the value stored under one key
    Single(String),
    /// Read several keys, in order, into a tuple
    Composite(Vec<String>),
}

impl SourceBinding {
    /// Bind a field to a differently-named source key
    pub fn single(key: impl Into<String>) -> Self {
        SourceBinding::Single(key.into())
    }

    /// Bind a field to a tuple of source keys
    pub fn composite<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(Error::shape("composite source binding needs at least one key"));
        }
        Ok(SourceBinding::Composite(keys))
    }

    /// Keys this binding reads, in declaration order
    pub fn source_keys(&self) -> Vec<&str> {
        match self {
            SourceBinding::Single(key) => vec![key.as_str()],
            SourceBinding::Composite(keys) => keys.iter().map(String::as_str).collect(),
        }
    }

    /// Pull the bound value out of the raw input
    pub fn rewrite(&self, data: &Map) -> Result<Value> {
        match self {
            SourceBinding::Single(key) => lookup(data, key),
            SourceBinding::Composite(keys) => keys
                .iter()
                .map(|key| lookup(data, key))
                .collect::<Result<Vec<_>>>()
                .map(Value::Tuple),
        }
    }
}

/// Value stored under `key`, or a missing-key error
pub(crate) fn lookup(data: &Map, key: &str) -> Result<Value> {
    data.get_str(key).cloned().ok_or_else(|| Error::MissingKey {
        path: String::new(),
        key: key.to_string(),
    })
}

impl fmt::Display for SourceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceBinding::Single(key) => write!(f, "from {:?}", key),
            SourceBinding::Composite(keys) => write!(f, "composite {:?}", keys),
        }
    }
}

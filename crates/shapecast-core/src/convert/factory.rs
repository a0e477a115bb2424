//! Record factories: what a conversion finally produces
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use crate::schema::RecordSchema;
use crate::value::{Record, Value};
use crate::Result;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

/// Assembles the output of a conversion from converted field values
///
/// Fields arrive in declaration order, already transformed, built and type
/// checked. Nested records are always assembled as [`Record`] values; the
/// factory only decides the shape of the top-level output.
pub trait RecordFactory {
    type Output;

    fn build(&self, schema: &RecordSchema, fields: Vec<(String, Value)>) -> Result<Self::Output>;
}

/// Produces dynamic [`Record`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder;

impl RecordFactory for RecordBuilder {
    type Output = Record;

    fn build(&self, schema: &RecordSchema, fields: Vec<(String, Value)>) -> Result<Record> {
        Ok(Record::new(schema.name(), fields))
    }
}

/// Produces any `serde` deserializable type by way of a JSON document
pub struct SerdeFactory<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeFactory<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for SerdeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeFactory<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> RecordFactory for SerdeFactory<T> {
    type Output = T;

    fn build(&self, schema: &RecordSchema, fields: Vec<(String, Value)>) -> Result<T> {
        let record = Value::Record(Record::new(schema.name(), fields));
        let document = serde_json::to_value(&record)?;
        Ok(serde_json::from_value(document)?)
    }
}

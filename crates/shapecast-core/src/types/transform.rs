//! Type-directed value transformation
//!
//! [`transform_value`] walks a declared type and a raw value side by side,
//! applying the caller's [`TransformTable`] wherever a declared type has a
//! registered function. Lookups are exact: a function registered for
//! `list[int]` applies to the whole list and stops the walk, a function
//! registered for `int` applies to each item of a `list[int]` that has no
//! list-level function.
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use super::descriptor::{Origin, TypeDesc};
use super::predicates::{extract_optional, type_arg};
use crate::value::{Map, Set, Value};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// A conversion applied to raw values of one declared type
pub type TransformFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Mapping from declared type to conversion function
///
/// Built once, before any conversion, and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct TransformTable {
    entries: Vec<(TypeDesc, TransformFn)>,
}

impl TransformTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transform, builder style
    pub fn with<F>(mut self, ty: TypeDesc, transform: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(ty, transform);
        self
    }

    /// Add a shared transform, builder style
    pub fn with_arc(mut self, ty: TypeDesc, transform: TransformFn) -> Self {
        self.insert_arc(ty, transform);
        self
    }

    /// Register a transform, replacing any function already registered for `ty`
    pub fn insert<F>(&mut self, ty: TypeDesc, transform: F)
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert_arc(ty, Arc::new(transform));
    }

    /// Register a shared transform
    pub fn insert_arc(&mut self, ty: TypeDesc, transform: TransformFn) {
        if let Some(slot) = self.entries.iter_mut().find(|(t, _)| *t == ty) {
            slot.1 = transform;
        } else {
            self.entries.push((ty, transform));
        }
    }

    /// The transform registered for exactly `ty`
    pub fn get(&self, ty: &TypeDesc) -> Option<&TransformFn> {
        self.entries.iter().find(|(t, _)| t == ty).map(|(_, f)| f)
    }

    pub fn contains(&self, ty: &TypeDesc) -> bool {
        self.get(ty).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared types with a registered transform, in registration order
    pub fn types(&self) -> impl Iterator<Item = &TypeDesc> {
        self.entries.iter().map(|(t, _)| t)
    }
}

impl fmt::Debug for TransformTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.entries.iter().map(|(t, _)| t.to_string()))
            .finish()
    }
}

/// Convert `value` into the representation expected by `ty`
///
/// Resolution order:
/// 1. optionals: a function registered for the optional itself wins, even for
///    `null`; otherwise `null` passes through and anything else recurses into
///    the non-absence alternative
/// 2. an exact table match is applied to the whole value
/// 3. new types and annotated types recurse into their base type
/// 4. generic collections rebuild the container with each item transformed,
///    provided the value already has the container's shape
/// 5. enums resolve the member whose declared value equals `value`, and
///    literals require `value` to be one of their allowed values
/// 6. anything else is returned unchanged
pub fn transform_value(transforms: &TransformTable, ty: &TypeDesc, value: Value) -> Result<Value> {
    if let Ok(inner) = extract_optional(ty) {
        if let Some(transform) = transforms.get(ty) {
            log::trace!("applying transform registered for optional {}", ty);
            return transform(&value);
        }
        if value.is_null() {
            return Ok(value);
        }
        return transform_value(transforms, inner, value);
    }

    if let Some(transform) = transforms.get(ty) {
        log::trace!("applying transform registered for {}", ty);
        return transform(&value);
    }

    match ty {
        TypeDesc::NewType(nt) => transform_value(transforms, &nt.base, value),
        TypeDesc::Annotated { base, .. } => transform_value(transforms, base, value),
        TypeDesc::Generic { origin, args } if origin.is_container() && origin.accepts(&value) => {
            transform_collection(transforms, origin, args, value)
        }
        TypeDesc::Enum(enum_type) => {
            if matches!(&value, Value::Enum(m) if m.enum_name == enum_type.name) {
                return Ok(value);
            }
            enum_type
                .value_of(&value)
                .map(Value::Enum)
                .ok_or_else(|| Error::InvalidValue {
                    path: String::new(),
                    value: value.to_string(),
                    expected: enum_type.name.clone(),
                })
        }
        TypeDesc::Literal(allowed) => {
            if allowed.contains(&value) {
                Ok(value)
            } else {
                Err(Error::InvalidValue {
                    path: String::new(),
                    value: value.to_string(),
                    expected: ty.to_string(),
                })
            }
        }
        _ => Ok(value),
    }
}

fn transform_collection(
    transforms: &TransformTable,
    origin: &Origin,
    args: &[TypeDesc],
    value: Value,
) -> Result<Value> {
    match value {
        Value::Map(map) => {
            let key_type = type_arg(args, 0);
            let value_type = type_arg(args, 1);
            let mut out = Map::new();
            for (k, v) in map {
                out.insert(
                    transform_value(transforms, key_type, k)?,
                    transform_value(transforms, value_type, v)?,
                );
            }
            Ok(Value::Map(out))
        }
        Value::Tuple(items) if *origin == Origin::Tuple && args.len() > 1 => {
            if items.len() != args.len() {
                return Ok(Value::Tuple(items));
            }
            items
                .into_iter()
                .zip(args)
                .map(|(item, t)| transform_value(transforms, t, item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Tuple)
        }
        Value::List(items) => transform_items(transforms, type_arg(args, 0), items).map(Value::List),
        Value::Tuple(items) => transform_items(transforms, type_arg(args, 0), items).map(Value::Tuple),
        Value::Set(set) => {
            let item_type = type_arg(args, 0);
            set.into_iter()
                .map(|item| transform_value(transforms, item_type, item))
                .collect::<Result<Set>>()
                .map(Value::Set)
        }
        other => Ok(other),
    }
}

fn transform_items(transforms: &TransformTable, item_type: &TypeDesc, items: Vec<Value>) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| transform_value(transforms, item_type, item))
        .collect()
}

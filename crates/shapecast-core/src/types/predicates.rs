//! Type classification predicates and structural matching
//!
//! Every predicate here is total: descriptors the engine does not understand
//! answer `false` instead of failing. Only the `extract_*` helpers return
//! errors, and only when called on a descriptor of the wrong shape.
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use super::descriptor::{Annotation, Origin, TypeDesc};
use crate::value::Value;
use crate::{Error, Result};

static ANY: TypeDesc = TypeDesc::Any;

/// Type argument `index`, defaulting to `Any` when it was not given
pub(crate) fn type_arg(args: &[TypeDesc], index: usize) -> &TypeDesc {
    args.get(index).unwrap_or(&ANY)
}

/// True iff `ty` is a union of alternatives (optionals included)
pub fn is_union(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::Union(_))
}

/// True iff `ty` is a union of exactly two alternatives, one of them `NoneType`
pub fn is_optional(ty: &TypeDesc) -> bool {
    optional_inner(ty).is_some()
}

fn optional_inner(ty: &TypeDesc) -> Option<&TypeDesc> {
    match ty {
        TypeDesc::Union(alternatives) if alternatives.len() == 2 => {
            match (&alternatives[0], &alternatives[1]) {
                (TypeDesc::NoneType, TypeDesc::NoneType) => None,
                (TypeDesc::NoneType, other) | (other, TypeDesc::NoneType) => Some(other),
                _ => None,
            }
        }
        _ => None,
    }
}

/// The non-absence alternative of an optional
pub fn extract_optional(ty: &TypeDesc) -> Result<&TypeDesc> {
    optional_inner(ty).ok_or_else(|| Error::shape_of("type is not an optional", ty.to_string()))
}

/// True iff `ty` is a union or a parameterized generic
pub fn is_generic(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::Union(_) | TypeDesc::Generic { .. })
}

/// True iff `ty` is a parameterized generic over a container origin
pub fn is_generic_collection(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::Generic { origin, .. } if origin.is_container())
}

/// The runtime container of a generic collection
pub fn extract_origin_collection(ty: &TypeDesc) -> Result<&Origin> {
    match ty {
        TypeDesc::Generic { origin, .. } if origin.is_container() => Ok(origin),
        _ => Err(Error::shape_of("type is not a generic collection", ty.to_string())),
    }
}

/// The ordered type parameters of a generic or union; empty for anything else
pub fn extract_generic(ty: &TypeDesc) -> &[TypeDesc] {
    match ty {
        TypeDesc::Generic { args, .. } => args,
        TypeDesc::Union(alternatives) => alternatives,
        _ => &[],
    }
}

pub fn is_new_type(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::NewType(_))
}

/// The base type behind a new-type alias
pub fn extract_new_type(ty: &TypeDesc) -> Result<&TypeDesc> {
    match ty {
        TypeDesc::NewType(nt) => Ok(&nt.base),
        _ => Err(Error::shape_of("type is not a new type", ty.to_string())),
    }
}

pub fn is_enum(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::Enum(_))
}

pub fn is_literal(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::Literal(_))
}

pub fn is_record(ty: &TypeDesc) -> bool {
    matches!(strip_annotations(ty), TypeDesc::Record(_))
}

pub fn is_annotated(ty: &TypeDesc) -> bool {
    matches!(ty, TypeDesc::Annotated { .. })
}

/// True iff `ty` is annotated with at least one source binding
pub fn has_source_annotation(ty: &TypeDesc) -> bool {
    match ty {
        TypeDesc::Annotated { metadata, .. } => metadata
            .iter()
            .any(|a| matches!(a, Annotation::Source(_))),
        _ => false,
    }
}

/// Peel every annotation layer off `ty`
pub fn strip_annotations(ty: &TypeDesc) -> &TypeDesc {
    let mut current = ty;
    while let TypeDesc::Annotated { base, .. } = current {
        current = base;
    }
    current
}

/// Structural conformance of `value` to `ty`
pub fn is_instance(value: &Value, ty: &TypeDesc) -> bool {
    match ty {
        TypeDesc::Any => true,
        TypeDesc::NoneType => value.is_null(),
        TypeDesc::Primitive(p) => p.matches(value),
        TypeDesc::Union(alternatives) => alternatives.iter().any(|alt| is_instance(value, alt)),
        TypeDesc::Collection(origin) => origin.accepts(value),
        TypeDesc::Generic { origin, args } => is_instance_of_generic(value, origin, args),
        TypeDesc::Enum(e) => matches!(value, Value::Enum(m) if m.enum_name == e.name),
        TypeDesc::NewType(nt) => is_instance(value, &nt.base),
        TypeDesc::Literal(values) => values.contains(value),
        TypeDesc::Record(schema) => matches!(value, Value::Record(r) if r.name == schema.name()),
        TypeDesc::Annotated { base, .. } => is_instance(value, base),
    }
}

fn is_instance_of_generic(value: &Value, origin: &Origin, args: &[TypeDesc]) -> bool {
    // Also rejects user generic classes: matching their parameters is undecidable.
    if !origin.accepts(value) {
        return false;
    }
    match value {
        Value::Map(map) => {
            let key_type = type_arg(args, 0);
            let value_type = type_arg(args, 1);
            map.iter()
                .all(|(k, v)| is_instance(k, key_type) && is_instance(v, value_type))
        }
        Value::Tuple(items) if *origin == Origin::Tuple && args.len() > 1 => {
            items.len() == args.len()
                && items.iter().zip(args).all(|(item, t)| is_instance(item, t))
        }
        _ => {
            let item_type = type_arg(args, 0);
            value
                .as_items()
                .is_some_and(|items| items.iter().all(|item| is_instance(item, item_type)))
        }
    }
}

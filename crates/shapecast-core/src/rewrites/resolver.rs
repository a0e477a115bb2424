//! Resolution of a field's raw value from the input mapping
//!
//! A field can carry its binding directly (descriptor style, see
//! [`from_field`](crate::schema::from_field)) or through its declared type
//! (annotation style, see [`TypeDesc::sourced`]). When both are present the
//! field's own binding wins.
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use super::binding::{lookup, SourceBinding};
use crate::schema::FieldSpec;
use crate::types::{is_annotated, Annotation, TypeDesc};
use crate::value::{Map, Value};
use crate::{Error, Result};

/// The single source binding carried by an annotated type
///
/// The annotation's metadata must consist of exactly one
/// [`Annotation::Source`]; anything else is a schema error.
pub fn extract(annotated: &TypeDesc) -> Result<&SourceBinding> {
    let metadata = match annotated {
        TypeDesc::Annotated { metadata, .. } => metadata,
        _ => {
            return Err(Error::shape_of(
                "source binding requested from a type without annotations",
                annotated.to_string(),
            ))
        }
    };
    match metadata.as_slice() {
        [Annotation::Source(binding)] => Ok(binding),
        _ => Err(Error::shape_of(
            format!(
                "annotation must carry exactly one source binding, found {} metadata item(s)",
                metadata.len()
            ),
            annotated.to_string(),
        )),
    }
}

/// The binding that applies to `field`, if any
///
/// Without a binding on the field, only the field's own plain type takes the
/// default path. Any other `declared` type goes through [`extract`], so an
/// annotation without exactly one source binding is a schema error.
pub fn resolve_binding<'a>(declared: &'a TypeDesc, field: &'a FieldSpec) -> Result<Option<&'a SourceBinding>> {
    if let Some(binding) = field.binding() {
        return Ok(Some(binding));
    }
    if declared == field.ty() && !is_annotated(declared) {
        return Ok(None);
    }
    extract(declared).map(Some)
}

/// Locate the raw value for `field` in `data`
///
/// 1. a binding stored on the field itself
/// 2. `declared` is the field's own plain type: the key named like the field
/// 3. the binding extracted from `declared`
pub fn rewrite(declared: &TypeDesc, field: &FieldSpec, data: &Map) -> Result<Value> {
    match resolve_binding(declared, field)? {
        Some(binding) => {
            log::trace!("field '{}' reads {}", field.name(), binding);
            binding.rewrite(data)
        }
        None => lookup(data, field.name()),
    }
}

//! The conversion driver
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

use super::config::Config;
use super::factory::{RecordBuilder, RecordFactory, SerdeFactory};
use crate::rewrites::{resolve_binding, rewrite};
use crate::schema::{FieldSpec, RecordSchema};
use crate::types::{
    extract_optional, has_source_annotation, is_instance, is_optional, strip_annotations,
    transform_value, Origin, TypeDesc,
};
use crate::types::predicates::type_arg;
use crate::value::{Map, Record, Set, Value};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::time::Instant;

/// Convert raw input into a [`Record`] of `schema`
///
/// # Errors
///
/// Data problems (missing fields, wrong types, unmatched unions, unexpected
/// keys in strict mode) carry the dotted path of the offending field. Schema
/// problems, such as an annotation with two source bindings, surface as
/// [`Error::Shape`].
///
/// # Example
///
/// ```
/// use shapecast_core::{from_raw, from_field, Config, Map, RecordSchema, TypeDesc, Value};
///
/// # fn example() -> shapecast_core::Result<()> {
/// let schema = RecordSchema::new(
///     "Item",
///     vec![from_field("type_", TypeDesc::int(), "type").build()?],
/// )?;
/// let data = Map::from_json_str(r#"{"type": 123}"#)?;
///
/// let item = from_raw(&schema, &data, &Config::default())?;
/// assert_eq!(item.get("type_"), Some(&Value::Int(123)));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn from_raw(schema: &RecordSchema, data: &Map, config: &Config) -> Result<Record> {
    from_raw_with(&RecordBuilder, schema, data, config)
}

/// Convert raw input and hand the converted fields to `factory`
pub fn from_raw_with<F: RecordFactory>(
    factory: &F,
    schema: &RecordSchema,
    data: &Map,
    config: &Config,
) -> Result<F::Output> {
    let start_time = Instant::now();

    let fields = convert_fields(schema, data, config)?;
    let field_count = fields.len();
    let output = factory.build(schema, fields)?;

    tracing::debug!(
        record = schema.name(),
        fields = field_count,
        elapsed_us = start_time.elapsed().as_micros() as u64,
        "converted record"
    );
    Ok(output)
}

/// Convert raw input straight into a `serde` deserializable type
pub fn from_raw_into<T: DeserializeOwned>(schema: &RecordSchema, data: &Map, config: &Config) -> Result<T> {
    from_raw_with(&SerdeFactory::<T>::new(), schema, data, config)
}

fn convert_fields(schema: &RecordSchema, data: &Map, config: &Config) -> Result<Vec<(String, Value)>> {
    if config.options.strict {
        check_unexpected_keys(schema, data)?;
    }

    let mut values = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        // Non-init fields are never read from the input, only defaulted.
        if !field.init() {
            if let Some(default) = field.default_value() {
                values.push((field.name().to_string(), default));
            }
            continue;
        }
        let value = convert_field(field, data, config).map_err(|e| e.at_field(field.name()))?;
        values.push((field.name().to_string(), value));
    }
    Ok(values)
}

fn convert_field(field: &FieldSpec, data: &Map, config: &Config) -> Result<Value> {
    let declared = field.ty();

    let raw = match rewrite(declared, field, data) {
        Ok(raw) => raw,
        Err(Error::MissingKey { path, key }) => {
            if let Some(default) = field.default_value() {
                return Ok(default);
            }
            if is_optional(strip_annotations(declared)) {
                return Ok(Value::Null);
            }
            // A renamed source is reported by the key that was looked up.
            if field.binding().is_some() || has_source_annotation(declared) {
                return Err(Error::MissingKey { path, key });
            }
            return Err(Error::MissingValue { path });
        }
        Err(e) => return Err(e),
    };

    let transformed = transform_value(&config.transforms, declared, raw)?;
    let built = build_value(declared, transformed, config, true)?;

    if config.options.check_types && !is_instance(&built, declared) {
        return Err(Error::WrongType {
            path: String::new(),
            expected: declared.to_string(),
            actual: built.type_name(),
        });
    }
    Ok(built)
}

/// Shape an already transformed value after its declared type
///
/// Nested records are converted from maps, unions pick an alternative, and
/// containers are rebuilt item by item. JSON has no tuples or sets, so lists
/// are turned into those when the declared container asks for them.
///
/// `transforms_pending` is false below a type that has its own table entry.
/// `transform_value` stopped there, so union alternatives under it must not
/// be transformed again.
fn build_value(ty: &TypeDesc, value: Value, config: &Config, transforms_pending: bool) -> Result<Value> {
    let pending = transforms_pending && !config.transforms.contains(ty);
    match ty {
        TypeDesc::Annotated { base, .. } => build_value(base, value, config, pending),
        TypeDesc::NewType(nt) => build_value(&nt.base, value, config, pending),
        TypeDesc::Union(_) if is_optional(ty) => {
            if value.is_null() {
                Ok(value)
            } else {
                build_value(extract_optional(ty)?, value, config, pending)
            }
        }
        TypeDesc::Union(alternatives) => build_union(ty, alternatives, value, config, pending),
        TypeDesc::Record(schema) => match value {
            Value::Map(map) => {
                let fields = convert_fields(schema, &map, config)?;
                Ok(Value::Record(RecordBuilder.build(schema, fields)?))
            }
            other => Ok(other),
        },
        TypeDesc::Generic { origin, args } if origin.is_container() => {
            build_collection(origin, args, value, config, pending)
        }
        _ => Ok(value),
    }
}

fn build_union(
    ty: &TypeDesc,
    alternatives: &[TypeDesc],
    value: Value,
    config: &Config,
    pending: bool,
) -> Result<Value> {
    let mut matches = Vec::new();

    for alternative in alternatives {
        let transformed = if pending {
            transform_value(&config.transforms, alternative, value.clone())
        } else {
            Ok(value.clone())
        };
        let candidate = transformed.and_then(|t| build_value(alternative, t, config, pending));
        let candidate = match candidate {
            Ok(candidate) => candidate,
            Err(e) if e.is_shape_error() => return Err(e),
            Err(e) => {
                log::trace!("union alternative {} rejected {}: {}", alternative, value, e);
                continue;
            }
        };
        if !config.options.check_types || is_instance(&candidate, alternative) {
            if !config.options.strict_unions_match {
                return Ok(candidate);
            }
            matches.push(candidate);
        }
    }

    if matches.len() == 1 {
        return Ok(matches.remove(0));
    }

    let expected = if matches.is_empty() {
        ty.to_string()
    } else {
        format!("{} (matched {} alternatives)", ty, matches.len())
    };
    Err(Error::UnionMatch {
        path: String::new(),
        expected,
        value: value.to_string(),
    })
}

fn build_collection(
    origin: &Origin,
    args: &[TypeDesc],
    value: Value,
    config: &Config,
    pending: bool,
) -> Result<Value> {
    let item_type = type_arg(args, 0);
    let fixed_arity = *origin == Origin::Tuple && args.len() > 1;

    match value {
        Value::Map(map) if origin.is_mapping() => {
            let key_type = type_arg(args, 0);
            let value_type = type_arg(args, 1);
            let mut out = Map::new();
            for (k, v) in map {
                out.insert(
                    build_value(key_type, k, config, pending)?,
                    build_value(value_type, v, config, pending)?,
                );
            }
            Ok(Value::Map(out))
        }
        Value::List(items) | Value::Tuple(items) if fixed_arity => {
            if items.len() != args.len() {
                return Ok(Value::Tuple(items));
            }
            items
                .into_iter()
                .zip(args)
                .map(|(item, t)| build_value(t, item, config, pending))
                .collect::<Result<Vec<_>>>()
                .map(Value::Tuple)
        }
        Value::List(items) => {
            let items = build_items(item_type, items, config, pending)?;
            Ok(match origin {
                Origin::Tuple => Value::Tuple(items),
                Origin::Set => Value::Set(items.into_iter().collect()),
                _ => Value::List(items),
            })
        }
        Value::Tuple(items) => build_items(item_type, items, config, pending).map(Value::Tuple),
        Value::Set(set) => set
            .into_iter()
            .map(|item| build_value(item_type, item, config, pending))
            .collect::<Result<Set>>()
            .map(Value::Set),
        other => Ok(other),
    }
}

fn build_items(item_type: &TypeDesc, items: Vec<Value>, config: &Config, pending: bool) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| build_value(item_type, item, config, pending))
        .collect()
}

fn check_unexpected_keys(schema: &RecordSchema, data: &Map) -> Result<()> {
    let mut consumed: Vec<&str> = Vec::new();
    for field in schema.fields().iter().filter(|f| f.init()) {
        match resolve_binding(field.ty(), field)? {
            Some(binding) => consumed.extend(binding.source_keys()),
            None => consumed.push(field.name()),
        }
    }

    let keys: Vec<String> = data
        .keys()
        .filter(|k| !k.as_str().is_some_and(|k| consumed.contains(&k)))
        .map(|k| k.as_str().map_or_else(|| k.to_string(), str::to_string))
        .collect();

    if keys.is_empty() {
        Ok(())
    } else {
        Err(Error::UnexpectedData { keys })
    }
}

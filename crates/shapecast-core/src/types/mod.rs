//! Declared types, structural predicates and the transform engine
//!
//! This module is the heart of Shapecast: it decides, for a declared type and
//! a raw value, whether the value conforms and how it must be converted.
//!
//! # Module Organization
//!
//! - [`descriptor`] - the [`TypeDesc`] declared type and its building blocks
//! - [`predicates`] - pure classification functions and [`is_instance`]
//! - [`transform`] - [`TransformTable`] and [`transform_value`]
//! - [`built_in`] - ready-made transforms for common conversions
//!
//! # Examples
//!
//! ```
//! use shapecast_core::types::{built_in, transform_value, TransformTable, TypeDesc};
//! use shapecast_core::Value;
//!
//! let transforms = TransformTable::new().with_arc(TypeDesc::str(), built_in::to_str());
//! let value = Value::List(vec![Value::Int(1), Value::Int(2)]);
//!
//! let converted = transform_value(&transforms, &TypeDesc::list(TypeDesc::str()), value).unwrap();
//! assert_eq!(converted, Value::List(vec![Value::from("1"), Value::from("2")]));
//! ```
//!
//! Copyright (c) 2025 Shapecast Team
//! Licensed under the Apache-2.0 license

pub mod descriptor;
pub mod predicates;
pub mod transform;
pub mod built_in;


pub use descriptor::{Annotation, EnumMember, EnumType, NewTypeDef, Origin, Primitive, TypeDesc};
pub use predicates::{
    extract_generic, extract_new_type, extract_optional, extract_origin_collection,
    has_source_annotation, is_annotated, is_enum, is_generic, is_generic_collection,
    is_instance, is_literal, is_new_type, is_optional, is_record, is_union, strip_annotations,
};
pub use transform::{transform_value, TransformFn, TransformTable};
